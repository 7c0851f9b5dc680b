//! Example demonstrating how a build service drives the mirror
//!
//! Run with: RUST_LOG=debug cargo run --example mirror_usage [config.yaml]

use source_mirror::{config, MirrorConfig, RepositoryMirror};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // In the real service this comes from the deployment configuration
    let config = match std::env::args().nth(1) {
        Some(path) => config::load(&PathBuf::from(path))?,
        None => MirrorConfig::new(
            "https://github.com/arendst/Tasmota.git",
            "/tmp/source-mirror/Tasmota",
            "v8.1.0",
            "development",
        ),
    };
    config.validate()?;

    let mirror = RepositoryMirror::new(config);

    // Example 1: Make sure the working copy exists and is up to date
    let tags = mirror.sync_repo()?;
    println!("Found {} tags", tags.len());

    // Example 2: Versions a build may be requested for
    for tag in mirror.supported_tags()?.iter().take(10) {
        println!("  - {}", tag);
    }

    // Example 3: Prepare the working copy for a build of the edge branch
    let edge = mirror.config().edge_branch.clone();
    let checked_out = mirror.switch_to(&edge)?;
    println!("Working copy at {} is on {}", mirror.repo_path().display(), checked_out);

    Ok(())
}
