//! Esplanade - headless scene runtime
//!
//! Loads a world asset, assembles the scene, and keeps the ambient motion
//! running until interrupted (or for a bounded duration).

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use esplanade_assets::load_world;
use esplanade_scene::{assemble, load_config, LogTeleport};

#[derive(Parser, Debug)]
#[command(name = "esplanade")]
#[command(about = "VR world scene assembly and ambient motion runtime")]
#[command(version)]
struct Args {
    /// Path to the world asset (glTF/GLB)
    world: PathBuf,

    /// Path to configuration file
    #[arg(short, long, default_value = "esplanade.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Run for a fixed number of seconds, then shut down
    #[arg(long)]
    run_for: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Esplanade v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args.config)?;

    // A load failure is fatal: no partial scene is shown
    let world = load_world(&args.world).await?;
    if let Some(root) = world.root_name() {
        info!(root = %root, "World root identified");
    }

    let scene = assemble(world, &config, &LogTeleport, &mut rand::thread_rng())?;
    info!(
        floors = scene.floor_count(),
        props = scene.prop_count(),
        "Scene running"
    );

    match args.run_for {
        Some(secs) => {
            info!(seconds = secs, "Bounded run");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
        None => {
            info!("Press Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
        }
    }

    scene.shutdown();
    info!("Scene torn down");
    Ok(())
}
