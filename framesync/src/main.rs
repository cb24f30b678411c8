//! FrameSync - time-series chart with a synchronized frame thumbnail strip.
//!
//! Loads a dataset of frame timestamps, plots it, and keeps a strip of
//! frame thumbnails in step with the chart's visible window and highlight.

use anyhow::Context;
use clap::Parser;
use iced::application;

use framesync::app::{FrameSync, WINDOW_SIZE};
use framesync::args::Args;
use framesync_common::{FrameSyncConfig, init_tracing, load_config};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, from_file) = if args.config.exists() {
        let config: FrameSyncConfig = load_config(&args.config)
            .with_context(|| format!("Failed to load {}", args.config.display()))?;
        (config, true)
    } else {
        (FrameSyncConfig::default(), false)
    };
    args.apply(&mut config);
    config.validate()?;

    init_tracing(&config.logging)?;

    if from_file {
        tracing::info!(config = %args.config.display(), "Loaded configuration");
    } else {
        tracing::info!(config = %args.config.display(), "Configuration file not found, using defaults");
    }
    tracing::info!(
        dataset = %config.dataset,
        frames_dir = %config.frames_dir.display(),
        "Starting FrameSync"
    );

    application(
        move || FrameSync::boot(config.clone()),
        FrameSync::update,
        FrameSync::view,
    )
    .title(FrameSync::title)
    .subscription(FrameSync::subscription)
    .theme(FrameSync::theme)
    .window_size(WINDOW_SIZE)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
