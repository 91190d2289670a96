//! Skyturn binary: drives the starfield against the headless host.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p skyturn-app -- --scheme Basic --frames 600`.

use clap::Parser;
use skyturn_app::app::{self, AppError, ConfigWatcher};
use skyturn_app::frame_loop::{FrameLoop, MonotonicClock};
use skyturn_app::headless::HeadlessHost;
use skyturn_app::platform::PlatformDirs;
use skyturn_config::{CliArgs, Config};
use tracing::{error, info};

fn start(args: CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve_or(args.config.as_deref())?;
    dirs.create_dirs()?;

    // Load or create config, then apply CLI overrides
    let on_disk = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args);

    skyturn_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %dirs.config_dir.display(), "Skyturn starting");

    let mut driver = app::build_driver(&config)?;
    let mut host = HeadlessHost::new();
    let mut frame_loop = FrameLoop::new(MonotonicClock::new(), config.view.target_fps);
    let max_frames = args.frames;
    let watcher = ConfigWatcher::new(dirs.config_dir.clone(), on_disk, args);

    app::run(
        &mut driver,
        &mut host,
        &mut frame_loop,
        config,
        Some(watcher),
        max_frames,
    )?;

    info!(
        draws = host.draws(),
        misaligned = host.misaligned_draws(),
        spin = host.spin_angle(),
        "Headless host summary"
    );
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = start(args) {
        error!("{e}");
        eprintln!("skyturn: {e}");
        std::process::exit(1);
    }
}
