//! Startup and the driver loop: config to starfield, then frames until done.

use std::path::PathBuf;
use std::time::Instant;

use skyturn_config::{CliArgs, Config, ConfigError, SkyConfig, ViewConfig};
use skyturn_sky::{
    CatalogGenerator, FrameDriver, PaletteTable, Projection, SceneHost, SkyError, StarCatalog,
    Starfield,
};
use tracing::{info, warn};

use crate::frame_loop::{Clock, FrameLoop};
use crate::platform::PlatformError;

/// Errors that stop the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sky(#[from] SkyError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Load the configured catalog file, or generate one when none is set.
pub fn load_catalog(sky: &SkyConfig) -> Result<StarCatalog, SkyError> {
    match &sky.catalog_path {
        Some(path) => StarCatalog::load(path),
        None => Ok(CatalogGenerator::new(sky.seed, sky.generated_star_count).generate()),
    }
}

/// Projection for the configured viewport and field of view.
pub fn projection_for(view: &ViewConfig) -> Projection {
    Projection::from_viewport(
        view.width,
        view.height,
        view.horizontal_fov_deg,
        view.near,
        view.far,
    )
}

/// Build the frame driver described by `config`.
///
/// Fails before anything is rendered if the catalog is misaligned or the
/// color scheme is unknown.
pub fn build_driver(config: &Config) -> Result<FrameDriver, SkyError> {
    let catalog = load_catalog(&config.sky)?;
    let starfield = Starfield::new(catalog, PaletteTable::builtin(), config.active_properties())?;
    let view = &config.view;
    Ok(
        FrameDriver::new(starfield, projection_for(view), view.tilt_deg.to_radians())
            .with_point_size(view.point_size),
    )
}

/// Polls `config.ron` for edits, re-applying CLI overrides to what it reads.
pub struct ConfigWatcher {
    config_dir: PathBuf,
    on_disk: Config,
    overrides: CliArgs,
    interval_ms: f64,
    last_check_ms: f64,
}

impl ConfigWatcher {
    /// Watch `config_dir`, whose current contents are `on_disk`.
    pub fn new(config_dir: PathBuf, on_disk: Config, overrides: CliArgs) -> Self {
        let interval_ms = on_disk.debug.config_poll_seconds * 1000.0;
        Self {
            config_dir,
            on_disk,
            overrides,
            interval_ms,
            last_check_ms: 0.0,
        }
    }

    /// Returns the effective config if the file changed since the last check.
    ///
    /// Unreadable or unparsable files are logged and skipped; the file may be
    /// mid-edit.
    pub fn poll(&mut self, now_ms: f64) -> Option<Config> {
        if self.interval_ms <= 0.0 || now_ms - self.last_check_ms < self.interval_ms {
            return None;
        }
        self.last_check_ms = now_ms;

        match self.on_disk.reload(&self.config_dir) {
            Ok(Some(on_disk)) => {
                self.interval_ms = on_disk.debug.config_poll_seconds * 1000.0;
                self.on_disk = on_disk.clone();
                let mut effective = on_disk;
                effective.apply_cli_overrides(&self.overrides);
                Some(effective)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring config reload: {e}");
                None
            }
        }
    }
}

/// Settings that changed between `previous` and `next` but are only read at
/// startup.
pub fn restart_only_changes(previous: &Config, next: &Config) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if next.view.tilt_deg != previous.view.tilt_deg {
        fields.push("view.tilt_deg");
    }
    if next.debug.log_level != previous.debug.log_level {
        fields.push("debug.log_level");
    }
    fields
}

/// Push config changes into the driver.
///
/// A new catalog source is loaded before anything is touched, so a bad
/// catalog or scheme leaves the scene as it was.
pub fn apply_config(
    driver: &mut FrameDriver,
    host: &mut impl SceneHost,
    previous: &Config,
    next: &Config,
) -> Result<(), SkyError> {
    let (old_sky, new_sky) = (&previous.sky, &next.sky);
    let catalog = if (&new_sky.catalog_path, new_sky.seed, new_sky.generated_star_count)
        != (&old_sky.catalog_path, old_sky.seed, old_sky.generated_star_count)
    {
        Some(load_catalog(new_sky)?)
    } else {
        None
    };

    if driver.apply_properties(host, next.active_properties())? {
        info!("Recolored stars with scheme {:?}", new_sky.color_scheme);
    }
    if let Some(catalog) = catalog {
        driver.replace_catalog(host, catalog);
    }

    let (old_view, new_view) = (&previous.view, &next.view);
    let projection_key = |v: &ViewConfig| (v.width, v.height, v.horizontal_fov_deg, v.near, v.far);
    if projection_key(new_view) != projection_key(old_view) {
        driver.set_projection(host, projection_for(new_view));
    }
    if new_view.point_size != old_view.point_size {
        driver.set_point_size(host, new_view.point_size);
    }

    let pending = restart_only_changes(previous, next);
    if !pending.is_empty() {
        warn!(fields = ?pending, "Config changes take effect after restart");
    }
    Ok(())
}

/// Run frames until `max_frames` is reached (forever if `None`).
///
/// Scheme errors from a reloaded config abort the run, same as at startup.
pub fn run<C: Clock>(
    driver: &mut FrameDriver,
    host: &mut impl SceneHost,
    frame_loop: &mut FrameLoop<C>,
    mut config: Config,
    mut watcher: Option<ConfigWatcher>,
    max_frames: Option<u64>,
) -> Result<(), AppError> {
    driver.attach(host);
    info!(
        stars = driver.starfield().catalog().len(),
        scheme = %driver.starfield().properties().color_scheme,
        "Starfield attached"
    );

    while max_frames.is_none_or(|max| frame_loop.frame_count() < max) {
        let started = Instant::now();

        if let Some(next) = watcher
            .as_mut()
            .and_then(|w| w.poll(frame_loop.last_timestamp_ms()))
        {
            apply_config(driver, host, &config, &next)?;
            if next.view.target_fps != config.view.target_fps {
                frame_loop.set_target_fps(next.view.target_fps);
            }
            config = next;
        }

        frame_loop.tick(|timestamp_ms| {
            driver.frame(&mut *host, timestamp_ms);
        });

        let delay = frame_loop.pacing_delay(started.elapsed());
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    info!(frames = driver.frame_count(), "Run finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_loop::ManualClock;
    use crate::headless::HeadlessHost;
    use clap::Parser;

    fn no_overrides() -> CliArgs {
        CliArgs::parse_from(["skyturn"])
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.sky.generated_star_count = 50;
        config.view.target_fps = 0;
        config
    }

    #[test]
    fn test_build_driver_generates_catalog() {
        let driver = build_driver(&small_config()).unwrap();
        assert_eq!(driver.starfield().catalog().len(), 50);
        assert_eq!(driver.starfield().colors().len(), 50);
    }

    #[test]
    fn test_build_driver_unknown_scheme() {
        let mut config = small_config();
        config.sky.color_scheme = "nonexistent".to_string();
        assert!(matches!(
            build_driver(&config),
            Err(SkyError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_build_driver_misaligned_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.ron");
        std::fs::write(
            &path,
            "(coordinates: [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0], magnitudes: [1.0, 2.0])",
        )
        .unwrap();
        let mut config = small_config();
        config.sky.catalog_path = Some(path);
        assert!(matches!(
            build_driver(&config),
            Err(SkyError::MisalignedCatalog {
                positions: 3,
                magnitudes: 2
            })
        ));
    }

    #[test]
    fn test_run_fixed_frame_count() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        let mut frame_loop = FrameLoop::new(ManualClock::new(16.0), 0);

        run(&mut driver, &mut host, &mut frame_loop, config, None, Some(10)).unwrap();

        assert_eq!(host.draws(), 10);
        assert_eq!(driver.frame_count(), 10);
        assert_eq!(frame_loop.last_timestamp_ms(), 144.0);
        assert_eq!(host.star_count(), 50);
    }

    #[test]
    fn test_watcher_applies_scheme_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.debug.config_poll_seconds = 0.001;
        config.save(dir.path()).unwrap();

        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), no_overrides());
        assert!(watcher.poll(10.0).is_none());

        let mut edited = config.clone();
        edited.sky.color_scheme = PaletteTable::BASIC.to_string();
        edited.save(dir.path()).unwrap();

        let next = watcher.poll(20.0).expect("change should be seen");
        assert_eq!(next.sky.color_scheme, "Basic");

        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        driver.attach(&mut host);
        apply_config(&mut driver, &mut host, &config, &next).unwrap();

        let palettes = PaletteTable::builtin();
        let basic = palettes.select_scheme(PaletteTable::BASIC).unwrap();
        assert_eq!(host.background(), basic.background);
        assert!(host.colors().iter().all(|c| basic.tiers.contains(c)));
    }

    #[test]
    fn test_watcher_keeps_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.debug.config_poll_seconds = 0.001;
        config.save(dir.path()).unwrap();

        let overrides = CliArgs::parse_from(["skyturn", "--scheme", "Basic"]);
        let mut watcher = ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), overrides);

        let mut edited = config.clone();
        edited.sky.rotation_rate_deg_per_s = 2.0;
        edited.sky.color_scheme = "Catppuccin Mocha".to_string();
        edited.save(dir.path()).unwrap();

        let next = watcher.poll(5.0).unwrap();
        assert_eq!(next.sky.rotation_rate_deg_per_s, 2.0);
        assert_eq!(next.sky.color_scheme, "Basic");
    }

    #[test]
    fn test_watcher_respects_interval() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.debug.config_poll_seconds = 10.0;
        config.save(dir.path()).unwrap();
        let mut watcher =
            ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), no_overrides());

        let mut edited = config.clone();
        edited.sky.color_scheme = "Basic".to_string();
        edited.save(dir.path()).unwrap();

        assert!(watcher.poll(5_000.0).is_none());
        assert!(watcher.poll(10_000.0).is_some());
    }

    #[test]
    fn test_watcher_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.debug.config_poll_seconds = 0.001;
        config.save(dir.path()).unwrap();
        let mut watcher = ConfigWatcher::new(dir.path().to_path_buf(), config, no_overrides());

        std::fs::write(dir.path().join("config.ron"), "{{broken").unwrap();
        assert!(watcher.poll(5.0).is_none());
    }

    #[test]
    fn test_apply_config_resizes() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        let mut next = config.clone();
        next.view.width = 720;
        apply_config(&mut driver, &mut host, &config, &next).unwrap();
        assert!((host.projection().unwrap().aspect_ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_apply_config_rebuilds_projection_on_fov_change() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        driver.attach(&mut host);

        let mut next = config.clone();
        next.view.horizontal_fov_deg = 30.0;
        next.view.far = 500.0;
        apply_config(&mut driver, &mut host, &config, &next).unwrap();

        let projection = host.projection().unwrap();
        assert!((projection.fov_y_deg - 30.0 * 16.0 / 9.0).abs() < 1e-4);
        assert_eq!(projection.far, 500.0);
        assert_eq!(driver.projection(), projection);
    }

    #[test]
    fn test_apply_config_pushes_point_size() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        driver.attach(&mut host);
        assert_eq!(host.point_size(), 3.0);

        let mut next = config.clone();
        next.view.point_size = 1.5;
        apply_config(&mut driver, &mut host, &config, &next).unwrap();
        assert_eq!(host.point_size(), 1.5);
        assert_eq!(driver.point_size(), 1.5);
    }

    #[test]
    fn test_apply_config_regenerates_catalog() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        driver.attach(&mut host);

        let mut next = config.clone();
        next.sky.generated_star_count = 20;
        next.sky.color_scheme = PaletteTable::BASIC.to_string();
        apply_config(&mut driver, &mut host, &config, &next).unwrap();

        assert_eq!(driver.starfield().catalog().len(), 20);
        assert_eq!(host.star_count(), 20);
        assert_eq!(host.colors().len(), 20);
        let palettes = PaletteTable::builtin();
        let basic = palettes.select_scheme(PaletteTable::BASIC).unwrap();
        assert!(host.colors().iter().all(|c| basic.tiers.contains(c)));
    }

    #[test]
    fn test_apply_config_bad_catalog_keeps_scene() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        driver.attach(&mut host);

        let dir = tempfile::tempdir().unwrap();
        let mut next = config.clone();
        next.sky.catalog_path = Some(dir.path().join("absent.ron"));
        next.sky.color_scheme = PaletteTable::BASIC.to_string();
        let result = apply_config(&mut driver, &mut host, &config, &next);

        assert!(matches!(result, Err(SkyError::CatalogRead(_))));
        assert_eq!(host.star_count(), 50);
        assert_eq!(
            driver.starfield().properties().color_scheme,
            PaletteTable::CATPPUCCIN_MOCHA
        );
    }

    #[test]
    fn test_restart_only_changes() {
        let config = small_config();
        let mut next = config.clone();
        assert!(restart_only_changes(&config, &next).is_empty());

        next.view.tilt_deg = 0.0;
        next.debug.log_level = "debug".to_string();
        next.view.horizontal_fov_deg = 40.0;
        assert_eq!(
            restart_only_changes(&config, &next),
            vec!["view.tilt_deg", "debug.log_level"]
        );
    }

    #[test]
    fn test_run_applies_reloaded_frame_rate() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.debug.config_poll_seconds = 0.001;
        let watcher = ConfigWatcher::new(dir.path().to_path_buf(), config.clone(), no_overrides());

        let mut edited = config.clone();
        edited.view.target_fps = 1000;
        edited.save(dir.path()).unwrap();

        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        let mut frame_loop = FrameLoop::new(ManualClock::new(16.0), config.view.target_fps);
        run(&mut driver, &mut host, &mut frame_loop, config, Some(watcher), Some(4)).unwrap();

        assert_eq!(
            frame_loop.pacing_delay(std::time::Duration::ZERO),
            std::time::Duration::from_millis(1)
        );
    }

    #[test]
    fn test_apply_config_unknown_scheme_errors() {
        let config = small_config();
        let mut driver = build_driver(&config).unwrap();
        let mut host = HeadlessHost::new();
        let mut next = config.clone();
        next.sky.color_scheme = "nonexistent".to_string();
        assert!(apply_config(&mut driver, &mut host, &config, &next).is_err());
    }
}
