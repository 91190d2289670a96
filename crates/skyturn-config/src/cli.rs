//! Command-line argument parsing for Skyturn.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Skyturn command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "skyturn", about = "Rotating starfield")]
pub struct CliArgs {
    /// Color scheme name (e.g. "Basic", "Catppuccin Mocha").
    #[arg(long)]
    pub scheme: Option<String>,

    /// Sky rotation rate in degrees per second.
    #[arg(long, allow_hyphen_values = true)]
    pub rotation_rate: Option<f64>,

    /// RON star catalog file.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Stop after this many frames (runs until interrupted otherwise).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref scheme) = args.scheme {
            self.sky.color_scheme = scheme.clone();
        }
        if let Some(rate) = args.rotation_rate {
            self.sky.rotation_rate_deg_per_s = rate;
        }
        if let Some(ref path) = args.catalog {
            self.sky.catalog_path = Some(path.clone());
        }
        if let Some(w) = args.width {
            self.view.width = w;
        }
        if let Some(h) = args.height {
            self.view.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> CliArgs {
        CliArgs {
            scheme: None,
            rotation_rate: None,
            catalog: None,
            width: None,
            height: None,
            frames: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            scheme: Some("Basic".to_string()),
            width: Some(1920),
            ..no_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.sky.color_scheme, "Basic");
        assert_eq!(config.view.width, 1920);
        // Non-overridden fields retain defaults
        assert_eq!(config.view.height, 720);
        assert_eq!(config.sky.rotation_rate_deg_per_s, 0.5);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = CliArgs::parse_from([
            "skyturn",
            "--scheme",
            "Catppuccin Mocha",
            "--rotation-rate",
            "-2.5",
            "--catalog",
            "stars.ron",
            "--frames",
            "120",
        ]);
        assert_eq!(args.scheme.as_deref(), Some("Catppuccin Mocha"));
        assert_eq!(args.rotation_rate, Some(-2.5));
        assert_eq!(args.catalog, Some(PathBuf::from("stars.ron")));
        assert_eq!(args.frames, Some(120));

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.sky.rotation_rate_deg_per_s, -2.5);
        assert_eq!(config.sky.catalog_path, Some(PathBuf::from("stars.ron")));
    }
}
