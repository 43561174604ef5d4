//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use plexus_config::Config;
use plexus_core::ThemeMode;

/// An interactive particle network backdrop for the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Read settings from this file instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Theme: auto, dark or light.
    #[arg(short, long, value_name = "MODE")]
    pub theme: Option<ThemeMode>,

    /// Seed for the particle layout.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Target frames per second.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,
}

impl Cli {
    /// Load the configuration file and apply command line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.frame_interval_ms = u64::from(1000 / fps).max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let cli = Cli::try_parse_from(["plexus", "--theme", "light", "--seed", "5", "--fps", "30"])
            .unwrap();
        let mut config = Config::default();
        config.theme = ThemeMode::Dark;
        cli.apply(&mut config);

        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.frame_interval_ms, 33);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["plexus"]).unwrap();
        let mut config = Config::default();
        config.seed = Some(3);
        cli.apply(&mut config);
        assert_eq!(
            config,
            Config {
                seed: Some(3),
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["plexus", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["plexus", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let cli = Cli::try_parse_from(["plexus", "--config", "/nonexistent/plexus.toml"]).unwrap();
        assert!(cli.load_config().is_err());
    }
}
