//! Configuration file handling for plexus.
//!
//! Settings live in `config.toml` inside the platform configuration
//! directory. Every key is optional; anything left out keeps its default.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, bail};
use directories::ProjectDirs;
use plexus_core::{FieldConfig, Size, ThemeMode};
use serde::{Deserialize, Serialize};

/// File name looked up inside the configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Virtual pixels covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

impl CellSize {
    /// Surface size of a `columns` x `rows` terminal.
    pub fn surface(&self, columns: u16, rows: u16) -> Size {
        Size::new(
            f64::from(columns) * self.width,
            f64::from(rows) * self.height,
        )
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Particle field tunables.
    pub field: FieldConfig,
    /// Theme preference.
    pub theme: ThemeMode,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    pub cell: CellSize,
    /// Fixed random seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            theme: ThemeMode::default(),
            frame_interval_ms: 16,
            cell: CellSize::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Location of the configuration file for this platform, if one exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "plexus").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents)
                .wrap_err_with(|| format!("invalid config file {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => {
                Err(err).wrap_err_with(|| format!("failed to read {}", path.display()))
            }
        }
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let field = &self.field;
        let tunables = [
            ("density_divisor", field.density_divisor),
            ("connection_distance", field.connection_distance),
            ("base_speed", field.base_speed),
            ("pointer_radius", field.pointer_radius),
            ("repulsion_strength", field.repulsion_strength),
            ("line_width", field.line_width),
        ];
        if let Some((name, _)) = tunables.iter().find(|(_, value)| !value.is_finite()) {
            bail!("field.{name} must be a finite number");
        }
        if !(field.density_divisor > 0.0) {
            bail!("field.density_divisor must be positive");
        }
        if !(field.pointer_radius > 0.0) {
            bail!("field.pointer_radius must be positive");
        }
        if field.connection_distance < 0.0 || field.base_speed < 0.0 {
            bail!("field.connection_distance and field.base_speed must not be negative");
        }
        if self.frame_interval_ms == 0 {
            bail!("frame_interval_ms must be at least 1");
        }
        if !(self.cell.width.is_finite() && self.cell.height.is_finite()) {
            bail!("cell.width and cell.height must be finite numbers");
        }
        if !(self.cell.width > 0.0 && self.cell.height > 0.0) {
            bail!("cell.width and cell.height must be positive");
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use plexus_core::Rgba;

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeMode::Auto);
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.field.density_divisor, 15_000.0);
        assert_eq!(config.cell.surface(100, 50), Size::new(800.0, 800.0));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_partial_overrides() {
        let config = Config::parse(
            r##"
            theme = "light"
            seed = 99
            frame_interval_ms = 33

            [field]
            repulsion_strength = 8.0

            [field.palettes.dark]
            particle = "#ff0000"
            line = "rgba(255, 0, 0, 0.3)"
            background = "#000000"

            [cell]
            height = 20.0
            "##,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.field.repulsion_strength, 8.0);
        assert_eq!(config.field.connection_distance, 120.0);
        assert_eq!(config.field.palettes.dark.particle, Rgba::rgb(255, 0, 0));
        assert_eq!(
            config.cell,
            CellSize {
                width: 8.0,
                height: 20.0
            }
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::parse("theme = \"sepia\"").is_err());
        assert!(Config::parse("frame_interval_ms = 0").is_err());
        assert!(Config::parse("[field]\ndensity_divisor = 0.0").is_err());
        assert!(Config::parse("[field]\npointer_radius = -1.0").is_err());
        assert!(Config::parse("[cell]\nwidth = 0.0").is_err());
        assert!(Config::parse("seed = \"abc\"").is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        for toml in [
            "[field]\nbase_speed = nan",
            "[field]\nconnection_distance = nan",
            "[field]\nrepulsion_strength = -nan",
            "[field]\ndensity_divisor = inf",
            "[field]\nline_width = -inf",
            "[cell]\nheight = inf",
        ] {
            let err = Config::parse(toml).unwrap_err();
            assert!(format!("{err:?}").contains("finite"), "{toml}: {err:?}");
        }
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let path = std::env::temp_dir().join("plexus-missing-config-7f3a.toml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:?}").contains("failed to read"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("plexus-config-{}.toml", std::process::id()));
        fs::write(&path, "theme = \"dark\"\n").unwrap();
        let config = Config::load_from(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().theme, ThemeMode::Dark);
    }
}
