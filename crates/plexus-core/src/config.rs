//! Particle field tunables.

use serde::{Deserialize, Serialize};

use crate::theme::ThemePalettes;

/// Tunables of a particle field. Fixed once the field is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface area (px²) per particle.
    pub density_divisor: f64,
    /// Particles closer than this are joined by a line.
    pub connection_distance: f64,
    /// Velocity components are drawn from `[-base_speed / 2, base_speed / 2]`.
    pub base_speed: f64,
    /// Pointer interaction radius.
    pub pointer_radius: f64,
    /// Nudge in pixels applied at zero distance from the pointer.
    pub repulsion_strength: f64,
    /// Stroke width of connection lines.
    pub line_width: f64,
    pub palettes: ThemePalettes,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density_divisor: 15_000.0,
            connection_distance: 120.0,
            base_speed: 0.8,
            pointer_radius: 150.0,
            repulsion_strength: 5.0,
            line_width: 1.0,
            palettes: ThemePalettes::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config: FieldConfig = toml::from_str(
            r##"
            connection_distance = 90.0

            [palettes.light]
            particle = "#333333"
            line = "rgba(0, 0, 0, 0.1)"
            background = "rgb(255, 255, 255)"
            "##,
        )
        .unwrap();

        assert_eq!(config.connection_distance, 90.0);
        assert_eq!(config.density_divisor, 15_000.0);
        assert_eq!(config.palettes.light.particle, Rgba::rgb(0x33, 0x33, 0x33));
        assert_eq!(config.palettes.dark, ThemePalettes::default().dark);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let result: Result<FieldConfig, _> = toml::from_str(
            r##"
            [palettes.dark]
            particle = "bright"
            line = "#000000"
            background = "#000000"
            "##,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("bright"), "{err}");
    }
}
