//! Theme selection and per-theme color palettes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Visual theme of the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// Colors used to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Fill color of particle discs.
    pub particle: Rgba,
    /// Stroke color of connection lines.
    pub line: Rgba,
    /// Backdrop color for hosts that paint their own background.
    pub background: Rgba,
}

/// One palette per theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePalettes {
    pub dark: Palette,
    pub light: Palette,
}

impl ThemePalettes {
    pub fn get(&self, theme: Theme) -> Palette {
        match theme {
            Theme::Dark => self.dark,
            Theme::Light => self.light,
        }
    }
}

impl Default for ThemePalettes {
    fn default() -> Self {
        Self {
            dark: Palette {
                particle: Rgba::rgba(102, 126, 234, 0.8),
                line: Rgba::rgba(102, 126, 234, 0.2),
                background: Rgba::rgb(11, 13, 23),
            },
            light: Palette {
                particle: Rgba::rgba(100, 100, 100, 0.5),
                line: Rgba::rgba(0, 0, 0, 0.05),
                background: Rgba::rgb(245, 245, 247),
            },
        }
    }
}

/// External "is dark mode active?" query, polled once per frame.
pub trait ThemeSource {
    fn is_dark(&self) -> bool;

    fn theme(&self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl ThemeSource for bool {
    fn is_dark(&self) -> bool {
        *self
    }
}

impl ThemeSource for Theme {
    fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl<F: Fn() -> bool> ThemeSource for F {
    fn is_dark(&self) -> bool {
        self()
    }
}

/// User preference for picking the theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the host's reported background.
    #[default]
    Auto,
    Dark,
    Light,
}

impl ThemeMode {
    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Auto => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Auto,
        }
    }

    /// The theme this mode pins, or `None` for [`ThemeMode::Auto`].
    pub fn forced(self) -> Option<Theme> {
        match self {
            ThemeMode::Auto => None,
            ThemeMode::Dark => Some(Theme::Dark),
            ThemeMode::Light => Some(Theme::Light),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        })
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ThemeMode::Auto),
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(format!(
                "unknown theme mode {other:?} (expected auto, dark or light)"
            )),
        }
    }
}
