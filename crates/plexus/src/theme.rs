//! Theme detection for the terminal host.

use plexus_core::{Theme, ThemeMode, ThemeSource};

/// Environment variable many terminals set to `"<fg>;<bg>"` palette indices.
const COLORFGBG: &str = "COLORFGBG";

/// Theme source driven by the user's mode and the terminal background.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalTheme {
    pub mode: ThemeMode,
}

impl TerminalTheme {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    /// Cycle through auto, dark and light.
    pub fn cycle(&mut self) {
        self.mode = self.mode.next();
    }
}

impl ThemeSource for TerminalTheme {
    fn is_dark(&self) -> bool {
        match self.mode.forced() {
            Some(theme) => theme == Theme::Dark,
            None => background_is_dark(std::env::var(COLORFGBG).ok().as_deref()),
        }
    }
}

/// Interpret a `COLORFGBG` value. Unknown or missing values count as dark.
pub fn background_is_dark(colorfgbg: Option<&str>) -> bool {
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        // Indices 0-6 and 8 are the dark entries of the 16-color palette.
        Some(index) => index < 7 || index == 8,
        None => true,
    }
}
