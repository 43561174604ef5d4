//! Core types shared across the plexus crates.
//!
//! Geometry, colors, theme palettes and the field tunables live here, along
//! with the small set of traits a host implements to put a particle field
//! on screen: a drawing [`Surface`], a [`SurfaceLookup`] to find it, a
//! [`Viewport`] to size it and a [`ThemeSource`] to pick its palette.

mod color;
mod config;
mod geometry;
mod surface;
mod theme;

pub use color::{ParseColorError, Rgba};
pub use config::FieldConfig;
pub use geometry::{Point, Size};
pub use surface::{DrawCommand, Recorder, Surface, SurfaceLookup, Viewport};
pub use theme::{Palette, Theme, ThemeMode, ThemePalettes, ThemeSource};
