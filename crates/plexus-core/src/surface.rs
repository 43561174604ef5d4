//! Drawing surface contract and host queries.

use crate::color::Rgba;
use crate::geometry::{Point, Size};

/// Immediate-mode 2D drawing primitives a particle field needs.
pub trait Surface {
    /// Match the backing store to a new viewport size. Previous content is
    /// undefined afterwards.
    fn set_size(&mut self, _size: Size) {}

    /// Erase the rectangle starting at `origin`.
    fn clear_rect(&mut self, origin: Point, size: Size);

    /// Draw a filled disc.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Draw a straight line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn set_size(&mut self, size: Size) {
        (**self).set_size(size);
    }

    fn clear_rect(&mut self, origin: Point, size: Size) {
        (**self).clear_rect(origin, size);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        (**self).fill_circle(center, radius, color);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        (**self).stroke_line(from, to, color, width);
    }
}

/// Locates a drawing surface by identifier.
pub trait SurfaceLookup {
    type Surface: Surface;

    /// Returns `None` when no surface with this identifier exists.
    fn acquire(&mut self, id: &str) -> Option<Self::Surface>;
}

/// Source of the current viewport size in surface pixels.
pub trait Viewport {
    fn size(&self) -> Size;
}

impl Viewport for Size {
    fn size(&self) -> Size {
        *self
    }
}

/// A single recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        origin: Point,
        size: Size,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
}

impl DrawCommand {
    /// Axis-aligned bounds as `(min, max)` corners.
    fn bounds(&self) -> (Point, Point) {
        match *self {
            DrawCommand::Clear { origin, size } => (
                origin,
                Point::new(origin.x + size.width, origin.y + size.height),
            ),
            DrawCommand::Circle { center, radius, .. } => (
                Point::new(center.x - radius, center.y - radius),
                Point::new(center.x + radius, center.y + radius),
            ),
            DrawCommand::Line { from, to, .. } => (
                Point::new(from.x.min(to.x), from.y.min(to.y)),
                Point::new(from.x.max(to.x), from.y.max(to.y)),
            ),
        }
    }
}

/// A [`Surface`] that keeps the drawing calls visible since the last clear.
///
/// Clearing a rectangle drops every earlier command whose bounds touch it.
/// Once sized, a clear covering the whole surface drops everything, including
/// shapes drawn entirely off the surface, so a full clear at the start of a
/// frame leaves exactly that frame's commands behind.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    size: Option<Size>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded discs as `(center, radius, color)`.
    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            _ => None,
        })
    }

    /// Recorded segments as `(from, to, color, width)`.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Rgba, f64)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => Some((from, to, color, width)),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn set_size(&mut self, size: Size) {
        self.size = Some(size);
        self.commands.clear();
    }

    fn clear_rect(&mut self, origin: Point, size: Size) {
        let clear = DrawCommand::Clear { origin, size };
        let (min, max) = clear.bounds();
        let covers_surface = self.size.is_some_and(|surface| {
            min.x <= 0.0 && min.y <= 0.0 && max.x >= surface.width && max.y >= surface.height
        });
        if covers_surface {
            self.commands.clear();
        } else {
            self.commands.retain(|command| {
                let (lo, hi) = command.bounds();
                hi.x < min.x || lo.x > max.x || hi.y < min.y || lo.y > max.y
            });
        }
        self.commands.push(clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
