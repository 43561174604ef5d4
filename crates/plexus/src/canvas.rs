//! Terminal drawing surface backed by a ratatui Braille canvas.

use std::io::{self, IsTerminal};

use plexus_core::{DrawCommand, Point, Recorder, Rgba, Size, Surface, SurfaceLookup};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Painter, Shape},
    },
};

/// Identifier of the full-screen backdrop surface.
pub const BACKDROP_ID: &str = "backdrop";

/// Sampling step, in surface pixels, used to fill discs.
const DISC_SAMPLE_STEP: f64 = 1.0;

/// Hands out the backdrop surface when stdout is an interactive terminal.
#[derive(Debug)]
pub struct Screen {
    is_terminal: bool,
}

impl Screen {
    pub fn detect() -> Self {
        Self {
            is_terminal: io::stdout().is_terminal(),
        }
    }
}

impl SurfaceLookup for Screen {
    type Surface = CanvasSurface;

    fn acquire(&mut self, id: &str) -> Option<CanvasSurface> {
        (self.is_terminal && id == BACKDROP_ID).then(CanvasSurface::default)
    }
}

/// Collects one frame of drawing calls for replay onto a [`Canvas`].
#[derive(Debug, Default)]
pub struct CanvasSurface {
    recorder: Recorder,
    size: Size,
}

impl CanvasSurface {
    pub fn commands(&self) -> &[DrawCommand] {
        self.recorder.commands()
    }

    /// Widget painting the recorded frame over `background`.
    pub fn backdrop(&self, background: Rgba) -> Backdrop<'_> {
        Backdrop {
            surface: self,
            background,
        }
    }
}

impl Surface for CanvasSurface {
    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.recorder.set_size(size);
    }

    fn clear_rect(&mut self, origin: Point, size: Size) {
        self.recorder.clear_rect(origin, size);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.recorder.fill_circle(center, radius, color);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.recorder.stroke_line(from, to, color, width);
    }
}

/// Flatten a translucent color onto the opaque backdrop.
pub fn blend(color: Rgba, background: Rgba) -> Color {
    let [r, g, b] = color.over(background);
    Color::Rgb(r, g, b)
}

/// Recorded frame rendered as a widget.
#[derive(Debug)]
pub struct Backdrop<'a> {
    surface: &'a CanvasSurface,
    background: Rgba,
}

impl Widget for Backdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.surface.size;
        let background = self.background;
        // Canvas y grows upwards, surface y grows downwards.
        let flip = |p: Point| (p.x, size.height - p.y);

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(blend(background, background))
            .x_bounds([0.0, size.width])
            .y_bounds([0.0, size.height])
            .paint(|ctx| {
                for command in self.surface.commands() {
                    match *command {
                        DrawCommand::Clear { .. } => {}
                        DrawCommand::Circle {
                            center,
                            radius,
                            color,
                        } => {
                            let (x, y) = flip(center);
                            ctx.draw(&Disc {
                                x,
                                y,
                                radius,
                                color: blend(color, background),
                            });
                        }
                        DrawCommand::Line { from, to, color, .. } => {
                            let (x1, y1) = flip(from);
                            let (x2, y2) = flip(to);
                            ctx.draw(&CanvasLine {
                                x1,
                                y1,
                                x2,
                                y2,
                                color: blend(color, background),
                            });
                        }
                    }
                }
            })
            .render(area, buf);
    }
}

/// Filled circle in canvas coordinates.
#[derive(Debug, Clone, Copy)]
struct Disc {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        if let Some((x, y)) = painter.get_point(self.x, self.y) {
            painter.paint(x, y, self.color);
        }

        let steps = (self.radius / DISC_SAMPLE_STEP).ceil() as i64;
        for i in -steps..=steps {
            for j in -steps..=steps {
                let dx = i as f64 * DISC_SAMPLE_STEP;
                let dy = j as f64 * DISC_SAMPLE_STEP;
                if dx * dx + dy * dy > self.radius * self.radius {
                    continue;
                }
                if let Some((x, y)) = painter.get_point(self.x + dx, self.y + dy) {
                    painter.paint(x, y, self.color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    fn painted(buf: &Buffer) -> Vec<(u16, u16)> {
        let area = buf.area;
        let mut cells = Vec::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let symbol = buf[(x, y)].symbol();
                if symbol != " " && symbol != "\u{2800}" {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_lookup_requires_terminal_and_id() {
        let mut detached = Screen { is_terminal: false };
        assert!(detached.acquire(BACKDROP_ID).is_none());

        let mut attached = Screen { is_terminal: true };
        assert!(attached.acquire("elsewhere").is_none());
        assert!(attached.acquire(BACKDROP_ID).is_some());
    }

    #[test]
    fn test_blend_onto_background() {
        assert_eq!(blend(Rgba::rgba(255, 255, 255, 0.5), BLACK), Color::Rgb(128, 128, 128));
        assert_eq!(blend(BLACK, BLACK), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_disc_lands_in_flipped_cell() {
        let mut surface = CanvasSurface::default();
        // 10x5 cells at 8x16 px per cell.
        surface.set_size(Size::new(80.0, 80.0));
        surface.clear_rect(Point::default(), Size::new(80.0, 80.0));
        surface.fill_circle(Point::new(4.0, 8.0), 2.0, Rgba::rgb(255, 0, 0));

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        surface.backdrop(BLACK).render(area, &mut buf);

        assert_eq!(painted(&buf), vec![(0, 0)]);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(5, 2)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_line_spans_cells() {
        let mut surface = CanvasSurface::default();
        surface.set_size(Size::new(80.0, 80.0));
        let green = Rgba::rgb(0, 255, 0);
        surface.stroke_line(Point::new(0.0, 40.0), Point::new(79.0, 40.0), green, 1.0);

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        surface.backdrop(BLACK).render(area, &mut buf);

        let cells = painted(&buf);
        assert_eq!(cells.len(), 10);
        assert!(cells.iter().all(|&(_, y)| y == cells[0].1));
    }

    #[test]
    fn test_set_size_discards_frame() {
        let mut surface = CanvasSurface::default();
        surface.fill_circle(Point::new(1.0, 1.0), 1.0, BLACK);
        surface.set_size(Size::new(10.0, 10.0));
        assert!(surface.commands().is_empty());
    }
}
