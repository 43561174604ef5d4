//! Pointer tracking.

use plexus_core::Point;

/// Last known pointer position and its interaction radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// `None` until the pointer moves, and again after it leaves.
    pub position: Option<Point>,
    pub radius: f64,
}

impl PointerState {
    pub fn new(radius: f64) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    pub fn moved(&mut self, position: Point) {
        self.position = Some(position);
    }

    pub fn left(&mut self) {
        self.position = None;
    }
}
