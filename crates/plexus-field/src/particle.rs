//! Particle records and the per-particle motion rules.

use plexus_core::{Point, Size};
use rand::Rng;

/// Smallest particle radius.
pub const MIN_SIZE: f64 = 1.0;
/// Width of the radius range above [`MIN_SIZE`].
pub const SIZE_SPREAD: f64 = 2.0;

/// A single drifting particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity in pixels per frame.
    pub vx: f64,
    /// Vertical velocity in pixels per frame.
    pub vy: f64,
    /// Radius, fixed at creation.
    pub size: f64,
}

impl Particle {
    /// Sample a particle uniformly over the surface.
    ///
    /// Velocity components fall in `[-base_speed / 2, base_speed / 2)` and the
    /// radius in `[1, 3)`.
    pub fn random<R: Rng>(rng: &mut R, bounds: Size, base_speed: f64) -> Self {
        Self {
            x: rng.r#gen::<f64>() * bounds.width,
            y: rng.r#gen::<f64>() * bounds.height,
            vx: (rng.r#gen::<f64>() - 0.5) * base_speed,
            vy: (rng.r#gen::<f64>() - 0.5) * base_speed,
            size: rng.r#gen::<f64>() * SIZE_SPREAD + MIN_SIZE,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Move by one frame of velocity.
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Flip the velocity sign on each axis where the particle is out of bounds.
    ///
    /// Position is left alone; the flipped velocity brings the particle back
    /// on following frames.
    pub fn reflect(&mut self, bounds: Size) {
        if self.x < 0.0 || self.x > bounds.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > bounds.height {
            self.vy = -self.vy;
        }
    }

    /// Push the particle away from the pointer. See [`repulsion`].
    pub fn repel(&mut self, pointer: Point, radius: f64, strength: f64) {
        if let Some((dx, dy)) = repulsion(self.position(), pointer, radius, strength) {
            self.x += dx;
            self.y += dy;
        }
    }
}

/// Positional nudge for a particle at `position` near `pointer`.
///
/// The nudge points away from the pointer with length
/// `(radius - d) / radius * strength`. Returns `None` outside the radius and
/// at exactly zero distance, where no direction exists.
pub fn repulsion(
    position: Point,
    pointer: Point,
    radius: f64,
    strength: f64,
) -> Option<(f64, f64)> {
    let dx = position.x - pointer.x;
    let dy = position.y - pointer.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance <= 0.0 || distance >= radius {
        return None;
    }

    let force = (radius - distance) / radius;
    Some((
        dx / distance * force * strength,
        dy / distance * force * strength,
    ))
}
