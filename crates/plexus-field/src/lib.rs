//! Animated particle network.
//!
//! A [`ParticleField`] owns a drawing surface and a population of drifting
//! particles. Each call to [`ParticleField::step`] advances every particle
//! by one frame, pushes particles away from the pointer and draws the
//! particles plus a line between every pair closer than the connection
//! distance. The host decides the frame cadence and forwards resize and
//! pointer signals as [`FieldEvent`]s.

mod field;
mod particle;
mod pointer;

pub use field::{FieldEvent, ParticleField, target_count};
pub use particle::{Particle, repulsion};
pub use pointer::PointerState;
