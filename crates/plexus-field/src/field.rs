//! The particle field: population, signals and the frame step.

use plexus_core::{
    FieldConfig, Palette, Point, Size, Surface, SurfaceLookup, ThemeSource, Viewport,
};
use rand::Rng;
use rand::rngs::StdRng;

use crate::particle::Particle;
use crate::pointer::PointerState;

/// Number of particles a surface of `size` holds at the given density.
pub fn target_count(size: Size, density_divisor: f64) -> usize {
    if density_divisor > 0.0 {
        (size.area() / density_divisor).floor().max(0.0) as usize
    } else {
        0
    }
}

/// External signals a host forwards to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// The viewport changed size; its new size is read from the viewport.
    Resized,
    /// The pointer moved to this surface position.
    PointerMoved(Point),
    /// The pointer left the tracked area.
    PointerLeft,
}

/// Animated particle network drawn onto an owned surface.
#[derive(Debug)]
pub struct ParticleField<S, R = StdRng> {
    surface: S,
    config: FieldConfig,
    rng: R,
    size: Size,
    target_count: usize,
    particles: Vec<Particle>,
    pointer: PointerState,
    /// Signals are ignored until [`ParticleField::initialize`].
    listening: bool,
    running: bool,
}

impl<S: Surface, R: Rng> ParticleField<S, R> {
    /// Acquire the surface named `id` and build a field on it.
    ///
    /// Returns `None` when the surface cannot be located; nothing else
    /// happens in that case.
    pub fn attach<L>(lookup: &mut L, id: &str, config: FieldConfig, rng: R) -> Option<Self>
    where
        L: SurfaceLookup<Surface = S>,
    {
        lookup
            .acquire(id)
            .map(|surface| Self::with_surface(surface, config, rng))
    }

    /// Build an idle field on an already acquired surface.
    pub fn with_surface(surface: S, config: FieldConfig, rng: R) -> Self {
        let pointer = PointerState::new(config.pointer_radius);
        Self {
            surface,
            config,
            rng,
            size: Size::default(),
            target_count: 0,
            particles: Vec::new(),
            pointer,
            listening: false,
            running: false,
        }
    }

    /// Size to the viewport, populate, begin handling signals and start.
    pub fn initialize(&mut self, viewport: &impl Viewport) {
        self.fit(viewport);
        self.populate(self.target_count);
        self.listening = true;
        self.start();
    }

    /// Re-read the viewport, recompute the target count and regenerate the
    /// population from scratch.
    pub fn resize(&mut self, viewport: &impl Viewport) {
        self.fit(viewport);
        self.populate(self.target_count);
    }

    fn fit(&mut self, viewport: &impl Viewport) {
        self.size = viewport.size();
        self.surface.set_size(self.size);
        self.target_count = target_count(self.size, self.config.density_divisor);
    }

    /// Replace the population with `count` freshly sampled particles.
    pub fn populate(&mut self, count: usize) {
        let size = self.size;
        let base_speed = self.config.base_speed;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle::random(rng, size, base_speed))
            .collect();
    }

    /// Dispatch an external signal. Ignored before initialization.
    pub fn handle_event(&mut self, event: FieldEvent, viewport: &impl Viewport) {
        if !self.listening {
            return;
        }
        match event {
            FieldEvent::Resized => self.resize(viewport),
            FieldEvent::PointerMoved(position) => self.pointer.moved(position),
            FieldEvent::PointerLeft => self.pointer.left(),
        }
    }

    /// Palette for the theme currently reported by `source`.
    pub fn resolve_theme(&self, source: &impl ThemeSource) -> Palette {
        self.config.palettes.get(source.theme())
    }

    /// Advance and draw one frame. Does nothing while stopped.
    pub fn step(&mut self, theme: &impl ThemeSource) {
        if !self.running {
            return;
        }

        self.surface.clear_rect(Point::default(), self.size);
        let palette = self.resolve_theme(theme);

        let connection_distance = self.config.connection_distance;
        let repulsion_strength = self.config.repulsion_strength;
        let line_width = self.config.line_width;
        let pointer = self.pointer;

        for i in 0..self.particles.len() {
            let particle = &mut self.particles[i];
            particle.advance();
            particle.reflect(self.size);
            if let Some(position) = pointer.position {
                particle.repel(position, pointer.radius, repulsion_strength);
            }

            let particle = *particle;
            let center = particle.position();
            self.surface
                .fill_circle(center, particle.size, palette.particle);

            for other in &self.particles[i + 1..] {
                let end = other.position();
                if center.distance(end) < connection_distance {
                    self.surface
                        .stroke_line(center, end, palette.line, line_width);
                }
            }
        }
    }

    /// Resume stepping.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt stepping; later [`ParticleField::step`] calls draw nothing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
