//! Ambient particle field
//!
//! A fixed batch of drifting points with proximity links, drawn once per
//! display refresh. Particles live in a flat Vec allocated at start and
//! mutated in place; a frame allocates nothing.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::renderer::Painter;

/// A single drifting point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per tick, fixed at creation (only the sign flips)
    pub vel: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Random particle inside a `width` x `height` surface
    pub fn random(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            vel: Vec2::new(
                rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            ),
            radius: rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS),
        }
    }

    /// Advance one tick with reflective bounds.
    ///
    /// The velocity component flips once the position leaves `[0, size]`;
    /// the position itself is not clamped, so it may overshoot by one tick.
    #[inline]
    pub fn step(&mut self, width: f32, height: f32) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > height {
            self.vel.y = -self.vel.y;
        }
    }
}

/// Stroke opacity for a pair at `distance`, or None if too far apart
#[inline]
pub fn link_alpha(distance: f32, link_distance: f32) -> Option<f32> {
    if distance < link_distance {
        Some(LINK_MAX_ALPHA * (1.0 - distance / link_distance))
    } else {
        None
    }
}

/// Lifecycle of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// No drawing surface yet
    Uninitialized,
    /// Ticking every frame
    Running,
    /// Torn down (terminal)
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub link_distance: f32,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            link_distance: LINK_DISTANCE,
            seed: 0,
        }
    }
}

impl FieldConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

pub struct ParticleField {
    config: FieldConfig,
    phase: FieldPhase,
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: Pcg32,
    frames: u64,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            phase: FieldPhase::Uninitialized,
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            rng: Pcg32::seed_from_u64(config.seed),
            frames: 0,
        }
    }

    /// Running field over a fixed set of particles
    pub fn with_particles(
        config: FieldConfig,
        width: f32,
        height: f32,
        particles: Vec<Particle>,
    ) -> Self {
        let mut field = Self::new(config);
        field.width = width;
        field.height = height;
        field.particles = particles;
        field.phase = FieldPhase::Running;
        field
    }

    /// Spawn the batch once a surface of the given size exists.
    ///
    /// Without a surface the field stays `Uninitialized` and nothing
    /// happens. Starting a running or stopped field is a no-op. Returns
    /// true if this call started the field.
    pub fn start(&mut self, surface: Option<(f32, f32)>) -> bool {
        if self.phase != FieldPhase::Uninitialized {
            log::debug!("Particle field start ignored in {:?}", self.phase);
            return false;
        }
        let Some((width, height)) = surface else {
            log::warn!("No drawing surface, particle field disabled");
            return false;
        };

        self.width = width;
        self.height = height;
        self.particles.clear();
        self.particles.reserve_exact(self.config.count);
        for _ in 0..self.config.count {
            let p = Particle::random(&mut self.rng, width, height);
            self.particles.push(p);
        }
        self.phase = FieldPhase::Running;

        log::info!(
            "Particle field running: {} particles on {}x{}",
            self.particles.len(),
            width,
            height
        );
        true
    }

    /// New surface size. Existing particles keep their positions; any now
    /// outside the bounds drift back through the reflection rule.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Advance every particle one tick
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in self.particles.iter_mut() {
            p.step(w, h);
        }
    }

    /// Paint the current state: clear, particles, then links
    pub fn draw(&mut self, painter: &mut impl Painter) {
        painter.clear(self.width, self.height);

        for p in &self.particles {
            let alpha = self.rng.random_range(PARTICLE_MIN_ALPHA..PARTICLE_MAX_ALPHA);
            painter.fill_circle(p.pos, p.radius, alpha);
        }

        // O(n²) over unordered pairs: 4950 checks at 100 particles. A few
        // hundred more would need a spatial grid.
        let link_distance = self.config.link_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(alpha) = link_alpha(a.pos.distance(b.pos), link_distance) {
                    painter.stroke_line(a.pos, b.pos, alpha);
                }
            }
        }
    }

    /// One animation frame. Returns false (and does nothing) unless running.
    pub fn frame(&mut self, painter: &mut impl Painter) -> bool {
        if self.phase != FieldPhase::Running {
            return false;
        }
        self.step();
        self.draw(painter);
        self.frames += 1;
        true
    }

    /// Tear down. Drops the batch; terminal and idempotent.
    pub fn stop(&mut self) {
        if self.phase == FieldPhase::Stopped {
            return;
        }
        log::info!("Particle field stopped after {} frames", self.frames);
        self.particles = Vec::new();
        self.phase = FieldPhase::Stopped;
    }

    /// Links that would be drawn for the current positions: `(i, j, alpha)`
    pub fn links(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let link_distance = self.config.link_distance;
        self.particles.iter().enumerate().flat_map(move |(i, a)| {
            self.particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(k, b)| {
                    let alpha = link_alpha(a.pos.distance(b.pos), link_distance)?;
                    Some((i, i + 1 + k, alpha))
                })
        })
    }

    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
