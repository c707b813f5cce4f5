//! Death burst: a batch of blood particles plus a growing puddle, bounded by
//! wall-clock time rather than frame count.

use std::f64::consts::TAU;

use rand::Rng;

use crate::render::Rgba;

pub const PARTICLE_COUNT: usize = 120;
const PIXEL_SIZE: f64 = 4.0;
const PIXEL_CHANCE: f64 = 0.7;
const UPWARD_BOOST: f64 = 5.0;
const PUDDLE_GROWTH: f64 = 1.5;
const PUDDLE_WIDTH_FACTOR: f64 = 3.0;
pub const PUDDLE_FLATTEN: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Rotating square.
    Pixel,
    /// Round drop.
    Droplet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub shape: Shape,
    pub color: Rgba,
    pub gravity: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
}

impl Particle {
    pub fn random(rng: &mut impl Rng, x: f64, y: f64) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let speed = 1.0 + rng.gen_range(0.0..7.0);
        let shape = if rng.gen_bool(PIXEL_CHANCE) {
            Shape::Pixel
        } else {
            Shape::Droplet
        };
        let size = match shape {
            Shape::Pixel => PIXEL_SIZE * (0.8 + rng.gen_range(0.0..1.2)),
            Shape::Droplet => 2.0 + rng.gen_range(0.0..5.0),
        };
        let red = rng.gen_range(180..=255u8);
        let alpha = rng.gen_range(0.7..1.0f32);
        let (rotation, rotation_speed) = match shape {
            Shape::Pixel => (rng.gen_range(0.0..TAU), rng.gen_range(-0.1..0.1)),
            Shape::Droplet => (0.0, 0.0),
        };

        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed - UPWARD_BOOST,
            size,
            shape,
            color: Rgba::rgba(red, 0, 0, alpha),
            gravity: rng.gen_range(0.2..0.5),
            rotation,
            rotation_speed,
        }
    }

    pub fn step(&mut self) {
        self.vy += self.gravity;
        self.x += self.vx;
        self.y += self.vy;
        if self.shape == Shape::Pixel {
            self.rotation += self.rotation_speed;
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplatAnimation {
    particles: Vec<Particle>,
    started_at: u64,
    duration_ms: u64,
    origin_x: f64,
    ground_y: f64,
}

impl SplatAnimation {
    /// All particles are created at once at `(origin_x, ground_y)`.
    pub fn burst(
        rng: &mut impl Rng,
        origin_x: f64,
        ground_y: f64,
        now: u64,
        duration_ms: u64,
    ) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::random(rng, origin_x, ground_y))
            .collect();
        Self {
            particles,
            started_at: now,
            duration_ms,
            origin_x,
            ground_y,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    /// Fraction of the duration elapsed, not clamped.
    pub fn progress(&self, now: u64) -> f64 {
        now.saturating_sub(self.started_at) as f64 / self.duration_ms as f64
    }

    pub fn is_finished(&self, now: u64) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
    }

    /// Horizontal radius of the ground puddle; it reaches full size at two
    /// thirds of the animation.
    pub fn puddle_radius(&self, now: u64, player_width: f64) -> f64 {
        let growth = (self.progress(now) * PUDDLE_GROWTH).min(1.0);
        player_width * PUDDLE_WIDTH_FACTOR * growth
    }
}
