use log::debug;
use rand::Rng;

use crate::config::GameConfig;

pub const OBSTACLE_WIDTH: f64 = 20.0;
const MIN_HEIGHT: u32 = 20;
const MAX_HEIGHT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Closed-interval overlap: touching edges count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x > other.x + other.width
            || self.x + self.width < other.x
            || self.y > other.y + other.height
            || self.y + self.height < other.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    /// A block of the given height standing on the ground line at `x`.
    pub fn on_ground(x: f64, height: f64, ground_line: f64) -> Self {
        Self {
            x,
            y: ground_line - height,
            width: OBSTACLE_WIDTH,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Live obstacles, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// New obstacle at the right edge with a random height in [20, 50).
    pub fn spawn(&mut self, rng: &mut impl Rng, config: &GameConfig) {
        let height = rng.gen_range(MIN_HEIGHT..MAX_HEIGHT) as f64;
        debug!("Spawning obstacle of height {}", height);
        self.push(Obstacle::on_ground(config.canvas_width, height, config.ground_line()));
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Scroll everything left, then drop what has fully left the screen.
    pub fn advance(&mut self, scroll_speed: f64) {
        for obs in &mut self.obstacles {
            obs.x -= scroll_speed;
        }
        self.obstacles.retain(|obs| obs.x + obs.width > 0.0);
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|obs| obs.bounds().overlaps(rect))
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
