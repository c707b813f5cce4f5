use log::{debug, trace};
use rand::Rng;

use super::{Game, Mode};

/// Host-agnostic key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Other,
}

/// Counts ArrowUp presses that follow each other within the time window.
#[derive(Debug, Clone, Default)]
pub struct GestureDetector {
    count: u32,
    last_press: Option<u64>,
}

pub const GESTURE_PRESSES: u32 = 3;

impl GestureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press at `now`. Returns true when this press completes the
    /// gesture.
    pub fn press(&mut self, now: u64, window_ms: u64) -> bool {
        let chained = self
            .last_press
            .is_some_and(|last| now.saturating_sub(last) < window_ms);
        self.count = if chained { self.count + 1 } else { 1 };
        self.last_press = Some(now);
        self.count >= GESTURE_PRESSES
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_press = None;
    }
}

impl<R: Rng> Game<R> {
    /// Applied immediately; the effect shows on the next tick.
    pub fn key_down(&mut self, key: Key, now: u64) {
        trace!("Key down {:?} in {:?}", key, self.mode);
        let speed = self.config.bird_speed;
        match (self.mode, key) {
            (Mode::GameOver, Key::Space) => self.new_game(now),
            (Mode::Running, Key::Up) => {
                if self.gesture.press(now, self.config.gesture_window_ms) {
                    debug!("Triple press, turning into a bird");
                    self.enter_bird(now);
                }
                if self.player.on_ground {
                    self.player.dy = self.config.jump_force;
                    self.player.on_ground = false;
                }
            }
            (Mode::Bird, Key::Up) => self.player.dy = -speed,
            (Mode::Bird, Key::Down) => self.player.dy = speed,
            (Mode::Bird, Key::Left) => self.player.dx = -speed,
            (Mode::Bird, Key::Right) => self.player.dx = speed,
            _ => {}
        }
    }

    /// Releasing a direction stops bird movement on that axis.
    pub fn key_up(&mut self, key: Key) {
        if self.mode != Mode::Bird {
            return;
        }
        match key {
            Key::Up | Key::Down => self.player.dy = 0.0,
            Key::Left | Key::Right => self.player.dx = 0.0,
            Key::Space | Key::Other => {}
        }
    }
}
