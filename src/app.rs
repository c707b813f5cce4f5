use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, trace};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::game::{Game, Key};

pub struct App {
    pub should_quit: bool,
    pub game: Game,
    clock: Box<dyn Clock>,
    /// Whether the terminal reports key releases.
    release_events: bool,
    /// Key -> time of the last press or repeat, used to fake releases.
    held: HashMap<Key, u64>,
    synthetic_release_ms: u64,
}

impl App {
    pub fn new(config: GameConfig, clock: Box<dyn Clock>, release_events: bool) -> Self {
        let synthetic_release_ms = config.synthetic_release_ms;
        let game = Game::from_config(config, clock.now_ms());
        Self {
            should_quit: false,
            game,
            clock,
            release_events,
            held: HashMap::new(),
            synthetic_release_ms,
        }
    }

    pub fn on_tick(&mut self) {
        let now = self.clock.now_ms();
        if !self.release_events {
            self.release_stale_keys(now);
        }
        self.game.tick(now);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key.kind != KeyEventKind::Release
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        {
            self.should_quit = true;
            return;
        }

        let mapped = map_key(key.code);
        if mapped == Key::Other {
            return;
        }

        let now = self.clock.now_ms();
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(mapped, now);
                self.game.key_down(mapped, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&mapped);
                self.game.key_up(mapped);
            }
        }
    }

    fn release_stale_keys(&mut self, now: u64) {
        let timeout = self.synthetic_release_ms;
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, &at)| now.saturating_sub(at) >= timeout)
            .map(|(&key, _)| key)
            .collect();
        for key in stale {
            trace!("Synthetic release of {:?}", key);
            self.held.remove(&key);
            self.game.key_up(key);
        }
    }
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        other => {
            debug!("Unmapped key {:?}", other);
            Key::Other
        }
    }
}
