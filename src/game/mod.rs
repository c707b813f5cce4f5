pub mod draw;
pub mod input;
pub mod obstacles;
pub mod physics;
pub mod splat;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::scores::{HighScores, ScoreBoard};
use crate::timers::Scheduler;

use input::GestureDetector;
use obstacles::{ObstacleField, Rect};
use splat::SplatAnimation;

pub use input::Key;

pub const PLAYER_WIDTH: f64 = 20.0;
pub const PLAYER_HEIGHT: f64 = 20.0;
pub const PLAYER_START_X: f64 = 50.0;
/// Bird mode ending above this fraction of the canvas height means a fall.
const FALL_ALTITUDE_RATIO: f64 = 0.2;
const SHAKE_INTENSITY: f64 = 5.0;
const SHAKE_OFFSETS_MS: [u64; 2] = [80, 160];
const SHAKE_HOLD_MS: u64 = 50;

/// Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    Bird,
    Falling,
    /// Particle burst after a fatal fall; the player sprite is hidden.
    Splat,
    /// Death message shown after the burst, before the run ends.
    SplatText,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    GraceElapsed,
    BirdExpired,
    SplatTextDone,
    ShakeStart,
    ShakeEnd,
}

impl TimerEvent {
    /// Events that belong to a single run and must not leak into the next one.
    fn is_run_scoped(&self) -> bool {
        !matches!(self, TimerEvent::GraceElapsed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub width: f64,
    pub height: f64,
    pub on_ground: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: PLAYER_START_X,
            y: config.ground_line() - PLAYER_HEIGHT,
            dx: 0.0,
            dy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            on_ground: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Owns every piece of game state. The host calls [`Game::tick`] once per
/// frame with the current time, forwards key events, and paints whatever
/// [`Game::draw`] emits.
pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    mode: Mode,
    player: Player,
    obstacles: ObstacleField,
    splat: Option<SplatAnimation>,
    score: ScoreBoard,
    high_scores: HighScores,
    gesture: GestureDetector,
    timers: Scheduler<TimerEvent>,
    epoch: u64,
    frame: u64,
    shake: Option<(f64, f64)>,
    now: u64,
}

impl Game<StdRng> {
    /// Seeded from `config.seed` when set, otherwise from OS entropy.
    pub fn from_config(config: GameConfig, now: u64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng, now)
    }
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R, now: u64) -> Self {
        assert!(
            config.canvas_width > PLAYER_WIDTH && config.canvas_height > PLAYER_HEIGHT,
            "canvas must be larger than the player"
        );
        assert!(
            config.ground_height >= 0.0 && config.ground_line() >= PLAYER_HEIGHT,
            "ground must leave room for the player"
        );
        assert!(config.obstacle_frequency > 0, "obstacle frequency must be positive");
        assert!(
            config.splat_duration_ms > 0 && config.bird_duration_ms > 0,
            "durations must be positive"
        );

        let mut timers = Scheduler::new();
        timers.schedule(now, config.grace_period_ms, 0, TimerEvent::GraceElapsed);

        info!(
            "New game on a {}x{} canvas",
            config.canvas_width, config.canvas_height
        );

        Self {
            player: Player::new(&config),
            config,
            rng,
            mode: Mode::Running,
            obstacles: ObstacleField::new(),
            splat: None,
            score: ScoreBoard::new(now),
            high_scores: HighScores::new(),
            gesture: GestureDetector::new(),
            timers,
            epoch: 0,
            frame: 0,
            shake: None,
            now,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut ObstacleField {
        &mut self.obstacles
    }

    pub fn splat(&self) -> Option<&SplatAnimation> {
        self.splat.as_ref()
    }

    pub fn points(&self) -> u32 {
        self.score.points()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn gesture_count(&self) -> u32 {
        self.gesture.count()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn showing_instructions(&self) -> bool {
        !self.score.grace_over()
    }

    pub fn is_game_over(&self) -> bool {
        self.mode == Mode::GameOver
    }

    /// Cosmetic view offset while the screen shakes.
    pub fn shake_offset(&self) -> Option<(f64, f64)> {
        self.shake
    }

    pub fn ground_line(&self) -> f64 {
        self.config.ground_line()
    }

    /// Advance one frame: fire due timers in timestamp order, then step the
    /// active mode.
    pub fn tick(&mut self, now: u64) {
        self.now = now;
        self.fire_due_timers(now);

        match self.mode {
            Mode::Running | Mode::Bird => self.update_active(now),
            Mode::Falling => self.update_falling(now),
            Mode::Splat => self.update_splat(now),
            Mode::SplatText | Mode::GameOver => {}
        }
    }

    /// Back to a fresh run. High scores and the grace period survive;
    /// timers scheduled for the previous run are neutralised.
    pub fn new_game(&mut self, now: u64) {
        self.epoch += 1;
        self.now = now;
        self.mode = Mode::Running;
        self.player = Player::new(&self.config);
        self.obstacles.clear();
        self.splat = None;
        self.gesture.reset();
        self.score.reset(now);
        self.frame = 0;
        self.shake = None;
        info!("Run {} started", self.epoch);
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn update_active(&mut self, now: u64) {
        self.frame += 1;
        self.score.accrue(now);

        if self.mode == Mode::Bird {
            physics::step_bird(&mut self.player, &self.config);
        } else {
            physics::step_running(&mut self.player, &self.config);
        }

        if self.mode == Mode::Running && self.frame % self.config.obstacle_frequency == 0 {
            self.obstacles.spawn(&mut self.rng, &self.config);
        }
        self.obstacles.advance(self.config.scroll_speed);

        if self.mode == Mode::Running && self.obstacles.collides(&self.player.bounds()) {
            info!("Hit an obstacle at x={:.0}", self.player.x);
            self.finish_run();
        }
    }

    fn update_falling(&mut self, now: u64) {
        if physics::step_falling(&mut self.player, &self.config) {
            info!("Splat at x={:.0}", self.player.x);
            self.splat = Some(SplatAnimation::burst(
                &mut self.rng,
                self.player.center_x(),
                self.config.ground_line(),
                now,
                self.config.splat_duration_ms,
            ));
            self.set_mode(Mode::Splat);
            self.start_shake(now);
            for delay in SHAKE_OFFSETS_MS {
                self.timers.schedule(now, delay, self.epoch, TimerEvent::ShakeStart);
            }
        }
    }

    fn update_splat(&mut self, now: u64) {
        let Some(anim) = self.splat.as_mut() else {
            self.set_mode(Mode::SplatText);
            return;
        };
        if anim.is_finished(now) {
            self.splat = None;
            self.set_mode(Mode::SplatText);
            self.timers
                .schedule(now, self.config.splat_text_ms, self.epoch, TimerEvent::SplatTextDone);
        } else {
            anim.step();
        }
    }

    pub(crate) fn enter_bird(&mut self, now: u64) {
        self.player.dx = 0.0;
        self.player.dy = 0.0;
        self.gesture.reset();
        self.set_mode(Mode::Bird);
        self.timers
            .schedule(now, self.config.bird_duration_ms, self.epoch, TimerEvent::BirdExpired);
    }

    /// End the run, recording the score once the grace period is over.
    fn finish_run(&mut self) {
        if self.mode == Mode::GameOver {
            return;
        }
        if self.score.grace_over() {
            let points = self.score.points();
            match self.high_scores.submit(points) {
                Some(rank) => info!("Run ended with {} points, new #{} score", points, rank + 1),
                None => info!("Run ended with {} points", points),
            }
        }
        self.set_mode(Mode::GameOver);
    }

    fn start_shake(&mut self, now: u64) {
        let mut jitter = || (self.rng.gen::<f64>() - 0.5) * SHAKE_INTENSITY * 2.0;
        let offset = (jitter(), jitter());
        self.shake = Some(offset);
        self.timers
            .schedule(now, SHAKE_HOLD_MS, self.epoch, TimerEvent::ShakeEnd);
    }

    fn fire_due_timers(&mut self, now: u64) {
        while let Some(timer) = self.timers.pop_due(now) {
            if timer.event.is_run_scoped() && timer.epoch != self.epoch {
                debug!(
                    "Dropping stale {:?} from run {} (current run {})",
                    timer.event, timer.epoch, self.epoch
                );
                continue;
            }
            self.on_timer(timer.event, timer.due_at);
        }
    }

    fn on_timer(&mut self, event: TimerEvent, at: u64) {
        debug!("Timer {:?} fired at {}", event, at);
        match event {
            TimerEvent::GraceElapsed => self.score.end_grace(at),
            TimerEvent::BirdExpired => {
                if self.mode != Mode::Bird {
                    return;
                }
                self.player.dx = 0.0;
                self.player.dy = 0.0;
                if self.player.y < self.config.canvas_height * FALL_ALTITUDE_RATIO {
                    self.set_mode(Mode::Falling);
                } else {
                    self.set_mode(Mode::Running);
                }
            }
            TimerEvent::SplatTextDone => {
                if self.mode == Mode::SplatText {
                    self.finish_run();
                }
            }
            TimerEvent::ShakeStart => self.start_shake(at),
            TimerEvent::ShakeEnd => self.shake = None,
        }
    }
}
