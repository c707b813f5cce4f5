//! Per-tick motion integration for each movement mode.

use super::Player;
use crate::config::GameConfig;

const FALL_GRAVITY_MULTIPLIER: f64 = 1.5;

/// Gravity, then integrate, then clamp into the canvas and onto the ground.
pub fn step_running(player: &mut Player, config: &GameConfig) {
    player.dy += config.gravity;
    player.y += player.dy;
    clamp_to_canvas(player, config);

    let ground = config.ground_line();
    if player.y + player.height > ground {
        player.y = ground - player.height;
        player.dy = 0.0;
        player.on_ground = true;
    }
}

/// Velocity is set directly by input; the ground acts as a floor.
pub fn step_bird(player: &mut Player, config: &GameConfig) {
    player.x += player.dx;
    player.y += player.dy;

    let ground = config.ground_line();
    if player.y + player.height > ground {
        player.y = ground - player.height;
        player.dy = 0.0;
    }
    clamp_to_canvas(player, config);
}

/// Amplified gravity. Returns true once the player reaches the ground,
/// with the position clamped onto it.
pub fn step_falling(player: &mut Player, config: &GameConfig) -> bool {
    player.dy += config.gravity * FALL_GRAVITY_MULTIPLIER;
    player.y += player.dy;

    let ground = config.ground_line();
    if player.y + player.height >= ground {
        player.y = ground - player.height;
        return true;
    }
    false
}

fn clamp_to_canvas(player: &mut Player, config: &GameConfig) {
    let max_x = config.canvas_width - player.width;
    player.x = player.x.clamp(0.0, max_x);
    if player.y < 0.0 {
        player.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airborne(config: &GameConfig, y: f64) -> Player {
        let mut p = Player::new(config);
        p.y = y;
        p.on_ground = false;
        p
    }

    #[test]
    fn running_applies_gravity() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 100.0);
        step_running(&mut p, &config);
        assert_eq!(p.dy, 0.5);
        assert_eq!(p.y, 100.5);
        assert!(!p.on_ground);
    }

    #[test]
    fn running_lands_on_ground() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 329.0);
        p.dy = 5.0;
        step_running(&mut p, &config);
        assert_eq!(p.y, 330.0);
        assert_eq!(p.dy, 0.0);
        assert!(p.on_ground);
    }

    #[test]
    fn jump_arc_returns_to_ground() {
        let config = GameConfig::default();
        let mut p = Player::new(&config);
        p.dy = config.jump_force;
        p.on_ground = false;
        let mut peak = p.y;
        for _ in 0..60 {
            step_running(&mut p, &config);
            peak = peak.min(p.y);
            assert!(p.y + p.height <= config.ground_line());
        }
        assert!(peak < 330.0 - 90.0);
        assert!(p.on_ground);
    }

    #[test]
    fn ceiling_clamps_y() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 2.0);
        p.dy = -10.0;
        step_running(&mut p, &config);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn bird_has_no_gravity() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 100.0);
        step_bird(&mut p, &config);
        assert_eq!(p.y, 100.0);
        assert_eq!(p.dy, 0.0);
    }

    #[test]
    fn bird_floor_and_walls() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 328.0);
        p.dy = 4.0;
        p.dx = -4.0;
        p.x = 2.0;
        step_bird(&mut p, &config);
        assert_eq!(p.y, 330.0);
        assert_eq!(p.dy, 0.0);
        assert_eq!(p.x, 0.0);

        p.x = 779.0;
        p.dx = 4.0;
        step_bird(&mut p, &config);
        assert_eq!(p.x, 780.0);
    }

    #[test]
    fn falling_uses_amplified_gravity() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 10.0);
        assert!(!step_falling(&mut p, &config));
        assert_eq!(p.dy, 0.75);
        assert_eq!(p.y, 10.75);
    }

    #[test]
    fn falling_reports_landing() {
        let config = GameConfig::default();
        let mut p = airborne(&config, 325.0);
        p.dy = 10.0;
        assert!(step_falling(&mut p, &config));
        assert_eq!(p.y, 330.0);
    }
}
