//! Scene composition: turns the current state into an ordered display list.

use rand::Rng;

use super::splat::{Shape, PUDDLE_FLATTEN};
use super::{Game, Mode, Player};
use crate::render::{DisplayList, DrawCommand, Rgba, TextAlign, BLACK, WHITE};

const GROUND: Rgba = Rgba::rgb(0x55, 0x55, 0x55);
const OBSTACLE: Rgba = Rgba::rgb(0xff, 0, 0);
const PUDDLE: Rgba = Rgba::rgba(180, 0, 0, 0.8);
const SPLAT_TEXT: Rgba = Rgba::rgb(0xff, 0, 0);

const HUD_FONT: f64 = 20.0;
const BANNER_FONT: f64 = 48.0;
const SPLAT_CELL: f64 = 20.0;

const SPLAT_ART: [&str; 7] = [
    "  SSSSS  PPPP   L      AAA   TTTTT  !!",
    " S      P   P  L      A   A    T    !!",
    "  SSS   PPPP   L      AAAAA    T    !!",
    "     S  P      L      A   A    T    !!",
    "SSSSS   P      LLLLL  A   A    T    !!",
    "                                      ",
    "                                    !!",
];

pub const GAME_OVER_TEXT: &str = "Game Over - Press Space to Restart";
pub const INSTRUCTIONS_TEXT: &str = "Instructions: Figure it out!";

impl<R: Rng> Game<R> {
    /// Emit this frame's draw commands, starting with a clear.
    pub fn draw(&self, list: &mut DisplayList) {
        list.clear();
        self.draw_ground(list);

        match self.mode {
            Mode::Running | Mode::Bird => {
                draw_player(list, &self.player, self.mode == Mode::Bird);
                self.draw_obstacles(list);
                self.draw_points(list);
                self.draw_high_scores(list);
                if self.showing_instructions() {
                    let (w, h) = (self.config.canvas_width, self.config.canvas_height);
                    list.text(w / 2.0, h / 2.0, INSTRUCTIONS_TEXT, BANNER_FONT, TextAlign::Center, WHITE);
                }
            }
            Mode::Falling => {
                draw_player(list, &self.player, true);
                self.draw_points(list);
                self.draw_high_scores(list);
            }
            Mode::Splat => {
                self.draw_splat(list);
                self.draw_points(list);
                self.draw_high_scores(list);
            }
            Mode::SplatText => self.draw_splat_text(list),
            Mode::GameOver => {
                self.draw_points(list);
                self.draw_high_scores(list);
                let (w, h) = (self.config.canvas_width, self.config.canvas_height);
                list.text(w / 2.0, h - 100.0, GAME_OVER_TEXT, BANNER_FONT, TextAlign::Center, WHITE);
            }
        }
    }

    fn draw_ground(&self, list: &mut DisplayList) {
        let ground = self.config.ground_line();
        list.fill_rect(0.0, ground, self.config.canvas_width, self.config.ground_height, GROUND);
    }

    fn draw_obstacles(&self, list: &mut DisplayList) {
        for obs in self.obstacles.iter() {
            list.fill_rect(obs.x, obs.y, obs.width, obs.height, OBSTACLE);
        }
    }

    fn draw_points(&self, list: &mut DisplayList) {
        let x = self.config.canvas_width / 2.0;
        list.text(x, 30.0, format!("Points: {}", self.points()), HUD_FONT, TextAlign::Center, WHITE);
    }

    fn draw_high_scores(&self, list: &mut DisplayList) {
        let x = self.config.canvas_width - 10.0;
        list.text(x, 30.0, "Top Scores:", HUD_FONT, TextAlign::Right, WHITE);
        for (i, score) in self.high_scores.top_scores().iter().enumerate() {
            let y = 30.0 + (i as f64 + 1.0) * 25.0;
            list.text(x, y, format!("{}. {}", i + 1, score), HUD_FONT, TextAlign::Right, WHITE);
        }
    }

    fn draw_splat(&self, list: &mut DisplayList) {
        let Some(anim) = &self.splat else { return };
        for p in anim.particles() {
            match p.shape {
                Shape::Pixel => list.push(DrawCommand::FillRotatedSquare {
                    cx: p.x,
                    cy: p.y,
                    size: p.size,
                    rotation: p.rotation,
                    color: p.color,
                }),
                Shape::Droplet => list.fill_circle(p.x, p.y, p.size, p.color),
            }
        }

        let radius = anim.puddle_radius(self.now, self.player.width);
        if radius > 0.0 {
            list.fill_ellipse(anim.origin_x(), anim.ground_y() + 2.0, radius, radius * PUDDLE_FLATTEN, PUDDLE);
        }
    }

    fn draw_splat_text(&self, list: &mut DisplayList) {
        let columns = SPLAT_ART[0].len() as f64;
        let rows = SPLAT_ART.len() as f64;
        let start_x = self.config.canvas_width / 2.0 - columns * SPLAT_CELL / 2.0;
        let start_y = self.config.canvas_height / 2.0 - rows * SPLAT_CELL / 2.0;
        for (row, line) in SPLAT_ART.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    list.fill_rect(
                        start_x + col as f64 * SPLAT_CELL,
                        start_y + row as f64 * SPLAT_CELL,
                        SPLAT_CELL,
                        SPLAT_CELL,
                        SPLAT_TEXT,
                    );
                }
            }
        }
    }
}

fn draw_player(list: &mut DisplayList, player: &Player, as_bird: bool) {
    if as_bird {
        draw_bird(list, player);
    } else {
        draw_birdman(list, player);
    }
}

fn draw_bird(list: &mut DisplayList, p: &Player) {
    let cx = p.x + p.width / 2.0;
    let cy = p.y + p.height / 2.0;
    // body
    list.fill_circle(cx, cy, p.width / 2.0, Rgba::rgb(0, 0xff, 0xff));
    // wing
    list.fill_ellipse(cx, cy + 2.0, p.width / 3.0, p.height / 4.0, Rgba::rgb(0, 0xcc, 0xcc));
    // beak
    let tip = p.x + p.width;
    list.fill_polygon(
        vec![(tip, cy), (tip + 5.0, cy - 3.0), (tip + 5.0, cy + 3.0)],
        Rgba::rgb(0xff, 0xff, 0),
    );
    // eye
    list.fill_circle(cx + 3.0, cy - 2.0, 2.0, BLACK);
}

/// 8-bit runner, drawn from fixed offsets inside a 20x22 box.
fn draw_birdman(list: &mut DisplayList, p: &Player) {
    let parts: [(f64, f64, f64, f64, Rgba); 9] = [
        (4.0, 8.0, 12.0, 12.0, Rgba::rgb(0, 0xaa, 0)),     // body
        (4.0, 0.0, 12.0, 8.0, Rgba::rgb(0xff, 0xcc, 0xaa)), // head
        (6.0, 2.0, 2.0, 2.0, BLACK),                        // eyes
        (12.0, 2.0, 2.0, 2.0, BLACK),
        (9.0, 4.0, 2.0, 2.0, Rgba::rgb(0xff, 0xff, 0)),     // beak
        (0.0, 8.0, 4.0, 4.0, Rgba::rgb(0, 0, 0xff)),        // arms
        (16.0, 8.0, 4.0, 4.0, Rgba::rgb(0, 0, 0xff)),
        (4.0, 20.0, 4.0, 2.0, Rgba::rgb(0xff, 0x88, 0)),    // feet
        (12.0, 20.0, 4.0, 2.0, Rgba::rgb(0xff, 0x88, 0)),
    ];
    for (dx, dy, w, h, color) in parts {
        list.fill_rect(p.x + dx, p.y + dy, w, h, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::obstacles::Obstacle;
    use crate::game::splat::PARTICLE_COUNT;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_game() -> Game<ChaCha8Rng> {
        Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(5), 0)
    }

    fn frame(game: &Game<ChaCha8Rng>) -> DisplayList {
        let mut list = DisplayList::new();
        game.draw(&mut list);
        list
    }

    #[test]
    fn running_frame_order() {
        let mut game = test_game();
        game.obstacles_mut().push(Obstacle::on_ground(400.0, 30.0, 350.0));
        let list = frame(&game);
        let cmds = list.commands();

        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(matches!(cmds[1], DrawCommand::FillRect { y, color, .. } if y == 350.0 && color == GROUND));
        // 9 sprite rects, then the obstacle.
        assert!(matches!(cmds[11], DrawCommand::FillRect { x, color, .. } if x == 400.0 && color == OBSTACLE));
        assert_eq!(list.texts(), vec!["Points: 0", "Top Scores:", INSTRUCTIONS_TEXT]);
    }

    #[test]
    fn instructions_disappear_after_grace() {
        let mut game = test_game();
        game.tick(5_000);
        let list = frame(&game);
        assert!(!list.texts().contains(&INSTRUCTIONS_TEXT));
    }

    #[test]
    fn bird_is_drawn_with_circles() {
        let mut game = test_game();
        game.enter_bird(0);
        let list = frame(&game);
        assert!(matches!(list.commands()[2], DrawCommand::FillCircle { .. }));
        assert!(list
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillPolygon { points, .. } if points.len() == 3)));
    }

    #[test]
    fn game_over_frame_ends_with_banner() {
        let mut game = test_game();
        game.tick(5_000);
        game.tick(5_300);
        game.finish_run();
        let list = frame(&game);
        assert_eq!(
            list.texts(),
            vec!["Points: 3", "Top Scores:", "1. 3", GAME_OVER_TEXT]
        );
        assert!(matches!(list.commands().last(), Some(DrawCommand::Text { .. })));
    }

    #[test]
    fn splat_frame_hides_player_and_shows_particles() {
        let mut game = test_game();
        game.enter_bird(0);
        game.player_mut().y = 5.0;
        let mut t = 3_000;
        while game.mode() != Mode::Splat {
            game.tick(t);
            t += 16;
        }
        let list = frame(&game);
        let particles = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRotatedSquare { .. } | DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(particles, PARTICLE_COUNT);
        assert_eq!(list.texts(), vec!["Points: 0", "Top Scores:"]);
    }

    #[test]
    fn splat_text_is_pixel_art_only() {
        let mut game = test_game();
        game.enter_bird(0);
        game.player_mut().y = 0.0;
        let mut t = 3_000;
        while game.mode() != Mode::SplatText {
            game.tick(t);
            t += 16;
        }
        let list = frame(&game);
        assert!(list.texts().is_empty());
        let blocks = SPLAT_ART.iter().flat_map(|l| l.chars()).filter(|c| *c != ' ').count();
        // clear + ground + blocks
        assert_eq!(list.commands().len(), 2 + blocks);
    }
}
