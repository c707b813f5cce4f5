//! Paints a [`DisplayList`] onto a ratatui canvas.
//!
//! The game draws in canvas pixels with y pointing down; the ratatui canvas
//! has y pointing up, so every coordinate is flipped against the canvas
//! height. Filled shapes are rasterised as horizontal scan lines at half the
//! half-block pixel pitch so no row is skipped.

use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};

use crate::render::{DisplayList, DrawCommand, Rgba, TextAlign};

const BOLD_FONT: f64 = 40.0;

/// Canvas units covered by one half-block pixel.
#[derive(Debug, Clone, Copy)]
struct PixelSize {
    x: f64,
    y: f64,
}

impl PixelSize {
    fn new(area: Rect, width: f64, height: f64) -> Self {
        Self {
            x: width / area.width.max(1) as f64,
            y: height / (area.height.max(1) as f64 * 2.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Fill {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Polygon(Vec<(f64, f64)>),
}

impl Fill {
    fn from_command(command: &DrawCommand) -> Option<(Fill, Rgba)> {
        let fill = match *command {
            DrawCommand::FillRect { x, y, w, h, color } => (Fill::Rect { x, y, w, h }, color),
            DrawCommand::FillCircle { cx, cy, r, color } => {
                (Fill::Ellipse { cx, cy, rx: r, ry: r }, color)
            }
            DrawCommand::FillEllipse { cx, cy, rx, ry, color } => {
                (Fill::Ellipse { cx, cy, rx, ry }, color)
            }
            DrawCommand::FillRotatedSquare { cx, cy, size, rotation, color } => {
                (Fill::Polygon(rotated_square(cx, cy, size, rotation)), color)
            }
            DrawCommand::FillPolygon { ref points, color } => (Fill::Polygon(points.clone()), color),
            DrawCommand::Clear | DrawCommand::Text { .. } => return None,
        };
        Some(fill)
    }

    /// Top and bottom y, or None for degenerate shapes.
    fn extent(&self) -> Option<(f64, f64)> {
        match self {
            Fill::Rect { y, w, h, .. } if *w > 0.0 && *h > 0.0 => Some((*y, y + h)),
            Fill::Ellipse { cy, rx, ry, .. } if *rx > 0.0 && *ry > 0.0 => Some((cy - ry, cy + ry)),
            Fill::Polygon(points) if points.len() >= 3 => {
                let top = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
                let bottom = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
                Some((top, bottom))
            }
            _ => None,
        }
    }

    /// Horizontal spans covered at row `y`.
    fn spans(&self, y: f64) -> Vec<(f64, f64)> {
        match self {
            Fill::Rect { x, w, .. } => vec![(*x, x + w)],
            Fill::Ellipse { cx, cy, rx, ry } => {
                let t = (y - cy) / ry;
                if t.abs() > 1.0 {
                    return Vec::new();
                }
                let half = rx * (1.0 - t * t).sqrt();
                vec![(cx - half, cx + half)]
            }
            Fill::Polygon(points) => polygon_spans(points, y),
        }
    }
}

fn rotated_square(cx: f64, cy: f64, size: f64, rotation: f64) -> Vec<(f64, f64)> {
    let h = size / 2.0;
    let (sin, cos) = rotation.sin_cos();
    [(-h, -h), (h, -h), (h, h), (-h, h)]
        .iter()
        .map(|&(dx, dy)| (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos))
        .collect()
}

/// Even-odd scan line intersection.
fn polygon_spans(points: &[(f64, f64)], y: f64) -> Vec<(f64, f64)> {
    let mut xs = Vec::new();
    for i in 0..points.len() {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % points.len()];
        if (y1 <= y && y < y2) || (y2 <= y && y < y1) {
            xs.push(x1 + (y - y1) / (y2 - y1) * (x2 - x1));
        }
    }
    xs.sort_by(|a, b| a.total_cmp(b));
    xs.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}

fn sample_rows(top: f64, bottom: f64, step: f64) -> Vec<f64> {
    let first = (top / step).floor() as i64;
    let last = (bottom / step).ceil() as i64;
    let rows: Vec<f64> = (first..=last)
        .map(|r| (r as f64 + 0.5) * step)
        .filter(|y| *y >= top && *y <= bottom)
        .collect();
    if rows.is_empty() {
        vec![(top + bottom) / 2.0]
    } else {
        rows
    }
}

fn to_color(color: Rgba) -> Color {
    let (r, g, b) = color.over_black();
    Color::Rgb(r, g, b)
}

pub fn render_display_list(
    frame: &mut Frame,
    area: Rect,
    list: &DisplayList,
    width: f64,
    height: f64,
    shake: Option<(f64, f64)>,
) {
    let (sx, sy) = shake.unwrap_or((0.0, 0.0));
    let px = PixelSize::new(area, width, height);
    let canvas = Canvas::default()
        .marker(Marker::HalfBlock)
        .background_color(Color::Black)
        .x_bounds([-sx, width - sx])
        .y_bounds([sy, height + sy])
        .paint(move |ctx| {
            for command in list.commands() {
                paint(ctx, command, height, px);
            }
        });
    frame.render_widget(canvas, area);
}

fn paint(ctx: &mut Context, command: &DrawCommand, height: f64, px: PixelSize) {
    if let DrawCommand::Text { x, y, text, size, align, color } = command {
        let span = text.chars().count() as f64 * px.x;
        let left = match align {
            TextAlign::Left => *x,
            TextAlign::Center => x - span / 2.0,
            TextAlign::Right => x - span,
        };
        let mut style = Style::default().fg(to_color(*color));
        if *size >= BOLD_FONT {
            style = style.add_modifier(Modifier::BOLD);
        }
        ctx.print(left, height - (y - size / 2.0), Line::styled(text.clone(), style));
        return;
    }

    let Some((fill, color)) = Fill::from_command(command) else {
        return;
    };
    let Some((top, bottom)) = fill.extent() else {
        return;
    };
    let color = to_color(color);
    for y in sample_rows(top, bottom, px.y / 2.0) {
        for (x1, x2) in fill.spans(y) {
            ctx.draw(&CanvasLine {
                x1,
                y1: height - y,
                x2,
                y2: height - y,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::WHITE;
    use ratatui::backend::TestBackend;

    #[test]
    fn ellipse_spans_narrow_towards_edges() {
        let fill = Fill::Ellipse { cx: 10.0, cy: 10.0, rx: 4.0, ry: 2.0 };
        assert_eq!(fill.spans(10.0), vec![(6.0, 14.0)]);
        assert!(fill.spans(13.0).is_empty());
        let (a, b) = fill.spans(11.0)[0];
        assert!(b - a < 8.0 && b - a > 0.0);
    }

    #[test]
    fn triangle_spans() {
        let fill = Fill::Polygon(vec![(0.0, 0.0), (10.0, 5.0), (0.0, 10.0)]);
        assert_eq!(fill.extent(), Some((0.0, 10.0)));
        let spans = fill.spans(5.0);
        assert_eq!(spans.len(), 1);
        assert!((spans[0].0 - 0.0).abs() < 1e-9);
        assert!((spans[0].1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rotated_square_keeps_area_centre() {
        let corners = rotated_square(5.0, 5.0, 2.0, std::f64::consts::FRAC_PI_4);
        let cx: f64 = corners.iter().map(|p| p.0).sum::<f64>() / 4.0;
        let cy: f64 = corners.iter().map(|p| p.1).sum::<f64>() / 4.0;
        assert!((cx - 5.0).abs() < 1e-9 && (cy - 5.0).abs() < 1e-9);
        let fill = Fill::Polygon(corners);
        let (top, bottom) = fill.extent().unwrap();
        assert!((bottom - top - 2.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn tiny_shapes_still_get_a_row() {
        let rows = sample_rows(10.1, 10.2, 5.0);
        assert_eq!(rows.len(), 1);
        assert!((rows[0] - 10.15).abs() < 1e-9);
        assert_eq!(sample_rows(0.0, 10.0, 5.0), vec![2.5, 7.5]);
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        assert!(Fill::Rect { x: 0.0, y: 0.0, w: 0.0, h: 5.0 }.extent().is_none());
        assert!(Fill::Polygon(vec![(0.0, 0.0), (1.0, 1.0)]).extent().is_none());
    }

    #[test]
    fn paints_ground_and_text() {
        let mut list = DisplayList::new();
        list.clear();
        list.fill_rect(0.0, 350.0, 800.0, 50.0, Rgba::rgb(0x55, 0x55, 0x55));
        list.text(400.0, 300.0, "Game Over", 48.0, TextAlign::Center, WHITE);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render_display_list(f, area, &list, 800.0, 400.0, None);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Game Over"));

        let ground = Color::Rgb(0x55, 0x55, 0x55);
        let cell = buffer.cell((50u16, 29u16)).unwrap();
        assert!(cell.fg == ground || cell.bg == ground);
    }
}
