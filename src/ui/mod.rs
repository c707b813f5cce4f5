pub mod canvas;
pub mod terminal;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::Mode;
use crate::render::DisplayList;

pub fn render(frame: &mut Frame, app: &App, list: &mut DisplayList) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🐦 Birdman Run ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Game field
            Constraint::Length(1), // Help
        ])
        .split(inner);

    app.game.draw(list);
    let config = app.game.config();
    canvas::render_display_list(
        frame,
        chunks[0],
        list,
        config.canvas_width,
        config.canvas_height,
        app.game.shake_offset(),
    );

    frame.render_widget(help_line(app.game.mode()), chunks[1]);
}

fn help_line(mode: Mode) -> Paragraph<'static> {
    let key = Style::default()
        .fg(Color::Rgb(80, 200, 255))
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::DarkGray);
    let sep = Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 60)));

    let spans = match mode {
        Mode::GameOver => vec![
            Span::styled(" SPACE", key),
            Span::styled(" Restart", text),
            sep,
            Span::styled("Q/Esc", key),
            Span::styled(" Quit", text),
        ],
        Mode::Bird | Mode::Falling => vec![
            Span::styled(" ←↑↓→", key),
            Span::styled(" Fly", text),
            sep,
            Span::styled("Q/Esc", key),
            Span::styled(" Quit", text),
        ],
        _ => vec![
            Span::styled(" ↑", key),
            Span::styled(" Jump", text),
            sep,
            Span::styled("Q/Esc", key),
            Span::styled(" Quit", text),
        ],
    };
    Paragraph::new(Line::from(spans))
}
