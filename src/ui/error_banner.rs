//! Top-of-screen banner for user-visible errors.
//!
//! Render-only: the message and its display window live in the
//! controller.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(format!(" {message}")).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(banner, area);
}
