//! Terminal success screen shown after the form is submitted.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(2), // check mark
            Constraint::Length(1), // headline
            Constraint::Length(3), // body
            Constraint::Length(1), // exit hint
            Constraint::Min(0),
        ])
        .split(frame.area());

    let check = Paragraph::new("✓")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(check, chunks[1]);

    let headline = Paragraph::new("Form Submitted Successfully!")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(headline, chunks[2]);

    let body = Paragraph::new(
        "Thank you for completing the form. Your responses have been saved\n\
         and will be reviewed shortly.",
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(body, chunks[3]);

    let hint = Paragraph::new("Press Esc to exit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[4]);
}
