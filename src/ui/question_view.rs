//! The question page: prompt, answer input, and progress.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use tui_textarea::{CursorMove, TextArea};

use crate::form::{QuestionId, QUESTION_COUNT};

/// Renders one question page and owns the answer input widget.
///
/// The authoritative answer text lives in the controller; the textarea
/// is reloaded from it whenever the page changes.
pub struct QuestionView {
    textarea: TextArea<'static>,
}

impl QuestionView {
    pub fn new() -> Self {
        Self {
            textarea: styled_textarea(""),
        }
    }

    /// Replace the input buffer with the stored answer for a newly
    /// shown page, cursor at the end.
    pub fn load_answer(&mut self, value: &str) {
        self.textarea = styled_textarea(value);
    }

    /// Current input buffer contents.
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Forward a key to the textarea. Returns true if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, question: QuestionId, page: usize) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // page indicator
                Constraint::Length(1), // progress bar
                Constraint::Length(1),
                Constraint::Length(2), // prompt
                Constraint::Min(5),    // answer input
                Constraint::Length(1), // key hints
            ])
            .split(area);

        let indicator = Paragraph::new(format!("Question {} of {}", page + 1, QUESTION_COUNT))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(indicator, chunks[0]);

        let progress = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio((page + 1) as f64 / QUESTION_COUNT as f64)
            .label("");
        frame.render_widget(progress, chunks[1]);

        let prompt = Paragraph::new(question.prompt())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });
        frame.render_widget(prompt, chunks[3]);

        frame.render_widget(&self.textarea, chunks[4]);

        frame.render_widget(Paragraph::new(key_hints(page)), chunks[5]);
    }
}

impl Default for QuestionView {
    fn default() -> Self {
        Self::new()
    }
}

fn styled_textarea(value: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(value.lines().map(str::to_owned).collect());
    textarea.set_placeholder_text("Enter your answer...");
    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
    textarea.set_cursor_line_style(Style::default());
    textarea.set_block(Block::default().borders(Borders::ALL).title("Your Answer"));
    textarea.move_cursor(CursorMove::Bottom);
    textarea.move_cursor(CursorMove::End);
    textarea
}

fn key_hints(page: usize) -> Line<'static> {
    let hint = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(Color::Yellow);

    let mut spans = Vec::new();
    if page > 0 {
        spans.push(Span::styled("Shift+Tab", key));
        spans.push(Span::styled(" previous   ", hint));
    }
    if page + 1 < QUESTION_COUNT {
        spans.push(Span::styled("Tab", key));
        spans.push(Span::styled(" next   ", hint));
    } else {
        spans.push(Span::styled("Ctrl+S", key));
        spans.push(Span::styled(" submit   ", hint));
    }
    spans.push(Span::styled("Esc", key));
    spans.push(Span::styled(" quit", hint));

    Line::from(spans)
}
