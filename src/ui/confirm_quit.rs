//! Quit-confirmation dialog shown while the form is unfinished.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Selection state for the quit dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitSelection {
    Stay,
    Leave,
}

impl QuitSelection {
    fn toggled(self) -> Self {
        match self {
            Self::Stay => Self::Leave,
            Self::Leave => Self::Stay,
        }
    }
}

pub struct ConfirmQuitDialog {
    pub visible: bool,
    pub selection: QuitSelection,
}

impl ConfirmQuitDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            selection: QuitSelection::Stay,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.selection = QuitSelection::Stay;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.selection = self.selection.toggled();
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Leave the form? ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(block, area);

        let inner = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Min(2),    // message
                Constraint::Length(1), // buttons
            ])
            .split(area);

        let message = Paragraph::new(
            "Your answers are not submitted yet. Anything on pages you have \
             not completed will be lost.",
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
        frame.render_widget(message, inner[0]);

        let stay_style = if self.selection == QuitSelection::Stay {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        let leave_style = if self.selection == QuitSelection::Leave {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };

        let buttons = Line::from(vec![
            Span::styled(" [S]tay ", stay_style),
            Span::raw("   "),
            Span::styled(" [L]eave ", leave_style),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            inner[1],
        );
    }
}

impl Default for ConfirmQuitDialog {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
