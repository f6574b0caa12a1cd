//! TUI application: terminal lifecycle and event routing.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::FormsBackend;
use crate::config::Config;
use crate::controller::FormController;
use crate::session::{self, SessionHandle};
use crate::ui::{
    error_banner, success_view, ConfirmQuitDialog, LoadingIndicator, QuestionView, QuitSelection,
};

pub struct App {
    config: Config,
    controller: FormController,
    view: QuestionView,
    spinner: LoadingIndicator,
    confirm_quit: ConfirmQuitDialog,
    /// Page the textarea currently mirrors
    shown_page: usize,
    /// Flipped by the controller's completion callback
    submitted: Arc<AtomicBool>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, backend: Arc<dyn FormsBackend>) -> Self {
        let session = SessionHandle::new();
        // Fire-and-forget: a failed init degrades saves to no-ops
        tokio::spawn(session::initialize(Arc::clone(&backend), session.clone()));

        let submitted = Arc::new(AtomicBool::new(false));
        let completion_flag = Arc::clone(&submitted);
        let controller = FormController::new(
            backend,
            session,
            &config.form,
            Box::new(move || completion_flag.store(true, Ordering::SeqCst)),
        );

        Self {
            config,
            controller,
            view: QuestionView::new(),
            spinner: LoadingIndicator::new(),
            confirm_quit: ConfirmQuitDialog::new(),
            shown_page: 0,
            submitted,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }

            // Tick: expire the error banner and advance the spinner
            self.controller.expire_error();
            self.spinner.advance();
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn is_submitted(&self) -> bool {
        self.submitted.load(Ordering::SeqCst)
    }

    fn draw(&mut self, frame: &mut Frame) {
        if self.is_submitted() {
            success_view::render(frame);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(frame.area());

        if let Some(message) = self.controller.error() {
            error_banner::render(frame, chunks[0], message);
        }

        self.view.render(
            frame,
            chunks[1],
            self.controller.current_question(),
            self.controller.current_page(),
        );

        if self.controller.is_loading() {
            self.spinner.render(frame);
        }

        self.confirm_quit.render(frame);
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        // Quit confirmation takes priority
        if self.confirm_quit.visible {
            match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Esc => {
                    self.confirm_quit.hide();
                }
                KeyCode::Char('l') | KeyCode::Char('L') => {
                    self.should_quit = true;
                }
                KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                    self.confirm_quit.toggle();
                }
                KeyCode::Enter => match self.confirm_quit.selection {
                    QuitSelection::Stay => self.confirm_quit.hide(),
                    QuitSelection::Leave => self.should_quit = true,
                },
                _ => {}
            }
            return;
        }

        // Terminal success screen
        if self.is_submitted() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.should_quit = true;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.controller.submit().await,
                KeyCode::Char('c') => self.request_quit(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.request_quit();
            }
            KeyCode::Tab => {
                self.controller.go_next();
                self.sync_view();
            }
            KeyCode::BackTab => {
                self.controller.go_prev();
                self.sync_view();
            }
            _ => {
                if self.view.handle_key(key) {
                    let question = self.controller.current_question();
                    let value = self.view.value();
                    self.controller.change_answer(question, value);
                }
            }
        }
    }

    fn request_quit(&mut self) {
        if self.controller.should_confirm_close() {
            // Checkpoint the answer in progress before asking
            let question = self.controller.current_question();
            self.controller.save_on_blur(question);
            self.confirm_quit.show();
        } else {
            self.should_quit = true;
        }
    }

    /// Reload the textarea when navigation changed the page.
    fn sync_view(&mut self) {
        let page = self.controller.current_page();
        if page != self.shown_page {
            self.shown_page = page;
            let question = self.controller.current_question();
            self.view.load_answer(self.controller.answer(question));
        }
    }
}
