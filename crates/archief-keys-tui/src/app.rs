//! Core TUI application state and event handling.

use archief_keys_core::{KeyDown, LogReader, Navigator, PageSession};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::warn;

use crate::panels::{HistoryPanel, LogsPanel, ShortcutsPanel};

/// TUI application state.
pub struct App<N> {
    /// Whether the application should quit.
    pub should_quit: bool,

    /// The page session every key press goes to.
    pub session: PageSession<N>,

    pub shortcuts: ShortcutsPanel,
    pub history: HistoryPanel,
    pub logs: LogsPanel,

    /// Status message displayed at the bottom.
    pub status: String,
}

impl<N: Navigator> App<N> {
    pub fn new(session: PageSession<N>, log_reader: LogReader) -> Self {
        let status = format!("{}  (Ctrl+C to quit)", session.base_url());
        Self {
            should_quit: false,
            session,
            shortcuts: ShortcutsPanel::new(),
            history: HistoryPanel,
            logs: LogsPanel::new(log_reader),
            status,
        }
    }

    /// Handle a key press. Everything except Ctrl+C goes to the router.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.should_quit = true;
            return;
        }

        match self.session.press(&KeyDown::from(key.code)) {
            Ok(Some(location)) => self.status = format!("opening {location}"),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "navigation failed");
                self.status = format!("navigation failed: {e}");
            }
        }
    }

    /// Tick: refresh data from live sources.
    pub fn tick(&mut self) {
        self.logs.refresh();
    }

    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Min(9),    // shortcuts + history
                Constraint::Min(5),    // logs
                Constraint::Length(2), // status bar
            ])
            .split(frame.area());

        let header = Paragraph::new("archief-keys")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(rows[1]);
        self.shortcuts.render(frame, columns[0]);
        self.history.render(
            frame,
            columns[1],
            self.session.page_loads(),
            self.session.history(),
            self.session.prev_key(),
        );

        self.logs.render(frame, rows[2]);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status, rows[3]);
    }
}
