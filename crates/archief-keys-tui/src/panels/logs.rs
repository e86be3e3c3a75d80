//! Logs panel: the tail of the captured tracing events.

use archief_keys_core::{LogEntry, LogReader};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tracing::Level;

/// Tail view over a [`LogReader`], refreshed on every tick.
pub struct LogsPanel {
    reader: LogReader,
    entries: Vec<LogEntry>,
}

impl LogsPanel {
    pub fn new(reader: LogReader) -> Self {
        Self {
            reader,
            entries: Vec::new(),
        }
    }

    pub fn refresh(&mut self) {
        self.entries = self.reader.entries();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Logs ({}) ", self.entries.len());
        let block = Block::default().title(title).borders(Borders::ALL);

        if self.entries.is_empty() {
            let empty = Paragraph::new("  (no log entries yet)")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.entries.len().saturating_sub(visible);
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .skip(skip)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>8.2}s ", entry.elapsed_secs),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(format!("{:>5} ", entry.level), level_style(entry.level)),
                    Span::raw(entry.message.as_str()),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn level_style(level: Level) -> Style {
    match level {
        Level::ERROR => Style::default().fg(Color::Red),
        Level::WARN => Style::default().fg(Color::Yellow),
        Level::INFO => Style::default().fg(Color::Green),
        Level::DEBUG => Style::default().fg(Color::Blue),
        Level::TRACE => Style::default().fg(Color::DarkGray),
    }
}
