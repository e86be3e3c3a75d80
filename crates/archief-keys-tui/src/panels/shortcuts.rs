//! Shortcuts panel: the route table plus the digit rules.

use archief_keys_core::KeyRouteMap;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

/// Static table of every shortcut the router knows.
pub struct ShortcutsPanel {
    rows: Vec<[String; 3]>,
}

impl ShortcutsPanel {
    pub fn new() -> Self {
        let mut rows: Vec<[String; 3]> = KeyRouteMap
            .iter()
            .map(|r| [r.key.to_string(), r.path.to_string(), r.label.to_string()])
            .collect();
        rows.push([
            "0-9".to_string(),
            "/bericht/latest/N".to_string(),
            "Latest berichten".to_string(),
        ]);
        rows.push([
            "n 0-9".to_string(),
            "/object/latest/N".to_string(),
            "Latest objects".to_string(),
        ]);
        Self { rows }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = self.rows.iter().map(|[key, path, label]| {
            Row::new(vec![
                Cell::from(Span::styled(
                    key.as_str(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(path.as_str()),
                Cell::from(Span::styled(
                    label.as_str(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(18),
                Constraint::Min(8),
            ],
        )
        .header(
            Row::new(vec!["Key", "Path", ""]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title(" Shortcuts ").borders(Borders::ALL));
        frame.render_widget(table, area);
    }
}

impl Default for ShortcutsPanel {
    fn default() -> Self {
        Self::new()
    }
}
