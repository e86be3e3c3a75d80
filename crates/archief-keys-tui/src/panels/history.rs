//! History panel: navigations made in this session, newest at the bottom.

use std::collections::VecDeque;

use archief_keys_core::Visit;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Renders a session's navigation history.
pub struct HistoryPanel;

impl HistoryPanel {
    /// Title showing the page-load count and the current page's previous key.
    pub fn title(page_loads: usize, prev_key: Option<&str>) -> String {
        let prev = prev_key.map_or_else(|| "-".to_string(), |k| format!("{k:?}"));
        format!(" Navigations ({page_loads}) prev key: {prev} ")
    }

    /// Draw the most recent visits that fit in `area`. Rows are numbered by
    /// page load, counting visits the session no longer keeps.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        page_loads: usize,
        history: &VecDeque<Visit>,
        prev_key: Option<&str>,
    ) {
        let block = Block::default()
            .title(Self::title(page_loads, prev_key))
            .borders(Borders::ALL);

        if history.is_empty() {
            let empty = Paragraph::new("  (press a shortcut key)")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let visible = area.height.saturating_sub(2) as usize;
        let skip = history.len().saturating_sub(visible);
        let first = page_loads.saturating_sub(history.len()) + 1;
        let items: Vec<ListItem> = history
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, visit)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>4} ", first + i), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:<8}", format!("{:?}", visit.key)),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(visit.location.url().to_string()),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_without_prev_key() {
        assert_eq!(HistoryPanel::title(0, None), " Navigations (0) prev key: - ");
    }

    #[test]
    fn test_title_with_prev_key() {
        assert_eq!(
            HistoryPanel::title(3, Some("n")),
            " Navigations (3) prev key: \"n\" "
        );
    }
}
