//! TUI panel implementations.

mod history;
mod logs;
mod shortcuts;

pub use history::HistoryPanel;
pub use logs::LogsPanel;
pub use shortcuts::ShortcutsPanel;
