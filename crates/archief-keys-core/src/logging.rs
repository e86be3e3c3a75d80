//! Log capture for the TUI logs pane.
//!
//! [`LogCollector`] is a `tracing` layer that keeps the most recent events in
//! a bounded buffer; [`LogReader`] hands out snapshots of it.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// One captured event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Seconds since the collector was created.
    pub elapsed_secs: f64,
    /// Event level.
    pub level: Level,
    /// Module path the event came from.
    pub target: String,
    /// The event message followed by its fields as `name=value`.
    pub message: String,
}

#[derive(Debug)]
struct Ring {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    started: Instant,
}

impl Ring {
    fn push(&mut self, level: Level, target: String, message: String) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            elapsed_secs: self.started.elapsed().as_secs_f64(),
            level,
            target,
            message,
        });
    }
}

/// A `tracing` layer capturing events into a shared ring buffer.
#[derive(Debug, Clone)]
pub struct LogCollector {
    ring: Arc<Mutex<Ring>>,
}

impl LogCollector {
    /// Create a collector keeping at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: Arc::new(Mutex::new(Ring {
                entries: VecDeque::with_capacity(capacity),
                capacity,
                started: Instant::now(),
            })),
        }
    }

    /// A reader sharing this collector's buffer.
    pub fn reader(&self) -> LogReader {
        LogReader {
            ring: Arc::clone(&self.ring),
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCollector {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        if let Ok(mut ring) = self.ring.lock() {
            ring.push(
                *metadata.level(),
                metadata.target().to_string(),
                visitor.finish(),
            );
        }
    }
}

/// Read handle for the captured entries.
#[derive(Debug, Clone)]
pub struct LogReader {
    ring: Arc<Mutex<Ring>>,
}

impl LogReader {
    /// Snapshot of the captured entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.ring
            .lock()
            .map(|ring| ring.entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of captured entries.
    pub fn len(&self) -> usize {
        self.ring.lock().map(|ring| ring.entries.len()).unwrap_or(0)
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flattens an event into `message key=value key=value`.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    #[test]
    fn test_captures_level_and_message() {
        let collector = LogCollector::new(10);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        tracing::info!("page replaced");
        tracing::warn!("opener failed");

        let entries = reader.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[0].message, "page replaced");
        assert_eq!(entries[1].level, Level::WARN);
    }

    #[test]
    fn test_fields_follow_message() {
        let collector = LogCollector::new(10);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        let key = "h";
        tracing::info!(key = %key, page = 2, "navigating");

        let entries = reader.entries();
        assert_eq!(entries[0].message, "navigating key=h page=2");
    }

    #[test]
    fn test_oldest_entries_evicted() {
        let collector = LogCollector::new(2);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        tracing::info!("one");
        tracing::info!("two");
        tracing::info!("three");

        let messages: Vec<String> = reader.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let collector = LogCollector::new(0);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        tracing::info!("dropped");
        assert!(reader.is_empty());
    }
}
