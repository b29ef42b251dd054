//! User-facing notification channel.
//!
//! # Responsibility
//! - Carry transient feedback messages with a severity and display duration.
//! - Decouple the controller from the concrete presentation surface.
//!
//! # Invariants
//! - Notices are additive: emitting one never replaces an earlier one.
//! - No notice is an error condition by itself; emission cannot fail.

use std::fmt::{Display, Formatter};

/// Default on-screen lifetime for a notice, in milliseconds.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 4000;

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// One transient feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Sink for user-facing notices.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Writes notices to stderr, tagged by severity.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        eprintln!("[{}] {}", notice.severity, notice.message);
    }
}

/// Collects notices in memory, preserving emission order.
///
/// Used by tests and by embedders that render notices themselves.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub notices: Vec<Notice>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages emitted with the given severity, in order.
    pub fn messages_with(&self, severity: Severity) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|notice| notice.severity == severity)
            .map(|notice| notice.message.as_str())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryNotifier, Notice, Notifier, Severity, DEFAULT_NOTICE_DURATION_MS};

    #[test]
    fn notices_default_to_four_seconds() {
        let notice = Notice::new("saved", Severity::Success);
        assert_eq!(notice.duration_ms, DEFAULT_NOTICE_DURATION_MS);
        assert_eq!(notice.with_duration(1500).duration_ms, 1500);
    }

    #[test]
    fn memory_notifier_stacks_without_replacing() {
        let mut notifier = MemoryNotifier::new();
        notifier.notify(Notice::new("first", Severity::Info));
        notifier.notify(Notice::new("second", Severity::Error));
        notifier.notify(Notice::new("third", Severity::Info));

        assert_eq!(notifier.notices.len(), 3);
        assert_eq!(notifier.messages_with(Severity::Info), vec!["first", "third"]);
        assert_eq!(notifier.messages_with(Severity::Error), vec!["second"]);
    }
}
