//! System log and user-facing notices.
//!
//! The system log is for operators; flash notices are one-shot messages shown
//! to whoever is using the host's admin interface.

use std::sync::Mutex;

use tracing::{error, info};

/// Structured context attached to a system log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    /// Event category, e.g. `extensions` or `exception`.
    pub event: &'static str,
    /// Rendered error chain, when the entry is about a caught failure.
    pub error: Option<String>,
}

impl LogContext {
    pub fn extensions() -> Self {
        Self {
            event: "extensions",
            error: None,
        }
    }

    /// Context for a caught failure; records the error's source chain, or
    /// the error itself when it has no source.
    pub fn exception(err: &dyn std::error::Error) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        let rendered = if causes.is_empty() {
            err.to_string()
        } else {
            causes.join(": ")
        };
        Self {
            event: "exception",
            error: Some(rendered),
        }
    }
}

/// System-level structured logger.
pub trait Logger: Send + Sync {
    fn critical(&self, message: &str, context: &LogContext);
    fn error(&self, message: &str, context: &LogContext);
    fn info(&self, message: &str, context: &LogContext);
}

/// [`Logger`] that forwards to `tracing`.
///
/// `tracing` has no critical level; those entries are emitted at error level
/// with `severity = "critical"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn critical(&self, message: &str, context: &LogContext) {
        error!(
            event = context.event,
            severity = "critical",
            error = context.error.as_deref(),
            "{message}"
        );
    }

    fn error(&self, message: &str, context: &LogContext) {
        error!(
            event = context.event,
            severity = "error",
            error = context.error.as_deref(),
            "{message}"
        );
    }

    fn info(&self, message: &str, context: &LogContext) {
        info!(event = context.event, "{message}");
    }
}

/// One-shot notices for the user.
pub trait FlashNotifier: Send + Sync {
    fn error(&self, message: &str);
}

/// A queued flash notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Error(String),
}

/// In-memory [`FlashNotifier`]; the host drains it with [`FlashBag::take`]
/// when it renders the next response.
#[derive(Debug, Default)]
pub struct FlashBag {
    messages: Mutex<Vec<Flash>>,
}

impl FlashBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending notice, oldest first.
    pub fn take(&self) -> Vec<Flash> {
        match self.messages.lock() {
            Ok(mut messages) => std::mem::take(&mut *messages),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        match self.messages.lock() {
            Ok(messages) => messages.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FlashNotifier for FlashBag {
    fn error(&self, message: &str) {
        let flash = Flash::Error(message.to_string());
        match self.messages.lock() {
            Ok(mut messages) => messages.push(flash),
            Err(poisoned) => poisoned.into_inner().push(flash),
        }
    }
}
