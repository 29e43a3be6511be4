//! Event types and multi-step authenticated procedures.
//!
//! Engine lifecycle events and workflow step reports share one event shape so
//! a presentation layer can render a single journal.

mod pin;


use std::time::{SystemTime, UNIX_EPOCH};

pub use pin::{MinPinLengthChange, PinChange};

/// Severity levels used when reporting engine and workflow events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowLevel {
    Info,
    Success,
    Warn,
    Error,
}

/// Single timestamped line of output produced by the engine.
#[derive(Debug, Clone)]
pub struct WorkflowEvent {
    /// Milliseconds since the Unix epoch at emission time.
    pub timestamp_ms: u128,
    pub level: WorkflowLevel,
    pub message: String,
}

/// Aggregated report returned by a workflow entry point.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub title: String,
    pub events: Vec<WorkflowEvent>,
}

/// Convenience constructor that wraps the repeated boilerplate.
pub fn event(level: WorkflowLevel, message: impl Into<String>) -> WorkflowEvent {
    WorkflowEvent {
        timestamp_ms: now_ms(),
        level,
        message: message.into(),
    }
}

/// Mirror an event to the process logger at the matching level.
pub(crate) fn log_event(event: &WorkflowEvent) {
    match event.level {
        WorkflowLevel::Info | WorkflowLevel::Success => log::info!("{}", event.message),
        WorkflowLevel::Warn => log::warn!("{}", event.message),
        WorkflowLevel::Error => log::error!("{}", event.message),
    }
}

pub(crate) fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
