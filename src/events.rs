//! Event System
//!
//! Types and implementations for worker events and logging

use crate::logging::{LogLevel, should_log_with_env};
use crate::models::{Agent, Customer};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that polls the customer list.
    Refresher,
    /// Worker that loads the agent roster.
    Roster,
    /// Worker that places outbound calls.
    Caller,
    /// Worker that creates, updates and deletes customers.
    Editor,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

/// Kind of customer mutation, for reporting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

/// State carried by an event for the dashboard to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// A customer list fetch completed. `seq` orders overlapping fetches.
    CustomersLoaded { seq: u64, customers: Vec<Customer> },
    /// A customer list fetch failed; the displayed list stays as it is.
    CustomersFailed { seq: u64 },
    /// The agent roster was (re)loaded.
    AgentsLoaded(Vec<Agent>),
    /// The backend accepted a call.
    CallAccepted {
        customer_id: String,
        message: String,
        conversation_id: Option<String>,
    },
    /// The call could not be placed.
    CallFailed { customer_id: String, message: String },
    /// A create/update/delete succeeded. `submission` names the overlay that sent it.
    MutationApplied { kind: MutationKind, submission: u64 },
    /// A create/update/delete failed with the given operator-facing message.
    MutationFailed { message: String, submission: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional state information for the dashboard
    pub update: Option<StateUpdate>,
}

impl Event {
    pub fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            update: None,
        }
    }

    pub fn with_update(mut self, update: StateUpdate) -> Self {
        self.update = Some(update);
        self
    }

    pub fn refresher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Refresher, msg, event_type, log_level)
    }

    pub fn roster_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Roster, msg, event_type, log_level)
    }

    pub fn caller_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Caller, msg, event_type, log_level)
    }

    pub fn editor_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Editor, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let mut event = Event::refresher_with_level(
            "Loaded 3 customers".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        event.timestamp = "2026-10-17 09:00:00".to_string();
        assert_eq!(
            event.to_string(),
            "Success [2026-10-17 09:00:00] Loaded 3 customers"
        );
    }

    #[test]
    fn test_warnings_and_successes_are_displayed() {
        let warn = Event::caller_with_level("x".into(), EventType::Error, LogLevel::Warn);
        let ok = Event::editor_with_level("x".into(), EventType::Success, LogLevel::Debug);
        assert!(warn.should_display());
        assert!(ok.should_display());
    }

    #[test]
    fn test_with_update_attaches_state() {
        let event = Event::roster_with_level("x".into(), EventType::Success, LogLevel::Info)
            .with_update(StateUpdate::AgentsLoaded(vec![]));
        assert_eq!(event.worker, Worker::Roster);
        assert_eq!(event.update, Some(StateUpdate::AgentsLoaded(vec![])));
    }
}
