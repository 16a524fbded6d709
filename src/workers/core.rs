//! Core worker utilities

use crate::config::Config;
use crate::consts::cli_consts::refresh;
use crate::environment::Environment;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed channel means the UI is gone; the event is dropped.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_roster_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::roster_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_caller_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::caller_with_level(message, event_type, log_level))
            .await;
    }
}

/// Worker configuration shared across all worker types
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub environment: Environment,
    pub poll_interval: Duration,
    pub call_refresh_delay: Duration,
    /// Periodic agent roster reload; `None` loads the roster once.
    pub agent_refresh: Option<Duration>,
}

impl WorkerConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            poll_interval: refresh::poll_interval(),
            call_refresh_delay: refresh::call_refresh_delay(),
            agent_refresh: None,
        }
    }

    pub fn from_config(environment: Environment, config: &Config) -> Self {
        Self {
            environment,
            poll_interval: config.poll_interval(),
            call_refresh_delay: config.call_refresh_delay(),
            agent_refresh: config.agent_refresh_interval(),
        }
    }
}
