//! Customer list polling and agent roster loading

use super::core::{EventSender, WorkerConfig};
use crate::api::Backend;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType, StateUpdate};
use crate::logging::LogLevel;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Hands out strictly increasing fetch sequence numbers, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct RefreshSequencer {
    last_issued: Arc<AtomicU64>,
}

impl RefreshSequencer {
    pub fn next(&self) -> u64 {
        self.last_issued.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Fetches customers and agents and reports the results as events.
#[derive(Clone)]
pub struct Refresher {
    backend: Arc<dyn Backend>,
    sequencer: RefreshSequencer,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl Refresher {
    pub fn new(backend: Arc<dyn Backend>, event_sender: EventSender) -> Self {
        Self {
            backend,
            sequencer: RefreshSequencer::default(),
            event_sender,
            classifier: ErrorClassifier::new(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Fetch the customer list once. Returns whether the fetch succeeded.
    ///
    /// The sequence number is taken before the request goes out, so a slow
    /// response never overwrites a newer one on the dashboard.
    pub async fn refresh_customers(&self) -> bool {
        let seq = self.sequencer.next();
        match self.backend.list_customers().await {
            Ok(customers) => {
                let msg = format!("Loaded {} customers", customers.len());
                self.event_sender
                    .send_event(
                        Event::refresher_with_level(msg, EventType::Success, LogLevel::Info)
                            .with_update(StateUpdate::CustomersLoaded { seq, customers }),
                    )
                    .await;
                true
            }
            Err(e) => {
                let log_level = self.classifier.classify_api_error(&e);
                self.event_sender
                    .send_event(
                        Event::refresher_with_level(
                            format!("Failed to load customers: {}", e),
                            EventType::Error,
                            log_level,
                        )
                        .with_update(StateUpdate::CustomersFailed { seq }),
                    )
                    .await;
                false
            }
        }
    }

    /// Run a refresh in the background. Overlapping refreshes are allowed.
    pub fn spawn_refresh(&self) -> JoinHandle<bool> {
        let refresher = self.clone();
        tokio::spawn(async move { refresher.refresh_customers().await })
    }

    /// Load the agent roster. On failure the previous roster stays in place.
    pub async fn load_agents(&self) -> bool {
        match self.backend.list_agents().await {
            Ok(agents) => {
                let msg = format!("Loaded {} agents", agents.len());
                self.event_sender
                    .send_event(
                        Event::roster_with_level(msg, EventType::Success, LogLevel::Info)
                            .with_update(StateUpdate::AgentsLoaded(agents)),
                    )
                    .await;
                true
            }
            Err(e) => {
                let log_level = self.classifier.classify_api_error(&e);
                self.event_sender
                    .send_roster_event(
                        format!("Failed to load agents: {}", e),
                        EventType::Error,
                        log_level,
                    )
                    .await;
                false
            }
        }
    }
}

fn periodic(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn tick_if_enabled(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Load agents, then customers, then poll customers until shutdown.
pub async fn refresh_loop(
    refresher: Refresher,
    config: WorkerConfig,
    mut shutdown: broadcast::Receiver<()>,
) {
    let initial = async {
        refresher.load_agents().await;
        refresher.refresh_customers().await;
    };
    tokio::select! {
        _ = shutdown.recv() => return,
        _ = initial => {}
    }

    log::debug!(
        "polling {} every {:?}",
        refresher.backend().environment().api_url(),
        config.poll_interval
    );
    let mut poll = periodic(config.poll_interval);
    let mut roster = config.agent_refresh.map(periodic);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = poll.tick() => {
                refresher.spawn_refresh();
            }
            _ = tick_if_enabled(&mut roster) => {
                refresher.load_agents().await;
            }
        }
    }
    log::debug!("refresh loop stopped");
}
