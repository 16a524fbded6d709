//! Session setup and initialization

use crate::api::{Backend, BackendClient};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::workers::{ActionRunner, EventSender, Refresher, WorkerConfig, refresh_loop};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Runs on-demand refreshes
    pub refresher: Refresher,
    /// Runs calls and mutations
    pub actions: ActionRunner,
    /// Worker timing, also shown by the dashboard
    pub worker_config: WorkerConfig,
}

impl SessionData {
    pub fn environment(&self) -> &Environment {
        &self.worker_config.environment
    }
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the backend client
/// 2. Sets up the event and shutdown channels
/// 3. Starts the refresh loop (agents first, then customers every poll interval)
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub async fn setup_session(worker_config: WorkerConfig) -> Result<SessionData, Box<dyn Error>> {
    let client = BackendClient::new(worker_config.environment.clone())?;
    let backend: Arc<dyn Backend> = Arc::new(client);
    Ok(setup_session_with_backend(backend, worker_config))
}

/// Same as [`setup_session`] with a caller-supplied backend.
pub fn setup_session_with_backend(
    backend: Arc<dyn Backend>,
    worker_config: WorkerConfig,
) -> SessionData {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(event_sender);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let refresher = Refresher::new(backend, event_sender.clone());
    let actions = ActionRunner::new(
        refresher.clone(),
        event_sender,
        worker_config.call_refresh_delay,
    );

    let poller = tokio::spawn(refresh_loop(
        refresher.clone(),
        worker_config.clone(),
        shutdown_sender.subscribe(),
    ));

    SessionData {
        event_receiver,
        join_handles: vec![poller],
        shutdown_sender,
        refresher,
        actions,
        worker_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBackend;
    use crate::events::StateUpdate;

    #[tokio::test]
    async fn test_session_starts_polling_and_stops_on_shutdown() {
        let mut mock = MockBackend::new();
        mock.expect_environment().return_const(Environment::Local);
        mock.expect_list_agents().returning(|| Ok(vec![]));
        mock.expect_list_customers().returning(|| Ok(vec![]));

        let mut session =
            setup_session_with_backend(Arc::new(mock), WorkerConfig::new(Environment::Local));

        let first = session.event_receiver.recv().await.unwrap();
        assert_eq!(first.update, Some(StateUpdate::AgentsLoaded(vec![])));
        let second = session.event_receiver.recv().await.unwrap();
        assert!(matches!(
            second.update,
            Some(StateUpdate::CustomersLoaded { seq: 1, .. })
        ));

        let _ = session.shutdown_sender.send(());
        for handle in session.join_handles {
            handle.await.unwrap();
        }
    }
}
