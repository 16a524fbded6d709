//! Operator-triggered calls and customer mutations

use super::core::EventSender;
use super::refresher::Refresher;
use crate::api::Backend;
use crate::api::error::ApiError;
use crate::consts::cli_consts::{GENERIC_CALL_ERROR, GENERIC_MUTATION_ERROR};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType, MutationKind, StateUpdate};
use crate::forms::Mutation;
use crate::logging::LogLevel;
use crate::models::{CallRequest, CallResponse};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// What the call panel should show once the request settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Accepted {
        message: String,
        customer_name: Option<String>,
        conversation_id: Option<String>,
    },
    Failed {
        message: String,
    },
}

impl CallOutcome {
    pub fn from_result(result: Result<CallResponse, ApiError>) -> Self {
        match result {
            Ok(response) if response.success => CallOutcome::Accepted {
                message: response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Call initiated".to_string()),
                customer_name: response.customer_name,
                conversation_id: response.conversation_id,
            },
            Ok(response) => CallOutcome::Failed {
                message: response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_CALL_ERROR.to_string()),
            },
            Err(e) => CallOutcome::Failed {
                message: e.user_message(GENERIC_CALL_ERROR),
            },
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, CallOutcome::Accepted { .. })
    }
}

/// Issue the request a mutation stands for.
pub async fn send_mutation(backend: &dyn Backend, mutation: &Mutation) -> Result<(), ApiError> {
    match mutation {
        Mutation::Create(draft) => backend.create_customer(draft).await,
        Mutation::Update { id, draft } => backend.update_customer(id, draft).await,
        Mutation::Delete { id } => backend.delete_customer(id).await,
    }
}

/// Runs calls and mutations, then refreshes the customer list through the sequenced path.
#[derive(Clone)]
pub struct ActionRunner {
    refresher: Refresher,
    event_sender: EventSender,
    classifier: ErrorClassifier,
    call_refresh_delay: Duration,
}

impl ActionRunner {
    pub fn new(refresher: Refresher, event_sender: EventSender, call_refresh_delay: Duration) -> Self {
        Self {
            refresher,
            event_sender,
            classifier: ErrorClassifier::new(),
            call_refresh_delay,
        }
    }

    /// Place a call for `customer_id`. An accepted call is followed by a delayed refresh.
    pub async fn place_call(&self, customer_id: String, request: CallRequest) -> CallOutcome {
        self.event_sender
            .send_caller_event(
                format!("Calling {}...", request.phone),
                EventType::Refresh,
                LogLevel::Debug,
            )
            .await;

        let result = self.refresher.backend().initiate_call(&request).await;
        let failure_level = match &result {
            Err(e) => self.classifier.classify_api_error(e),
            Ok(_) => LogLevel::Warn,
        };
        let outcome = CallOutcome::from_result(result);

        match &outcome {
            CallOutcome::Accepted {
                message,
                customer_name,
                conversation_id,
            } => {
                let who = customer_name.as_deref().unwrap_or(&request.phone);
                self.event_sender
                    .send_event(
                        Event::caller_with_level(
                            format!("Call started for {}: {}", who, message),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .with_update(StateUpdate::CallAccepted {
                            customer_id,
                            message: message.clone(),
                            conversation_id: conversation_id.clone(),
                        }),
                    )
                    .await;
                sleep(self.call_refresh_delay).await;
                self.refresher.refresh_customers().await;
            }
            CallOutcome::Failed { message } => {
                self.event_sender
                    .send_event(
                        Event::caller_with_level(
                            format!("Call to {} failed: {}", request.phone, message),
                            EventType::Error,
                            failure_level,
                        )
                        .with_update(StateUpdate::CallFailed {
                            customer_id,
                            message: message.clone(),
                        }),
                    )
                    .await;
            }
        }
        outcome
    }

    pub fn spawn_call(&self, customer_id: String, request: CallRequest) -> JoinHandle<CallOutcome> {
        let runner = self.clone();
        tokio::spawn(async move { runner.place_call(customer_id, request).await })
    }

    /// Send a create/update/delete. On success the list is refreshed; on failure the
    /// operator-facing message is returned. `submission` is echoed in the state update.
    pub async fn apply_mutation(
        &self,
        submission: u64,
        mutation: Mutation,
    ) -> Result<MutationKind, String> {
        let kind = mutation.kind();
        match send_mutation(self.refresher.backend().as_ref(), &mutation).await {
            Ok(()) => {
                self.event_sender
                    .send_event(
                        Event::editor_with_level(
                            format!("Customer {}", kind.to_string().to_lowercase()),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .with_update(StateUpdate::MutationApplied { kind, submission }),
                    )
                    .await;
                self.refresher.refresh_customers().await;
                Ok(kind)
            }
            Err(e) => {
                let message = e.user_message(GENERIC_MUTATION_ERROR);
                self.event_sender
                    .send_event(
                        Event::editor_with_level(
                            format!("Failed to {}: {}", mutation.describe(), message),
                            EventType::Error,
                            self.classifier.classify_api_error(&e),
                        )
                        .with_update(StateUpdate::MutationFailed {
                            message: message.clone(),
                            submission,
                        }),
                    )
                    .await;
                Err(message)
            }
        }
    }

    pub fn spawn_mutation(
        &self,
        submission: u64,
        mutation: Mutation,
    ) -> JoinHandle<Result<MutationKind, String>> {
        let runner = self.clone();
        tokio::spawn(async move { runner.apply_mutation(submission, mutation).await })
    }
}
