//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::{CallStatus, DashboardState, Overlay};

use crate::events::{Event as WorkerEvent, StateUpdate};

use std::time::Instant;

impl DashboardState {
    /// Advance the animation tick and apply queued worker events in arrival order.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event.clone());
            self.process_event(&event);
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &WorkerEvent) {
        if let Some(update) = &event.update {
            self.apply_update(update.clone());
        }
    }

    pub fn apply_update(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::CustomersLoaded { seq, customers } => {
                // Newest issued fetch wins; an older response arriving late is dropped.
                if seq <= self.applied_seq() {
                    log::debug!("discarding stale customer list #{}", seq);
                    return;
                }
                self.set_applied_seq(seq);
                self.customers = customers;
                self.last_refresh = Some(Instant::now());
                self.last_refresh_failed = false;
                self.rebuild_rows();
            }
            StateUpdate::CustomersFailed { seq } => {
                if seq > self.applied_seq() {
                    self.last_refresh_failed = true;
                }
            }
            StateUpdate::AgentsLoaded(agents) => {
                self.agents.replace(agents);
                self.rebuild_rows();
            }
            StateUpdate::CallAccepted {
                customer_id,
                message,
                conversation_id,
            } => {
                self.finish_call(
                    &customer_id,
                    CallStatus::Connected {
                        message,
                        conversation_id,
                    },
                );
            }
            StateUpdate::CallFailed {
                customer_id,
                message,
            } => {
                self.finish_call(&customer_id, CallStatus::Failed { message });
            }
            StateUpdate::MutationApplied { kind, submission } => {
                if self.awaited_submission() == Some(submission) {
                    self.overlay = Overlay::None;
                }
                self.notice = Some(format!("Customer {}", kind.to_string().to_lowercase()));
            }
            StateUpdate::MutationFailed {
                message,
                submission,
            } => {
                if self.awaited_submission() != Some(submission) {
                    // Whatever is open now was not the sender.
                    self.notice = Some(message);
                } else if let Overlay::Form(form) = &mut self.overlay {
                    form.submission = None;
                    form.error = Some(message);
                } else {
                    self.overlay = Overlay::None;
                    self.notice = Some(format!("Delete failed: {}", message));
                }
            }
        }
    }

    /// Settle the call panel for `customer_id`. A panel closed meanwhile stays closed.
    fn finish_call(&mut self, customer_id: &str, status: CallStatus) {
        self.calls_in_flight = self.calls_in_flight.saturating_sub(1);
        if let Overlay::Call(panel) = &mut self.overlay {
            if panel.customer_id == customer_id {
                panel.status = status;
                return;
            }
        }
        self.notice = Some(match status {
            CallStatus::Connected { message, .. } => message,
            CallStatus::Failed { message } => format!("Call failed: {}", message),
            CallStatus::InProgress => return,
        });
    }
}
