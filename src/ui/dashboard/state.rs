//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::forms::{CustomerForm, PendingDelete};
use crate::models::{CallRequest, Customer};
use crate::ui::app::UIConfig;
use crate::view::{AgentDirectory, CustomerRow, PortfolioStats, build_rows};

use chrono::{DateTime, Local, NaiveDate};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Progress of the most recent call request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    InProgress,
    Connected {
        message: String,
        conversation_id: Option<String>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPanel {
    pub customer_id: String,
    pub customer_name: String,
    pub agent_name: Option<String>,
    pub status: CallStatus,
}

/// Modal content drawn over the table. Only one is open at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Form(CustomerForm),
    ConfirmDelete(PendingDelete),
    Call(CallPanel),
}

/// Dashboard state: everything the renderer draws, owned by the UI loop.
#[derive(Debug)]
pub struct DashboardState {
    /// The backend the dashboard talks to.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Time between customer list polls, for the countdown gauge.
    pub poll_interval: Duration,

    /// Agent roster, loaded before the first customer render.
    pub agents: AgentDirectory,
    /// Last applied customer list, in backend order.
    pub customers: Vec<Customer>,
    /// Display rows derived from `customers`.
    pub rows: Vec<CustomerRow>,
    pub stats: PortfolioStats,
    /// Operator agent choice per customer id.
    pub agent_overrides: HashMap<String, String>,
    /// Selected row, by customer id.
    pub selected_id: Option<String>,
    pub overlay: Overlay,
    /// Calls sent whose outcome has not arrived yet.
    pub calls_in_flight: usize,
    /// One-line status message under the table.
    pub notice: Option<String>,

    /// When the last customer list was applied.
    pub last_refresh: Option<Instant>,
    /// Whether the newest fetch failed (the table shows older data).
    pub last_refresh_failed: bool,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter
    pub tick: usize,

    /// Highest fetch sequence number applied so far.
    applied_seq: u64,
    /// Last number handed to a form save or delete.
    submissions: u64,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            environment,
            start_time,
            with_background_color: ui_config.with_background_color,
            poll_interval: ui_config.poll_interval,
            agents: AgentDirectory::default(),
            customers: Vec::new(),
            rows: Vec::new(),
            stats: PortfolioStats::default(),
            agent_overrides: HashMap::new(),
            selected_id: None,
            overlay: Overlay::None,
            calls_in_flight: 0,
            notice: None,
            last_refresh: None,
            last_refresh_failed: false,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            applied_seq: 0,
            submissions: 0,
        }
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }

    pub(super) fn set_applied_seq(&mut self, seq: u64) {
        self.applied_seq = seq;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn row(&self, id: &str) -> Option<&CustomerRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn selected_row(&self) -> Option<&CustomerRow> {
        self.selected_index().and_then(|i| self.rows.get(i))
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected_id = None;
            return;
        }
        let last = self.rows.len() as isize - 1;
        let next = match self.selected_index() {
            Some(i) => (i as isize + delta).clamp(0, last),
            None => 0,
        };
        self.selected_id = Some(self.rows[next as usize].id.clone());
    }

    /// Re-derive rows from the current customers and agents.
    pub fn rebuild_rows(&mut self) {
        let now = Local::now();
        self.rebuild_rows_at(now.date_naive(), now);
    }

    pub fn rebuild_rows_at(&mut self, today: NaiveDate, now: DateTime<Local>) {
        let previous_index = self.selected_index();

        // Drop choices whose customer or agent no longer exists.
        let customers = &self.customers;
        let agents = &self.agents;
        self.agent_overrides.retain(|customer_id, agent_id| {
            customers.iter().any(|c| &c.id == customer_id) && agents.get(agent_id).is_some()
        });

        self.rows = build_rows(
            &self.customers,
            &self.agents,
            &self.agent_overrides,
            today,
            now,
        );
        self.stats = PortfolioStats::from_customers(&self.customers);

        let still_present = self
            .selected_id
            .as_deref()
            .is_some_and(|id| self.rows.iter().any(|r| r.id == id));
        if !still_present {
            self.selected_id = if self.rows.is_empty() {
                None
            } else {
                let index = previous_index.unwrap_or(0).min(self.rows.len() - 1);
                Some(self.rows[index].id.clone())
            };
        }
    }

    /// Point the selected row's agent to the next (or previous) roster entry.
    pub fn cycle_selected_agent(&mut self, forward: bool) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let customer_id = row.id.clone();
        let Some(agent_id) = self
            .agents
            .cycle(row.agent_id.as_deref(), forward)
            .map(|a| a.agent_id.clone())
        else {
            return;
        };
        self.agent_overrides.insert(customer_id, agent_id);
        self.rebuild_rows();
    }

    pub fn open_add_form(&mut self) {
        self.overlay = Overlay::Form(CustomerForm::new_blank());
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_id.clone() else {
            return;
        };
        if let Some(customer) = self.customer(&id) {
            self.overlay = Overlay::Form(CustomerForm::from_customer(customer));
        }
    }

    pub fn open_delete_confirm(&mut self) {
        if let Some(row) = self.selected_row() {
            self.overlay = Overlay::ConfirmDelete(PendingDelete::new(&row.id, &row.name));
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// Number the save or delete about to be sent from the open overlay.
    ///
    /// Results carry the number back, so one that arrives after its overlay was
    /// dismissed cannot close or annotate a different one.
    pub fn begin_submission(&mut self) -> Option<u64> {
        let submission = self.submissions + 1;
        match &mut self.overlay {
            Overlay::Form(form) => form.submission = Some(submission),
            Overlay::ConfirmDelete(pending) => pending.submission = Some(submission),
            Overlay::None | Overlay::Call(_) => return None,
        }
        self.submissions = submission;
        Some(submission)
    }

    /// The submission the open overlay is waiting on.
    pub fn awaited_submission(&self) -> Option<u64> {
        match &self.overlay {
            Overlay::Form(form) => form.submission,
            Overlay::ConfirmDelete(pending) => pending.submission,
            Overlay::None | Overlay::Call(_) => None,
        }
    }

    /// Build the call request for `customer_id` from the latest data and open the panel.
    ///
    /// Returns `None` when the customer is no longer in the list.
    pub fn start_call(&mut self, customer_id: &str) -> Option<CallRequest> {
        let customer = self.customer(customer_id)?;
        let row = self.row(customer_id)?;
        let request = CallRequest {
            phone: customer.phone.clone(),
            agent_id: row.agent_id.clone(),
        };
        self.overlay = Overlay::Call(CallPanel {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            agent_name: row.agent_name.clone(),
            status: CallStatus::InProgress,
        });
        self.calls_in_flight += 1;
        Some(request)
    }

    /// Seconds until the next scheduled poll.
    pub fn seconds_until_poll(&self) -> u64 {
        let period = self.poll_interval.as_secs().max(1);
        match self.last_refresh {
            Some(at) => period.saturating_sub(at.elapsed().as_secs()),
            None => period,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Agent, CustomerStatus};
    use crate::view::rows::tests::customer;

    pub(crate) fn state() -> DashboardState {
        DashboardState::new(
            Environment::Local,
            Instant::now(),
            UIConfig::new(false, Duration::from_secs(30)),
        )
    }

    pub(crate) fn loaded(ids: &[&str]) -> DashboardState {
        let mut state = state();
        state.agents = AgentDirectory::new(vec![Agent::new("a", "Ava"), Agent::new("b", "Ben")]);
        state.customers = ids
            .iter()
            .map(|id| customer(id, "10", CustomerStatus::Active))
            .collect();
        state.rebuild_rows();
        state
    }

    #[test]
    fn test_selection_follows_id_across_reorder() {
        let mut state = loaded(&["1", "2", "3"]);
        assert_eq!(state.selected_id.as_deref(), Some("1"));
        state.select_next();
        assert_eq!(state.selected_id.as_deref(), Some("2"));

        state.customers.reverse();
        state.rebuild_rows();
        assert_eq!(state.selected_id.as_deref(), Some("2"));
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn test_selection_falls_back_when_customer_disappears() {
        let mut state = loaded(&["1", "2", "3"]);
        state.selected_id = Some("3".to_string());
        state.customers.truncate(2);
        state.rebuild_rows();
        assert_eq!(state.selected_id.as_deref(), Some("2"));

        state.customers.clear();
        state.rebuild_rows();
        assert_eq!(state.selected_id, None);
    }

    #[test]
    fn test_agent_choice_survives_rebuild_until_agent_is_gone() {
        let mut state = loaded(&["1"]);
        state.selected_id = Some("1".to_string());
        state.cycle_selected_agent(true);
        assert_eq!(state.rows[0].agent_id.as_deref(), Some("b"));

        state.rebuild_rows();
        assert_eq!(state.rows[0].agent_id.as_deref(), Some("b"));

        state.agents = AgentDirectory::new(vec![Agent::new("a", "Ava")]);
        state.rebuild_rows();
        assert_eq!(state.rows[0].agent_id.as_deref(), Some("a"));
        assert!(state.agent_overrides.is_empty());
    }

    #[test]
    fn test_start_call_uses_current_phone_and_agent() {
        let mut state = loaded(&["1", "2"]);
        state.customers[1].phone = "5559990000".to_string();
        state.rebuild_rows();

        let request = state.start_call("2").unwrap();
        assert_eq!(request.phone, "5559990000");
        assert_eq!(request.agent_id.as_deref(), Some("a"));
        assert_eq!(state.calls_in_flight, 1);
        assert!(matches!(
            state.overlay,
            Overlay::Call(CallPanel { status: CallStatus::InProgress, .. })
        ));

        assert!(state.start_call("missing").is_none());
        assert_eq!(state.calls_in_flight, 1);
    }

    #[test]
    fn test_activity_log_is_capped() {
        let mut state = state();
        for i in 0..(MAX_ACTIVITY_LOGS + 5) {
            state.add_to_activity_log(WorkerEvent::refresher_with_level(
                format!("event {}", i),
                crate::events::EventType::Refresh,
                crate::logging::LogLevel::Info,
            ));
        }
        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(state.activity_logs[0].msg, "event 5");
    }
}
