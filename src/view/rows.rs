//! Per-row view models and portfolio statistics.

use crate::models::{Agent, Customer, CustomerStatus};
use crate::view::format::{
    OverdueBucket, format_currency, format_phone, last_activity_label, risk_label, status_label,
};
use chrono::{DateTime, Local, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Aggregate figures shown in the summary tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioStats {
    /// Sum of every customer's debt.
    pub total_debt: Decimal,
    /// Sum of debt for customers who promised to pay.
    pub recovered: Decimal,
    pub customer_count: usize,
}

impl PortfolioStats {
    pub fn from_customers(customers: &[Customer]) -> Self {
        customers.iter().fold(Self::default(), |mut stats, customer| {
            stats.total_debt += customer.debt_amount;
            if customer.status == CustomerStatus::PromisedToPay {
                stats.recovered += customer.debt_amount;
            }
            stats.customer_count += 1;
            stats
        })
    }
}

/// The agent roster, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDirectory {
    agents: Vec<Agent>,
}

impl AgentDirectory {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    pub fn replace(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.agent_id == agent_id)
    }

    /// The customer's assigned agent when it is on the roster, else the first agent.
    pub fn default_for(&self, assigned: Option<&str>) -> Option<&Agent> {
        assigned
            .and_then(|id| self.get(id))
            .or_else(|| self.agents.first())
    }

    /// The agent after (or before) `current`, wrapping around.
    pub fn cycle(&self, current: Option<&str>, forward: bool) -> Option<&Agent> {
        if self.agents.is_empty() {
            return None;
        }
        let len = self.agents.len();
        let next = match current.and_then(|id| self.agents.iter().position(|a| a.agent_id == id)) {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        self.agents.get(next)
    }
}

/// A customer as displayed in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    /// Backend id; row identity for selection and actions.
    pub id: String,
    pub name: String,
    /// Raw number, used verbatim when placing a call.
    pub phone: String,
    pub phone_display: String,
    pub debt_amount: Decimal,
    pub debt_display: String,
    pub due_date: Option<NaiveDate>,
    pub days_overdue: u32,
    pub overdue: OverdueBucket,
    pub status: CustomerStatus,
    pub status_label: String,
    pub risk_label: String,
    pub last_activity: String,
    /// Agent the call action will use, if the roster has any.
    pub agent_id: Option<String>,
    pub agent_name: Option<String>,
}

impl CustomerRow {
    pub fn build(
        customer: &Customer,
        agents: &AgentDirectory,
        selected_agent: Option<&str>,
        today: NaiveDate,
        now: DateTime<Local>,
    ) -> Self {
        let days_overdue = customer.days_overdue(today);
        let agent = selected_agent
            .and_then(|id| agents.get(id))
            .or_else(|| agents.default_for(customer.assigned_agent_id.as_deref()));

        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            phone_display: format_phone(&customer.phone),
            debt_amount: customer.debt_amount,
            debt_display: format_currency(customer.debt_amount),
            due_date: customer.due_date(),
            days_overdue,
            overdue: OverdueBucket::from_days(days_overdue),
            status: customer.status.clone(),
            status_label: status_label(&customer.status),
            risk_label: risk_label(&customer.risk_level),
            last_activity: last_activity_label(customer.last_activity(), now),
            agent_id: agent.map(|a| a.agent_id.clone()),
            agent_name: agent.map(|a| a.display_name().to_string()),
        }
    }
}

/// Build one row per customer, in backend order.
///
/// `agent_overrides` maps customer id to the agent the operator picked for that row.
pub fn build_rows(
    customers: &[Customer],
    agents: &AgentDirectory,
    agent_overrides: &HashMap<String, String>,
    today: NaiveDate,
    now: DateTime<Local>,
) -> Vec<CustomerRow> {
    customers
        .iter()
        .map(|customer| {
            let selected = agent_overrides.get(&customer.id).map(String::as_str);
            CustomerRow::build(customer, agents, selected, today, now)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use crate::view::format::parse_timestamp;
    use std::str::FromStr;

    pub(crate) fn customer(id: &str, amount: &str, status: CustomerStatus) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {}", id),
            phone: "5551234567".to_string(),
            debt_amount: Decimal::from_str(amount).unwrap(),
            status,
            risk_level: RiskLevel::Medium,
            due_date: None,
            days_overdue: Some(0),
            last_call_date: None,
            updated_at: None,
            assigned_agent_id: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn now() -> DateTime<Local> {
        parse_timestamp("2026-10-17T12:00:00").unwrap()
    }

    fn roster() -> AgentDirectory {
        AgentDirectory::new(vec![
            Agent::new("agent_a", "Ava"),
            Agent::new("agent_b", "Ben"),
        ])
    }

    #[test]
    fn test_stats_sum_all_and_promised_only() {
        let customers = vec![
            customer("1", "1000.25", CustomerStatus::Active),
            customer("2", "500.50", CustomerStatus::PromisedToPay),
            customer("3", "250", CustomerStatus::Refused),
            customer("4", "99.99", CustomerStatus::PromisedToPay),
        ];
        let stats = PortfolioStats::from_customers(&customers);
        assert_eq!(stats.total_debt, Decimal::from_str("1850.74").unwrap());
        assert_eq!(stats.recovered, Decimal::from_str("600.49").unwrap());
        assert_eq!(stats.customer_count, 4);
        assert!(stats.recovered <= stats.total_debt);
    }

    #[test]
    fn test_stats_of_empty_list_are_zero() {
        let stats = PortfolioStats::from_customers(&[]);
        assert_eq!(stats, PortfolioStats::default());
    }

    #[test]
    fn test_rows_preserve_order_and_ids() {
        let customers = vec![
            customer("b", "1", CustomerStatus::Active),
            customer("a", "2", CustomerStatus::Active),
        ];
        let rows = build_rows(&customers, &roster(), &HashMap::new(), today(), now());
        let ids: Vec<_> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_row_derived_fields() {
        let mut c = customer("1", "1234.5", CustomerStatus::Other("disputed".into()));
        c.days_overdue = Some(31);
        c.last_call_date = Some("2026-10-16T08:00:00".to_string());
        let row = CustomerRow::build(&c, &roster(), None, today(), now());
        assert_eq!(row.phone_display, "(555) 123-4567");
        assert_eq!(row.phone, "5551234567");
        assert_eq!(row.debt_display, "$1,234.50");
        assert_eq!(row.overdue, OverdueBucket::High);
        assert_eq!(row.status_label, "Disputed");
        assert_eq!(row.risk_label, "Medium");
        assert_eq!(row.last_activity, "Yesterday");
    }

    #[test]
    fn test_agent_defaults_to_assigned_then_first() {
        let mut c = customer("1", "1", CustomerStatus::Active);
        let row = CustomerRow::build(&c, &roster(), None, today(), now());
        assert_eq!(row.agent_id.as_deref(), Some("agent_a"));

        c.assigned_agent_id = Some("agent_b".to_string());
        let row = CustomerRow::build(&c, &roster(), None, today(), now());
        assert_eq!(row.agent_id.as_deref(), Some("agent_b"));
        assert_eq!(row.agent_name.as_deref(), Some("Ben"));

        c.assigned_agent_id = Some("retired".to_string());
        let row = CustomerRow::build(&c, &roster(), None, today(), now());
        assert_eq!(row.agent_id.as_deref(), Some("agent_a"));
    }

    #[test]
    fn test_override_wins_only_while_agent_exists() {
        let c = customer("1", "1", CustomerStatus::Active);
        let mut overrides = HashMap::new();
        overrides.insert("1".to_string(), "agent_b".to_string());
        let rows = build_rows(&[c.clone()], &roster(), &overrides, today(), now());
        assert_eq!(rows[0].agent_id.as_deref(), Some("agent_b"));

        overrides.insert("1".to_string(), "gone".to_string());
        let rows = build_rows(&[c], &roster(), &overrides, today(), now());
        assert_eq!(rows[0].agent_id.as_deref(), Some("agent_a"));
    }

    #[test]
    fn test_no_agents_means_no_selection() {
        let c = customer("1", "1", CustomerStatus::Active);
        let row = CustomerRow::build(&c, &AgentDirectory::default(), None, today(), now());
        assert_eq!(row.agent_id, None);
        assert_eq!(row.agent_name, None);
    }

    #[test]
    fn test_cycle_wraps() {
        let agents = roster();
        assert_eq!(agents.cycle(Some("agent_a"), true).unwrap().agent_id, "agent_b");
        assert_eq!(agents.cycle(Some("agent_b"), true).unwrap().agent_id, "agent_a");
        assert_eq!(agents.cycle(Some("agent_a"), false).unwrap().agent_id, "agent_b");
        assert_eq!(agents.cycle(None, true).unwrap().agent_id, "agent_a");
        assert!(AgentDirectory::default().cycle(None, true).is_none());
    }
}
