//! One-shot commands that talk to the backend without the dashboard.

use crate::api::Backend;
use crate::consts::cli_consts::GENERIC_MUTATION_ERROR;
use crate::forms::{
    CustomerForm, Mutation, PendingDelete, ValidationError, parse_amount, parse_due_date,
};
use crate::models::{CallRequest, Customer, CustomerStatus, RiskLevel};
use crate::view::format::format_whole;
use crate::view::html::render_snapshot;
use crate::view::{AgentDirectory, CustomerRow, PortfolioStats, build_rows};
use crate::workers::CallOutcome;
use crate::workers::actions::send_mutation;
use crate::{print_cmd_info, print_cmd_success};
use chrono::Local;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

/// Customer fields supplied on the command line. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub debt_amount: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub risk_level: Option<String>,
}

impl CustomerFields {
    /// Reject supplied values the form would reject, without needing the rest of the record.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::MissingName);
        }
        if self.phone.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ValidationError::MissingPhone);
        }
        if let Some(amount) = &self.debt_amount {
            parse_amount(amount)?;
        }
        if let Some(due) = &self.due_date {
            parse_due_date(due)?;
        }
        Ok(())
    }

    pub fn apply(&self, form: &mut CustomerForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            form.phone = phone.clone();
        }
        if let Some(amount) = &self.debt_amount {
            form.debt_amount = amount.clone();
        }
        if let Some(due) = &self.due_date {
            form.due_date = due.clone();
        }
        if let Some(status) = &self.status {
            form.status = CustomerStatus::from(status.trim().to_string());
        }
        if let Some(risk) = &self.risk_level {
            form.risk_level = RiskLevel::from(risk.trim().to_string());
        }
    }
}

async fn fetch_customer(backend: &dyn Backend, id: &str) -> Result<Customer, Box<dyn Error>> {
    let customers = backend.list_customers().await?;
    customers
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| format!("No customer with id {}", id).into())
}

async fn fetch_rows(
    backend: &dyn Backend,
) -> Result<(Vec<CustomerRow>, PortfolioStats, AgentDirectory), Box<dyn Error>> {
    let agents = AgentDirectory::new(backend.list_agents().await?);
    let customers = backend.list_customers().await?;
    let now = Local::now();
    let rows = build_rows(&customers, &agents, &HashMap::new(), now.date_naive(), now);
    Ok((rows, PortfolioStats::from_customers(&customers), agents))
}

/// Plain-text table of rows followed by the portfolio totals.
pub fn render_listing(rows: &[CustomerRow], stats: &PortfolioStats) -> String {
    let mut out = format!(
        "{:<38} {:<24} {:<16} {:>14} {:>8} {:<20} {:<8} {:<12} {}\n",
        "ID", "NAME", "PHONE", "DEBT", "OVERDUE", "STATUS", "RISK", "LAST", "AGENT"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<38} {:<24} {:<16} {:>14} {:>8} {:<20} {:<8} {:<12} {}\n",
            row.id,
            row.name,
            row.phone_display,
            row.debt_display,
            format!("{}d", row.days_overdue),
            row.status_label,
            row.risk_label,
            row.last_activity,
            row.agent_name.as_deref().unwrap_or("-"),
        ));
    }
    out.push_str(&format!(
        "\nCustomers: {} | Total debt: ${} | Recovered: ${}\n",
        stats.customer_count,
        format_whole(stats.total_debt),
        format_whole(stats.recovered)
    ));
    out
}

pub async fn list_agents(backend: &dyn Backend) -> Result<(), Box<dyn Error>> {
    let agents = backend.list_agents().await?;
    if agents.is_empty() {
        println!("No agents available");
    }
    for agent in &agents {
        println!("{}\t{}", agent.agent_id, agent.display_name());
    }
    Ok(())
}

pub async fn list_customers(backend: &dyn Backend) -> Result<(), Box<dyn Error>> {
    let (rows, stats, _) = fetch_rows(backend).await?;
    print!("{}", render_listing(&rows, &stats));
    Ok(())
}

/// Write the HTML snapshot to `output`, or stdout when absent.
pub async fn snapshot(backend: &dyn Backend, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let (rows, stats, agents) = fetch_rows(backend).await?;
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = render_snapshot(&rows, &stats, &agents, &generated_at);
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
            print_cmd_success!("Snapshot written", "{}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Place a call for one customer, using `agent_id` or the row's default agent.
pub async fn call(
    backend: &dyn Backend,
    customer_id: &str,
    agent_id: Option<&str>,
) -> Result<CallOutcome, Box<dyn Error>> {
    let agents = AgentDirectory::new(backend.list_agents().await?);
    if let Some(id) = agent_id {
        if agents.get(id).is_none() {
            return Err(format!("Unknown agent {}", id).into());
        }
    }
    let customer = fetch_customer(backend, customer_id).await?;
    let now = Local::now();
    let row = CustomerRow::build(&customer, &agents, agent_id, now.date_naive(), now);
    let request = CallRequest {
        phone: customer.phone.clone(),
        agent_id: row.agent_id.clone(),
    };

    print_cmd_info!(
        "Calling",
        "{} at {} (agent: {})",
        row.name,
        row.phone_display,
        row.agent_name.as_deref().unwrap_or("backend default")
    );
    let outcome = CallOutcome::from_result(backend.initiate_call(&request).await);
    match &outcome {
        CallOutcome::Accepted {
            message,
            conversation_id,
            ..
        } => {
            print_cmd_success!("Call initiated", "{}", message);
            if let Some(id) = conversation_id {
                println!("Conversation: {}", id);
            }
            Ok(outcome)
        }
        CallOutcome::Failed { message } => Err(message.clone().into()),
    }
}

async fn run_mutation(backend: &dyn Backend, mutation: Mutation) -> Result<(), Box<dyn Error>> {
    let kind = mutation.kind();
    send_mutation(backend, &mutation)
        .await
        .map_err(|e| e.user_message(GENERIC_MUTATION_ERROR))?;
    print_cmd_success!("Done", "Customer {}", kind.to_string().to_lowercase());
    Ok(())
}

/// Create a customer. Nothing is sent unless the fields validate.
pub async fn add(backend: &dyn Backend, fields: &CustomerFields) -> Result<(), Box<dyn Error>> {
    let mut form = CustomerForm::new_blank();
    fields.apply(&mut form);
    let mutation = form.submit()?;
    run_mutation(backend, mutation).await
}

/// Update a customer, keeping every field not supplied.
pub async fn edit(
    backend: &dyn Backend,
    id: &str,
    fields: &CustomerFields,
) -> Result<(), Box<dyn Error>> {
    fields.check()?;
    let customer = fetch_customer(backend, id).await?;
    let mut form = CustomerForm::from_customer(&customer);
    fields.apply(&mut form);
    let mutation = form.submit()?;
    run_mutation(backend, mutation).await
}

/// Delete a customer once `confirmation` names the same id.
pub async fn delete(
    backend: &dyn Backend,
    id: &str,
    confirmation: &str,
) -> Result<(), Box<dyn Error>> {
    let customer = fetch_customer(backend, id).await?;
    let pending = PendingDelete::new(customer.id, customer.name);
    let mutation = pending.confirm(confirmation.trim())?;
    run_mutation(backend, mutation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBackend;
    use crate::api::error::ApiError;
    use crate::models::{Agent, CallResponse};
    use crate::view::rows::tests::customer;

    fn fields(name: &str, phone: &str, amount: &str) -> CustomerFields {
        CustomerFields {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            debt_amount: Some(amount.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_with_missing_name_sends_nothing() {
        let mock = MockBackend::new();
        let err = add(&mock, &fields("  ", "5551234567", "100"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[tokio::test]
    async fn test_add_sends_validated_draft() {
        let mut mock = MockBackend::new();
        mock.expect_create_customer()
            .withf(|draft| draft.name == "Ana" && draft.debt_amount.to_string() == "1234.50")
            .times(1)
            .returning(|_| Ok(()));
        add(&mock, &fields("Ana", "5551234567", "$1,234.50"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_edit_rejects_bad_amount_before_fetching() {
        let mock = MockBackend::new();
        let bad = CustomerFields {
            debt_amount: Some("lots".into()),
            ..Default::default()
        };
        let err = edit(&mock, "1", &bad).await.unwrap_err();
        assert_eq!(err.to_string(), "Debt amount must be a number");
    }

    #[tokio::test]
    async fn test_edit_keeps_unspecified_fields() {
        let mut mock = MockBackend::new();
        mock.expect_list_customers()
            .returning(|| Ok(vec![customer("7", "300", CustomerStatus::Active)]));
        mock.expect_update_customer()
            .withf(|id, draft| {
                id == "7"
                    && draft.name == "Customer 7"
                    && draft.status == CustomerStatus::PromisedToPay
                    && draft.debt_amount.to_string() == "300"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let change = CustomerFields {
            status: Some("promised_to_pay".into()),
            ..Default::default()
        };
        edit(&mock, "7", &change).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_requires_matching_confirmation() {
        let mut mock = MockBackend::new();
        mock.expect_list_customers()
            .returning(|| Ok(vec![customer("7", "300", CustomerStatus::Active)]));
        mock.expect_delete_customer().times(0);
        assert!(delete(&mock, "7", "8").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_reports_backend_detail() {
        let mut mock = MockBackend::new();
        mock.expect_list_customers()
            .returning(|| Ok(vec![customer("7", "300", CustomerStatus::Active)]));
        mock.expect_delete_customer().times(1).returning(|_| {
            Err(ApiError::from_status_and_body(
                409,
                r#"{"detail":"Customer has an active call"}"#.to_string(),
            ))
        });
        let err = delete(&mock, "7", "7\n").await.unwrap_err();
        assert_eq!(err.to_string(), "Customer has an active call");
    }

    #[tokio::test]
    async fn test_call_failure_returns_backend_message() {
        let mut mock = MockBackend::new();
        mock.expect_list_agents()
            .returning(|| Ok(vec![Agent::new("a", "Ava")]));
        mock.expect_list_customers()
            .returning(|| Ok(vec![customer("7", "300", CustomerStatus::Active)]));
        mock.expect_initiate_call()
            .withf(|req| req.phone == "5551234567" && req.agent_id.as_deref() == Some("a"))
            .returning(|_| {
                Ok(CallResponse {
                    success: false,
                    message: Some("Busy".into()),
                    customer_name: None,
                    conversation_id: None,
                })
            });
        let err = call(&mock, "7", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Busy");
    }

    #[tokio::test]
    async fn test_call_rejects_unknown_agent() {
        let mut mock = MockBackend::new();
        mock.expect_list_agents()
            .returning(|| Ok(vec![Agent::new("a", "Ava")]));
        mock.expect_initiate_call().times(0);
        assert!(call(&mock, "7", Some("zz")).await.is_err());
    }

    #[test]
    fn test_listing_totals_match_rows() {
        let customers = vec![
            customer("1", "1000", CustomerStatus::PromisedToPay),
            customer("2", "250.40", CustomerStatus::Refused),
        ];
        let agents = AgentDirectory::default();
        let now = Local::now();
        let rows = build_rows(&customers, &agents, &HashMap::new(), now.date_naive(), now);
        let listing = render_listing(&rows, &PortfolioStats::from_customers(&customers));
        assert!(listing.contains("$1,000.00"));
        assert!(listing.contains("$250.40"));
        assert!(listing.ends_with("Customers: 2 | Total debt: $1,250 | Recovered: $1,000\n"));
    }
}
