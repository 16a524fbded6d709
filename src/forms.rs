//! Customer create/edit form, validation and delete confirmation.

use crate::events::MutationKind;
use crate::models::{Customer, CustomerDraft, CustomerStatus, RiskLevel};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("Phone is required")]
    MissingPhone,

    #[error("Debt amount must be a number")]
    InvalidAmount,

    #[error("Debt amount cannot be negative")]
    NegativeAmount,

    #[error("Due date must be in YYYY-MM-DD format")]
    InvalidDueDate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    DebtAmount,
    DueDate,
    Status,
    RiskLevel,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Phone,
        FormField::DebtAmount,
        FormField::DueDate,
        FormField::Status,
        FormField::RiskLevel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Phone => "Phone",
            FormField::DebtAmount => "Debt Amount",
            FormField::DueDate => "Due Date",
            FormField::Status => "Status",
            FormField::RiskLevel => "Risk Level",
        }
    }

    /// Choice fields cycle through a fixed vocabulary instead of taking text.
    pub fn is_choice(&self) -> bool {
        matches!(self, FormField::Status | FormField::RiskLevel)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn cycle_in<T: Clone + PartialEq>(known: &[T], current: &T, forward: bool) -> T {
    let len = known.len();
    let next = match known.iter().position(|k| k == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    known[next].clone()
}

/// Editable form state. `customer_id` is `None` when creating.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    pub customer_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub debt_amount: String,
    pub due_date: String,
    pub status: CustomerStatus,
    pub risk_level: RiskLevel,
    pub focus: FormField,
    /// Validation or backend error shown under the form.
    pub error: Option<String>,
    /// Number of the save in flight; further submits are ignored until it settles.
    pub submission: Option<u64>,
}

impl CustomerForm {
    pub fn new_blank() -> Self {
        Self {
            customer_id: None,
            name: String::new(),
            phone: String::new(),
            debt_amount: String::new(),
            due_date: String::new(),
            status: CustomerStatus::default(),
            risk_level: RiskLevel::default(),
            focus: FormField::Name,
            error: None,
            submission: None,
        }
    }

    pub fn from_customer(customer: &Customer) -> Self {
        let due_date = match customer.due_date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => customer.due_date.clone().unwrap_or_default(),
        };
        Self {
            customer_id: Some(customer.id.clone()),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            debt_amount: customer.debt_amount.normalize().to_string(),
            due_date,
            status: customer.status.clone(),
            risk_level: customer.risk_level.clone(),
            ..Self::new_blank()
        }
    }

    pub fn is_edit(&self) -> bool {
        self.customer_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Customer"
        } else {
            "Add Customer"
        }
    }

    /// Current value of a field as displayed.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::DebtAmount => &self.debt_amount,
            FormField::DueDate => &self.due_date,
            FormField::Status => self.status.as_str(),
            FormField::RiskLevel => self.risk_level.as_str(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Phone => Some(&mut self.phone),
            FormField::DebtAmount => Some(&mut self.debt_amount),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Status | FormField::RiskLevel => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.text_mut(self.focus) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut(self.focus) {
            text.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Step the focused choice field through its vocabulary.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::Status => {
                self.status = cycle_in(&CustomerStatus::KNOWN, &self.status, forward)
            }
            FormField::RiskLevel => {
                self.risk_level = cycle_in(&RiskLevel::KNOWN, &self.risk_level, forward)
            }
            _ => {}
        }
    }

    pub fn validate(&self) -> Result<CustomerDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        let debt_amount = parse_amount(&self.debt_amount)?;
        let due_date = parse_due_date(&self.due_date)?;

        Ok(CustomerDraft {
            name: name.to_string(),
            phone: phone.to_string(),
            debt_amount,
            due_date,
            status: self.status.clone(),
            risk_level: self.risk_level.clone(),
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_some()
    }

    /// Validate and turn the form into the request it stands for.
    pub fn submit(&self) -> Result<Mutation, ValidationError> {
        let draft = self.validate()?;
        Ok(Mutation::save(self.customer_id.clone(), draft))
    }
}

/// Accepts `1234.50`, `$1,234.50` and surrounding whitespace.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    if cleaned.is_empty() {
        return Err(ValidationError::InvalidAmount);
    }
    let amount = Decimal::from_str(&cleaned).map_err(|_| ValidationError::InvalidAmount)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(amount)
}

/// Empty means no due date.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDueDate)
}

/// A write request against the customer collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(CustomerDraft),
    Update { id: String, draft: CustomerDraft },
    Delete { id: String },
}

impl Mutation {
    /// Create without an id, update with one.
    pub fn save(id: Option<String>, draft: CustomerDraft) -> Self {
        match id {
            Some(id) => Mutation::Update { id, draft },
            None => Mutation::Create(draft),
        }
    }

    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Created,
            Mutation::Update { .. } => MutationKind::Updated,
            Mutation::Delete { .. } => MutationKind::Deleted,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Mutation::Create(draft) => format!("create customer {}", draft.name),
            Mutation::Update { draft, .. } => format!("update customer {}", draft.name),
            Mutation::Delete { id } => format!("delete customer {}", id),
        }
    }
}

/// Confirmation for a delete requested on one specific customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub customer_id: String,
    pub customer_name: String,
    /// Set once the delete has been sent.
    pub submission: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("confirmation was for {expected}, not {given}")]
pub struct ConfirmationMismatch {
    pub expected: String,
    pub given: String,
}

impl PendingDelete {
    pub fn new(customer_id: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            submission: None,
        }
    }

    /// Produce the delete only if `id` is the customer this confirmation was opened for.
    pub fn confirm(&self, id: &str) -> Result<Mutation, ConfirmationMismatch> {
        if id != self.customer_id {
            return Err(ConfirmationMismatch {
                expected: self.customer_id.clone(),
                given: id.to_string(),
            });
        }
        Ok(Mutation::Delete {
            id: self.customer_id.clone(),
        })
    }
}
