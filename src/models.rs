//! Wire types shared with the collections backend.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

/// Collection status of a customer account.
///
/// Unknown values from the backend are preserved in `Other` so the row still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomerStatus {
    #[default]
    Active,
    PromisedToPay,
    Refused,
    CallbackRequested,
    Voicemail,
    WrongNumber,
    Other(String),
}

impl CustomerStatus {
    /// Known statuses, in the order the edit form cycles through them.
    pub const KNOWN: [CustomerStatus; 6] = [
        CustomerStatus::Active,
        CustomerStatus::PromisedToPay,
        CustomerStatus::Refused,
        CustomerStatus::CallbackRequested,
        CustomerStatus::Voicemail,
        CustomerStatus::WrongNumber,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::PromisedToPay => "promised_to_pay",
            CustomerStatus::Refused => "refused",
            CustomerStatus::CallbackRequested => "callback_requested",
            CustomerStatus::Voicemail => "voicemail",
            CustomerStatus::WrongNumber => "wrong_number",
            CustomerStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CustomerStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => CustomerStatus::Active,
            "promised_to_pay" => CustomerStatus::PromisedToPay,
            "refused" => CustomerStatus::Refused,
            "callback_requested" => CustomerStatus::CallbackRequested,
            "voicemail" => CustomerStatus::Voicemail,
            "wrong_number" => CustomerStatus::WrongNumber,
            _ => CustomerStatus::Other(raw),
        }
    }
}

impl From<CustomerStatus> for String {
    fn from(status: CustomerStatus) -> Self {
        match status {
            CustomerStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Risk classification assigned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    pub const KNOWN: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Other(raw) => raw,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Other(raw),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// A debtor record as delivered by `GET /api/customers`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub debt_amount: Decimal,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub days_overdue: Option<i64>,
    #[serde(default)]
    pub last_call_date: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub assigned_agent_id: Option<String>,
}

impl Customer {
    /// The due date, if the backend sent one in `YYYY-MM-DD` form (a time suffix is ignored).
    pub fn due_date(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?.trim();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// Days past due. The backend figure wins; otherwise it is derived from the due date.
    pub fn days_overdue(&self, today: NaiveDate) -> u32 {
        if let Some(days) = self.days_overdue {
            return days.clamp(0, u32::MAX as i64) as u32;
        }
        self.due_date()
            .map(|due| days_overdue_since(due, today))
            .unwrap_or(0)
    }

    /// Most recent contact timestamp: the last call, else the last update.
    pub fn last_activity(&self) -> Option<&str> {
        self.last_call_date
            .as_deref()
            .or(self.updated_at.as_deref())
            .filter(|raw| !raw.trim().is_empty())
    }
}

/// Whole days between `due` and `today`; zero when the due date has not passed.
pub fn days_overdue_since(due: NaiveDate, today: NaiveDate) -> u32 {
    if due >= today {
        return 0;
    }
    (today - due).num_days().clamp(0, u32::MAX as i64) as u32
}

/// A call-handling persona from `GET /api/agents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: String,
    #[serde(default)]
    pub name: String,
}

impl Agent {
    pub fn new(agent_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            name: name.into(),
        }
    }

    /// Name for display, falling back to the id for unnamed agents.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.agent_id
        } else {
            &self.name
        }
    }
}

/// Body of `POST /api/customers` and `PUT /api/customers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    #[serde(serialize_with = "serialize_amount")]
    pub debt_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub status: CustomerStatus,
    pub risk_level: RiskLevel,
}

// The backend models amounts as JSON numbers, not strings.
fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::Error;
    match amount.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(S::Error::custom(format!(
            "amount {} is not representable",
            amount
        ))),
    }
}

/// Body of `POST /api/call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRequest {
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

/// Response of `POST /api/call`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}
