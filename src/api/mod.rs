use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{Agent, CallRequest, CallResponse, Customer, CustomerDraft};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the roster of agents that can place calls.
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError>;

    /// Fetch every customer record.
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;

    /// Insert a new customer.
    async fn create_customer(&self, draft: &CustomerDraft) -> Result<(), ApiError>;

    /// Overwrite the customer with the given id.
    async fn update_customer(&self, id: &str, draft: &CustomerDraft) -> Result<(), ApiError>;

    /// Remove the customer with the given id.
    async fn delete_customer(&self, id: &str) -> Result<(), ApiError>;

    /// Ask the backend to place an outbound call.
    async fn initiate_call(&self, request: &CallRequest) -> Result<CallResponse, ApiError>;
}
