//! Collections Backend Client
//!
//! A JSON client for the dashboard endpoints of the collections backend.

use crate::api::Backend;
use crate::api::error::ApiError;
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::models::{Agent, CallRequest, CallResponse, Customer, CustomerDraft};
use reqwest::{Client, ClientBuilder, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("collections-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
}

impl BackendClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn customer_endpoint(id: &str) -> String {
        format!("api/customers/{}", urlencoding::encode(id))
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        Self::decode_response(response).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("{} {}", method, url);
        let response = self.client.request(method, &url).json(body).send().await?;

        Self::handle_response_status(response).await
    }

    async fn send_no_body(&self, method: Method, endpoint: &str) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        log::debug!("{} {}", method, url);
        let response = self.client.request(method, &url).send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        self.get_request("api/agents").await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_request("api/customers").await
    }

    async fn create_customer(&self, draft: &CustomerDraft) -> Result<(), ApiError> {
        self.send_json(Method::POST, "api/customers", draft).await?;
        Ok(())
    }

    async fn update_customer(&self, id: &str, draft: &CustomerDraft) -> Result<(), ApiError> {
        self.send_json(Method::PUT, &Self::customer_endpoint(id), draft)
            .await?;
        Ok(())
    }

    async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        self.send_no_body(Method::DELETE, &Self::customer_endpoint(id))
            .await
    }

    async fn initiate_call(&self, request: &CallRequest) -> Result<CallResponse, ApiError> {
        let response = self.send_json(Method::POST, "api/call", request).await?;
        Self::decode_response(response).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_without_double_slashes() {
        let client = BackendClient::new(Environment::Custom {
            api_url: "http://backend:8000/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("/api/customers"),
            "http://backend:8000/api/customers"
        );
    }

    #[test]
    fn test_customer_endpoint_encodes_id() {
        assert_eq!(
            BackendClient::customer_endpoint("a b/c"),
            "api/customers/a%20b%2Fc"
        );
    }

    #[tokio::test]
    /// A backend that refuses connections surfaces as a transport error.
    async fn test_unreachable_backend_is_transport_error() {
        let client = BackendClient::new(Environment::Custom {
            api_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap();
        let result = client.list_customers().await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}
