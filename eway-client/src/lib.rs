//! # eWAY Client
//!
//! A typed Rust client for the eWAY shared page checkout API.
//!
//! ```no_run
//! # async fn run() -> Result<(), eway_client::ClientError> {
//! use eway_client::{Credentials, GatewayClient};
//! use eway_types::{Environment, RequestBuilder};
//!
//! let client = GatewayClient::new(Credentials::new("key", "password"), Environment::Sandbox)?;
//!
//! let mut builder = RequestBuilder::new();
//! builder
//!     .redirect_url("https://shop.example.com/done")?
//!     .customer_email("jane@example.com")?;
//!
//! let access = client.create_access_code(&builder.build_access_code_request()).await?;
//! println!("send the customer to {:?}", access.shared_payment_url);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod gateway;

pub use config::{ClientConfig, Credentials};
pub use error::ClientError;
pub use gateway::PaymentGateway;

use std::future::Future;

use eway_types::{
    AccessCodeRequest, AccessCodeResponse, Environment, ResolvedCode, ResponseCodeTable,
    TransactionResult, TransactionResultRequest,
};
use reqwest::{Client, StatusCode, header};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

const TRANSACTION_RESULT_PATH: &str = "/GetAccessCodeResult.json";

/// eWAY gateway client.
///
/// Each call is a single request with no retries.
pub struct GatewayClient {
    base_url: String,
    credentials: Credentials,
    http: Client,
    codes: &'static ResponseCodeTable,
}

impl GatewayClient {
    /// Creates a client for the given environment with default settings.
    pub fn new(credentials: Credentials, environment: Environment) -> Result<Self, ClientError> {
        Self::with_config(credentials, ClientConfig::new(environment))
    }

    /// Creates a client from explicit settings.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url().to_string(),
            credentials,
            http,
            codes: ResponseCodeTable::global(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests an access code and the shared page URL for a payment.
    #[instrument(skip(self, request), fields(method = ?request.method))]
    pub async fn create_access_code(
        &self,
        request: &AccessCodeRequest,
    ) -> Result<AccessCodeResponse, ClientError> {
        self.post(request.method.access_code_endpoint(), request)
            .await
    }

    /// Like [`create_access_code`](Self::create_access_code), aborting when `cancel` fires.
    pub async fn create_access_code_with_cancel(
        &self,
        request: &AccessCodeRequest,
        cancel: &CancellationToken,
    ) -> Result<AccessCodeResponse, ClientError> {
        with_cancel(cancel, self.create_access_code(request)).await
    }

    /// Fetches the outcome of the transaction identified by `access_code`.
    #[instrument(skip(self))]
    pub async fn get_transaction_result(
        &self,
        access_code: &str,
    ) -> Result<TransactionResult, ClientError> {
        let req = TransactionResultRequest {
            access_code: access_code.to_string(),
        };
        self.post(TRANSACTION_RESULT_PATH, &req).await
    }

    /// Like [`get_transaction_result`](Self::get_transaction_result), aborting when `cancel` fires.
    pub async fn get_transaction_result_with_cancel(
        &self,
        access_code: &str,
        cancel: &CancellationToken,
    ) -> Result<TransactionResult, ClientError> {
        with_cancel(cancel, self.get_transaction_result(access_code)).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending gateway request");
        let resp = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .basic_auth(
                &self.credentials.api_key,
                Some(self.credentials.password.expose_secret()),
            )
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        debug!(status = status.as_u16(), "gateway responded");

        // The gateway answers bad credentials with 500 as well as 401.
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::INTERNAL_SERVER_ERROR {
            return Err(ClientError::Auth {
                status: status.as_u16(),
            });
        }

        if status.is_client_error() || status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    ["error", "Message"]
                        .iter()
                        .find_map(|key| v.get(key).and_then(|e| e.as_str()).map(String::from))
                })
                .unwrap_or(body);
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        let codes = self.error_codes(&value);
        if !codes.is_empty() {
            return Err(ClientError::Api { codes });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Reads the `Errors` field: a comma separated string, or a list of them.
    fn error_codes(&self, body: &Value) -> Vec<ResolvedCode> {
        match body.get("Errors") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(codes)) => self.codes.resolve_list(codes),
            Some(Value::Array(items)) => items
                .iter()
                .flat_map(|item| match item {
                    Value::String(codes) => self.codes.resolve_list(codes),
                    other => vec![self.codes.resolve(&other.to_string())],
                })
                .collect(),
            Some(other) => vec![self.codes.resolve(&other.to_string())],
        }
    }
}

async fn with_cancel<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = call => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(config: ClientConfig) -> GatewayClient {
        GatewayClient::with_config(Credentials::new("key", "secret"), config).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new(Credentials::new("key", "secret"), Environment::Sandbox)
            .unwrap();
        assert_eq!(client.base_url(), "https://api.sandbox.ewaypayments.com");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = client(ClientConfig::default().with_base_url("http://localhost:3000/"));
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_error_codes_shapes() {
        let client = client(ClientConfig::default());
        assert!(client.error_codes(&json!({"Errors": null})).is_empty());
        assert!(client.error_codes(&json!({"Errors": ""})).is_empty());
        assert!(client.error_codes(&json!({"AccessCode": "abc"})).is_empty());

        let codes = client.error_codes(&json!({"Errors": "V6021,V6022"}));
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[1].to_string(), "Card Number Required");

        let codes = client.error_codes(&json!({"Errors": ["V6023", "Z9999"]}));
        assert_eq!(codes[0].to_string(), "CVN Required");
        assert!(!codes[1].is_known());
    }

    #[tokio::test]
    async fn test_cancelled_token_wins() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result: Result<(), ClientError> =
            with_cancel(&cancel, std::future::pending()).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }
}
