//! Port trait for the shared page gateway.

use async_trait::async_trait;
use eway_types::{AccessCodeRequest, AccessCodeResponse, TransactionResult};

use crate::{ClientError, GatewayClient};

/// The two shared page operations, so applications can swap in a fake gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_access_code(
        &self,
        request: &AccessCodeRequest,
    ) -> Result<AccessCodeResponse, ClientError>;

    async fn get_transaction_result(
        &self,
        access_code: &str,
    ) -> Result<TransactionResult, ClientError>;
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn create_access_code(
        &self,
        request: &AccessCodeRequest,
    ) -> Result<AccessCodeResponse, ClientError> {
        GatewayClient::create_access_code(self, request).await
    }

    async fn get_transaction_result(
        &self,
        access_code: &str,
    ) -> Result<TransactionResult, ClientError> {
        GatewayClient::get_transaction_result(self, access_code).await
    }
}
