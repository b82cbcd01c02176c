//! mockall doubles of the API traits for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::api::errors::ApiResult;
use crate::api::{Authenticator, ListReader, ListRequest, RawPage, RowWriter, WriteRequest};

mock! {
    pub AdminApi {}

    #[async_trait]
    impl ListReader for AdminApi {
        async fn fetch_page(&self, request: &ListRequest) -> ApiResult<RawPage>;
        async fn fetch_value(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value>;
    }

    #[async_trait]
    impl RowWriter for AdminApi {
        async fn send(&self, request: &WriteRequest) -> ApiResult<Value>;
    }

    #[async_trait]
    impl Authenticator for AdminApi {
        async fn login(&self, username: &str, password: &str) -> ApiResult<String>;
        async fn verify(&self) -> ApiResult<bool>;
    }
}
