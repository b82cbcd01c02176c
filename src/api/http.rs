//! reqwest transport for the admin REST API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::credentials::CredentialProvider;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::{
    Authenticator, Body, ListReader, ListRequest, Method, MultipartBody, RawPage, RowWriter,
    WriteRequest,
};
use crate::models::config::AdminConfig;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Admin API client rooted at `base_url` (e.g. `http://host/api/admin`).
#[derive(Clone)]
pub struct HttpAdminApi {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpAdminApi {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config(
        config: &AdminConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> ApiResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            credentials,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> ApiResult<String> {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded = serde_html_form::to_string(query)
                .map_err(|e| ApiError::Transport(format!("cannot encode query: {e}")))?;
            url.push('?');
            url.push_str(&encoded);
        }
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        let url = self.url(path, query)?;
        log::debug!("GET {url}");
        let response = self.authorize(self.http.get(&url)).send().await?;
        read_json(response).await
    }
}

fn multipart_form(body: &MultipartBody) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    for file in &body.files {
        let part = Part::bytes(file.upload.bytes.clone())
            .file_name(file.upload.file_name.clone())
            .mime_str(&file.upload.mime)?;
        form = form.part(file.field.clone(), part);
    }
    Ok(form)
}

/// Message the server attached to an error response, if any.
fn server_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| {
            ["message", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| text.trim().to_string())
}

async fn read_json(response: Response) -> ApiResult<Value> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_status(status, server_message(&text)));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl ListReader for HttpAdminApi {
    async fn fetch_page(&self, request: &ListRequest) -> ApiResult<RawPage> {
        let body = self.get_json(&request.path, &request.query).await?;
        RawPage::decode(body, request.items_key, request.total_key)
    }

    async fn fetch_value(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        self.get_json(path, query).await
    }
}

#[async_trait]
impl RowWriter for HttpAdminApi {
    async fn send(&self, request: &WriteRequest) -> ApiResult<Value> {
        let url = self.url(&request.path, &[])?;
        log::debug!("{:?} {url}", request.method);

        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };
        let builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(body) => builder.multipart(multipart_form(body)?),
        };

        let response = self.authorize(builder).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl Authenticator for HttpAdminApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let url = self.url("auth/login", &[])?;
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let body: LoginResponse = serde_json::from_value(read_json(response).await?)?;
        Ok(body.token)
    }

    async fn verify(&self) -> ApiResult<bool> {
        let url = self.url("auth/verify", &[])?;
        let response = self.authorize(self.http.get(&url)).send().await?;
        Ok(response.status().is_success())
    }
}
