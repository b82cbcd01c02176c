//! Seam between the controllers and the admin REST API.
//!
//! The traits speak JSON so a single transport serves every table; rows are
//! decoded into typed entities by the controller.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::Resource;
use crate::domain::asset::Upload;
use crate::domain::filter::FilterCriteria;
use crate::domain::types::PageNumber;

pub mod credentials;
pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// One `GET` of a paged list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub items_key: &'static str,
    pub total_key: &'static str,
}

impl ListRequest {
    /// Builds `{page, limit, ...fixed, ...effective filters}` for `resource`.
    ///
    /// Filters are expected to be effective already; the search endpoint is
    /// chosen when any filter is applied.
    pub fn new(
        resource: &Resource,
        page: PageNumber,
        page_size: usize,
        filters: &FilterCriteria,
    ) -> Self {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), page_size.to_string()),
        ];
        query.extend(
            resource
                .fixed_params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        query.extend(
            filters
                .applied()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );

        Self {
            path: resource.list_path(!filters.is_unconstrained()).to_string(),
            query,
            items_key: resource.items_key,
            total_key: resource.total_key,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Undecoded list response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPage {
    pub items: Vec<Value>,
    pub total_items: u64,
    /// `totalPages` as reported by the server, if present.
    pub total_pages: Option<u64>,
    /// The server ignored paging and sent every row; the caller slices.
    pub unpaged: bool,
}

impl RawPage {
    /// Reads a list response: the rows under `items_key` (or `items`) and
    /// the count under `total_key` (or `totalItems`). A bare array is the
    /// whole result set and is marked `unpaged`.
    pub fn decode(body: Value, items_key: &str, total_key: &str) -> ApiResult<Self> {
        let mut object = match body {
            Value::Array(items) => {
                return Ok(Self {
                    total_items: items.len() as u64,
                    items,
                    total_pages: None,
                    unpaged: true,
                });
            }
            Value::Object(object) => object,
            other => {
                return Err(ApiError::Decode(format!(
                    "expected a list response, got {other}"
                )));
            }
        };

        let items = match object.remove(items_key).or_else(|| object.remove("items")) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(ApiError::Decode(format!(
                    "`{items_key}` is not an array: {other}"
                )));
            }
        };

        let total_items = object
            .get(total_key)
            .or_else(|| object.get("totalItems"))
            .and_then(Value::as_u64)
            .ok_or_else(|| ApiError::Decode(format!("missing `{total_key}` in list response")))?;

        Ok(Self {
            items,
            total_items,
            total_pages: object.get("totalPages").and_then(Value::as_u64),
            unpaged: false,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A file part of a multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub upload: Upload,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self {
            fields,
            files: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, field: impl Into<String>, upload: Option<Upload>) -> Self {
        if let Some(upload) = upload {
            self.files.push(FilePart {
                field: field.into(),
                upload,
            });
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

impl Body {
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(payload).map(Body::Json)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// A mutating request against the admin API.
#[derive(Clone, Debug, PartialEq)]
pub struct WriteRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl WriteRequest {
    pub fn post(path: impl Into<String>, body: Body) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }

    pub fn put(path: impl Into<String>, body: Body) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: Body::Empty,
        }
    }

    /// `PUT <row>/status` with `{ status }`.
    pub fn set_status(row_path: &str, status: &str) -> Self {
        Self::put(
            format!("{row_path}/status"),
            Body::Json(serde_json::json!({ "status": status })),
        )
    }
}

#[async_trait]
pub trait ListReader: Send + Sync {
    async fn fetch_page(&self, request: &ListRequest) -> ApiResult<RawPage>;

    /// `GET` of a non-list endpoint such as a count, a reply or a file url.
    async fn fetch_value(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value>;
}

#[async_trait]
pub trait RowWriter: Send + Sync {
    /// Performs the write and returns the decoded response body
    /// (`Value::Null` when the server sent none).
    async fn send(&self, request: &WriteRequest) -> ApiResult<Value>;
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> ApiResult<String>;

    /// Whether the current token is still accepted.
    async fn verify(&self) -> ApiResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRODUCTS: Resource = Resource::new("products")
        .items_key("products")
        .total_key("totalCount")
        .search_path("products/search")
        .fixed_params(&[("sort", "createdAt")]);

    #[test]
    fn list_request_carries_only_applied_filters() {
        let filters = FilterCriteria::new()
            .with("name", String::new())
            .with("status", "active".to_string())
            .effective();
        let request = ListRequest::new(&PRODUCTS, PageNumber::FIRST, 10, &filters);

        assert_eq!(request.path, "products/search");
        assert_eq!(request.param("page"), Some("1"));
        assert_eq!(request.param("limit"), Some("10"));
        assert_eq!(request.param("sort"), Some("createdAt"));
        assert_eq!(request.param("status"), Some("active"));
        assert_eq!(request.param("name"), None);
    }

    #[test]
    fn unfiltered_request_uses_list_path() {
        let request = ListRequest::new(&PRODUCTS, PageNumber::new(3).unwrap(), 20, &FilterCriteria::new());
        assert_eq!(request.path, "products");
        assert_eq!(request.param("page"), Some("3"));
    }

    #[test]
    fn decode_reads_entity_keys() {
        let page = RawPage::decode(
            json!({ "products": [{ "ProductID": 1 }], "totalCount": 31, "totalPages": 4 }),
            "products",
            "totalCount",
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_items, 31);
        assert_eq!(page.total_pages, Some(4));
    }

    #[test]
    fn decode_falls_back_to_generic_keys() {
        let page = RawPage::decode(json!({ "items": [], "totalItems": 0 }), "qna", "totalQnAs").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn bare_array_is_a_complete_result() {
        let page = RawPage::decode(json!([{ "a": 1 }, { "a": 2 }]), "items", "totalItems").unwrap();
        assert_eq!(page.total_items, 2);
        assert!(page.unpaged);
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn decode_rejects_missing_total() {
        let result = RawPage::decode(json!({ "users": [] }), "users", "totalItems");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn status_change_targets_status_subpath() {
        let request = WriteRequest::set_status("users/4", "Withdrawn");
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "users/4/status");
        assert_eq!(request.body.as_json(), Some(&json!({ "status": "Withdrawn" })));
    }
}
