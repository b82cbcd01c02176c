//! Rows, payloads and value objects of the back-office tables.

use std::fmt::Display;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod asset;
pub mod coupon;
pub mod filter;
pub mod inquiry;
pub mod notice;
pub mod page;
pub mod point;
pub mod product;
pub mod qna;
pub mod review;
pub mod transaction;
pub mod types;
pub mod user;

/// Where and how a table is served by the admin REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Collection path relative to the API base, e.g. `users`.
    pub path: &'static str,
    /// Dedicated search endpoint used when filters are applied.
    pub search_path: Option<&'static str>,
    /// Endpoint answering `{ count }` for the whole collection.
    pub count_path: Option<&'static str>,
    /// Key of the row array in list responses.
    pub items_key: &'static str,
    /// Key of the total row count in list responses.
    pub total_key: &'static str,
    /// Parameters sent with every list request.
    pub fixed_params: &'static [(&'static str, &'static str)],
}

impl Resource {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            search_path: None,
            count_path: None,
            items_key: "items",
            total_key: "totalItems",
            fixed_params: &[],
        }
    }

    pub const fn items_key(mut self, key: &'static str) -> Self {
        self.items_key = key;
        self
    }

    pub const fn total_key(mut self, key: &'static str) -> Self {
        self.total_key = key;
        self
    }

    pub const fn search_path(mut self, path: &'static str) -> Self {
        self.search_path = Some(path);
        self
    }

    pub const fn count_path(mut self, path: &'static str) -> Self {
        self.count_path = Some(path);
        self
    }

    pub const fn fixed_params(mut self, params: &'static [(&'static str, &'static str)]) -> Self {
        self.fixed_params = params;
        self
    }

    /// Endpoint serving a list with the given number of applied filters.
    pub fn list_path(&self, filtered: bool) -> &'static str {
        match (filtered, self.search_path) {
            (true, Some(search)) => search,
            _ => self.path,
        }
    }

    /// Path of a single row.
    pub fn row_path(&self, key: &impl Display) -> String {
        format!("{}/{}", self.path, key)
    }
}

/// A row type served by a paginated admin endpoint.
///
/// The controller never looks inside a row beyond its key and, for tables
/// with a status column, the status transitions declared here.
pub trait Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    type Key: Display + Clone + PartialEq + Send + Sync + 'static;

    const RESOURCE: Resource;

    /// Status written by a delete that only flags the row.
    const RETIRED_STATUS: Option<&'static str> = None;

    fn key(&self) -> Self::Key;

    /// Status the toggle switch moves this row to, if it has one.
    fn toggled_status(&self) -> Option<&'static str> {
        None
    }
}
