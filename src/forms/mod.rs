//! Form definitions backing the back-office workflows.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::filter::FilterCriteria;
use crate::domain::types::parse_calendar_date;

pub mod auth;
pub mod coupons;
pub mod notices;
pub mod points;
pub mod products;
pub mod replies;
pub mod reviews;
pub mod transactions;
pub mod users;

/// Status value meaning "any status" in search forms.
pub const ANY_STATUS: &str = "all";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid id")]
    InvalidId,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid date")]
    InvalidDate,

    #[error("start date is after end date")]
    InvalidDateRange,

    #[error("invalid status")]
    InvalidStatus,

    #[error("content cannot be empty")]
    EmptyContent,

    #[error("nothing selected")]
    EmptySelection,
}

/// Parses an optional `YYYY-MM-DD` form field; blank means unset.
pub(crate) fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, FormError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => parse_calendar_date(value)
            .map(Some)
            .ok_or(FormError::InvalidDate),
    }
}

/// Names under which a table's search endpoint expects the free-text query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchKeys {
    pub search_type: &'static str,
    pub query: &'static str,
}

impl SearchKeys {
    pub const DEFAULT: SearchKeys = SearchKeys {
        search_type: "searchType",
        query: "query",
    };
    pub const TRANSACTIONS: SearchKeys = SearchKeys {
        search_type: "searchType",
        query: "searchValue",
    };
    pub const ISSUED_COUPONS: SearchKeys = SearchKeys {
        search_type: "searchBy",
        query: "searchQuery",
    };
}

/// Search bar shared by the admin tables.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    #[serde(default)]
    pub search_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub query: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl SearchForm {
    /// Validates the form and turns it into the criteria sent to the
    /// table's search endpoint. Blank fields and the "all" status are
    /// dropped; the search type only travels with a query.
    pub fn into_criteria(self, keys: SearchKeys) -> Result<FilterCriteria, FormError> {
        self.validate()?;

        let start = optional_date(self.start_date.as_deref())?;
        let end = optional_date(self.end_date.as_deref())?;
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(FormError::InvalidDateRange);
        }

        let query = self
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        let search_type = query.as_ref().and(self.search_type);
        let status = self
            .status
            .filter(|s| !s.trim().eq_ignore_ascii_case(ANY_STATUS));

        let criteria = FilterCriteria::new()
            .with(keys.search_type, search_type)
            .with(keys.query, query)
            .with("startDate", start.map(|d| d.format("%Y-%m-%d").to_string()))
            .with("endDate", end.map(|d| d.format("%Y-%m-%d").to_string()))
            .with("status", status);
        Ok(criteria.effective())
    }
}
