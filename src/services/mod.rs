//! Validated workflows for each back-office table.
//!
//! Services are free functions generic over the API seam. List-backed tables
//! go through their [`PagedCollectionController`]; single-resource endpoints
//! (replies, site assets, auth) are called directly.

use thiserror::Error;

use crate::api::errors::ApiError;
use crate::api::{ListReader, RowWriter};
use crate::controller::{ControllerError, PagedCollectionController};
use crate::domain::Entity;
use crate::domain::page::Page;
use crate::domain::types::TypeConstraintError;
use crate::forms::{FormError, SearchForm, SearchKeys};

pub mod assets;
pub mod auth;
pub mod coupons;
pub mod inquiries;
pub mod notices;
pub mod points;
pub mod products;
pub mod qna;
pub mod reviews;
pub mod transactions;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    /// The server refused the change, e.g. a duplicate name.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    /// A batch stopped early; `applied` requests already took effect.
    #[error("{applied} change(s) applied before failure: {message}")]
    PartialBatch { applied: usize, message: String },

    /// The change took effect but the list could not be reloaded; retrying
    /// would apply it again.
    #[error("{applied} change(s) applied, list not reloaded: {message}")]
    AppliedNotReloaded { applied: usize, message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::NotFound => ServiceError::NotFound,
            ApiError::Validation(message) => ServiceError::Conflict(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<ControllerError> for ServiceError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::ReauthenticationRequired => ServiceError::Unauthorized,
            ControllerError::Api(err) => err.into(),
            ControllerError::InvalidPage(err) => err.into(),
            ControllerError::PageOutOfRange { .. } => ServiceError::Form(err.to_string()),
            ControllerError::RowNotLoaded(_) => ServiceError::NotFound,
            ControllerError::Batch { applied, source } => ServiceError::PartialBatch {
                applied,
                message: source.to_string(),
            },
            ControllerError::RefreshFailed {
                applied, source, ..
            } => ServiceError::AppliedNotReloaded {
                applied,
                message: source.to_string(),
            },
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Runs the search bar of any table: validates the form and loads the first
/// page of matching rows.
pub async fn search<E, A>(
    controller: &PagedCollectionController<E, A>,
    form: SearchForm,
    keys: SearchKeys,
) -> ServiceResult<Page<E>>
where
    E: Entity,
    A: ListReader + RowWriter,
{
    let criteria = form.into_criteria(keys)?;
    controller
        .apply_filters(criteria)
        .await
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_session_maps_to_unauthorized() {
        let err = ServiceError::from(ControllerError::ReauthenticationRequired);
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn server_validation_is_a_conflict() {
        let err = ServiceError::from(ControllerError::Api(ApiError::Validation(
            "duplicate coupon name".into(),
        )));
        assert!(matches!(err, ServiceError::Conflict(message) if message == "duplicate coupon name"));
    }

    #[test]
    fn batch_failure_reports_applied_count() {
        let err = ServiceError::from(ControllerError::Batch {
            applied: 2,
            source: Box::new(ControllerError::Api(ApiError::Transport("reset".into()))),
        });
        assert!(matches!(err, ServiceError::PartialBatch { applied: 2, .. }));
    }

    #[test]
    fn applied_change_with_failed_reload_is_not_internal() {
        let err = ServiceError::from(ControllerError::RefreshFailed {
            applied: 1,
            response: None,
            source: Box::new(ControllerError::ReauthenticationRequired),
        });
        assert!(matches!(err, ServiceError::AppliedNotReloaded { applied: 1, .. }));
    }
}
