//! Points ledger: grants and cancellations.

use validator::Validate;

use crate::api::{Body, ListReader, RowWriter, WriteRequest};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::page::Page;
use crate::domain::point::{CancelPoints, PointEntry};
use crate::domain::types::PointId;
use crate::forms::points::{CancelPointsForm, GrantPointsForm, GrantPointsPayload};
use crate::forms::{FormError, SearchForm, SearchKeys};
use crate::services::{ServiceError, ServiceResult, search};

const CANCEL_PATH: &str = "points/cancel";

pub async fn search_points<A>(
    points: &PagedCollectionController<PointEntry, A>,
    form: SearchForm,
) -> ServiceResult<Page<PointEntry>>
where
    A: ListReader + RowWriter,
{
    search(points, form, SearchKeys::DEFAULT).await
}

/// Grants the same amount to every selected member, one ledger entry each.
pub async fn grant_points<A>(
    points: &PagedCollectionController<PointEntry, A>,
    form: GrantPointsForm,
) -> ServiceResult<usize>
where
    A: ListReader + RowWriter,
{
    let payload = GrantPointsPayload::try_from(form)?;
    let mutations = payload
        .grants
        .iter()
        .map(|grant| Body::json(grant).map(Mutation::Create))
        .collect::<Result<Vec<_>, _>>()
        .map_err(ControllerError::from)?;

    Ok(points.mutate_each(mutations).await?)
}

/// Books a negating entry for a ledger entry on the current page.
pub async fn cancel_points<A>(
    points: &PagedCollectionController<PointEntry, A>,
    point_id: i64,
    form: CancelPointsForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    form.validate().map_err(FormError::from)?;
    let key = PointId::new(point_id)?;

    let entry = points.find(&key).await.ok_or(ServiceError::NotFound)?;
    if !entry.is_cancellable() {
        return Err(ServiceError::Form(
            "entry is already cancelled or not a grant".to_string(),
        ));
    }
    let login_id = entry
        .login_id()
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Form("entry has no member".to_string()))?;

    let cancel = CancelPoints::for_entry(&entry, login_id, form.description.trim().to_string());
    let body = Body::json(&cancel).map_err(ControllerError::from)?;
    points
        .mutate(Mutation::Action(WriteRequest::post(CANCEL_PATH, body)))
        .await?;
    Ok(())
}

/// Ledger size from the count endpoint.
pub async fn count_points<A>(points: &PagedCollectionController<PointEntry, A>) -> ServiceResult<u64>
where
    A: ListReader + RowWriter,
{
    Ok(points.refresh_count().await?)
}
