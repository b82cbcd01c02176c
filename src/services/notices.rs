//! Notice board.

use chrono::NaiveDate;

use crate::api::{Body, ListReader, RowWriter};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::notice::Notice;
use crate::domain::page::Page;
use crate::domain::types::NoticeId;
use crate::forms::notices::{NoticeForm, NoticePayload};
use crate::forms::{SearchForm, SearchKeys};
use crate::services::{ServiceResult, search};

pub async fn search_notices<A>(
    notices: &PagedCollectionController<Notice, A>,
    form: SearchForm,
) -> ServiceResult<Page<Notice>>
where
    A: ListReader + RowWriter,
{
    search(notices, form, SearchKeys::DEFAULT).await
}

/// Publishes a notice; a blank post date means `today`.
pub async fn create_notice<A>(
    notices: &PagedCollectionController<Notice, A>,
    form: NoticeForm,
    today: NaiveDate,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let payload = NoticePayload::try_new(form, today)?;
    let body = Body::json(&payload.draft).map_err(ControllerError::from)?;
    notices.mutate(Mutation::Create(body)).await?;
    Ok(())
}

pub async fn update_notice<A>(
    notices: &PagedCollectionController<Notice, A>,
    notice_id: i64,
    form: NoticeForm,
    today: NaiveDate,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = NoticeId::new(notice_id)?;
    let payload = NoticePayload::try_new(form, today)?;
    let body = Body::json(&payload.draft).map_err(ControllerError::from)?;
    notices.mutate(Mutation::Update { key, body }).await?;
    Ok(())
}

/// Removes the notice for good.
pub async fn delete_notice<A>(
    notices: &PagedCollectionController<Notice, A>,
    notice_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = NoticeId::new(notice_id)?;
    notices.mutate(Mutation::Delete { key }).await?;
    Ok(())
}
