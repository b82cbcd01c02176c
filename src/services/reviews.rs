//! Review moderation.

use crate::api::{Body, ListReader, MultipartBody, RowWriter, WriteRequest};
use crate::controller::{Mutation, PagedCollectionController};
use crate::domain::Entity;
use crate::domain::asset::Upload;
use crate::domain::page::Page;
use crate::domain::review::{Review, ReviewEdit};
use crate::domain::types::ReviewId;
use crate::forms::reviews::ReviewForm;
use crate::forms::{SearchForm, SearchKeys};
use crate::services::{ServiceResult, search};

const IMAGE_FIELD: &str = "image";

pub async fn search_reviews<A>(
    reviews: &PagedCollectionController<Review, A>,
    form: SearchForm,
) -> ServiceResult<Page<Review>>
where
    A: ListReader + RowWriter,
{
    search(reviews, form, SearchKeys::DEFAULT).await
}

/// Hides a visible review or shows a hidden one.
pub async fn toggle_review_visibility<A>(
    reviews: &PagedCollectionController<Review, A>,
    review_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ReviewId::new(review_id)?;
    reviews.mutate(Mutation::ToggleStatus { key }).await?;
    Ok(())
}

/// Edits text and rating; a new image replaces the stored one.
pub async fn edit_review<A>(
    reviews: &PagedCollectionController<Review, A>,
    review_id: i64,
    form: ReviewForm,
    image: Option<Upload>,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ReviewId::new(review_id)?;
    let edit = ReviewEdit::try_from(form)?;
    let body = Body::Multipart(MultipartBody::new(edit.into_fields()).file(IMAGE_FIELD, image));
    reviews.mutate(Mutation::Update { key, body }).await?;
    Ok(())
}

pub async fn delete_review_image<A>(
    reviews: &PagedCollectionController<Review, A>,
    review_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ReviewId::new(review_id)?;
    let path = format!("{}/image", Review::RESOURCE.row_path(&key));
    reviews
        .mutate(Mutation::Action(WriteRequest::delete(path)))
        .await?;
    Ok(())
}

pub async fn delete_review<A>(
    reviews: &PagedCollectionController<Review, A>,
    review_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ReviewId::new(review_id)?;
    reviews.mutate(Mutation::Delete { key }).await?;
    Ok(())
}
