//! Member inquiries.

use crate::api::{Body, ListReader, RowWriter, WriteRequest};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::Entity;
use crate::domain::inquiry::Inquiry;
use crate::domain::page::Page;
use crate::domain::qna::NewReply;
use crate::domain::types::{HtmlContent, InquiryId};
use crate::forms::replies::ReplyForm;
use crate::forms::{SearchForm, SearchKeys};
use crate::services::qna::load_reply;
use crate::services::{ServiceResult, search};

pub async fn search_inquiries<A>(
    inquiries: &PagedCollectionController<Inquiry, A>,
    form: SearchForm,
) -> ServiceResult<Page<Inquiry>>
where
    A: ListReader + RowWriter,
{
    search(inquiries, form, SearchKeys::DEFAULT).await
}

pub async fn load_inquiry_reply<A>(
    inquiries: &PagedCollectionController<Inquiry, A>,
    inquiry_id: i64,
) -> ServiceResult<Option<String>>
where
    A: ListReader + RowWriter,
{
    let key = InquiryId::new(inquiry_id)?;
    load_reply(inquiries.api().as_ref(), &Inquiry::RESOURCE.row_path(&key)).await
}

pub async fn reply_to_inquiry<A>(
    inquiries: &PagedCollectionController<Inquiry, A>,
    inquiry_id: i64,
    form: ReplyForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = InquiryId::new(inquiry_id)?;
    let reply = NewReply {
        content: HtmlContent::try_from(form)?,
        product_id: None,
    };
    let body = Body::json(&reply).map_err(ControllerError::from)?;
    let path = format!("{}/replies", Inquiry::RESOURCE.row_path(&key));
    inquiries
        .mutate(Mutation::Action(WriteRequest::post(path, body)))
        .await?;
    Ok(())
}
