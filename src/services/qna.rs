//! Product questions and their answers.

use crate::api::errors::ApiError;
use crate::api::{Body, ListReader, RowWriter, WriteRequest};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::Entity;
use crate::domain::page::Page;
use crate::domain::qna::{NewReply, Qna, ReplyEnvelope};
use crate::domain::types::{HtmlContent, QnaId};
use crate::forms::replies::ReplyForm;
use crate::services::{ServiceError, ServiceResult};

/// Fetches the stored answer under `<row>/replies`.
///
/// Unanswered rows yield `None`, whether the server answers with an empty
/// envelope or a 404.
pub(crate) async fn load_reply<A>(api: &A, row_path: &str) -> ServiceResult<Option<String>>
where
    A: ListReader + ?Sized,
{
    let path = format!("{row_path}/replies");
    let body = match api.fetch_value(&path, &[]).await {
        Ok(body) => body,
        Err(ApiError::NotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let envelope: ReplyEnvelope = serde_json::from_value(body).map_err(ApiError::from)?;
    Ok(envelope.reply.map(|reply| reply.content))
}

/// Questions are listed newest first without a search bar.
pub async fn load_questions<A>(
    questions: &PagedCollectionController<Qna, A>,
    page: usize,
) -> ServiceResult<Page<Qna>>
where
    A: ListReader + RowWriter,
{
    Ok(questions.load_page(page, None).await?)
}

pub async fn load_question_reply<A>(
    questions: &PagedCollectionController<Qna, A>,
    qna_id: i64,
) -> ServiceResult<Option<String>>
where
    A: ListReader + RowWriter,
{
    let key = QnaId::new(qna_id)?;
    load_reply(questions.api().as_ref(), &Qna::RESOURCE.row_path(&key)).await
}

/// Answers a question on the current page. The reply carries the question's
/// product.
pub async fn reply_to_question<A>(
    questions: &PagedCollectionController<Qna, A>,
    qna_id: i64,
    form: ReplyForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = QnaId::new(qna_id)?;
    let content = HtmlContent::try_from(form)?;
    let question = questions.find(&key).await.ok_or(ServiceError::NotFound)?;

    let reply = NewReply {
        content,
        product_id: Some(question.product_id),
    };
    let body = Body::json(&reply).map_err(ControllerError::from)?;
    let path = format!("{}/replies", Qna::RESOURCE.row_path(&key));
    questions
        .mutate(Mutation::Action(WriteRequest::post(path, body)))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::test::InMemoryApi;
    use crate::domain::qna::AnswerStatus;

    fn questions() -> Arc<InMemoryApi> {
        Arc::new(
            InMemoryApi::new()
                .with_table(
                    "qnas",
                    "QnAID",
                    Some("Status"),
                    vec![
                        json!({ "QnAID": 1, "ProductID": 7, "Title": "Size?", "Status": "Answered" }),
                        json!({ "QnAID": 2, "ProductID": 9, "Title": "Colour?", "Status": "Pending" }),
                    ],
                )
                .with_value("qnas/1/replies", json!({ "reply": { "ReplyContent": "Runs small" } }))
                .with_value("qnas/2/replies", json!({})),
        )
    }

    #[tokio::test]
    async fn reply_lookup_distinguishes_answered_rows() {
        let controller = PagedCollectionController::<Qna, _>::new(questions());

        let answered = load_question_reply(&controller, 1).await.unwrap();
        let pending = load_question_reply(&controller, 2).await.unwrap();
        let missing = load_question_reply(&controller, 3).await.unwrap();

        assert_eq!(answered.as_deref(), Some("Runs small"));
        assert_eq!(pending, None);
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn reply_carries_product_of_question() {
        let api = questions();
        let controller = PagedCollectionController::<Qna, _>::new(api.clone());
        let page = load_questions(&controller, 1).await.unwrap();
        assert_eq!(page.items[1].status, AnswerStatus::Pending);

        let form = ReplyForm {
            content: "<p>Blue only</p>".into(),
        };
        reply_to_question(&controller, 2, form).await.unwrap();

        let write = api.writes().pop().unwrap();
        assert_eq!(write.path, "qnas/2/replies");
        assert_eq!(
            write.body.as_json().cloned(),
            Some(json!({ "ReplyContent": "<p>Blue only</p>", "ProductID": 9 }))
        );
        assert_eq!(api.list_requests().len(), 2);
    }

    #[tokio::test]
    async fn reply_requires_question_on_page() {
        let api = questions();
        let controller = PagedCollectionController::<Qna, _>::new(api.clone());
        let form = ReplyForm {
            content: "Hello".into(),
        };

        let result = reply_to_question(&controller, 2, form).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert!(api.writes().is_empty());
    }
}
