use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{HtmlContent, ProductId, QnaId};
use crate::domain::{Entity, Resource};

/// Whether a question or inquiry has been answered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnswerStatus {
    Pending,
    Answered,
}

/// Stored answer, as returned by `GET <path>/:id/replies`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    #[serde(rename = "ReplyContent")]
    pub content: String,
}

/// Envelope of the reply lookup; `reply` is absent while unanswered.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ReplyEnvelope {
    #[serde(default)]
    pub reply: Option<Reply>,
}

/// Body of `POST <path>/:id/replies`. Product questions also carry the product.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewReply {
    #[serde(rename = "ReplyContent")]
    pub content: HtmlContent,
    #[serde(rename = "ProductID", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
}

/// Product question.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Qna {
    #[serde(rename = "QnAID")]
    pub qna_id: QnaId,
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: AnswerStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Qna {
    type Key = QnaId;

    const RESOURCE: Resource = Resource::new("qnas").items_key("qna").total_key("totalQnAs");

    fn key(&self) -> QnaId {
        self.qna_id
    }
}
