use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::qna::AnswerStatus;
use crate::domain::types::InquiryId;
use crate::domain::{Entity, Resource};

/// Member inquiry (one-to-one support question).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Inquiry {
    #[serde(rename = "InquiryID")]
    pub inquiry_id: InquiryId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: AnswerStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Inquiry {
    type Key = InquiryId;

    const RESOURCE: Resource = Resource::new("inquiries")
        .items_key("inquiries")
        .search_path("inquiries/search");

    fn key(&self) -> InquiryId {
        self.inquiry_id
    }
}
