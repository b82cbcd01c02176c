use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{HtmlContent, NoticeId, NoticeTitle, calendar_date};
use crate::domain::{Entity, Resource};

/// Notice board post.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Notice {
    #[serde(rename = "NoticeID")]
    pub notice_id: NoticeId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, with = "calendar_date")]
    pub post_date: Option<NaiveDate>,
}

impl Entity for Notice {
    type Key = NoticeId;

    const RESOURCE: Resource = Resource::new("notices")
        .items_key("notices")
        .search_path("notices/search")
        .count_path("notices/count");

    fn key(&self) -> NoticeId {
        self.notice_id
    }
}

/// Payload of `POST notices` and `PUT notices/:id`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDraft {
    pub title: NoticeTitle,
    pub content: HtmlContent,
    #[serde(with = "calendar_date")]
    pub post_date: Option<NaiveDate>,
}
