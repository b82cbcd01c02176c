use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::notice::NoticeDraft;
use crate::domain::types::{HtmlContent, NoticeTitle};
use crate::forms::{FormError, optional_date};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Notice editor form.
pub struct NoticeForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: String,
    /// Defaults to today when left blank.
    #[serde(default)]
    pub post_date: Option<String>,
}

pub struct NoticePayload {
    pub draft: NoticeDraft,
}

impl NoticePayload {
    pub fn try_new(form: NoticeForm, today: NaiveDate) -> Result<Self, FormError> {
        form.validate()?;
        let post_date = optional_date(form.post_date.as_deref())?.unwrap_or(today);

        Ok(Self {
            draft: NoticeDraft {
                title: NoticeTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
                content: HtmlContent::new(form.content).map_err(|_| FormError::EmptyContent)?,
                post_date: Some(post_date),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_post_date_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let form = NoticeForm {
            title: "Hours".into(),
            content: "<p>Open</p>".into(),
            post_date: Some(String::new()),
        };
        let payload = NoticePayload::try_new(form, today).unwrap();
        assert_eq!(payload.draft.post_date, Some(today));
    }

    #[test]
    fn script_only_content_is_empty() {
        let form = NoticeForm {
            title: "Hours".into(),
            content: "<script>alert(1)</script>".into(),
            post_date: None,
        };
        assert!(matches!(
            NoticePayload::try_new(form, NaiveDate::MIN),
            Err(FormError::EmptyContent)
        ));
    }
}
