use serde::Deserialize;
use validator::Validate;

use crate::domain::types::HtmlContent;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Answer to a product question or a member inquiry.
pub struct ReplyForm {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

impl TryFrom<ReplyForm> for HtmlContent {
    type Error = FormError;

    fn try_from(form: ReplyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        HtmlContent::new(form.content).map_err(|_| FormError::EmptyContent)
    }
}
