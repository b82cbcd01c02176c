use serde::Deserialize;
use validator::Validate;

use crate::domain::review::ReviewEdit;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Review edit modal.
pub struct ReviewForm {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
}

impl TryFrom<ReviewForm> for ReviewEdit {
    type Error = FormError;

    fn try_from(form: ReviewForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let content = form.content.trim().to_string();
        if content.is_empty() {
            return Err(FormError::EmptyContent);
        }
        Ok(ReviewEdit {
            content,
            rating: form.rating,
        })
    }
}
