use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{ProductDraft, ProductStatus};
use crate::domain::types::{HtmlContent, ProductName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Text fields of the product create/edit modal.
pub struct ProductForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_rate: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProductStatus,
}

impl TryFrom<ProductForm> for ProductDraft {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.status == ProductStatus::Deleted {
            return Err(FormError::InvalidStatus);
        }

        let description = match form.description.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(HtmlContent::new(text).map_err(|_| FormError::EmptyContent)?),
        };

        Ok(ProductDraft {
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            price: form.price,
            discount_rate: form.discount_rate,
            description,
            status: form.status,
        })
    }
}
