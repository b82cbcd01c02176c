use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{HtmlContent, ProductId, ProductName};
use crate::domain::{Entity, Resource};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    Deleted,
}

impl ProductStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Deleted => "deleted",
        }
    }
}

/// Row of the catalogue table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub discount_rate: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub detail_info: Option<String>,
    pub status: ProductStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price after the discount rate (a percentage) is applied, rounded down.
    pub fn discounted_price(&self) -> i64 {
        let rate = self.discount_rate.clamp(0.0, 100.0);
        (self.price as f64 * (100.0 - rate) / 100.0).floor() as i64
    }
}

impl Entity for Product {
    type Key = ProductId;

    const RESOURCE: Resource = Resource::new("products")
        .items_key("products")
        .total_key("totalCount")
        .fixed_params(&[("sort", "createdAt"), ("order", "DESC")]);

    const RETIRED_STATUS: Option<&'static str> = Some(ProductStatus::Deleted.as_str());

    fn key(&self) -> ProductId {
        self.product_id
    }

    fn toggled_status(&self) -> Option<&'static str> {
        match self.status {
            ProductStatus::Active => Some(ProductStatus::Inactive.as_str()),
            ProductStatus::Inactive => Some(ProductStatus::Active.as_str()),
            ProductStatus::Deleted => None,
        }
    }
}

/// Text fields of a product create/update form; sent as multipart parts
/// next to an optional thumbnail file.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDraft {
    pub name: ProductName,
    pub price: i64,
    pub discount_rate: f64,
    pub description: Option<HtmlContent>,
    pub status: ProductStatus,
}

impl ProductDraft {
    pub fn into_fields(self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("name".to_string(), self.name.into_inner()),
            ("price".to_string(), self.price.to_string()),
            ("discountRate".to_string(), self.discount_rate.to_string()),
            ("status".to_string(), self.status.as_str().to_string()),
        ];
        if let Some(description) = self.description {
            fields.push(("description".to_string(), description.into_inner()));
        }
        fields
    }
}
