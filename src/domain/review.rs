use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductId, ReviewId};
use crate::domain::{Entity, Resource};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Visible,
    Hidden,
}

impl ReviewStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Visible => "visible",
            ReviewStatus::Hidden => "hidden",
        }
    }
}

/// Product review written by a member.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Review {
    #[serde(rename = "ReviewID")]
    pub review_id: ReviewId,
    #[serde(rename = "ProductID")]
    pub product_id: ProductId,
    #[serde(default)]
    pub content: String,
    pub rating: u8,
    #[serde(default)]
    pub image: Option<String>,
    pub status: ReviewStatus,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Review {
    type Key = ReviewId;

    const RESOURCE: Resource = Resource::new("reviews")
        .items_key("reviews")
        .total_key("totalReviews")
        .search_path("reviews/search");

    fn key(&self) -> ReviewId {
        self.review_id
    }

    fn toggled_status(&self) -> Option<&'static str> {
        Some(match self.status {
            ReviewStatus::Visible => ReviewStatus::Hidden.as_str(),
            ReviewStatus::Hidden => ReviewStatus::Visible.as_str(),
        })
    }
}

/// Text parts of the multipart review edit.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewEdit {
    pub content: String,
    pub rating: u8,
}

impl ReviewEdit {
    pub fn into_fields(self) -> Vec<(String, String)> {
        vec![
            ("Content".to_string(), self.content),
            ("Rating".to_string(), self.rating.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn visibility_toggles_both_ways() {
        let mut review: Review = serde_json::from_value(json!({
            "ReviewID": 1, "ProductID": 7, "Content": "Good", "Rating": 5, "Status": "visible"
        }))
        .unwrap();
        assert_eq!(review.toggled_status(), Some("hidden"));
        review.status = ReviewStatus::Hidden;
        assert_eq!(review.toggled_status(), Some("visible"));
    }
}
