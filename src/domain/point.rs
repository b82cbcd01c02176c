use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{LoginId, PointId};
use crate::domain::{Entity, Resource};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointUser {
    #[serde(rename = "LoginID")]
    pub login_id: String,
}

/// Entry of the points ledger.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PointEntry {
    #[serde(rename = "PointID")]
    pub point_id: PointId,
    #[serde(default)]
    pub point_user: Option<PointUser>,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: i64,
    #[serde(default)]
    pub charge_type: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "isCancelled", default)]
    pub is_cancelled: bool,
}

impl PointEntry {
    pub fn login_id(&self) -> Option<&str> {
        self.point_user.as_ref().map(|user| user.login_id.as_str())
    }

    /// Cancelled entries and already negative ones cannot be cancelled again.
    pub fn is_cancellable(&self) -> bool {
        !self.is_cancelled && self.amount > 0
    }
}

impl Entity for PointEntry {
    type Key = PointId;

    const RESOURCE: Resource = Resource::new("points")
        .items_key("points")
        .search_path("points/search")
        .count_path("points/count");

    fn key(&self) -> PointId {
        self.point_id
    }
}

/// Body of `POST points`, one per selected member.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GrantPoints {
    #[serde(rename = "loginID")]
    pub login_id: LoginId,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Body of `POST points/cancel`; the amount is the negated original.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CancelPoints {
    #[serde(rename = "pointID")]
    pub point_id: PointId,
    #[serde(rename = "loginID")]
    pub login_id: String,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "Description")]
    pub description: String,
}

impl CancelPoints {
    pub fn for_entry(entry: &PointEntry, login_id: String, description: String) -> Self {
        Self {
            point_id: entry.point_id,
            login_id,
            amount: -entry.amount.abs(),
            description,
        }
    }
}
