use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CouponId, CouponName, IssuedCouponId, LoginId, UserId, calendar_date};
use crate::domain::{Entity, Resource};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Active,
    Inactive,
    Deleted,
}

impl CouponStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            CouponStatus::Active => "active",
            CouponStatus::Inactive => "inactive",
            CouponStatus::Deleted => "deleted",
        }
    }
}

/// Coupon definition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Coupon {
    #[serde(rename = "CouponID")]
    pub coupon_id: CouponId,
    pub name: String,
    pub discount_amount: i64,
    #[serde(default, with = "calendar_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "calendar_date")]
    pub expiry: Option<NaiveDate>,
    pub status: CouponStatus,
}

impl Coupon {
    /// Whether the coupon can still be handed out on `today`.
    pub fn is_issuable(&self, today: NaiveDate) -> bool {
        self.status == CouponStatus::Active
            && self.start_date.is_none_or(|start| start <= today)
            && self.expiry.is_none_or(|expiry| today <= expiry)
    }
}

impl Entity for Coupon {
    type Key = CouponId;

    const RESOURCE: Resource = Resource::new("coupons").items_key("coupons");

    const RETIRED_STATUS: Option<&'static str> = Some(CouponStatus::Deleted.as_str());

    fn key(&self) -> CouponId {
        self.coupon_id
    }

    fn toggled_status(&self) -> Option<&'static str> {
        match self.status {
            CouponStatus::Active => Some(CouponStatus::Inactive.as_str()),
            CouponStatus::Inactive => Some(CouponStatus::Active.as_str()),
            CouponStatus::Deleted => None,
        }
    }
}

/// Payload of `POST coupons` and `PUT coupons/:id`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    pub name: CouponName,
    pub discount_amount: i64,
    #[serde(with = "calendar_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "calendar_date")]
    pub expiry: Option<NaiveDate>,
    pub status: CouponStatus,
}

/// Member summary embedded in issued-coupon rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserDetail {
    #[serde(rename = "LoginID")]
    pub login_id: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

/// A coupon handed to a member.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct IssuedCoupon {
    #[serde(rename = "UserCouponID")]
    pub user_coupon_id: IssuedCouponId,
    #[serde(rename = "CouponID")]
    pub coupon_id: CouponId,
    #[serde(rename = "UserID")]
    pub user_id: UserId,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub user_detail: Option<UserDetail>,
}

impl Entity for IssuedCoupon {
    type Key = IssuedCouponId;

    const RESOURCE: Resource = Resource::new("coupons/issued")
        .items_key("issuedCoupons")
        .search_path("coupons/search")
        .count_path("coupons/count");

    fn key(&self) -> IssuedCouponId {
        self.user_coupon_id
    }
}

/// Body of `POST coupons/issue`, one per selected member.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct IssueCoupon {
    #[serde(rename = "loginID")]
    pub login_id: LoginId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
    #[serde(rename = "couponID")]
    pub coupon_id: CouponId,
    #[serde(rename = "issuedAt")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "isUsed")]
    pub is_used: bool,
}
