use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::coupon::{CouponDraft, CouponStatus, IssueCoupon};
use crate::domain::types::{CouponId, CouponName, LoginId, UserId};
use crate::forms::{FormError, optional_date};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Coupon definition modal.
pub struct CouponForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1))]
    pub discount_amount: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    pub status: CouponStatus,
}

impl TryFrom<CouponForm> for CouponDraft {
    type Error = FormError;

    fn try_from(form: CouponForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.status == CouponStatus::Deleted {
            return Err(FormError::InvalidStatus);
        }

        let start_date = optional_date(form.start_date.as_deref())?;
        let expiry = optional_date(form.expiry.as_deref())?;
        if let (Some(start), Some(expiry)) = (start_date, expiry)
            && start > expiry
        {
            return Err(FormError::InvalidDateRange);
        }

        Ok(CouponDraft {
            name: CouponName::new(form.name).map_err(|_| FormError::InvalidName)?,
            discount_amount: form.discount_amount,
            start_date,
            expiry,
            status: form.status,
        })
    }
}

#[derive(Debug, Deserialize)]
/// A member picked in the issue modal.
pub struct Recipient {
    pub user_id: i64,
    pub login_id: String,
}

#[derive(Debug, Deserialize)]
/// Issue one coupon to the selected members.
pub struct IssueCouponForm {
    pub coupon_id: i64,
    pub recipients: Vec<Recipient>,
}

/// One issue request per selected member.
pub struct IssueCouponPayload {
    pub requests: Vec<IssueCoupon>,
}

impl IssueCouponPayload {
    pub fn try_new(form: IssueCouponForm, issued_at: DateTime<Utc>) -> Result<Self, FormError> {
        if form.recipients.is_empty() {
            return Err(FormError::EmptySelection);
        }
        let coupon_id = CouponId::new(form.coupon_id).map_err(|_| FormError::InvalidId)?;

        let requests = form
            .recipients
            .into_iter()
            .map(|recipient| {
                Ok(IssueCoupon {
                    login_id: LoginId::new(recipient.login_id)
                        .map_err(|_| FormError::InvalidName)?,
                    user_id: UserId::new(recipient.user_id).map_err(|_| FormError::InvalidId)?,
                    coupon_id,
                    issued_at,
                    is_used: false,
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(Self { requests })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_before_start_is_rejected() {
        let form = CouponForm {
            name: "Spring".into(),
            discount_amount: 1000,
            start_date: Some("2024-04-01".into()),
            expiry: Some("2024-03-01".into()),
            status: CouponStatus::Active,
        };
        assert!(matches!(
            CouponDraft::try_from(form),
            Err(FormError::InvalidDateRange)
        ));
    }

    #[test]
    fn issue_requires_recipients() {
        let form = IssueCouponForm {
            coupon_id: 4,
            recipients: Vec::new(),
        };
        assert!(matches!(
            IssueCouponPayload::try_new(form, Utc::now()),
            Err(FormError::EmptySelection)
        ));
    }

    #[test]
    fn issue_builds_one_request_per_member() {
        let form = IssueCouponForm {
            coupon_id: 4,
            recipients: vec![
                Recipient { user_id: 1, login_id: "kim".into() },
                Recipient { user_id: 2, login_id: "lee".into() },
            ],
        };
        let payload = IssueCouponPayload::try_new(form, Utc::now()).unwrap();
        assert_eq!(payload.requests.len(), 2);
        assert!(payload.requests.iter().all(|r| r.coupon_id.get() == 4 && !r.is_used));
    }
}
