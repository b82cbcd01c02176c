//! Coupon definitions and coupons issued to members.

use chrono::{DateTime, Utc};

use crate::api::{Body, ListReader, RowWriter, WriteRequest};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::coupon::{Coupon, CouponDraft, IssuedCoupon};
use crate::domain::page::Page;
use crate::domain::types::CouponId;
use crate::forms::coupons::{CouponForm, IssueCouponForm, IssueCouponPayload};
use crate::forms::{SearchForm, SearchKeys};
use crate::services::{ServiceResult, search};

const ISSUE_PATH: &str = "coupons/issue";

pub async fn create_coupon<A>(
    coupons: &PagedCollectionController<Coupon, A>,
    form: CouponForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let draft = CouponDraft::try_from(form)?;
    let body = Body::json(&draft).map_err(ControllerError::from)?;
    coupons.mutate(Mutation::Create(body)).await?;
    Ok(())
}

pub async fn update_coupon<A>(
    coupons: &PagedCollectionController<Coupon, A>,
    coupon_id: i64,
    form: CouponForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = CouponId::new(coupon_id)?;
    let draft = CouponDraft::try_from(form)?;
    let body = Body::json(&draft).map_err(ControllerError::from)?;
    coupons.mutate(Mutation::Update { key, body }).await?;
    Ok(())
}

/// Flags the coupon as deleted; coupons already issued stay valid.
pub async fn delete_coupon<A>(
    coupons: &PagedCollectionController<Coupon, A>,
    coupon_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = CouponId::new(coupon_id)?;
    coupons.mutate(Mutation::Retire { key }).await?;
    Ok(())
}

pub async fn toggle_coupon_status<A>(
    coupons: &PagedCollectionController<Coupon, A>,
    coupon_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = CouponId::new(coupon_id)?;
    coupons.mutate(Mutation::ToggleStatus { key }).await?;
    Ok(())
}

/// Searches issued coupons, optionally narrowed to one coupon definition.
pub async fn search_issued_coupons<A>(
    issued: &PagedCollectionController<IssuedCoupon, A>,
    coupon_id: Option<i64>,
    form: SearchForm,
) -> ServiceResult<Page<IssuedCoupon>>
where
    A: ListReader + RowWriter,
{
    let Some(coupon_id) = coupon_id else {
        return search(issued, form, SearchKeys::ISSUED_COUPONS).await;
    };
    let coupon_id = CouponId::new(coupon_id)?;
    let criteria = form
        .into_criteria(SearchKeys::ISSUED_COUPONS)?
        .with("couponId", coupon_id.to_string());
    Ok(issued.apply_filters(criteria).await?)
}

/// Issues the coupon to every selected member, one request each.
///
/// Stops at the first rejected member; members before it keep their coupon.
pub async fn issue_coupon<A>(
    issued: &PagedCollectionController<IssuedCoupon, A>,
    form: IssueCouponForm,
    issued_at: DateTime<Utc>,
) -> ServiceResult<usize>
where
    A: ListReader + RowWriter,
{
    let payload = IssueCouponPayload::try_new(form, issued_at)?;
    let mutations = payload
        .requests
        .iter()
        .map(|request| {
            Body::json(request).map(|body| Mutation::Action(WriteRequest::post(ISSUE_PATH, body)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(ControllerError::from)?;

    let applied = issued.mutate_each(mutations).await?;
    log::info!("Issued coupon to {applied} member(s)");
    Ok(applied)
}
