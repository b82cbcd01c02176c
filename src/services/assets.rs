//! Site design assets: logo, favicon and storefront banners.
//!
//! These endpoints hold one file per slot, so there is no list to reload.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::errors::ApiError;
use crate::api::{Body, ListReader, MultipartBody, RowWriter, WriteRequest};
use crate::domain::asset::{
    AssetCategory, BANNER_CATEGORY, BannerLocation, BannerSlot, FileLocation, Upload,
};
use crate::domain::types::FileUrl;
use crate::services::ServiceResult;

const FILE_FIELD: &str = "file";

/// Decodes a location response; an empty body means no file.
fn decode<T: DeserializeOwned>(body: Value) -> ServiceResult<T> {
    let body = if body.is_null() { json!({}) } else { body };
    Ok(serde_json::from_value(body).map_err(ApiError::from)?)
}

fn file_url(raw: Option<String>) -> ServiceResult<Option<FileUrl>> {
    match raw.filter(|url| !url.trim().is_empty()) {
        Some(url) => Ok(Some(FileUrl::new(url)?)),
        None => Ok(None),
    }
}

/// URL of the stored logo or favicon, if one was uploaded.
pub async fn get_asset_url<A>(api: &A, category: AssetCategory) -> ServiceResult<Option<FileUrl>>
where
    A: ListReader + ?Sized,
{
    match api.fetch_value(&format!("files/{category}"), &[]).await {
        Ok(body) => file_url(decode::<FileLocation>(body)?.file_url),
        Err(ApiError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replaces the logo or favicon and returns its new URL.
pub async fn upload_asset<A>(
    api: &A,
    category: AssetCategory,
    file: Upload,
) -> ServiceResult<Option<FileUrl>>
where
    A: RowWriter + ?Sized,
{
    let body = MultipartBody::default()
        .text("category", category.as_str())
        .file(FILE_FIELD, Some(file));
    let request = WriteRequest::post(format!("upload/{category}"), Body::Multipart(body));
    let response = api.send(&request).await?;
    log::info!("Uploaded new {category}");
    file_url(decode::<FileLocation>(response)?.file_url)
}

pub async fn delete_asset<A>(api: &A, category: AssetCategory) -> ServiceResult<()>
where
    A: RowWriter + ?Sized,
{
    api.send(&WriteRequest::delete(format!("files/{category}")))
        .await?;
    log::info!("Deleted {category}");
    Ok(())
}

/// URL of the banner in `slot`; empty slots yield `None`.
pub async fn get_banner<A>(api: &A, slot: BannerSlot) -> ServiceResult<Option<FileUrl>>
where
    A: ListReader + ?Sized,
{
    let query = [
        ("category".to_string(), BANNER_CATEGORY.to_string()),
        ("index".to_string(), slot.to_string()),
    ];
    match api.fetch_value("getBanners", &query).await {
        Ok(body) => file_url(decode::<BannerLocation>(body)?.banner),
        Err(ApiError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn upload_banner<A>(api: &A, slot: BannerSlot, file: Upload) -> ServiceResult<()>
where
    A: RowWriter + ?Sized,
{
    let body = MultipartBody::default()
        .text("category", BANNER_CATEGORY)
        .text("index", slot.to_string())
        .file(FILE_FIELD, Some(file));
    api.send(&WriteRequest::post("upload", Body::Multipart(body)))
        .await?;
    log::info!("Uploaded banner {}", slot.get() + 1);
    Ok(())
}
