//! Catalogue administration.

use crate::api::{Body, ListReader, MultipartBody, RowWriter, WriteRequest};
use crate::controller::{Mutation, PagedCollectionController};
use crate::domain::Entity;
use crate::domain::asset::Upload;
use crate::domain::page::Page;
use crate::domain::product::{Product, ProductDraft};
use crate::domain::types::ProductId;
use crate::forms::products::ProductForm;
use crate::forms::{SearchForm, SearchKeys};
use crate::services::{ServiceResult, search};

const THUMBNAIL_FIELD: &str = "thumbnail";

pub async fn search_products<A>(
    products: &PagedCollectionController<Product, A>,
    form: SearchForm,
) -> ServiceResult<Page<Product>>
where
    A: ListReader + RowWriter,
{
    search(products, form, SearchKeys::DEFAULT).await
}

fn multipart(form: ProductForm, thumbnail: Option<Upload>) -> ServiceResult<Body> {
    let draft = ProductDraft::try_from(form)?;
    let body = MultipartBody::new(draft.into_fields()).file(THUMBNAIL_FIELD, thumbnail);
    Ok(Body::Multipart(body))
}

/// Creates a product; the thumbnail is optional.
pub async fn create_product<A>(
    products: &PagedCollectionController<Product, A>,
    form: ProductForm,
    thumbnail: Option<Upload>,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let body = multipart(form, thumbnail)?;
    products.mutate(Mutation::Create(body)).await?;
    Ok(())
}

/// Saves product fields; a new thumbnail replaces the stored one.
pub async fn update_product<A>(
    products: &PagedCollectionController<Product, A>,
    product_id: i64,
    form: ProductForm,
    thumbnail: Option<Upload>,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ProductId::new(product_id)?;
    let body = multipart(form, thumbnail)?;
    products.mutate(Mutation::Update { key, body }).await?;
    Ok(())
}

pub async fn toggle_product_status<A>(
    products: &PagedCollectionController<Product, A>,
    product_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ProductId::new(product_id)?;
    products.mutate(Mutation::ToggleStatus { key }).await?;
    Ok(())
}

/// Flags the product as deleted.
pub async fn delete_product<A>(
    products: &PagedCollectionController<Product, A>,
    product_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ProductId::new(product_id)?;
    products.mutate(Mutation::Retire { key }).await?;
    Ok(())
}

/// Drops the product's thumbnail.
pub async fn remove_product_image<A>(
    products: &PagedCollectionController<Product, A>,
    product_id: i64,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = ProductId::new(product_id)?;
    let path = format!("{}/remove-image", Product::RESOURCE.row_path(&key));
    products
        .mutate(Mutation::Action(WriteRequest::put(path, Body::Empty)))
        .await?;
    Ok(())
}
