//! Payment transactions and their order status.

use crate::api::{Body, ListReader, RowWriter, WriteRequest};
use crate::controller::{ControllerError, Mutation, PagedCollectionController};
use crate::domain::Entity;
use crate::domain::page::Page;
use crate::domain::transaction::{Transaction, UpdateOrderStatus};
use crate::domain::types::TransactionId;
use crate::forms::transactions::OrderStatusForm;
use crate::forms::{SearchForm, SearchKeys};
use crate::services::{ServiceResult, search};

pub async fn search_transactions<A>(
    transactions: &PagedCollectionController<Transaction, A>,
    form: SearchForm,
) -> ServiceResult<Page<Transaction>>
where
    A: ListReader + RowWriter,
{
    search(transactions, form, SearchKeys::TRANSACTIONS).await
}

/// Moves the order behind a transaction to a new fulfilment state.
pub async fn update_order_status<A>(
    transactions: &PagedCollectionController<Transaction, A>,
    transaction_id: i64,
    form: OrderStatusForm,
) -> ServiceResult<()>
where
    A: ListReader + RowWriter,
{
    let key = TransactionId::new(transaction_id)?;
    let payload = UpdateOrderStatus::from(form);
    log::info!(
        "Setting order of transaction {key} to {}",
        payload.status.as_str()
    );

    let body = Body::json(&payload).map_err(ControllerError::from)?;
    let path = format!("{}/orderlist/status", Transaction::RESOURCE.row_path(&key));
    transactions
        .mutate(Mutation::Action(WriteRequest::put(path, body)))
        .await?;
    Ok(())
}
