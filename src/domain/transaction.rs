use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TransactionId, UserId};
use crate::domain::{Entity, Resource};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Fulfilment state of the order behind a transaction.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Shipping,
    DeliveryCompleted,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Shipping => "Shipping",
            OrderStatus::DeliveryCompleted => "DeliveryCompleted",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionUser {
    #[serde(rename = "LoginID")]
    pub login_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderList {
    #[serde(rename = "OrderStatus", default)]
    pub order_status: OrderStatus,
}

/// Payment transaction with its order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(rename = "TransactionID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "OrderListID", default)]
    pub order_list_id: Option<i64>,
    #[serde(rename = "UserID", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "LoginID", default)]
    pub login_id: Option<String>,
    pub total_amount: i64,
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub payment_amount: Option<i64>,
    #[serde(default)]
    pub used_points: Option<i64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub user: Option<TransactionUser>,
    #[serde(default)]
    pub order_list: Option<OrderList>,
}

impl Transaction {
    /// Login of the paying member, from the row or the embedded user.
    pub fn buyer(&self) -> Option<&str> {
        self.login_id
            .as_deref()
            .or_else(|| self.user.as_ref().map(|user| user.login_id.as_str()))
    }

    pub fn order_status(&self) -> OrderStatus {
        self.order_list
            .as_ref()
            .map(|order| order.order_status)
            .unwrap_or_default()
    }
}

impl Entity for Transaction {
    type Key = TransactionId;

    const RESOURCE: Resource = Resource::new("transactions")
        .items_key("transactions")
        .total_key("totalTransactions")
        .search_path("transactions/search");

    fn key(&self) -> TransactionId {
        self.transaction_id
    }
}

/// Body of `PUT transactions/:id/orderlist/status`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}
