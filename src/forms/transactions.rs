use serde::Deserialize;

use crate::domain::transaction::{OrderStatus, UpdateOrderStatus};

#[derive(Debug, Deserialize)]
/// Order status picker of the payment detail modal.
pub struct OrderStatusForm {
    pub status: OrderStatus,
}

impl From<OrderStatusForm> for UpdateOrderStatus {
    fn from(form: OrderStatusForm) -> Self {
        UpdateOrderStatus {
            status: form.status,
        }
    }
}
