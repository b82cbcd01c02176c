use serde::Serialize;

use crate::domain::types::PageNumber;
use crate::pagination::display_rank;

/// One fetched window of rows plus pagination metadata.
///
/// Rows keep the order the server returned them in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: PageNumber,
    pub page_size: usize,
    pub total_items: u64,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_number: PageNumber, page_size: usize, total_items: u64) -> Self {
        Self {
            items,
            page_number,
            page_size,
            total_items,
            total_pages: total_pages(total_items, page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows paired with their descending display rank.
    pub fn ranked(&self) -> impl Iterator<Item = (i64, &T)> {
        self.items.iter().enumerate().map(|(index, item)| {
            (
                display_rank(self.total_items, self.page_number, self.page_size, index),
                item,
            )
        })
    }
}

/// `ceil(total_items / page_size)`; zero page size yields zero pages.
pub fn total_pages(total_items: u64, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    usize::try_from(total_items.div_ceil(page_size as u64)).unwrap_or(usize::MAX)
}
