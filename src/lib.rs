//! Back-office client for the shop admin REST API.
//!
//! Every admin table (members, products, coupons, points, notices,
//! transactions, questions, inquiries, reviews) is driven by one
//! [`controller::PagedCollectionController`]; `services` layers validated
//! workflows for each table on top of it.

pub mod api;
pub mod controller;
pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod services;

/// Rows per page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of page links in the pager.
pub const DEFAULT_PAGE_WINDOW: usize = 5;
