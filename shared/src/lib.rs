//! Shared domain types for the Balcão platform
//!
//! Holds everything both the server and future clients agree on:
//! - [`error`] - unified error codes, `AppError`, `ApiResponse`
//! - [`models`] - canonical entities (store, customer, product, order, ...)
//! - [`util`] - timestamp and snowflake ID helpers

pub mod error;
pub mod models;
pub mod util;
