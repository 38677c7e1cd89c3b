//! Canonical domain models
//!
//! One model per entity; every tenant-owned entity carries a `store_id`.
//! `sqlx::FromRow` derives are gated behind the `db` feature so clients can
//! use these types without pulling in the database stack.

pub mod cep_range;
pub mod customer;
pub mod order;
pub mod pickup_slot;
pub mod product;
pub mod schedule;
pub mod store;

pub use cep_range::*;
pub use customer::*;
pub use order::*;
pub use pickup_slot::*;
pub use product::*;
pub use schedule::*;
pub use store::*;
