//! Merchant admin handlers

pub mod cep_ranges;
pub mod orders;
pub mod pickup_slots;
pub mod schedule;
