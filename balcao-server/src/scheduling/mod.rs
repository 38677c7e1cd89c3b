//! Pickup windows and the operating-day calendar

pub mod resolver;
pub mod slots;
