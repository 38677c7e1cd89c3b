//! Order placement workflow

pub mod placement;
pub mod whatsapp;
