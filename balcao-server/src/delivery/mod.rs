//! Delivery eligibility by CEP range

pub mod cep;
