//! Display formatting helpers.

pub mod phone;
