//! Domain models for the Fertilizer Manager

mod analytics;
mod customer;
mod sale;
mod stock;

pub use analytics::*;
pub use customer::*;
pub use sale::*;
pub use stock::*;
