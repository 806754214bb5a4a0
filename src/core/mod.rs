//! Core types shared across the crate: attribute keys, errors, RNG.

pub mod attribute;
pub mod error;
pub mod rng;

pub use attribute::AttributeKey;
pub use error::{Error, Result};
pub use rng::TableRng;
