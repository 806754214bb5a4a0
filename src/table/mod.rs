//! Attribute tables: the selector's input rows.
//!
//! ## Key Types
//!
//! - `AttributeRow`: identifier plus boolean attribute flags
//! - `AttributeTable`: ordered, id-unique rows (order = selection order)
//!
//! Tables are built by the fetch layer or loaded from TSV/JSON files via
//! the `io` helpers.

pub mod io;
pub mod ordered;
pub mod row;

pub use ordered::AttributeTable;
pub use row::AttributeRow;
