//! Core type definitions for gridkit.
//!
//! This crate defines the fundamental, rendering-agnostic types used
//! throughout the grid engine:
//! - Row identifiers ([`RowId`]) and the opaque [`Row`] record
//! - The closed set of column [`FieldType`]s
//! - Type-aware cell coercion ([`TypedValue`]) shared by filtering,
//!   sorting and validation
//!
//! Column schemas, query state and edit sessions live in their own crates.

mod field_type;
mod ids;
pub mod value;

pub use field_type::FieldType;
pub use ids::RowId;
pub use value::{Row, TypedValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid row id: {0}")]
    InvalidRowId(String),
}
