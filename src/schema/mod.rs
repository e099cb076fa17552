//! Schema inference module
//!
//! Derives a relational schema from GeoJSON feature properties.
//!
//! # Rules
//!
//! - **Single sample**: only the first feature is inspected
//! - **Scalar typing**: string → VARCHAR, integral number → BIGINT,
//!   other number → DOUBLE, boolean → BOOLEAN, anything else → VARCHAR
//! - **Geometry last**: one GEOMETRY column is always appended
//! - **Frozen**: the schema is fixed once the table exists; later loads
//!   never re-infer or widen it

mod inference;
mod types;

pub use inference::{infer_schema, infer_type, SchemaBuilder};
pub use types::Schema;
