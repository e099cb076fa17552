//! GeoJSON source documents
//!
//! Minimal serde model of a FeatureCollection: an ordered list of features,
//! each with an opaque geometry and a flat property mapping.

mod parser;
mod types;

pub use parser::{parse_feature_collection, read_feature_collection};
pub use types::{Feature, FeatureCollection, FEATURE_COLLECTION};
