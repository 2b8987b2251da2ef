//! # Entity Catalog Error Types
//!
//! Errors raised while loading the YAML entity catalog and while resolving
//! entity metadata for the planner and the SQL adapter.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("No entity named `{name}` in the catalog")]
    UnknownEntity { name: String },
    #[error("Entity `{entity}` has no relation named `{relation}`")]
    UnknownRelation { entity: String, relation: String },
    #[error("Entity `{name}` is defined more than once")]
    DuplicateEntity { name: String },
    #[error("Entity `{entity}` defines relation `{relation}` more than once")]
    DuplicateRelation { entity: String, relation: String },
    #[error("Relation `{entity}.{relation}` targets unknown entity `{target}`")]
    InvalidRelationTarget {
        entity: String,
        relation: String,
        target: String,
    },
    #[error("Invalid catalog definition: {reason}")]
    InvalidDefinition { reason: String },
    #[error("Failed to read catalog file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse catalog: {error}")]
    ConfigParseError { error: String },
}
