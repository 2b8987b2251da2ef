//! Entity metadata consumed by query builders.
//!
//! The planner never inspects metadata itself: it asks an
//! [`EntityMetadataProvider`] for the root entity and hands the result to the
//! query builder. [`EntityCatalog`] is the YAML-backed provider.

pub mod config;
pub mod errors;

use serde::{Deserialize, Serialize};

pub use config::EntityCatalog;
pub use errors::CatalogError;

/// Names the root entity of a query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for EntityDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A traversable relation from one entity to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMetadata {
    /// Property name used in field paths
    pub name: String,
    /// Target entity name
    pub target: String,
    /// Column on the owning entity's table
    pub local_column: String,
    /// Column on the target entity's table
    pub foreign_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub name: String,
    pub table: String,
    #[serde(default)]
    pub relations: Vec<RelationMetadata>,
}

impl EntityMetadata {
    pub fn relation(&self, name: &str) -> Option<&RelationMetadata> {
        self.relations.iter().find(|r| r.name == name)
    }
}

/// Resolves an entity descriptor to the metadata a query builder needs
#[cfg_attr(test, mockall::automock)]
pub trait EntityMetadataProvider {
    fn resolve(&self, entity: &EntityDescriptor) -> Result<EntityMetadata, CatalogError>;
}
