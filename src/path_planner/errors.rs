use thiserror::Error;

use crate::entity_catalog::errors::CatalogError;

/// Errors surfaced by [`super::PathMapper::map_graph`].
///
/// Planning itself never fails; the only failure point is resolving the root
/// entity through the metadata provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("Could not resolve root entity: {0}")]
    RootEntity(#[from] CatalogError),
}
