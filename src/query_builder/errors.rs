use thiserror::Error;

use crate::entity_catalog::errors::CatalogError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryBuildError {
    #[error("No root entity bound to the query.")]
    MissingRootEntity,

    #[error("No Select items.")]
    EmptyProjection,

    #[error("Join target '{0}' is not of the form owner.relation")]
    MalformedJoinTarget(String),

    #[error("Column reference '{0}' is not of the form alias.column")]
    MalformedColumn(String),

    #[error("Unknown table alias '{alias}' in '{reference}'")]
    UnknownAlias { alias: String, reference: String },

    #[error("Table alias '{0}' is bound more than once")]
    DuplicateAlias(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
