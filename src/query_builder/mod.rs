//! Query builder capability consumed by the planner.
//!
//! The planner only needs three things from a query engine: the alias of the
//! root entity, a way to declare a join, and a way to replace the select list.
//! Engines plug in through a thin adapter implementing [`QueryBuilder`];
//! [`sql_builder::SqlSelectBuilder`] is the bundled one.

pub mod errors;
pub mod sql_builder;

use crate::entity_catalog::EntityMetadata;

pub use errors::QueryBuildError;
pub use sql_builder::SqlSelectBuilder;

#[cfg_attr(test, mockall::automock)]
pub trait QueryBuilder {
    /// Alias of the root entity in the query
    fn root_alias(&self) -> &str;

    /// Bind the root entity the query selects from
    fn use_entity(&mut self, metadata: &EntityMetadata);

    /// Declare a join on `target_path` (`owner_alias.relation`) bound to `binding_alias`.
    /// Repeated aliases are the implementation's concern.
    fn left_join_and_select(&mut self, target_path: &str, binding_alias: &str);

    /// Replace the current projection
    fn select(&mut self, columns: Vec<String>);
}
