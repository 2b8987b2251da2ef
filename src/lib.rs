//! relgraph - Relation path planning for relational query builders
//!
//! This crate turns a list of dotted property-selection paths into the joins
//! and projection a query builder needs:
//! - Path sanitization (duplicates and ancestor-only entries removed)
//! - Relation hop extraction and per-hop alias binding
//! - Join and select-list generation
//! - A SQL adapter backed by a YAML entity catalog
//!
//! ```
//! use relgraph::path_planner::PathMapper;
//!
//! let plan = PathMapper::default().plan(&["id", "store.name", "store.location.city"], "product");
//! assert_eq!(plan.projection, vec!["product.id", "r1.name", "r2.city"]);
//! assert_eq!(plan.joins[1].target_path, "r1.location");
//! ```

pub mod utils;

pub mod config;
pub mod entity_catalog;
pub mod path_planner;
pub mod query_builder;

pub use config::{AliasStrategy, PlannerConfig};
pub use entity_catalog::{EntityCatalog, EntityDescriptor, EntityMetadataProvider};
pub use path_planner::{map_graph, GraphPlan, PathMapper, RelationBinding, UniqueRelationMap};
pub use query_builder::{QueryBuilder, SqlSelectBuilder};
