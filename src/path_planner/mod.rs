//! Path planning: dotted field paths → aliased joins and projection.
//!
//! Pipeline:
//! 1. [`sanitizer::sanitize`] drops duplicate and ancestor-only paths
//! 2. [`relation_extractor::extract_relations`] collects relation hops
//! 3. [`alias_resolver::AliasResolver`] binds each hop to a unique alias
//! 4. [`join_builder::build_joins`] and [`projection_builder::build_projection`]
//!    emit the join list and select list
//!
//! [`PathMapper::map_graph`] runs the pipeline against a [`QueryBuilder`].

pub mod alias_resolver;
pub mod errors;
pub mod join_builder;
pub mod projection_builder;
pub mod relation_extractor;
pub mod sanitizer;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::{ConfigError, PlannerConfig};
use crate::entity_catalog::{EntityDescriptor, EntityMetadataProvider};
use crate::query_builder::QueryBuilder;
use crate::utils::alias_naming::AliasPool;

pub use alias_resolver::AliasResolver;
pub use errors::PlanError;
pub use join_builder::{build_joins, JoinInstruction};
pub use projection_builder::build_projection;
pub use relation_extractor::extract_relations;
pub use sanitizer::sanitize;

/// Alias and join target for one relation hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationBinding {
    /// Root-relative relation path, e.g. `store.location`
    pub target_relation: String,
    /// Token standing in for the relation in joins and projection
    pub unique_alias: String,
    /// `target_relation` with its parent replaced by the parent's alias, e.g. `r1.location`
    pub aliased_target_relation: String,
}

/// Relation path → binding, in first-discovery order.
///
/// Built fresh for every planning run. Callers get it back from
/// [`PathMapper::map_graph`] to see which alias stands for which hop.
/// Every key equals its binding's `target_relation`; [`insert`](Self::insert)
/// is the only way in, so the map serializes but never deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UniqueRelationMap {
    bindings: IndexMap<String, RelationBinding>,
}

impl UniqueRelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, relation: &str) -> Option<&RelationBinding> {
        self.bindings.get(relation)
    }

    pub fn contains(&self, relation: &str) -> bool {
        self.bindings.contains_key(relation)
    }

    /// Alias bound to a relation path
    pub fn alias_of(&self, relation: &str) -> Option<&str> {
        self.bindings.get(relation).map(|b| b.unique_alias.as_str())
    }

    /// Insert keyed by the binding's own target relation. An existing key keeps its position.
    pub fn insert(&mut self, binding: RelationBinding) {
        self.bindings.insert(binding.target_relation.clone(), binding);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationBinding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn bindings(&self) -> impl Iterator<Item = &RelationBinding> {
        self.bindings.values()
    }

    /// Pretty JSON for diagnostics
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Everything one planning run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphPlan {
    pub root_alias: String,
    pub sanitized_paths: Vec<String>,
    pub relations: UniqueRelationMap,
    pub joins: Vec<JoinInstruction>,
    pub projection: Vec<String>,
}

/// Runs the planning pipeline with a fixed configuration.
///
/// Holds no per-run state, so one mapper can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct PathMapper {
    config: PlannerConfig,
}

impl PathMapper {
    /// Build a mapper, rejecting configurations that fail validation
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(PlannerConfig::from_env()?)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run the pure pipeline without touching a query builder
    pub fn plan<S: AsRef<str>>(&self, paths: &[S], root_alias: &str) -> GraphPlan {
        let sanitized_paths = sanitize(paths);
        let relation_paths = extract_relations(&sanitized_paths);

        let mut pool = AliasPool::from_config(&self.config);
        pool.reserve(root_alias);
        let relations = AliasResolver::new(pool)
            .with_synthesized_ancestors(self.config.synthesize_ancestors)
            .resolve(&relation_paths);

        let joins = build_joins(&relations, root_alias);
        let projection = build_projection(&sanitized_paths, &relations, root_alias);

        GraphPlan {
            root_alias: root_alias.to_string(),
            sanitized_paths,
            relations,
            joins,
            projection,
        }
    }

    /// Plan `paths` and apply the result to `query_builder`.
    ///
    /// The root entity is resolved through `provider` and handed to the
    /// builder first. Joins are declared in relation order, then the
    /// projection replaces whatever the builder selected before.
    pub fn map_graph<S, Q, P>(
        &self,
        paths: &[S],
        query_builder: &mut Q,
        entity: &EntityDescriptor,
        provider: &P,
    ) -> Result<UniqueRelationMap, PlanError>
    where
        S: AsRef<str>,
        Q: QueryBuilder + ?Sized,
        P: EntityMetadataProvider + ?Sized,
    {
        let metadata = provider.resolve(entity)?;
        query_builder.use_entity(&metadata);

        let root_alias = query_builder.root_alias().to_string();
        log::debug!(
            "map_graph: entity '{}' (table {}) as '{}', {} path(s)",
            metadata.name,
            metadata.table,
            root_alias,
            paths.len()
        );

        let plan = self.plan(paths, &root_alias);
        for join in &plan.joins {
            query_builder.left_join_and_select(&join.target_path, &join.binding_alias);
        }
        query_builder.select(plan.projection);

        Ok(plan.relations)
    }
}

/// [`PathMapper::map_graph`] with the default configuration
pub fn map_graph<S, Q, P>(
    paths: &[S],
    query_builder: &mut Q,
    entity: &EntityDescriptor,
    provider: &P,
) -> Result<UniqueRelationMap, PlanError>
where
    S: AsRef<str>,
    Q: QueryBuilder + ?Sized,
    P: EntityMetadataProvider + ?Sized,
{
    PathMapper::default().map_graph(paths, query_builder, entity, provider)
}
