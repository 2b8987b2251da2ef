//! SQL adapter for the [`QueryBuilder`] capability.
//!
//! Records the joins and projection the planner declares, then renders a
//! `SELECT` statement using the entity catalog to turn `owner.relation` join
//! targets into tables and join conditions. Relation names are only checked
//! here, at render time: a plan referencing a relation the catalog does not
//! know fails in [`SqlSelectBuilder::to_sql`], not during planning. Aliases
//! are matched ignoring ASCII case, the way the database resolves them.

use std::collections::HashMap;

use super::errors::QueryBuildError;
use super::QueryBuilder;
use crate::entity_catalog::{CatalogError, EntityCatalog, EntityMetadata};
use crate::path_planner::JoinInstruction;
use crate::utils::field_path;

#[derive(Debug, Clone)]
pub struct SqlSelectBuilder<'a> {
    catalog: &'a EntityCatalog,
    root_alias: String,
    root: Option<EntityMetadata>,
    joins: Vec<JoinInstruction>,
    selection: Vec<String>,
}

impl<'a> SqlSelectBuilder<'a> {
    pub fn new(catalog: &'a EntityCatalog, root_alias: impl Into<String>) -> Self {
        Self {
            catalog,
            root_alias: root_alias.into(),
            root: None,
            joins: Vec::new(),
            selection: Vec::new(),
        }
    }

    pub fn root_entity(&self) -> Option<&EntityMetadata> {
        self.root.as_ref()
    }

    pub fn joins(&self) -> &[JoinInstruction] {
        &self.joins
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Render the recorded query
    pub fn to_sql(&self) -> Result<String, QueryBuildError> {
        let root = self.root.as_ref().ok_or(QueryBuildError::MissingRootEntity)?;
        if self.selection.is_empty() {
            return Err(QueryBuildError::EmptyProjection);
        }

        // lowercased alias → entity it stands for
        let mut scope: HashMap<String, &EntityMetadata> = HashMap::new();
        scope.insert(self.root_alias.to_ascii_lowercase(), root);

        let mut join_clauses = Vec::with_capacity(self.joins.len());
        for join in &self.joins {
            let (owner_alias, relation_name) = join
                .target_path
                .rsplit_once(field_path::PATH_SEPARATOR)
                .ok_or_else(|| QueryBuildError::MalformedJoinTarget(join.target_path.clone()))?;

            let owner = scope
                .get(&owner_alias.to_ascii_lowercase())
                .copied()
                .ok_or_else(|| QueryBuildError::UnknownAlias {
                    alias: owner_alias.to_string(),
                    reference: join.target_path.clone(),
                })?;
            let relation = owner.relation(relation_name).ok_or_else(|| {
                CatalogError::UnknownRelation {
                    entity: owner.name.clone(),
                    relation: relation_name.to_string(),
                }
            })?;
            let target = self.catalog.entity(&relation.target)?;

            if scope
                .insert(join.binding_alias.to_ascii_lowercase(), target)
                .is_some()
            {
                return Err(QueryBuildError::DuplicateAlias(join.binding_alias.clone()));
            }

            join_clauses.push(format!(
                "LEFT JOIN {} AS {} ON {}.{} = {}.{}",
                target.table,
                join.binding_alias,
                owner_alias,
                relation.local_column,
                join.binding_alias,
                relation.foreign_column
            ));
        }

        for column in &self.selection {
            let (qualifier, name) = column
                .split_once(field_path::PATH_SEPARATOR)
                .ok_or_else(|| QueryBuildError::MalformedColumn(column.clone()))?;
            if !scope.contains_key(&qualifier.to_ascii_lowercase()) {
                return Err(QueryBuildError::UnknownAlias {
                    alias: qualifier.to_string(),
                    reference: column.clone(),
                });
            }
            if name.is_empty() || name.contains(field_path::PATH_SEPARATOR) {
                return Err(QueryBuildError::MalformedColumn(column.clone()));
            }
        }

        let mut sql = format!(
            "SELECT {}\nFROM {} AS {}",
            self.selection.join(", "),
            root.table,
            self.root_alias
        );
        for clause in join_clauses {
            sql.push('\n');
            sql.push_str(&clause);
        }

        log::debug!("Rendered SQL:\n{}", sql);
        Ok(sql)
    }
}

impl QueryBuilder for SqlSelectBuilder<'_> {
    fn root_alias(&self) -> &str {
        &self.root_alias
    }

    fn use_entity(&mut self, metadata: &EntityMetadata) {
        self.root = Some(metadata.clone());
    }

    fn left_join_and_select(&mut self, target_path: &str, binding_alias: &str) {
        self.joins.push(JoinInstruction {
            target_path: target_path.to_string(),
            binding_alias: binding_alias.to_string(),
        });
    }

    fn select(&mut self, columns: Vec<String>) {
        self.selection = columns;
    }
}
