use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::errors::CatalogError;
use super::{EntityDescriptor, EntityMetadata, EntityMetadataProvider};

/// Entity catalogs are defined in YAML with the following structure:
///
/// ```yaml
/// entities:
///   - name: Product            # Entity name used in descriptors
///     table: products          # Backing table
///     relations:
///       - name: store          # Property name used in field paths
///         target: Store        # Target entity
///         local_column: store_id
///         foreign_column: id
///   - name: Store
///     table: stores
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub entities: Vec<EntityMetadata>,
}

/// Validated entity metadata keyed by entity name
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: IndexMap<String, EntityMetadata>,
}

impl EntityCatalog {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::ConfigReadError {
            error: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let definition: CatalogDefinition =
            serde_yaml::from_str(content).map_err(|e| CatalogError::ConfigParseError {
                error: e.to_string(),
            })?;
        Self::from_definition(definition)
    }

    pub fn from_definition(definition: CatalogDefinition) -> Result<Self, CatalogError> {
        let mut entities = IndexMap::new();
        for entity in definition.entities {
            if entity.name.is_empty() || entity.table.is_empty() {
                return Err(CatalogError::InvalidDefinition {
                    reason: format!("entity `{}` needs a name and a table", entity.name),
                });
            }
            if entities.contains_key(&entity.name) {
                return Err(CatalogError::DuplicateEntity { name: entity.name });
            }
            entities.insert(entity.name.clone(), entity);
        }

        let catalog = Self { entities };
        catalog.validate_relations()?;
        log::debug!("Loaded entity catalog with {} entities", catalog.len());
        Ok(catalog)
    }

    fn validate_relations(&self) -> Result<(), CatalogError> {
        for entity in self.entities.values() {
            let mut names = HashSet::new();
            for relation in &entity.relations {
                if relation.name.is_empty() || relation.name.contains('.') {
                    return Err(CatalogError::InvalidDefinition {
                        reason: format!(
                            "relation `{}` on `{}` must be a single non-empty segment",
                            relation.name, entity.name
                        ),
                    });
                }
                if !names.insert(relation.name.as_str()) {
                    return Err(CatalogError::DuplicateRelation {
                        entity: entity.name.clone(),
                        relation: relation.name.clone(),
                    });
                }
                if !self.entities.contains_key(&relation.target) {
                    return Err(CatalogError::InvalidRelationTarget {
                        entity: entity.name.clone(),
                        relation: relation.name.clone(),
                        target: relation.target.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn entity(&self, name: &str) -> Result<&EntityMetadata, CatalogError> {
        self.entities
            .get(name)
            .ok_or_else(|| CatalogError::UnknownEntity {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

impl EntityMetadataProvider for EntityCatalog {
    fn resolve(&self, entity: &EntityDescriptor) -> Result<EntityMetadata, CatalogError> {
        self.entity(&entity.name).cloned()
    }
}
