//! Alias resolution for relation hops
//!
//! Assigns every relation path a unique alias token and rewrites nested
//! relations so they hang off their parent's alias rather than the full dotted
//! path. For `["store", "store.location"]`:
//!
//! | relation         | alias | aliased target |
//! |------------------|-------|----------------|
//! | `store`          | `r1`  | `store`        |
//! | `store.location` | `r2`  | `r1.location`  |
//!
//! Parents are looked up only among relations bound earlier in the run. When a
//! nested relation's parent is not bound, its aliased target stays the plain
//! dotted path. With `synthesize_ancestors` enabled the missing ancestors are
//! bound first instead, so chaining holds at every depth.

use super::{RelationBinding, UniqueRelationMap};
use crate::utils::alias_naming::AliasPool;
use crate::utils::field_path;

pub struct AliasResolver {
    pool: AliasPool,
    synthesize_ancestors: bool,
}

impl AliasResolver {
    pub fn new(pool: AliasPool) -> Self {
        Self {
            pool,
            synthesize_ancestors: false,
        }
    }

    pub fn with_synthesized_ancestors(mut self, enabled: bool) -> Self {
        self.synthesize_ancestors = enabled;
        self
    }

    /// Bind every relation path in discovery order
    pub fn resolve<S: AsRef<str>>(mut self, relations: &[S]) -> UniqueRelationMap {
        let mut map = UniqueRelationMap::new();
        for relation in relations {
            self.bind(&mut map, relation.as_ref());
        }
        log::debug!("resolve: bound {} relation(s)", map.len());
        map
    }

    fn bind(&mut self, map: &mut UniqueRelationMap, relation: &str) {
        if self.synthesize_ancestors {
            for ancestor in field_path::ancestors(relation) {
                if !map.contains(ancestor) {
                    log::debug!("Synthesizing binding for unreferenced ancestor '{}'", ancestor);
                    self.bind_one(map, ancestor);
                }
            }
        }
        self.bind_one(map, relation);
    }

    /// Bind a single relation; its parent is only looked up, never bound here
    fn bind_one(&mut self, map: &mut UniqueRelationMap, relation: &str) {
        if map.contains(relation) {
            return;
        }

        let aliased_target_relation = match field_path::parent(relation) {
            None => relation.to_string(),
            Some(parent) => match map.alias_of(parent) {
                Some(parent_alias) => field_path::join(parent_alias, field_path::leaf(relation)),
                None => {
                    log::warn!(
                        "Parent relation '{}' of '{}' is not bound; joining on the unaliased path",
                        parent,
                        relation
                    );
                    relation.to_string()
                }
            },
        };

        let binding = RelationBinding {
            target_relation: relation.to_string(),
            unique_alias: self.pool.issue(),
            aliased_target_relation,
        };
        log::trace!(
            "  {} → {} (join target {})",
            binding.target_relation,
            binding.unique_alias,
            binding.aliased_target_relation
        );
        map.insert(binding);
    }
}
