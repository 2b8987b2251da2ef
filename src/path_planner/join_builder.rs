use serde::{Deserialize, Serialize};

use super::UniqueRelationMap;
use crate::utils::field_path;

/// One `LEFT JOIN` to declare on the query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinInstruction {
    /// `owner.relation` where owner is the root alias or a parent's alias
    pub target_path: String,
    pub binding_alias: String,
}

/// Build join instructions in relation map order.
///
/// Root-level relations join off the root alias; nested relations join off
/// their aliased target. Whether the named relation exists is left to the
/// query builder.
pub fn build_joins(urm: &UniqueRelationMap, root_alias: &str) -> Vec<JoinInstruction> {
    let joins: Vec<JoinInstruction> = urm
        .iter()
        .map(|(relation, binding)| {
            let target_path = if field_path::is_root_level(relation) {
                field_path::join(root_alias, &binding.target_relation)
            } else {
                binding.aliased_target_relation.clone()
            };
            JoinInstruction {
                target_path,
                binding_alias: binding.unique_alias.clone(),
            }
        })
        .collect();

    log::debug!("build_joins: {} join(s) off root alias '{}'", joins.len(), root_alias);
    joins
}
