//! Rewrites sanitized field paths into the select list.
//!
//! Each path is rewritten against the relation map: the deepest bound
//! segment ancestor is replaced by its alias (`store.location.city` →
//! `r2.city`). A path left without a separator is a root scalar and is
//! qualified with the root alias (`id` → `product.id`).

use super::UniqueRelationMap;
use crate::utils::field_path;

/// One output column per input path, in input order.
pub fn build_projection<S: AsRef<str>>(
    paths: &[S],
    urm: &UniqueRelationMap,
    root_alias: &str,
) -> Vec<String> {
    let projection: Vec<String> = paths
        .iter()
        .map(|path| {
            let rewritten = rewrite_path(path.as_ref(), urm);
            if field_path::is_root_level(&rewritten) {
                field_path::join(root_alias, &rewritten)
            } else {
                rewritten
            }
        })
        .collect();

    log::debug!("build_projection: {:?}", projection);
    projection
}

fn rewrite_path(path: &str, urm: &UniqueRelationMap) -> String {
    field_path::ancestors(path)
        .into_iter()
        .rev()
        .find_map(|ancestor| {
            urm.alias_of(ancestor)
                .map(|alias| format!("{}{}", alias, &path[ancestor.len()..]))
        })
        .unwrap_or_else(|| path.to_string())
}
