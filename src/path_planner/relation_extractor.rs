//! Derives the relation hops implied by a list of field paths.

use indexmap::IndexSet;

use crate::utils::field_path;

/// Distinct relation paths (every path minus its final segment), in first-seen order.
/// Root-level scalars contribute nothing.
pub fn extract_relations<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let relations: IndexSet<&str> = paths
        .iter()
        .filter_map(|path| field_path::parent(path.as_ref()))
        .collect();

    log::debug!(
        "extract_relations: {} relation path(s) from {} field path(s)",
        relations.len(),
        paths.len()
    );
    relations.into_iter().map(str::to_string).collect()
}
