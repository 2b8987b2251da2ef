//! Removes duplicate and ancestor-only entries from a raw path list.
//!
//! Two passes over the input:
//! 1. keep the first occurrence of every distinct path (blank entries are discarded)
//! 2. drop any path that is a strict segment ancestor of another kept path
//!
//! `"store"` disappears when `"store.name"` is selected, since joining `store`
//! is already implied. Matching is segment-aware, so `"name"` survives next to
//! `"nickname"`.

use std::collections::HashSet;

use crate::utils::field_path;

pub fn sanitize<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<&str> = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        if path.is_empty() {
            log::warn!("Discarding empty field path");
            continue;
        }
        if seen.insert(path) {
            unique.push(path);
        } else {
            log::trace!("Dropping duplicate field path '{}'", path);
        }
    }

    let implied: HashSet<&str> = unique
        .iter()
        .copied()
        .flat_map(field_path::ancestors)
        .collect();

    let sanitized: Vec<String> = unique
        .into_iter()
        .filter(|path| {
            let redundant = implied.contains(path);
            if redundant {
                log::trace!("Dropping ancestor-only field path '{}'", path);
            }
            !redundant
        })
        .map(str::to_string)
        .collect();

    log::debug!(
        "sanitize: {} input path(s) → {} kept",
        paths.len(),
        sanitized.len()
    );
    sanitized
}
