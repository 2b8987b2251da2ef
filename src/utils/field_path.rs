//! Segment-level helpers for dotted field paths.
//!
//! A field path such as `"store.location.city"` is an ordered sequence of
//! segments relative to an implicit root entity. Every comparison in the
//! planner goes through these helpers so that matching is done on whole
//! segments, never on raw substrings: `"name"` is not an ancestor of
//! `"nickname"`, and `"store"` is not an ancestor of `"storefront.id"`.
//!
//! Examples:
//! - `parent("store.location.city")` → `Some("store.location")`
//! - `leaf("store.location.city")` → `"city"`
//! - `ancestors("store.location.city")` → `["store", "store.location"]`

pub const PATH_SEPARATOR: char = '.';

/// The relation path owning the final segment, if any.
///
/// ```
/// use relgraph::utils::field_path::parent;
///
/// assert_eq!(parent("store.location.city"), Some("store.location"));
/// assert_eq!(parent("store.name"), Some("store"));
/// assert_eq!(parent("id"), None);
/// ```
pub fn parent(path: &str) -> Option<&str> {
    path.rsplit_once(PATH_SEPARATOR).map(|(parent, _)| parent)
}

/// The final segment of a path.
///
/// ```
/// use relgraph::utils::field_path::leaf;
///
/// assert_eq!(leaf("store.location.city"), "city");
/// assert_eq!(leaf("id"), "id");
/// ```
pub fn leaf(path: &str) -> &str {
    path.rsplit_once(PATH_SEPARATOR)
        .map(|(_, leaf)| leaf)
        .unwrap_or(path)
}

/// True when the path has no separator, i.e. it names a property of the root entity.
pub fn is_root_level(path: &str) -> bool {
    !path.contains(PATH_SEPARATOR)
}

/// True when `ancestor` is a proper segment prefix of `path`.
///
/// ```
/// use relgraph::utils::field_path::is_strict_ancestor;
///
/// assert!(is_strict_ancestor("store", "store.name"));
/// assert!(is_strict_ancestor("store", "store.location.city"));
/// assert!(!is_strict_ancestor("store", "store"));
/// assert!(!is_strict_ancestor("store", "storefront.id"));
/// assert!(!is_strict_ancestor("name", "nickname"));
/// ```
pub fn is_strict_ancestor(ancestor: &str, path: &str) -> bool {
    !ancestor.is_empty()
        && path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
}

/// All proper ancestors of a path, outermost first.
///
/// ```
/// use relgraph::utils::field_path::ancestors;
///
/// assert_eq!(ancestors("a.b.c.d"), vec!["a", "a.b", "a.b.c"]);
/// assert!(ancestors("a").is_empty());
/// ```
pub fn ancestors(path: &str) -> Vec<&str> {
    path.match_indices(PATH_SEPARATOR)
        .map(|(idx, _)| &path[..idx])
        .collect()
}

/// Join a prefix (alias or relation path) and a trailing segment.
pub fn join(prefix: &str, segment: &str) -> String {
    format!("{}{}{}", prefix, PATH_SEPARATOR, segment)
}
