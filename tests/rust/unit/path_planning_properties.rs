//! Property checks for the individual planning stages

#[cfg(test)]
mod path_planning_tests {
    use relgraph::path_planner::{
        build_joins, build_projection, extract_relations, sanitize, AliasResolver,
    };
    use relgraph::utils::alias_naming::{AliasPool, CounterAliasGenerator};
    use relgraph::utils::field_path;
    use std::collections::HashSet;
    use test_case::test_case;

    fn resolve(relations: &[String]) -> relgraph::UniqueRelationMap {
        let mut pool = AliasPool::new(Box::new(CounterAliasGenerator::new("r")));
        pool.reserve("root");
        AliasResolver::new(pool).resolve(relations)
    }

    #[test_case(&["store", "store.name", "store.location.streetName", "store.id", "store.id", "store.location.city"] ; "store example")]
    #[test_case(&["a", "a", "a"] ; "all duplicates")]
    #[test_case(&["a.b.c", "a.b", "a", "x", "x.y"] ; "ancestors in reverse")]
    #[test_case(&["name", "nickname", "names.first"] ; "substring names")]
    #[test_case(&[] ; "empty")]
    fn test_sanitize_properties(input: &[&str]) {
        let output = sanitize(input);

        let distinct: HashSet<&String> = output.iter().collect();
        assert_eq!(distinct.len(), output.len(), "duplicates in {:?}", output);

        for path in &output {
            assert!(input.contains(&path.as_str()));
            assert!(
                !output.iter().any(|other| field_path::is_strict_ancestor(path, other)),
                "'{}' is implied by a deeper path",
                path
            );
        }

        // every input path is either kept or implied by a kept path
        for path in input {
            assert!(
                output.iter().any(|kept| kept == path || field_path::is_strict_ancestor(path, kept)),
                "'{}' was lost",
                path
            );
        }
    }

    #[test]
    fn test_extractor_yields_no_leaves() {
        let relations = extract_relations(&[
            "store.name",
            "store.location.streetName",
            "store.id",
            "store.location.city",
        ]);
        assert_eq!(relations, vec!["store", "store.location"]);
        assert!(!relations.iter().any(|r| r.ends_with("name") || r.ends_with("id")));
    }

    #[test]
    fn test_resolver_store_example() {
        let relations = extract_relations(&sanitize(&[
            "store.name",
            "store.location.streetName",
            "store.id",
            "store.location.city",
        ]));
        let urm = resolve(&relations);

        assert_eq!(urm.len(), 2);
        let store_alias = urm.alias_of("store").unwrap();
        let location = urm.get("store.location").unwrap();
        assert_eq!(location.target_relation, "store.location");
        assert!(location
            .aliased_target_relation
            .starts_with(&format!("{}.", store_alias)));
    }

    #[test]
    fn test_round_trip_projection_covers_every_sanitized_path() {
        let input = [
            "id",
            "owner",
            "owner.name",
            "owner.team.name",
            "owner.team.lead.email",
            "tags.label",
            "id",
        ];
        let sanitized = sanitize(&input);
        let urm = resolve(&extract_relations(&sanitized));
        let joins = build_joins(&urm, "root");
        let projection = build_projection(&sanitized, &urm, "root");

        assert_eq!(projection.len(), sanitized.len());
        assert_eq!(joins.len(), urm.len());
        assert_eq!(
            projection,
            vec!["root.id", "r1.name", "r2.name", "r3.email", "r4.label"]
        );

        // every projected column is qualified by the root alias or a join alias
        let qualifiers: HashSet<&str> = joins
            .iter()
            .map(|j| j.binding_alias.as_str())
            .chain(std::iter::once("root"))
            .collect();
        for column in &projection {
            let qualifier = field_path::parent(column).unwrap_or_default();
            assert!(qualifiers.contains(qualifier), "unqualified column {}", column);
        }
    }

    #[test]
    fn test_degenerate_input() {
        let sanitized = sanitize::<&str>(&[]);
        let urm = resolve(&extract_relations(&sanitized));
        assert!(urm.is_empty());
        assert!(build_joins(&urm, "root").is_empty());
        assert!(build_projection(&sanitized, &urm, "root").is_empty());
    }
}
