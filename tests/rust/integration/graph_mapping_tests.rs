use anyhow::Result;
use relgraph::entity_catalog::CatalogError;
use relgraph::path_planner::PlanError;
use relgraph::query_builder::QueryBuildError;
use relgraph::{
    map_graph, AliasStrategy, EntityCatalog, EntityDescriptor, PathMapper, PlannerConfig,
    QueryBuilder, SqlSelectBuilder,
};

const CATALOG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/shop_catalog.yaml");

fn shop_catalog() -> Result<EntityCatalog> {
    let _ = env_logger::builder().is_test(true).try_init();
    Ok(EntityCatalog::from_yaml_file(CATALOG_PATH)?)
}

#[test]
fn test_store_selection_renders_sql() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");

    let urm = map_graph(
        &[
            "store",
            "store.name",
            "store.location.streetName",
            "store.id",
            "store.id",
            "store.location.city",
        ],
        &mut builder,
        &EntityDescriptor::new("Product"),
        &catalog,
    )?;

    assert_eq!(urm.keys().collect::<Vec<_>>(), vec!["store", "store.location"]);
    assert_eq!(
        builder.to_sql()?,
        "SELECT r1.name, r2.streetName, r1.id, r2.city\n\
         FROM products AS product\n\
         LEFT JOIN stores AS r1 ON product.store_id = r1.id\n\
         LEFT JOIN locations AS r2 ON r1.location_id = r2.id"
    );
    Ok(())
}

const DEEP_PATHS: [&str; 6] = [
    "id",
    "name",
    "store.owner.address.city",
    "store.name",
    "category.title",
    "store.owner.name",
];

#[test]
fn test_unchained_hop_fails_at_render_not_at_planning() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");

    // `store.owner.address` is discovered before `store.owner`, so it keeps its dotted path
    let urm = map_graph(&DEEP_PATHS, &mut builder, &EntityDescriptor::new("Product"), &catalog)?;
    assert_eq!(
        urm.get("store.owner.address").map(|b| b.aliased_target_relation.as_str()),
        Some("store.owner.address")
    );
    assert_eq!(
        urm.get("store.owner").map(|b| b.aliased_target_relation.as_str()),
        Some("r2.owner")
    );

    assert_eq!(
        builder.to_sql(),
        Err(QueryBuildError::UnknownAlias {
            alias: "store.owner".to_string(),
            reference: "store.owner.address".to_string(),
        })
    );
    Ok(())
}

#[test]
fn test_synthesized_ancestors_render_deep_chain() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");
    let mapper = PathMapper::new(PlannerConfig {
        synthesize_ancestors: true,
        ..Default::default()
    })?;

    let urm = mapper.map_graph(&DEEP_PATHS, &mut builder, &EntityDescriptor::new("Product"), &catalog)?;
    assert_eq!(
        urm.keys().collect::<Vec<_>>(),
        vec!["store", "store.owner", "store.owner.address", "category"]
    );
    assert_eq!(
        builder.to_sql()?,
        "SELECT product.id, product.name, r3.city, r1.name, r4.title, r2.name\n\
         FROM products AS product\n\
         LEFT JOIN stores AS r1 ON product.store_id = r1.id\n\
         LEFT JOIN people AS r2 ON r1.owner_id = r2.id\n\
         LEFT JOIN locations AS r3 ON r2.address_id = r3.id\n\
         LEFT JOIN categories AS r4 ON product.category_id = r4.id"
    );
    Ok(())
}

#[test]
fn test_unknown_relation_is_a_render_error() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");

    let urm = map_graph(&["supplier.name"], &mut builder, &EntityDescriptor::new("Product"), &catalog)?;
    assert_eq!(urm.len(), 1);
    assert_eq!(
        builder.to_sql(),
        Err(QueryBuildError::Catalog(CatalogError::UnknownRelation {
            entity: "Product".to_string(),
            relation: "supplier".to_string(),
        }))
    );
    Ok(())
}

#[test]
fn test_empty_field_map() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");
    builder.select(vec!["product.id".to_string()]);

    let urm = map_graph::<&str, _, _>(&[], &mut builder, &EntityDescriptor::new("Product"), &catalog)?;

    assert!(urm.is_empty());
    assert!(builder.joins().is_empty());
    assert!(builder.selection().is_empty());
    assert_eq!(builder.to_sql(), Err(QueryBuildError::EmptyProjection));
    Ok(())
}

#[test]
fn test_unknown_root_entity() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "order");

    let result = map_graph(&["id"], &mut builder, &EntityDescriptor::new("Order"), &catalog);
    assert_eq!(
        result,
        Err(PlanError::RootEntity(CatalogError::UnknownEntity {
            name: "Order".to_string()
        }))
    );
    assert!(builder.root_entity().is_none());
    Ok(())
}

#[test]
fn test_random_aliases_render() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");
    let mapper = PathMapper::new(PlannerConfig {
        alias_strategy: AliasStrategy::Random,
        alias_length: 6,
        ..Default::default()
    })?;

    let urm = mapper.map_graph(
        &["store.location.city", "store.name"],
        &mut builder,
        &EntityDescriptor::new("Product"),
        &catalog,
    )?;

    for binding in urm.bindings() {
        assert_eq!(binding.unique_alias.len(), 6);
    }
    let sql = builder.to_sql()?;
    let location = urm.alias_of("store.location").unwrap_or_default();
    assert!(sql.contains(&format!("LEFT JOIN locations AS {}", location)));
    Ok(())
}

#[test]
fn test_relation_map_diagnostics() -> Result<()> {
    let catalog = shop_catalog()?;
    let mut builder = SqlSelectBuilder::new(&catalog, "product");

    let urm = map_graph(
        &["store.location.city", "store.name"],
        &mut builder,
        &EntityDescriptor::new("Product"),
        &catalog,
    )?;

    let json: serde_json::Value = serde_json::from_str(&urm.to_json()?)?;
    let keys: Vec<&String> = json.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(keys, vec!["store.location", "store"]);
    assert_eq!(json["store"]["unique_alias"], "r2");
    Ok(())
}
