//! Integration tests - planner, entity catalog and SQL adapter working together
//!
//! These tests drive `map_graph` end to end and render the resulting query.

mod graph_mapping_tests;
