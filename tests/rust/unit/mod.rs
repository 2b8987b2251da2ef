//! Unit tests for the public planning functions

mod path_planning_properties;
