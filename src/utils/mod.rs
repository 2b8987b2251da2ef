pub mod alias_naming;
pub mod field_path;
