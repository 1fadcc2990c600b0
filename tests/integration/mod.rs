//! Integration tests for the layered configuration tree

mod config_loading;
mod json;
mod parse_files;
mod scope_inheritance;
mod test_utils;
mod tree_structure;

pub use test_utils::with_config_env;
