//! CLI domain: parse, route and output only.
//! Tree semantics live in the library; the route table only stacks layers and prints.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{parse_key_val, Cli, Commands};
pub use route::RunContext;
