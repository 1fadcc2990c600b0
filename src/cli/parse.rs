//! CLI parse: clap types for layertree. No behavior beyond argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Layertree CLI - query stacked configuration files
#[derive(Parser, Debug)]
#[command(name = "layertree")]
#[command(about = "Query stacked hierarchical configuration files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file for the tool itself (overrides the global file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Configuration file to load; each one is stacked on top of the previous
    #[arg(long = "layer", value_name = "FILE")]
    pub layers: Vec<PathBuf>,

    /// Value set in a scope above every layer
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value of the first node matching a key spec
    Get {
        /// Dotted key spec, `*` matches any key
        spec: String,
    },
    /// Print the values of every leaf matching a key spec
    Values {
        spec: String,
    },
    /// Print the path of every node matching a key spec
    Nodes {
        spec: String,
    },
    /// Evaluate settings rules
    Settings {
        spec: String,
        /// Context value visible to the rules only
        #[arg(long = "with", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        with: Vec<(String, String)>,
    },
    /// Print the merged tree
    Dump {
        /// Output JSON instead of `path=value` lines
        #[arg(long)]
        json: bool,
        /// Sort children before printing
        #[arg(long)]
        sort: bool,
    },
}

/// Parse `key=value`, splitting on the first `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
