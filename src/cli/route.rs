//! CLI route: single route table and run context.

use crate::args::Args;
use crate::cli::output::lines;
use crate::cli::parse::Commands;
use crate::config::LayertreeConfig;
use crate::error::TreeError;
use crate::tree::{NodeId, Tree};
use std::path::PathBuf;
use tracing::{debug, info};

/// Runtime context for CLI execution: every layer loaded into one tree.
pub struct RunContext {
    tree: Tree,
    top: NodeId,
}

impl RunContext {
    /// Stack the configured layers, then the command-line layers, then `set`.
    ///
    /// The first layer is the base scope; every following layer is its own scope
    /// stacked on the previous one, so later layers win.
    pub fn new(
        config: &LayertreeConfig,
        layers: &[PathBuf],
        set: &[(String, String)],
    ) -> Result<Self, TreeError> {
        let mut tree = Tree::new();
        let mut top = tree.new_root();
        let mut first = true;

        for path in config.layers.iter().chain(layers) {
            if !first {
                top = tree.with(top, &Args::new());
            }
            first = false;
            info!(layer = %path.display(), "Loading layer");
            tree.merge_file(top, path)?;
        }

        if !set.is_empty() {
            let args: Args = set.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            top = tree.with(top, &args);
        }

        Ok(Self { tree, top })
    }

    /// Build a context from an already populated tree.
    pub fn from_tree(tree: Tree, top: NodeId) -> Self {
        Self { tree, top }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&mut self, command: &Commands) -> Result<String, TreeError> {
        debug!(?command, "Executing command");
        match command {
            Commands::Get { spec } => self.tree.try_get_string(self.top, spec),
            Commands::Values { spec } => Ok(lines(self.tree.get_string_values(self.top, spec))),
            Commands::Nodes { spec } => {
                let nodes = self.tree.get_nodes(self.top, spec);
                Ok(lines(nodes.iter().map(|id| self.tree.path(id).join("."))))
            }
            Commands::Settings { spec, with } => {
                let args: Args = with.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                let context = self.tree.with(self.top, &args);
                let reply = self.tree.get_settings(context, spec);
                let rendered = lines(
                    reply
                        .iter()
                        .map(|(key, values)| format!("{key}={}", values.join(","))),
                );
                self.tree.discard(context);
                Ok(rendered)
            }
            Commands::Dump { json, sort } => {
                let merged = self.flatten();
                if *sort {
                    self.tree.sort_recursively(merged);
                }
                let out = if *json {
                    self.tree.to_json_string(merged, true)
                } else {
                    Ok(self.tree.dump(merged, false).trim_end().to_string())
                };
                self.tree.discard(merged);
                out
            }
        }
    }

    /// Merge every scope, base first, into a fresh root.
    fn flatten(&mut self) -> NodeId {
        let mut chain = vec![self.top];
        let mut current = self.top;
        while let Some(parent) = self.tree.scope_parent(current) {
            chain.push(parent);
            current = parent;
        }

        let merged = self.tree.new_root();
        for scope in chain.into_iter().rev() {
            for child in self.tree.children(scope) {
                self.tree.merge(merged, child);
            }
        }
        merged
    }
}
