//! Layertree: stackable hierarchical configuration
//!
//! A tree of string-keyed nodes holding typed values. Trees are loaded from a simple
//! `key = value` text format or JSON, stacked into scopes that fall back to one
//! another, and queried with dotted key specs where `*` matches any key. A small
//! rule engine ([`Tree::get_settings`]) picks values based on other values in the
//! tree.
//!
//! ```
//! use layertree::{Args, Tree};
//!
//! let mut tree = Tree::new();
//! let base = tree.new_root();
//! tree.set(base, "server.port", 8080);
//! tree.set(base, "server.host", "localhost");
//!
//! let local = tree.with(base, &Args::from([("server.host", "127.0.0.1")]));
//! assert_eq!(tree.get_string(local, "server.host"), "127.0.0.1");
//! assert_eq!(tree.get_int(local, "server.port"), 8080);
//! ```

pub mod args;
pub mod cli;
pub mod config;
pub mod error;
mod getters;
pub mod keys;
pub mod logging;
pub mod node_list;
pub mod parse;
mod resolve;
pub mod serialise;
pub mod settings;
pub mod tree;
pub mod value;

pub use args::{Args, StrArgs};
pub use error::{ConversionError, TreeError};
pub use keys::{IntoKeySpec, KeySpec};
pub use node_list::NodeList;
pub use settings::Reply;
pub use tree::{Link, Node, NodeFlags, NodeId, Tree};
pub use value::Value;
