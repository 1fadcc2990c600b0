//! Line-oriented text format
//!
//! ```text
//! # comments and blank lines are ignored
//! include other.conf
//! server.name=example
//! server.port:int=8080
//! server.aliases:[]string=www,web\,site
//! ```
//!
//! Entries are `key[:type]=value`. Known types are `string int float bool duration
//! date time`, each optionally prefixed with `[]` for comma-separated lists where
//! `\,` escapes a comma. Includes are resolved relative to the including file, and
//! each file is read at most once per load.

use crate::error::{ConversionError, TreeError};
use crate::keys::split_esc;
use crate::tree::{NodeId, Tree};
use crate::value::{parse_bool, parse_duration, parse_float, parse_int, parse_time, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

static IGNORED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(#.*)?$").expect("Invalid regex pattern for comments"));

static INCLUDE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*include ([^\s]+)\s*$").expect("Invalid regex pattern for includes")
});

static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*([^=\s][^=]*?)(?::((?:\[\])?(?:string|int|float|bool|duration|date|time)))?\s*=\s*(.*?)\s*$",
    )
    .expect("Invalid regex pattern for entries")
});

/// Name used in errors for input that does not come from a file.
const READER_NAME: &str = "<input>";

/// A classified input line
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Ignored,
    Include(&'a str),
    Entry {
        key: &'a str,
        kind: &'a str,
        value: &'a str,
    },
}

fn classify(line: &str) -> Option<Line<'_>> {
    if IGNORED_LINE.is_match(line) {
        return Some(Line::Ignored);
    }
    if let Some(caps) = INCLUDE_LINE.captures(line) {
        return caps.get(1).map(|m| Line::Include(m.as_str()));
    }
    let caps = ENTRY_LINE.captures(line)?;
    Some(Line::Entry {
        key: caps.get(1)?.as_str(),
        kind: caps.get(2).map_or("", |m| m.as_str()),
        value: caps.get(3).map_or("", |m| m.as_str()),
    })
}

/// Convert the raw text of an entry according to its declared type.
pub fn parse_typed_value(kind: &str, raw: &str) -> Result<Value, ConversionError> {
    match kind.strip_prefix("[]") {
        Some(item) => split_esc(raw, ',', '\\')
            .iter()
            .map(|part| parse_scalar(item, part))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        None => parse_scalar(kind, raw),
    }
}

fn parse_scalar(kind: &str, raw: &str) -> Result<Value, ConversionError> {
    Ok(match kind {
        "" | "string" => Value::String(raw.to_string()),
        "int" => Value::Int(parse_int(raw)?),
        "float" => Value::Float(parse_float(raw)?),
        "bool" => Value::Bool(parse_bool(raw)?),
        "duration" => Value::Duration(parse_duration(raw)?),
        "date" | "time" => Value::Time(parse_time(raw)?),
        other => return Err(ConversionError::UnknownType(other.to_string())),
    })
}

/// Tracks the files read during one load
struct Loader<'t> {
    tree: &'t mut Tree,
    node: NodeId,
    seen: HashSet<PathBuf>,
}

impl Loader<'_> {
    fn load(&mut self, path: &Path) -> Result<(), TreeError> {
        let canonical = path.canonicalize()?;
        if !self.seen.insert(canonical) {
            trace!(file = %path.display(), "Skipping file already loaded");
            return Ok(());
        }

        debug!(file = %path.display(), "Loading configuration file");
        let reader = BufReader::new(File::open(path)?);
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            match classify(&line) {
                Some(Line::Ignored) => {}
                Some(Line::Include(include)) => {
                    let included = path
                        .parent()
                        .map_or_else(|| PathBuf::from(include), |dir| dir.join(include));
                    trace!(file = %path.display(), include = %included.display(), "Following include");
                    self.load(&included).map_err(|source| TreeError::Include {
                        file: path.to_path_buf(),
                        line: number,
                        include: included.clone(),
                        source: Box::new(source),
                    })?;
                }
                Some(Line::Entry { key, kind, value }) => {
                    let value = parse_typed_value(kind, value).map_err(|err| TreeError::Parse {
                        file: path.to_path_buf(),
                        line: number,
                        message: err.to_string(),
                    })?;
                    self.tree.set(self.node, key, value);
                }
                None => {
                    return Err(TreeError::Parse {
                        file: path.to_path_buf(),
                        line: number,
                        message: format!("bad format: {line:?}"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Tree {
    /// Read entries from `reader` and set them below `node`.
    ///
    /// Includes are not followed. Lines that are neither entries, comments nor blank
    /// are errors when `stop_on_errors` is set and skipped otherwise. Values that
    /// fail to convert to their declared type are always errors.
    pub fn merge_reader<R: BufRead>(
        &mut self,
        node: NodeId,
        reader: R,
        stop_on_errors: bool,
    ) -> Result<(), TreeError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            match classify(&line) {
                Some(Line::Ignored) => {}
                Some(Line::Entry { key, kind, value }) => {
                    let value = parse_typed_value(kind, value).map_err(|err| TreeError::Parse {
                        file: PathBuf::from(READER_NAME),
                        line: number,
                        message: err.to_string(),
                    })?;
                    self.set(node, key, value);
                }
                Some(Line::Include(_)) | None if stop_on_errors => {
                    return Err(TreeError::Parse {
                        file: PathBuf::from(READER_NAME),
                        line: number,
                        message: format!("bad format: {line:?}"),
                    });
                }
                Some(Line::Include(_)) | None => {
                    trace!(line = number, "Skipping unrecognised line");
                }
            }
        }
        Ok(())
    }

    /// Load `path`, following includes, and set every entry below `node`.
    ///
    /// Loading is not atomic: on error, entries read so far stay in place.
    pub fn merge_file(&mut self, node: NodeId, path: impl AsRef<Path>) -> Result<(), TreeError> {
        let mut loader = Loader {
            tree: self,
            node,
            seen: HashSet::new(),
        };
        loader.load(path.as_ref())
    }

    /// Load `path` into a new tree, returning the tree and its root.
    pub fn load(path: impl AsRef<Path>) -> Result<(Tree, NodeId), TreeError> {
        let mut tree = Tree::new();
        let root = tree.new_root();
        tree.merge_file(root, path)?;
        Ok((tree, root))
    }
}
