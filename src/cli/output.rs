//! CLI output: error mapping and line rendering.

use crate::error::TreeError;

/// Map library errors to a string for CLI output.
pub fn map_error(e: &TreeError) -> String {
    match e {
        TreeError::NotFound { key } => format!("no value for {key}"),
        other => other.to_string(),
    }
}

/// One item per line, no trailing newline.
pub fn lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
