//! Settings evaluation
//!
//! A settings group is a node whose children are cases, evaluated in order like the
//! arms of a switch. A case matches when:
//!
//! - it has a `default` child, whose value is then the payload; or
//! - it has a `keys` list naming context keys, and the path built from the context's
//!   values for those keys (followed by `value`) exists below the case.
//!
//! A key written `?name` contributes `true` or `false` depending on whether `name`
//! is present in the context, rather than its value. Evaluation stops at the first
//! matching case unless that case sets `continue` to a true value.
//!
//! Payloads are comma separated `subkey:value` pairs (`\,` and `\:` escape). A part
//! without a colon is stored under `value`. Every value is kept, so a subkey can
//! collect several values across cases.
//!
//! ```text
//! settings.1.default=label:Zip code
//! settings.1.continue=1
//! settings.2.keys.1=category
//! settings.2.keys.2=type
//! settings.2.1001.sale.value=suffix:(of house)
//! settings.3.keys.1=?pickup_location
//! settings.3.true.value=suffix:(of pick-up location)
//! ```

use crate::keys::{split_esc, split_n_esc, IntoKeySpec, KeySpec, WILDCARD};
use crate::tree::{NodeId, Tree};
use crate::value::parse_bool;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

const ESCAPE: char = '\\';
const VALUE_KEY: &str = "value";

/// Multi-valued settings result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply(BTreeMap<String, Vec<String>>);

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the values of `key`.
    pub fn set<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    /// Append values to `key`.
    pub fn add<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// First value of `key`, or an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map_or("", String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map_or(&[], Vec::as_slice)
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).parse().unwrap_or(0)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        parse_bool(self.get(key)).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Store every part of a payload, optionally prefixing subkeys with `prefix`.
    fn add_payload(&mut self, payload: &str, prefix: Option<&str>) {
        for part in split_esc(payload, ',', ESCAPE) {
            let mut pieces = split_n_esc(&part, ':', ESCAPE, Some(2)).into_iter();
            let (subkey, subvalue) = match (pieces.next(), pieces.next()) {
                (Some(subkey), Some(subvalue)) => (subkey, subvalue),
                (Some(subvalue), None) => (VALUE_KEY.to_string(), subvalue),
                _ => continue,
            };

            let subkey = match prefix {
                Some(prefix) if subkey == VALUE_KEY => prefix.to_string(),
                Some(prefix) => format!("{prefix}_{subkey}"),
                None => subkey,
            };
            self.0.entry(subkey).or_default().push(subvalue);
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, values)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}:[{}]", values.join(" "))?;
        }
        Ok(())
    }
}

impl Tree {
    /// Evaluate every settings group matching `keys`, using `node` as the context.
    ///
    /// When the spec ends with `*` several groups may match, so each subkey is
    /// prefixed with its group's key: `value` becomes `<group>` and any other
    /// subkey becomes `<group>_<subkey>`.
    pub fn get_settings(&self, node: NodeId, keys: impl IntoKeySpec) -> Reply {
        let mut reply = Reply::new();
        let spec = keys.into_key_spec();
        if spec.is_empty() || !self.contains(node) {
            return reply;
        }
        let use_prefix = spec.ends_with_wildcard();

        for group in self.resolve(node, &spec, None) {
            let prefix = if use_prefix { self.key(group) } else { None };

            for case in self.get_nodes(group, WILDCARD) {
                let Some(payload) = self.match_case(node, case) else {
                    continue;
                };
                debug!(
                    group = self.key(group).unwrap_or_default(),
                    case = self.key(case).unwrap_or_default(),
                    payload = %payload,
                    "Settings case matched"
                );
                reply.add_payload(&payload, prefix);

                if !self.get_bool(case, "continue") {
                    break;
                }
            }
        }
        reply
    }

    /// The payload of `case` if it matches the context `node`.
    fn match_case(&self, node: NodeId, case: NodeId) -> Option<String> {
        if let Some(default) = self.get_node(case, "default") {
            return Some(self.string_value(default));
        }

        let keys = self.get_node(case, "keys")?;
        let mut segments = Vec::new();
        for wanted in self.get_string_values(keys, WILDCARD) {
            let probe = match wanted.strip_prefix('?') {
                // a bare `?` names nothing, so it is never present
                Some(key) => (!key.is_empty() && self.try_get(node, key).is_ok()).to_string(),
                None => self.get_string(node, &wanted),
            };
            // a context value may span several segments
            segments.extend(probe.split('.').map(str::to_string));
        }
        segments.push(VALUE_KEY.to_string());

        let probe = KeySpec::from_segments(segments);
        trace!(case = ?case, probe = %probe, "Probing settings case");
        let found = self.find_first(case, &probe).ok()?;
        Some(self.string_value(found))
    }
}
