//! Key specs
//!
//! A key spec is the ordered list of segments used to walk a tree. Specs are built
//! from any mix of displayable parts; each part is rendered and then split on dots,
//! so `keys!["main", 1, "one"]` and `"main.1.one"` name the same path.

use std::fmt;

/// The segment that matches every child at its level.
pub const WILDCARD: &str = "*";

/// Ordered sequence of key segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeySpec {
    segments: Vec<String>,
}

impl KeySpec {
    /// An empty spec, which addresses the starting node itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every part and split it on dots. Parts rendering to an empty string
    /// are skipped, so `""` addresses the starting node.
    pub fn parse<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: fmt::Display,
    {
        let mut segments = Vec::new();
        for part in parts {
            let rendered = part.to_string();
            if rendered.is_empty() {
                continue;
            }
            segments.extend(rendered.split('.').map(str::to_string));
        }
        Self { segments }
    }

    /// Use the given segments verbatim, without splitting on dots.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Whether the final segment is the wildcard, i.e. the spec fans out at its end.
    pub fn ends_with_wildcard(&self) -> bool {
        self.last() == Some(WILDCARD)
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Return a new spec made of `prefix` followed by this spec.
    pub fn prefixed(&self, prefix: &[String]) -> KeySpec {
        let mut segments = Vec::with_capacity(prefix.len() + self.segments.len());
        segments.extend_from_slice(prefix);
        segments.extend_from_slice(&self.segments);
        KeySpec { segments }
    }

    /// Split the spec just after its last wildcard segment.
    ///
    /// Without any wildcard the head is just the first segment.
    pub fn split_at_last_wildcard(&self) -> (KeySpec, KeySpec) {
        let position = self
            .segments
            .iter()
            .rposition(|segment| segment == WILDCARD)
            .unwrap_or(0);
        let cut = (position + 1).min(self.segments.len());
        (
            KeySpec::from_segments(self.segments[..cut].to_vec()),
            KeySpec::from_segments(self.segments[cut..].to_vec()),
        )
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Anything that can be turned into a [`KeySpec`].
pub trait IntoKeySpec {
    fn into_key_spec(self) -> KeySpec;
}

impl IntoKeySpec for KeySpec {
    fn into_key_spec(self) -> KeySpec {
        self
    }
}

impl IntoKeySpec for &KeySpec {
    fn into_key_spec(self) -> KeySpec {
        self.clone()
    }
}

impl IntoKeySpec for &str {
    fn into_key_spec(self) -> KeySpec {
        KeySpec::parse([self])
    }
}

impl IntoKeySpec for String {
    fn into_key_spec(self) -> KeySpec {
        KeySpec::parse([self])
    }
}

impl IntoKeySpec for &String {
    fn into_key_spec(self) -> KeySpec {
        KeySpec::parse([self])
    }
}

impl<P: fmt::Display> IntoKeySpec for &[P] {
    fn into_key_spec(self) -> KeySpec {
        KeySpec::parse(self)
    }
}

impl<P: fmt::Display> IntoKeySpec for Vec<P> {
    fn into_key_spec(self) -> KeySpec {
        KeySpec::parse(self)
    }
}

impl<P: fmt::Display, const N: usize> IntoKeySpec for [P; N] {
    fn into_key_spec(self) -> KeySpec {
        KeySpec::parse(self)
    }
}

/// Build a [`KeySpec`] from heterogeneous parts.
///
/// ```
/// use layertree::keys;
/// let spec = keys!["main", 1, "one"];
/// assert_eq!(spec.to_string(), "main.1.one");
/// ```
#[macro_export]
macro_rules! keys {
    () => {
        $crate::keys::KeySpec::new()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::keys::KeySpec::parse([$(&$part as &dyn ::std::fmt::Display),+])
    };
}

/// Split `s` on every `sep` that is not preceded by `escape`.
///
/// Escaped separators are unescaped in the returned parts.
pub fn split_esc(s: &str, sep: char, escape: char) -> Vec<String> {
    split_n_esc(s, sep, escape, None)
}

/// Like [`split_esc`], but produce at most `limit` parts; the last part holds the rest.
pub fn split_n_esc(s: &str, sep: char, escape: char, limit: Option<usize>) -> Vec<String> {
    let mut parts = Vec::new();
    if limit == Some(0) {
        return parts;
    }

    let escaped_sep = format!("{escape}{sep}");
    let plain_sep = sep.to_string();
    let mut current = String::new();
    let mut previous: Option<char> = None;
    for c in s.chars() {
        let room_left = limit.map_or(true, |n| parts.len() + 1 < n);
        if c == sep && previous != Some(escape) && room_left {
            parts.push(current.replace(&escaped_sep, &plain_sep));
            current.clear();
        } else {
            current.push(c);
        }
        previous = Some(c);
    }
    parts.push(current.replace(&escaped_sep, &plain_sep));
    parts
}
