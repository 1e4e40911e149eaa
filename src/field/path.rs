use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Literal segment standing in for "any index" in the path of an array item's
/// sub-field. Renderers swap it for the real index with [`FieldPath::with_index`].
pub const ARRAY_PLACEHOLDER: &str = "0";

/// An ordered key sequence from the configuration root to a value.
///
/// Keys are stored unjoined so a key that contains a dot is never confused with a
/// nesting boundary. [`FieldPath::join`] is the only place a path becomes a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns a new path with `key` appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Canonical string form. Segments are joined with `.`; a literal `.` or `\`
    /// inside a segment is escaped with a backslash.
    pub fn join(&self) -> String {
        join_segments(self.0.iter().map(String::as_str))
    }

    /// Inverse of [`FieldPath::join`].
    pub fn parse(joined: &str) -> Self {
        if joined.is_empty() {
            return Self::root();
        }
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = joined.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                '.' => segments.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        segments.push(current);
        Self(segments)
    }

    /// Reads the value stored at this path inside a configuration tree.
    pub fn lookup<'v>(&self, config: &'v Value) -> Option<&'v Value> {
        self.0
            .iter()
            .try_fold(config, |node, key| node.as_object()?.get(key))
    }

    /// Replaces the first array placeholder segment at or after `from` with `index`.
    pub fn with_index(&self, index: usize) -> Self {
        self.with_index_from(0, index)
    }

    /// Like [`FieldPath::with_index`], starting the placeholder search at segment
    /// `from`. Nested arrays are materialized one level at a time this way.
    pub fn with_index_from(&self, from: usize, index: usize) -> Self {
        let mut segments = self.0.clone();
        if let Some(slot) = segments
            .iter_mut()
            .skip(from)
            .find(|segment| segment.as_str() == ARRAY_PLACEHOLDER)
        {
            *slot = index.to_string();
        }
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Escapes and joins raw segments. Shared by path and id construction so both
/// follow one escaping rule.
pub(crate) fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        push_escaped(&mut out, segment);
    }
    out
}

pub(crate) fn push_escaped(out: &mut String, segment: &str) {
    for c in segment.chars() {
        if c == '.' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

/// String form of a discriminant constant as it appears inside a field id.
pub(crate) fn value_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
