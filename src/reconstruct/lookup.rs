use crate::field::FieldPath;
use ahash::AHashSet;
use serde_json::Value;

/// Finds the value stored for `path`.
///
/// A direct lookup is tried first. Failing that, object members of the root whose
/// key no field owns (`owned` holds the first path segment of every top-level
/// field) are tried as a base. This recovers values saved one nesting level deeper
/// than the schema now places them, without reading another field's value.
/// Returns the path the value was actually found at.
pub(crate) fn locate<'v>(
    config: &'v Value,
    path: &FieldPath,
    owned: &AHashSet<String>,
) -> Option<(FieldPath, &'v Value)> {
    if let Some(value) = path.lookup(config) {
        return Some((path.clone(), value));
    }

    config.as_object()?.iter().find_map(|(key, nested)| {
        if !nested.is_object() || owned.contains(key) {
            return None;
        }
        let value = path.lookup(nested)?;
        let actual = FieldPath::new(
            std::iter::once(key.as_str()).chain(path.segments().iter().map(String::as_str)),
        );
        Some((actual, value))
    })
}

/// Paths of every terminal value in a configuration tree. Objects are descended
/// into; arrays and scalars are terminal. Empty objects are skipped.
pub(crate) fn terminal_paths(config: &Value) -> Vec<FieldPath> {
    let mut out = Vec::new();
    collect_terminals(config, &FieldPath::root(), &mut out);
    out
}

fn collect_terminals(node: &Value, path: &FieldPath, out: &mut Vec<FieldPath>) {
    match node {
        Value::Object(members) => {
            for (key, child) in members {
                collect_terminals(child, &path.child(key.as_str()), out);
            }
        }
        _ if path.is_empty() => {}
        _ => out.push(path.clone()),
    }
}

/// Returns true when `prefix` is `path` itself or one of its ancestors.
pub(crate) fn covers(prefix: &FieldPath, path: &FieldPath) -> bool {
    prefix.len() <= path.len()
        && prefix
            .segments()
            .iter()
            .zip(path.segments())
            .all(|(a, b)| a == b)
}
