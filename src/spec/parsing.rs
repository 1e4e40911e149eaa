use super::definition::*;
use super::raw::RawProperty;
use crate::error::{MalformedKind, SchemaError};
use crate::field::FieldPath;
use crate::field::path::value_segment;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// Key under which connector registries wrap the connection schema.
const ENVELOPE_KEY: &str = "connectionSpecification";

/// Validates a whole specification document into the typed schema model.
///
/// The document may be the connection schema itself or the registry envelope that
/// wraps it. Root-level problems are returned as errors; property-level problems
/// are logged, recorded in `diagnostics`, and the property is skipped.
pub fn parse_specification(document: &Value) -> Result<ConnectorSpecification, SchemaError> {
    let schema = match document.get(ENVELOPE_KEY) {
        Some(inner) => inner,
        None => document,
    };

    let root_map = schema
        .as_object()
        .ok_or_else(|| SchemaError::InvalidRoot(json_kind(schema).to_string()))?;

    let raw = RawProperty::deserialize(schema)
        .map_err(|e| SchemaError::InvalidRoot(format!("unreadable root schema ({})", e)))?;

    if let Some(ty) = raw.declared_type() {
        if ty != SchemaType::Object {
            return Err(SchemaError::InvalidRoot(format!("type '{}'", ty.name())));
        }
    }

    let mut diagnostics = Vec::new();
    let root = match &raw.properties {
        Some(properties) => parse_object(
            properties,
            raw.required_keys(),
            &FieldPath::root(),
            &mut diagnostics,
        ),
        None => ObjectSchema::default(),
    };

    let groups = match root_map.get("groups") {
        Some(value) => Vec::<GroupDeclaration>::deserialize(value).unwrap_or_else(|e| {
            debug!("Ignoring unreadable group declarations: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    Ok(ConnectorSpecification {
        title: raw.title,
        description: raw.description,
        root,
        groups,
        diagnostics,
    })
}

/// Validates one object level. Properties that fail are dropped individually.
pub(crate) fn parse_object<'a>(
    properties: impl IntoIterator<Item = (&'a String, &'a Value)>,
    required: Vec<String>,
    path: &FieldPath,
    diagnostics: &mut Vec<SchemaError>,
) -> ObjectSchema {
    let mut parsed = Vec::new();
    for (key, value) in properties {
        match parse_property(key, value, &path.child(key.as_str()), diagnostics) {
            Ok(property) => parsed.push(property),
            Err(error) => {
                warn!("Skipping property: {}", error);
                diagnostics.push(error);
            }
        }
    }
    ObjectSchema {
        properties: parsed,
        required,
    }
}

/// Validates a single property and decides which shape it takes.
pub(crate) fn parse_property(
    key: &str,
    value: &Value,
    path: &FieldPath,
    diagnostics: &mut Vec<SchemaError>,
) -> Result<Property, SchemaError> {
    let raw = RawProperty::deserialize(value).map_err(|e| {
        SchemaError::malformed(path.join(), MalformedKind::InvalidProperty(e.to_string()))
    })?;

    let kind = if let Some(branches) = &raw.one_of {
        PropertyKind::Union(parse_branches(branches, path, diagnostics)?)
    } else {
        match raw.declared_type() {
            Some(SchemaType::Array) => parse_array(&raw, path, diagnostics)?,
            None if raw.items.is_some() => parse_array(&raw, path, diagnostics)?,
            Some(SchemaType::Object) | None if raw.properties.is_some() => {
                let nested = match &raw.properties {
                    Some(properties) => {
                        parse_object(properties, raw.required_keys(), path, diagnostics)
                    }
                    None => ObjectSchema::default(),
                };
                PropertyKind::NestedObject(nested)
            }
            Some(ty) => PropertyKind::Leaf(ty),
            None => {
                if raw.has_unknown_type() {
                    debug!("Property '{}' declares an unknown type, treating it as string", path);
                }
                PropertyKind::Leaf(SchemaType::String)
            }
        }
    };

    Ok(Property {
        key: key.to_string(),
        meta: meta_from_raw(raw),
        kind,
    })
}

fn parse_array(
    raw: &RawProperty,
    path: &FieldPath,
    diagnostics: &mut Vec<SchemaError>,
) -> Result<PropertyKind, SchemaError> {
    let Some(items) = &raw.items else {
        let error = SchemaError::malformed(path.join(), MalformedKind::MissingItems);
        warn!("Degrading property: {}", error);
        diagnostics.push(error);
        return Ok(PropertyKind::ArrayOfScalar(SchemaType::String));
    };

    let item = RawProperty::deserialize(items)
        .map_err(|_| SchemaError::malformed(path.join(), MalformedKind::UnresolvedItemType))?;

    match (item.declared_type(), &item.properties) {
        (Some(SchemaType::Object), Some(properties)) | (None, Some(properties)) => {
            let item_path = path.child(crate::field::ARRAY_PLACEHOLDER);
            Ok(PropertyKind::ArrayOfObject(parse_object(
                properties,
                item.required_keys(),
                &item_path,
                diagnostics,
            )))
        }
        (Some(ty), _) => Ok(PropertyKind::ArrayOfScalar(ty)),
        (None, None) => Err(SchemaError::malformed(
            path.join(),
            MalformedKind::UnresolvedItemType,
        )),
    }
}

fn parse_branches(
    branches: &[Value],
    path: &FieldPath,
    diagnostics: &mut Vec<SchemaError>,
) -> Result<Vec<UnionBranch>, SchemaError> {
    let mut parsed: Vec<UnionBranch> = Vec::with_capacity(branches.len());
    for (branch_index, branch) in branches.iter().enumerate() {
        let branch = parse_branch(branch_index, branch, path, diagnostics)?;
        // Compared in id form: `1` and `"1"` would produce the same field ids.
        let segment = value_segment(&branch.discriminant);
        if parsed.iter().any(|b| value_segment(&b.discriminant) == segment) {
            let error = SchemaError::malformed(
                path.join(),
                MalformedKind::DuplicateDiscriminant { branch_index },
            );
            warn!("Skipping union branch: {}", error);
            diagnostics.push(error);
            continue;
        }
        parsed.push(branch);
    }
    Ok(parsed)
}

fn parse_branch(
    branch_index: usize,
    branch: &Value,
    path: &FieldPath,
    diagnostics: &mut Vec<SchemaError>,
) -> Result<UnionBranch, SchemaError> {
    let missing = || {
        SchemaError::malformed(
            path.join(),
            MalformedKind::MissingDiscriminant { branch_index },
        )
    };

    let raw = RawProperty::deserialize(branch).map_err(|_| missing())?;
    let properties = raw.properties.as_ref().ok_or_else(missing)?;

    let candidates: Vec<(&String, RawProperty)> = properties
        .iter()
        .filter_map(|(key, value)| Some((key, RawProperty::deserialize(value).ok()?)))
        .collect();
    // An explicit `const` wins over a one-element `enum` anywhere in the branch.
    let (discriminant_key, discriminant) = candidates
        .iter()
        .find_map(|(key, raw)| raw.const_value.as_ref().map(|v| ((*key).clone(), v.clone())))
        .or_else(|| {
            candidates
                .iter()
                .find_map(|(key, raw)| raw.fixed_value().map(|v| ((*key).clone(), v.clone())))
        })
        .ok_or_else(missing)?;

    let rest = properties
        .iter()
        .filter(|(key, _)| **key != discriminant_key);
    let body = parse_object(rest, raw.required_keys(), path, diagnostics);

    Ok(UnionBranch {
        title: raw.title.clone(),
        description: raw.description.clone(),
        discriminant_key,
        discriminant,
        body,
    })
}

fn meta_from_raw(raw: RawProperty) -> PropertyMeta {
    PropertyMeta {
        title: raw.title,
        description: raw.description,
        default: raw.default,
        pattern: raw.pattern,
        pattern_descriptor: raw.pattern_descriptor,
        examples: raw.examples,
        options: if raw.one_of.is_none() {
            raw.enum_values.unwrap_or_default()
        } else {
            Vec::new()
        },
        format: raw.format,
        minimum: raw.minimum,
        maximum: raw.maximum,
        multiline: raw.multiline.unwrap_or(false),
        always_show: raw.always_show.unwrap_or(false),
        order: raw.order,
        group: raw.group,
        secret: raw.airbyte_secret.unwrap_or(false),
        hidden: raw.airbyte_hidden.unwrap_or(false),
        display_type: raw.display_type,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
