use crate::field::Field;
use crate::spec::{ObjectSchema, Property, PropertyKind, UnionBranch};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// How sibling order is decided. One strategy is chosen per compilation and used
/// at every nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStrategy {
    /// Each property keeps its locally declared `order`; missing values fall back
    /// to the level default.
    #[default]
    Declared,
    /// A single depth-first walk restamps every property with a globally unique,
    /// increasing order before normalization.
    DeclarationWalk,
}

/// Fallback `order` values for properties that declare none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDefaults {
    pub top_level: i64,
    pub nested: i64,
}

impl Default for OrderDefaults {
    fn default() -> Self {
        Self {
            top_level: 0,
            nested: 999,
        }
    }
}

impl OrderDefaults {
    pub fn at_depth(&self, depth: usize) -> i64 {
        if depth == 0 { self.top_level } else { self.nested }
    }
}

/// Stable sort of top-level fields by `order`. Ties keep their encounter order.
pub fn reconcile_order(fields: Vec<Field>) -> Vec<Field> {
    fields.into_iter().sorted_by_key(|f| f.order).collect()
}

/// Orders the sub-fields of a union or array item.
///
/// Fields are kept together per branch (in branch order, taken from
/// `enum_values`), then sorted by `order` and finally by `title`.
pub fn sort_sub_fields(fields: Vec<Field>, enum_values: &[Value]) -> Vec<Field> {
    let branch_position = |field: &Field| -> usize {
        field
            .parent_value
            .as_ref()
            .and_then(|v| enum_values.iter().position(|e| e == v))
            .unwrap_or(0)
    };

    fields
        .into_iter()
        .sorted_by(|a, b| {
            branch_position(a)
                .cmp(&branch_position(b))
                .then(a.order.cmp(&b.order))
                .then_with(|| a.title.cmp(&b.title))
        })
        .collect()
}

/// Properties of one level in the order they should be emitted: stable by
/// declared `order`, using `default_order` where none is declared.
pub(crate) fn ordered_properties(schema: &ObjectSchema, default_order: i64) -> Vec<&Property> {
    schema
        .properties
        .iter()
        .sorted_by(|a, b| compare_declared(a, b, default_order))
        .collect()
}

fn compare_declared(a: &Property, b: &Property, default_order: i64) -> Ordering {
    a.meta
        .order
        .unwrap_or(default_order)
        .cmp(&b.meta.order.unwrap_or(default_order))
}

/// Restamps every property of `schema` (parents and descendants, including every
/// `oneOf` branch) with a globally increasing order, starting at `next`.
///
/// Siblings are visited in declared order, so the new values never contradict a
/// declared `order`. Returns the next unused value with the stamped copy.
pub fn stamp_declaration_order(
    schema: &ObjectSchema,
    next: i64,
    defaults: OrderDefaults,
) -> (i64, ObjectSchema) {
    stamp_object(schema, 0, next, defaults)
}

fn stamp_object(
    schema: &ObjectSchema,
    depth: usize,
    next: i64,
    defaults: OrderDefaults,
) -> (i64, ObjectSchema) {
    let (next, properties) = ordered_properties(schema, defaults.at_depth(depth))
        .into_iter()
        .fold((next, Vec::new()), |(next, mut stamped), property| {
            let (next, property) = stamp_property(property, depth, next, defaults);
            stamped.push(property);
            (next, stamped)
        });

    (
        next,
        ObjectSchema {
            properties,
            required: schema.required.clone(),
        },
    )
}

fn stamp_property(
    property: &Property,
    depth: usize,
    next: i64,
    defaults: OrderDefaults,
) -> (i64, Property) {
    let own = next;
    let (next, kind) = match &property.kind {
        PropertyKind::Union(branches) => {
            let (next, branches) =
                branches
                    .iter()
                    .fold((next + 1, Vec::new()), |(next, mut stamped), branch| {
                        let (next, body) = stamp_object(&branch.body, depth + 1, next, defaults);
                        stamped.push(UnionBranch {
                            body,
                            ..branch.clone()
                        });
                        (next, stamped)
                    });
            (next, PropertyKind::Union(branches))
        }
        PropertyKind::ArrayOfObject(item) => {
            let (next, item) = stamp_object(item, depth + 1, next + 1, defaults);
            (next, PropertyKind::ArrayOfObject(item))
        }
        PropertyKind::NestedObject(nested) => {
            let (next, nested) = stamp_object(nested, depth + 1, next + 1, defaults);
            (next, PropertyKind::NestedObject(nested))
        }
        other => (next + 1, other.clone()),
    };

    let mut meta = property.meta.clone();
    meta.order = Some(own);
    (
        next,
        Property {
            key: property.key.clone(),
            meta,
            kind,
        },
    )
}
