use super::ordering::{OrderDefaults, ordered_properties, reconcile_order, sort_sub_fields};
use crate::field::path::{join_segments, push_escaped, value_segment};
use crate::field::{ARRAY_PLACEHOLDER, EnumOption, Field, FieldKind, FieldPath};
use crate::spec::{ObjectSchema, Property, PropertyKind, SchemaType, UnionBranch};
use log::trace;
use serde_json::json;

/// Where a level of properties is being emitted.
struct Scope<'s> {
    path: &'s FieldPath,
    /// Id of the enclosing field (plus discriminant or placeholder), empty at root.
    id_prefix: String,
    /// Set when flattening a nested object: its leaves take the object's position.
    inherited_order: Option<i64>,
    inherited_group: Option<&'s str>,
}

/// Turns a validated property map into the flat, ordered field list a renderer binds to.
///
/// Plain nested objects never become fields themselves; their leaves are flattened
/// into the level that contains them. Unions and arrays become a single field
/// whose `sub_fields` describe their inner shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    defaults: OrderDefaults,
}

impl Normalizer {
    pub fn new(defaults: OrderDefaults) -> Self {
        Self { defaults }
    }

    /// Normalizes a root property map and reconciles top-level order.
    pub fn normalize(&self, schema: &ObjectSchema) -> Vec<Field> {
        let root = FieldPath::root();
        let scope = Scope {
            path: &root,
            id_prefix: String::new(),
            inherited_order: None,
            inherited_group: None,
        };
        let mut fields = Vec::new();
        self.emit_object(schema, &scope, &mut fields);
        reconcile_order(fields)
    }

    /// Builds the selector field for a `oneOf` property located under `parent`.
    /// Returns `None` when `property` is not a union.
    pub fn resolve_one_of(
        &self,
        property: &Property,
        parent: &FieldPath,
        required: bool,
    ) -> Option<Field> {
        let PropertyKind::Union(branches) = &property.kind else {
            return None;
        };
        let path = parent.child(property.key.as_str());
        let id = path.join();
        let order = self.declared_order(property, parent.len());
        Some(self.union_field(property, branches, path, id, required, order, None))
    }

    /// Builds the field for an array property located under `parent`.
    /// Returns `None` when `property` is not an array.
    pub fn resolve_array(
        &self,
        property: &Property,
        parent: &FieldPath,
        required: bool,
    ) -> Option<Field> {
        if !matches!(
            property.kind,
            PropertyKind::ArrayOfScalar(_) | PropertyKind::ArrayOfObject(_)
        ) {
            return None;
        }
        let path = parent.child(property.key.as_str());
        let id = path.join();
        let order = self.declared_order(property, parent.len());
        Some(self.array_field(property, path, id, required, order, None))
    }

    fn declared_order(&self, property: &Property, depth: usize) -> i64 {
        property
            .meta
            .order
            .unwrap_or_else(|| self.defaults.at_depth(depth))
    }

    fn emit_object(&self, schema: &ObjectSchema, scope: &Scope<'_>, out: &mut Vec<Field>) {
        let default_order = self.defaults.at_depth(scope.path.len());

        for property in ordered_properties(schema, default_order) {
            if property.meta.hidden {
                trace!("Omitting hidden property '{}'", scope.path.child(property.key.as_str()));
                continue;
            }

            let required = schema.is_required(&property.key);
            let path = scope.path.child(property.key.as_str());
            let id = child_id(&scope.id_prefix, &property.key);
            let order = scope
                .inherited_order
                .unwrap_or_else(|| property.meta.order.unwrap_or(default_order));
            let group = property
                .meta
                .group
                .as_deref()
                .or(scope.inherited_group);

            match &property.kind {
                PropertyKind::Union(branches) => {
                    out.push(self.union_field(property, branches, path, id, required, order, group));
                }
                PropertyKind::ArrayOfScalar(_) | PropertyKind::ArrayOfObject(_) => {
                    out.push(self.array_field(property, path, id, required, order, group));
                }
                PropertyKind::NestedObject(nested) => {
                    let nested_scope = Scope {
                        path: &path,
                        id_prefix: id,
                        inherited_order: Some(order),
                        inherited_group: group,
                    };
                    self.emit_object(nested, &nested_scope, out);
                }
                PropertyKind::Leaf(field_type) => {
                    let mut field = base_field(property, path, id, required, order, group);
                    field.field_type = *field_type;
                    trace!("Emitted leaf field '{}'", field.id);
                    out.push(field);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn union_field(
        &self,
        property: &Property,
        branches: &[UnionBranch],
        path: FieldPath,
        id: String,
        required: bool,
        order: i64,
        group: Option<&str>,
    ) -> Field {
        let mut field = base_field(property, path, id, required, order, group);
        field.kind = FieldKind::Union;
        field.field_type = SchemaType::Object;

        let mut sub_fields = Vec::new();
        for branch in branches {
            let value = branch.discriminant.clone();
            field.enum_values.push(value.clone());
            field.enum_options.push(EnumOption {
                value: value.clone(),
                title: branch
                    .title
                    .clone()
                    .unwrap_or_else(|| value_segment(&value)),
                description: branch.description.clone(),
                discriminant_key: branch.discriminant_key.clone(),
            });

            let mut id_prefix = field.id.clone();
            id_prefix.push('.');
            push_escaped(&mut id_prefix, &value_segment(&value));

            let scope = Scope {
                path: &field.path,
                id_prefix,
                inherited_order: None,
                inherited_group: None,
            };
            let mut branch_fields = Vec::new();
            self.emit_object(&branch.body, &scope, &mut branch_fields);
            for sub in &mut branch_fields {
                sub.parent_value = Some(value.clone());
            }
            sub_fields.extend(branch_fields);
        }

        field.sub_fields = sort_sub_fields(sub_fields, &field.enum_values);
        field
    }

    fn array_field(
        &self,
        property: &Property,
        path: FieldPath,
        id: String,
        required: bool,
        order: i64,
        group: Option<&str>,
    ) -> Field {
        let mut field = base_field(property, path, id, required, order, group);
        field.kind = FieldKind::Array;
        field.field_type = SchemaType::Array;

        match &property.kind {
            PropertyKind::ArrayOfObject(item) => {
                field.item_type = Some(SchemaType::Object);
                let item_path = field.path.child(ARRAY_PLACEHOLDER);
                let scope = Scope {
                    path: &item_path,
                    id_prefix: child_id(&field.id, ARRAY_PLACEHOLDER),
                    inherited_order: None,
                    inherited_group: None,
                };
                let mut item_fields = Vec::new();
                self.emit_object(item, &scope, &mut item_fields);
                field.sub_fields = sort_sub_fields(item_fields, &[]);
            }
            PropertyKind::ArrayOfScalar(item_type) => {
                field.item_type = Some(*item_type);
                if field.default.is_none() {
                    field.default = Some(json!([]));
                }
            }
            _ => {}
        }
        field
    }
}

/// Normalizes `schema` with the default order fallbacks.
pub fn normalize(schema: &ObjectSchema) -> Vec<Field> {
    Normalizer::default().normalize(schema)
}

fn child_id(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        join_segments([key])
    } else {
        let mut id = prefix.to_string();
        id.push('.');
        push_escaped(&mut id, key);
        id
    }
}

fn base_field(
    property: &Property,
    path: FieldPath,
    id: String,
    required: bool,
    order: i64,
    group: Option<&str>,
) -> Field {
    let meta = &property.meta;
    Field {
        id,
        path,
        kind: FieldKind::Leaf,
        field_type: SchemaType::String,
        title: meta.title.clone().unwrap_or_else(|| property.key.clone()),
        description: meta.description.clone(),
        required,
        secret: meta.secret,
        hidden: meta.hidden,
        default: meta.default.clone(),
        order,
        group: group.map(str::to_string),
        sub_fields: Vec::new(),
        enum_values: Vec::new(),
        enum_options: Vec::new(),
        parent_value: None,
        item_type: None,
        options: meta.options.clone(),
        pattern: meta.pattern.clone(),
        pattern_descriptor: meta.pattern_descriptor.clone(),
        examples: meta.examples.clone(),
        format: meta.format.clone(),
        minimum: meta.minimum,
        maximum: meta.maximum,
        multiline: meta.multiline,
        always_show: meta.always_show,
        display_type: meta.display_type.clone(),
        value: None,
    }
}
