use super::path::FieldPath;
use crate::spec::SchemaType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a renderer should treat a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// A single input control.
    Leaf,
    /// A variant selector whose sub-fields depend on the chosen option.
    Union,
    /// A repeated value; structured when `sub_fields` describes one item.
    Array,
}

/// One selectable variant of a union field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumOption {
    pub value: Value,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Key under which `value` is stored in the variant's configuration object.
    pub discriminant_key: String,
}

/// A normalized, path-addressable unit of connector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Unique across the whole normalized tree.
    pub id: String,
    pub path: FieldPath,
    pub kind: FieldKind,
    #[serde(rename = "type")]
    pub field_type: SchemaType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub secret: bool,
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<Field>,
    /// Discriminant constants of a union, in branch order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_options: Vec<EnumOption>,
    /// Set on union sub-fields: the discriminant of the branch they belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<SchemaType>,
    /// Plain literal choices (`enum` on a leaf).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_descriptor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    pub multiline: bool,
    pub always_show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    /// Pre-filled value. For a union this is the selected discriminant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Field {
    pub fn is_union(&self) -> bool {
        self.kind == FieldKind::Union
    }

    pub fn is_array(&self) -> bool {
        self.kind == FieldKind::Array
    }

    /// The discriminant currently selected on a union field.
    pub fn selected_value(&self) -> Option<&Value> {
        if self.is_union() { self.value.as_ref() } else { None }
    }

    /// Sub-fields of the branch whose discriminant is `value`.
    pub fn branch_sub_fields<'a, 'v>(
        &'a self,
        value: &'v Value,
    ) -> impl Iterator<Item = &'a Field> + use<'a, 'v> {
        self.sub_fields
            .iter()
            .filter(move |f| f.parent_value.as_ref() == Some(value))
    }

    /// Sub-fields a renderer should show right now.
    ///
    /// Array sub-fields describe one item and are always visible. Union sub-fields
    /// are visible only for the selected branch; an unset union shows none.
    pub fn visible_sub_fields(&self) -> Vec<&Field> {
        match self.kind {
            FieldKind::Union => match &self.value {
                Some(selected) => self.branch_sub_fields(selected).collect(),
                None => Vec::new(),
            },
            _ => self.sub_fields.iter().collect(),
        }
    }

    /// The option describing `value`, if `value` is one of this union's constants.
    pub fn option_for(&self, value: &Value) -> Option<&EnumOption> {
        self.enum_options.iter().find(|o| &o.value == value)
    }

    /// This field followed by all of its descendants, depth first.
    pub fn walk(&self) -> Vec<&Field> {
        let mut out = vec![self];
        for sub in &self.sub_fields {
            out.extend(sub.walk());
        }
        out
    }
}
