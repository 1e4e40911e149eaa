use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value types a connector property can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(SchemaType::String),
            "integer" => Some(SchemaType::Integer),
            "number" => Some(SchemaType::Number),
            "boolean" => Some(SchemaType::Boolean),
            "object" => Some(SchemaType::Object),
            "array" => Some(SchemaType::Array),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }
}

/// Display and validation metadata carried from a property onto its field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub pattern: Option<String>,
    pub pattern_descriptor: Option<String>,
    pub examples: Option<Value>,
    /// Plain value enumeration (a dropdown of literals), not union options.
    pub options: Vec<Value>,
    pub format: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub multiline: bool,
    pub always_show: bool,
    pub order: Option<i64>,
    pub group: Option<String>,
    pub secret: bool,
    pub hidden: bool,
    pub display_type: Option<String>,
}

/// A validated, named node of the connector schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub meta: PropertyMeta,
    pub kind: PropertyKind,
}

/// The closed set of shapes a property can take. Everything downstream matches on
/// this instead of probing optional JSON keys.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Leaf(SchemaType),
    Union(Vec<UnionBranch>),
    ArrayOfScalar(SchemaType),
    ArrayOfObject(ObjectSchema),
    NestedObject(ObjectSchema),
}

/// An ordered property map together with the required-key list of the same level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub properties: Vec<Property>,
    pub required: Vec<String>,
}

impl ObjectSchema {
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key == key)
    }
}

/// One alternative of a `oneOf`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionBranch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Key of the property whose constant identifies this branch.
    pub discriminant_key: String,
    pub discriminant: Value,
    /// The branch's remaining properties; the discriminant itself is excluded.
    pub body: ObjectSchema,
}

/// A section declared at the specification root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDeclaration {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// The validated root of a connector specification, ready for compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorSpecification {
    pub title: Option<String>,
    pub description: Option<String>,
    pub root: ObjectSchema,
    pub groups: Vec<GroupDeclaration>,
    /// Per-property problems found while validating. The named properties were
    /// left out of `root`, except `MissingItems` arrays, which were kept.
    pub diagnostics: Vec<SchemaError>,
}
