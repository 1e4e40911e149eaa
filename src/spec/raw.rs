use super::definition::SchemaType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One property exactly as a connector registry ships it.
///
/// Every key is optional and unknown keys are ignored, so newer registries can add
/// metadata without breaking older engines. Nested structure (`properties`,
/// `oneOf`, `items`) is kept as raw JSON and validated property by property, which
/// lets one bad property be dropped without losing its siblings. Display metadata
/// of the wrong JSON type reads as absent instead of failing the property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProperty {
    #[serde(rename = "type")]
    pub type_decl: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<Value>>,
    pub properties: Option<Map<String, Value>>,
    pub items: Option<Value>,
    pub required: Option<Value>,
    pub default: Option<Value>,
    #[serde(rename = "enum", deserialize_with = "lenient")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(rename = "const")]
    pub const_value: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub pattern: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub pattern_descriptor: Option<String>,
    pub examples: Option<Value>,
    #[serde(deserialize_with = "lenient_bool")]
    pub multiline: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub minimum: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub maximum: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub always_show: Option<bool>,
    #[serde(deserialize_with = "lenient_order")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub group: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub airbyte_secret: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub airbyte_hidden: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub display_type: Option<String>,
}

/// Reads an optional key, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Like [`lenient`], also accepting `"true"` and `"false"` strings.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Some(flag),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Reads `order` from an integer, a whole-valued float or a numeric string.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

impl RawProperty {
    /// The declared type. A list such as `["string", "null"]` resolves to its first
    /// non-null entry. Returns `None` when nothing usable is declared.
    pub fn declared_type(&self) -> Option<SchemaType> {
        match self.type_decl.as_ref()? {
            Value::String(name) => SchemaType::from_name(name),
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .filter(|name| *name != "null")
                .find_map(SchemaType::from_name),
            _ => None,
        }
    }

    /// Returns true when a type was written down but is not one this engine knows.
    pub fn has_unknown_type(&self) -> bool {
        self.type_decl.is_some() && self.declared_type().is_none()
    }

    /// The fixed value of a discriminant candidate: `const`, or a one-element `enum`.
    pub fn fixed_value(&self) -> Option<&Value> {
        if let Some(value) = &self.const_value {
            return Some(value);
        }
        match self.enum_values.as_deref() {
            Some([only]) => Some(only),
            _ => None,
        }
    }

    /// Names listed in `required`. Anything other than an array of strings (older
    /// drafts use a boolean here) yields an empty list.
    pub fn required_keys(&self) -> Vec<String> {
        self.required
            .as_ref()
            .and_then(Value::as_array)
            .map(|keys| {
                keys.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
