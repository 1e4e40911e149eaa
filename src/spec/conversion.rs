use super::definition::ConnectorSpecification;
use super::parsing::parse_specification;
use crate::error::SchemaError;
use serde_json::Value;

/// A trait for documents that can be turned into a validated `ConnectorSpecification`.
///
/// The engine only ever compiles a `ConnectorSpecification`. Implement this trait on
/// your own registry types to plug a different document shape into the compiler.
///
/// # Example
///
/// ```rust,no_run
/// use katachi::prelude::*;
/// use serde_json::json;
///
/// struct RegistryEntry { definition_id: String, spec: serde_json::Value }
///
/// impl IntoSpecification for RegistryEntry {
///     fn into_specification(self) -> Result<ConnectorSpecification, SchemaError> {
///         self.spec.into_specification()
///     }
/// }
///
/// let entry = RegistryEntry {
///     definition_id: "source-postgres".to_string(),
///     spec: json!({ "properties": { "host": { "type": "string" } } }),
/// };
/// let spec = entry.into_specification().unwrap();
/// assert_eq!(spec.root.properties.len(), 1);
/// ```
pub trait IntoSpecification {
    /// Consumes the document and validates it into the engine's schema model.
    fn into_specification(self) -> Result<ConnectorSpecification, SchemaError>;
}

impl IntoSpecification for Value {
    fn into_specification(self) -> Result<ConnectorSpecification, SchemaError> {
        parse_specification(&self)
    }
}

impl IntoSpecification for &Value {
    fn into_specification(self) -> Result<ConnectorSpecification, SchemaError> {
        parse_specification(self)
    }
}

impl IntoSpecification for &str {
    fn into_specification(self) -> Result<ConnectorSpecification, SchemaError> {
        let document: Value = serde_json::from_str(self)
            .map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
        parse_specification(&document)
    }
}

impl IntoSpecification for ConnectorSpecification {
    fn into_specification(self) -> Result<ConnectorSpecification, SchemaError> {
        Ok(self)
    }
}

impl ConnectorSpecification {
    /// Parses and validates a specification from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        json.into_specification()
    }

    /// Validates a specification from an already parsed JSON document.
    pub fn from_value(document: &Value) -> Result<Self, SchemaError> {
        parse_specification(document)
    }
}
