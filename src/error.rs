use serde_json::Value;
use thiserror::Error;

/// Errors raised while reading a connector specification into the schema model.
///
/// Only `JsonParseError` and `InvalidRoot` abort a compilation. `MalformedSchema`
/// is scoped to a single property: the property is dropped, the error is kept as a
/// diagnostic, and the rest of the form stays usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Failed to parse connector specification JSON: {0}")]
    JsonParseError(String),

    #[error("Connector specification root must be an object schema, found {0}")]
    InvalidRoot(String),

    #[error("Property '{path}' is malformed: {kind}")]
    MalformedSchema { path: String, kind: MalformedKind },
}

/// The reason a single property could not be turned into a field as declared.
///
/// `MissingItems` is the one degradation: the property is still emitted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedKind {
    #[error("oneOf branch {branch_index} declares no discriminant constant")]
    MissingDiscriminant { branch_index: usize },

    #[error("oneOf branch {branch_index} repeats the discriminant of an earlier branch")]
    DuplicateDiscriminant { branch_index: usize },

    #[error("array items lack a resolvable type")]
    UnresolvedItemType,

    #[error("array declares no items; kept as a list of strings")]
    MissingItems,

    #[error("{0}")]
    InvalidProperty(String),
}

impl SchemaError {
    pub(crate) fn malformed(path: impl Into<String>, kind: MalformedKind) -> Self {
        SchemaError::MalformedSchema {
            path: path.into(),
            kind,
        }
    }
}

/// Soft failures of edit-mode reconstruction. These never abort anything; the
/// affected field simply starts without a pre-filled value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconstructionError {
    #[error("Stored value '{value}' at '{path}' matches no known variant")]
    UnresolvedValue { path: String, value: Value },

    #[error("Stored value at '{path}' has no matching field and was dropped")]
    OrphanedValue { path: String },
}
