//! Prelude module for convenient imports
//!
//! Re-exports the types needed to validate a specification, compile it, and
//! re-open saved configurations.
//!
//! ```rust
//! use katachi::prelude::*;
//!
//! let compiler = FormCompiler::new(r#"{ "properties": { "port": { "type": "integer" } } }"#)?;
//! let model = compiler.compile();
//! assert!(model.find("port").is_some());
//! # Ok::<(), SchemaError>(())
//! ```

// Compilation
pub use crate::compiler::{
    EditSession, EngineConfig, FormCompiler, FormModel, OrderStrategy, assemble_groups,
    normalize, reconcile_order,
};
pub use crate::reconstruct::{Reconstruction, Reconstructor, reconstruct};

// Schema model
pub use crate::spec::{
    ConnectorSpecification, GroupDeclaration, IntoSpecification, ObjectSchema, Property,
    PropertyKind, SchemaType,
};

// Field model
pub use crate::field::{EnumOption, Field, FieldGroup, FieldKind, FieldPath};

// Error types
pub use crate::error::{MalformedKind, ReconstructionError, SchemaError};

// Outline formatting
pub use crate::outline::OutlineFormatter;
