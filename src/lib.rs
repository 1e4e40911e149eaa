//! # Katachi - Connector Specification Form Engine
//!
//! **Katachi** turns a JSON-Schema-like connector specification (the document that
//! describes a data source's connection settings: hosts, credentials, SSL modes,
//! cluster variants, lists of buckets) into a normalized, ordered, path-addressable
//! field model that a form renderer can bind to.
//!
//! ## Core Workflow
//!
//! 1.  **Validate**: Read the specification into the typed schema model with
//!     `ConnectorSpecification::from_json` (or any `IntoSpecification` type). A
//!     malformed property is dropped and reported; the rest stays usable.
//! 2.  **Compile**: Build a `FormCompiler` and call `compile()` to get a `FormModel`:
//!     field groups, each holding fields with unique ids, stable order, and nested
//!     sub-fields for `oneOf` unions and arrays of objects.
//! 3.  **Edit**: To re-open a saved configuration, call `compile_for_edit(&config)`.
//!     Each union has the branch the configuration used selected, and stored values
//!     are pre-filled.
//!
//! The engine is a pure function of its inputs. It performs no I/O and keeps no state
//! between calls; serializing the renderer's form state back into the nested
//! configuration is left to the renderer, using the same `FieldPath` addressing.
//!
//! ## Quick Start
//!
//! ```rust
//! use katachi::prelude::*;
//! use serde_json::json;
//!
//! let spec = ConnectorSpecification::from_value(&json!({
//!     "type": "object",
//!     "required": ["host"],
//!     "properties": {
//!         "host": { "type": "string", "title": "Host", "order": 0 },
//!         "ssl_mode": {
//!             "title": "SSL mode",
//!             "order": 1,
//!             "oneOf": [
//!                 { "title": "Disable", "properties": { "mode": { "const": "disable" } } },
//!                 { "title": "Require", "properties": {
//!                     "mode": { "const": "require" },
//!                     "ca_cert": { "type": "string", "airbyte_secret": true }
//!                 } }
//!             ]
//!         }
//!     }
//! }))?;
//!
//! let compiler = FormCompiler::builder(spec).build();
//! let model = compiler.compile();
//! assert_eq!(model.groups.len(), 1);
//!
//! let session = compiler.compile_for_edit(&json!({
//!     "host": "db.internal",
//!     "ssl_mode": { "mode": "require", "ca_cert": "abc" }
//! }));
//! let ssl = session.model.find("ssl_mode").unwrap();
//! assert_eq!(ssl.selected_value(), Some(&json!("require")));
//! assert_eq!(ssl.visible_sub_fields()[0].id, "ssl_mode.require.ca_cert");
//! # Ok::<(), SchemaError>(())
//! ```

pub mod compiler;
pub mod error;
pub mod field;
pub mod outline;
pub mod prelude;
pub mod reconstruct;
pub mod spec;

#[cfg(feature = "python-bindings")]
mod python;
