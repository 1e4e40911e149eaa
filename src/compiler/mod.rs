use crate::error::{ReconstructionError, SchemaError};
use crate::field::{Field, FieldGroup};
use crate::reconstruct::Reconstructor;
use crate::spec::{ConnectorSpecification, IntoSpecification, ObjectSchema};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod groups;
pub mod normalizer;
pub mod ordering;

pub use groups::assemble_groups;
pub use normalizer::{Normalizer, normalize};
pub use ordering::{
    OrderDefaults, OrderStrategy, reconcile_order, sort_sub_fields, stamp_declaration_order,
};

/// Tunables for a compilation. Every key is optional when read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub order_strategy: OrderStrategy,
    /// Section that receives fields without a `group` tag.
    pub default_group_id: String,
    pub top_level_default_order: i64,
    pub nested_default_order: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let defaults = OrderDefaults::default();
        Self {
            order_strategy: OrderStrategy::default(),
            default_group_id: "default".to_string(),
            top_level_default_order: defaults.top_level,
            nested_default_order: defaults.nested,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn order_defaults(&self) -> OrderDefaults {
        OrderDefaults {
            top_level: self.top_level_default_order,
            nested: self.nested_default_order,
        }
    }
}

/// The compiled, renderer-facing form for one connector specification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub groups: Vec<FieldGroup>,
    /// Properties that were left out or degraded because they were malformed.
    #[serde(skip)]
    pub diagnostics: Vec<SchemaError>,
}

impl FormModel {
    /// Every field of every group, including sub-fields, depth first.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.groups.iter().flat_map(FieldGroup::walk)
    }

    /// Top-level fields across all groups, in group order.
    pub fn top_level_fields(&self) -> impl Iterator<Item = &Field> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    pub fn find(&self, id: &str) -> Option<&Field> {
        self.fields().find(|f| f.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&FieldGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A form model re-opened against a saved configuration.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub model: FormModel,
    /// Stored values that could not be placed on any field.
    pub report: Vec<ReconstructionError>,
}

/// Compiles a connector specification into a [`FormModel`].
pub struct FormCompiler {
    spec: ConnectorSpecification,
    config: EngineConfig,
}

pub struct FormCompilerBuilder {
    spec: ConnectorSpecification,
    config: EngineConfig,
}

impl FormCompilerBuilder {
    pub fn new(spec: ConnectorSpecification) -> Self {
        Self {
            spec,
            config: EngineConfig::default(),
        }
    }
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_order_strategy(mut self, strategy: OrderStrategy) -> Self {
        self.config.order_strategy = strategy;
        self
    }
    pub fn with_default_group(mut self, group_id: &str) -> Self {
        self.config.default_group_id = group_id.to_string();
        self
    }
    pub fn build(self) -> FormCompiler {
        FormCompiler {
            spec: self.spec,
            config: self.config,
        }
    }
}

impl FormCompiler {
    pub fn builder(spec: ConnectorSpecification) -> FormCompilerBuilder {
        FormCompilerBuilder::new(spec)
    }

    /// Parses a specification document and builds a compiler with default settings.
    pub fn new(document: impl IntoSpecification) -> Result<Self, SchemaError> {
        Ok(FormCompilerBuilder::new(document.into_specification()?).build())
    }

    pub fn specification(&self) -> &ConnectorSpecification {
        &self.spec
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalized top-level fields, ordered but not yet grouped.
    pub fn normalize(&self) -> Vec<Field> {
        let defaults = self.config.order_defaults();
        let normalizer = Normalizer::new(defaults);
        match self.config.order_strategy {
            OrderStrategy::Declared => normalizer.normalize(&self.spec.root),
            OrderStrategy::DeclarationWalk => {
                let (next, stamped): (i64, ObjectSchema) =
                    stamp_declaration_order(&self.spec.root, 0, defaults);
                debug!("Stamped {} properties in declaration order", next);
                normalizer.normalize(&stamped)
            }
        }
    }

    /// Builds the form for creating a new connector configuration.
    pub fn compile(&self) -> FormModel {
        self.model_from(self.normalize())
    }

    /// Builds the form for editing `existing`, with the previously chosen union
    /// branches selected and stored values pre-filled.
    pub fn compile_for_edit(&self, existing: &Value) -> EditSession {
        let reconstruction = Reconstructor::new(existing).run(&self.normalize());
        if !reconstruction.report.is_empty() {
            debug!(
                "{} stored values could not be placed on the form",
                reconstruction.report.len()
            );
        }
        EditSession {
            model: self.model_from(reconstruction.fields),
            report: reconstruction.report,
        }
    }

    fn model_from(&self, fields: Vec<Field>) -> FormModel {
        FormModel {
            title: self.spec.title.clone(),
            description: self.spec.description.clone(),
            groups: assemble_groups(fields, &self.spec.groups, &self.config.default_group_id),
            diagnostics: self.spec.diagnostics.clone(),
        }
    }
}
