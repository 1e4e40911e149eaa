//! Edit-mode reconstruction: re-opening a saved configuration against a freshly
//! normalized field list.

use crate::error::ReconstructionError;
use crate::field::{Field, FieldKind, FieldPath};
use ahash::AHashSet;
use log::debug;
use serde_json::Value;

mod lookup;

use lookup::{covers, locate, terminal_paths};

/// Result of reconstructing a field list from a stored configuration.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    pub fields: Vec<Field>,
    /// Values that could not be placed. Informational only.
    pub report: Vec<ReconstructionError>,
}

/// Pre-fills a field list from a stored configuration value tree.
///
/// Unions get the discriminant of the branch the configuration used, and that
/// branch's sub-fields are filled in turn. Leaves and arrays take their stored
/// value. Nothing here fails: a value that cannot be matched leaves its field
/// unset and is noted in the report.
pub struct Reconstructor<'c> {
    config: &'c Value,
    /// Root keys of the configuration that belong to a top-level field.
    owned: AHashSet<String>,
    consumed: Vec<FieldPath>,
    report: Vec<ReconstructionError>,
}

impl<'c> Reconstructor<'c> {
    pub fn new(config: &'c Value) -> Self {
        Self {
            config,
            owned: AHashSet::new(),
            consumed: Vec::new(),
            report: Vec::new(),
        }
    }

    /// Reconstructs `fields` and reports configuration values no field claimed.
    pub fn run(mut self, fields: &[Field]) -> Reconstruction {
        self.owned = fields
            .iter()
            .filter_map(|f| f.path.segments().first().cloned())
            .collect();
        let fields = fields.iter().map(|f| self.restore(f)).collect();

        for path in terminal_paths(self.config) {
            if !self.consumed.iter().any(|c| covers(c, &path)) {
                debug!("Dropping stored value at '{}': no field matches it", path);
                self.report.push(ReconstructionError::OrphanedValue { path: path.join() });
            }
        }

        Reconstruction {
            fields,
            report: self.report,
        }
    }

    fn restore(&mut self, field: &Field) -> Field {
        let mut restored = field.clone();
        restored.value = None;

        let Some((actual, stored)) = locate(self.config, &field.path, &self.owned) else {
            return restored;
        };
        if stored.is_null() {
            self.consumed.push(actual);
            return restored;
        }

        match field.kind {
            FieldKind::Union => match match_discriminant(field, stored) {
                Some((selected, key)) => {
                    let claimed = match key {
                        Some(key) => actual.child(key),
                        None => actual,
                    };
                    self.consumed.push(claimed);
                    restored.sub_fields = field
                        .sub_fields
                        .iter()
                        .map(|sub| {
                            if sub.parent_value.as_ref() == Some(&selected) {
                                self.restore(sub)
                            } else {
                                sub.clone()
                            }
                        })
                        .collect();
                    restored.value = Some(selected);
                }
                None => {
                    debug!(
                        "Stored value at '{}' matches none of {:?}",
                        field.path, field.enum_values
                    );
                    self.report.push(ReconstructionError::UnresolvedValue {
                        path: field.path.join(),
                        value: stored.clone(),
                    });
                }
            },
            FieldKind::Array | FieldKind::Leaf => {
                self.consumed.push(actual);
                restored.value = Some(stored.clone());
            }
        }
        restored
    }
}

/// Picks the branch a stored union value belongs to.
///
/// For an object, each option's discriminant key is checked first; failing that,
/// any member equal to one of the union's constants selects it. A scalar is
/// matched against the constants directly. Returns the constant with the key it
/// was found under.
fn match_discriminant(field: &Field, stored: &Value) -> Option<(Value, Option<String>)> {
    match stored {
        Value::Object(members) => field
            .enum_options
            .iter()
            .find(|option| members.get(&option.discriminant_key) == Some(&option.value))
            .map(|option| (option.value.clone(), Some(option.discriminant_key.clone())))
            .or_else(|| {
                members.iter().find_map(|(key, member)| {
                    field
                        .enum_values
                        .iter()
                        .find(|candidate| *candidate == member)
                        .map(|candidate| (candidate.clone(), Some(key.clone())))
                })
            }),
        scalar => field
            .enum_values
            .iter()
            .find(|candidate| *candidate == scalar)
            .map(|candidate| (candidate.clone(), None)),
    }
}

/// Reconstructs `fields` against `config`, discarding the report.
pub fn reconstruct(fields: &[Field], config: &Value) -> Vec<Field> {
    Reconstructor::new(config).run(fields).fields
}
