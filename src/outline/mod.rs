use crate::field::{Field, FieldGroup, FieldKind};
use serde_json::Value;
use std::fmt::Write;

const MASK: &str = "********";

/// Formats field groups into an indented, human-readable outline.
///
/// ```text
/// [default]
///   host (string, required) = "db.internal"
///   ssl_mode (oneOf: disable | require) = "require"
///     [require] ca_cert (string)
/// ```
pub struct OutlineFormatter;

impl OutlineFormatter {
    pub fn format(groups: &[FieldGroup]) -> String {
        let mut out = String::new();
        for group in groups {
            match &group.title {
                Some(title) => {
                    let _ = writeln!(out, "[{}] {}", group.id, title);
                }
                None => {
                    let _ = writeln!(out, "[{}]", group.id);
                }
            }
            for field in &group.fields {
                Self::format_field(&mut out, field, 1);
            }
        }
        out
    }

    fn format_field(out: &mut String, field: &Field, depth: usize) {
        let indent = "  ".repeat(depth);
        let branch = field
            .parent_value
            .as_ref()
            .map(|v| format!("[{}] ", Self::format_scalar(v)))
            .unwrap_or_default();
        let name = field.path.last().unwrap_or(field.id.as_str());

        let _ = write!(out, "{}{}{} ({})", indent, branch, name, Self::describe(field));
        if let Some(value) = &field.value {
            let shown = if field.secret {
                MASK.to_string()
            } else {
                value.to_string()
            };
            let _ = write!(out, " = {}", shown);
        }
        out.push('\n');

        for sub in &field.sub_fields {
            Self::format_field(out, sub, depth + 1);
        }
    }

    fn describe(field: &Field) -> String {
        let mut parts = Vec::new();
        match field.kind {
            FieldKind::Union => {
                let choices: Vec<String> =
                    field.enum_values.iter().map(Self::format_scalar).collect();
                parts.push(format!("oneOf: {}", choices.join(" | ")));
            }
            FieldKind::Array => {
                let item = field.item_type.map_or("string", |t| t.name());
                parts.push(format!("array of {}", item));
            }
            FieldKind::Leaf => parts.push(field.field_type.name().to_string()),
        }
        if field.required {
            parts.push("required".to_string());
        }
        if field.secret {
            parts.push("secret".to_string());
        }
        parts.join(", ")
    }

    fn format_scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
