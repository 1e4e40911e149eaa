use crate::field::{Field, FieldGroup};
use crate::spec::GroupDeclaration;
use ahash::AHashMap;
use log::debug;

/// Partitions top-level fields into sections.
///
/// Untagged fields land in the implicit `default_group_id` section, which comes
/// first. Declared groups follow in declaration order, then tags that were used
/// but never declared, in first-encounter order. Empty sections are dropped; if
/// nothing is left a single empty default section is returned.
pub fn assemble_groups(
    fields: Vec<Field>,
    declared: &[GroupDeclaration],
    default_group_id: &str,
) -> Vec<FieldGroup> {
    let mut sequence: Vec<String> = Vec::with_capacity(declared.len() + 1);
    sequence.push(default_group_id.to_string());
    for declaration in declared {
        if !sequence.contains(&declaration.id) {
            sequence.push(declaration.id.clone());
        }
    }

    let mut buckets: AHashMap<String, Vec<Field>> = AHashMap::new();
    for field in fields {
        let group_id = field
            .group
            .clone()
            .unwrap_or_else(|| default_group_id.to_string());
        if !sequence.contains(&group_id) {
            debug!(
                "Field '{}' uses undeclared group '{}', appending it",
                field.id, group_id
            );
            sequence.push(group_id.clone());
        }
        buckets.entry(group_id).or_default().push(field);
    }

    let groups: Vec<FieldGroup> = sequence
        .into_iter()
        .filter_map(|id| {
            let fields = buckets.remove(&id)?;
            let title = declared
                .iter()
                .find(|d| d.id == id)
                .and_then(|d| d.title.clone());
            Some(FieldGroup { id, title, fields })
        })
        .collect();

    if groups.is_empty() {
        return vec![FieldGroup {
            id: default_group_id.to_string(),
            title: None,
            fields: Vec::new(),
        }];
    }
    groups
}
