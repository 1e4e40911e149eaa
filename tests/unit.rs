//! Unit tests for paths, errors, grouping and the outline formatter.
mod common;
use common::*;
use katachi::field::ARRAY_PLACEHOLDER;
use katachi::prelude::*;
use serde_json::json;

#[test]
fn test_field_path_join_and_parse() {
    let path = FieldPath::new(["tunnel", "ssh.key", "host"]);
    assert_eq!(path.join(), r"tunnel.ssh\.key.host");
    assert_eq!(FieldPath::parse(&path.join()), path);
    assert_eq!(format!("{}", path), path.join());

    assert_eq!(FieldPath::parse(""), FieldPath::root());
    assert_eq!(FieldPath::parse(r"a\\b.c").segments(), &["a\\b", "c"]);
}

#[test]
fn test_field_path_child_and_last() {
    let root = FieldPath::root();
    assert!(root.is_empty());
    assert_eq!(root.last(), None);

    let host = root.child("tunnel").child("host");
    assert_eq!(host.len(), 2);
    assert_eq!(host.last(), Some("host"));
    assert_eq!(host, ["tunnel", "host"].into_iter().collect::<FieldPath>());
}

#[test]
fn test_field_path_lookup() {
    let config = json!({ "tunnel": { "ssh.key": { "host": "bastion" } }, "port": 22 });

    assert_eq!(
        FieldPath::new(["tunnel", "ssh.key", "host"]).lookup(&config),
        Some(&json!("bastion"))
    );
    assert_eq!(FieldPath::new(["port"]).lookup(&config), Some(&json!(22)));
    assert_eq!(FieldPath::new(["port", "inner"]).lookup(&config), None);
    assert_eq!(FieldPath::new(["missing"]).lookup(&config), None);
    assert_eq!(FieldPath::root().lookup(&config), Some(&config));
}

#[test]
fn test_field_path_index_substitution() {
    let path = FieldPath::new(["buckets", ARRAY_PLACEHOLDER, "rules", ARRAY_PLACEHOLDER, "name"]);

    let outer = path.with_index(3);
    assert_eq!(outer.join(), "buckets.3.rules.0.name");

    let inner = outer.with_index_from(3, 7);
    assert_eq!(inner.join(), "buckets.3.rules.7.name");

    let untouched = FieldPath::new(["host"]).with_index(1);
    assert_eq!(untouched.join(), "host");
}

#[test]
fn test_error_display() {
    let error = SchemaError::MalformedSchema {
        path: "ssl_mode".to_string(),
        kind: MalformedKind::MissingDiscriminant { branch_index: 2 },
    };
    assert_eq!(
        error.to_string(),
        "Property 'ssl_mode' is malformed: oneOf branch 2 declares no discriminant constant"
    );

    let root = SchemaError::InvalidRoot("array".to_string());
    assert!(root.to_string().contains("found array"));

    let orphan = ReconstructionError::OrphanedValue {
        path: "legacy.timeout".to_string(),
    };
    assert!(orphan.to_string().contains("'legacy.timeout'"));

    let unresolved = ReconstructionError::UnresolvedValue {
        path: "ssl_mode".to_string(),
        value: json!("verify-full"),
    };
    assert!(unresolved.to_string().contains("\"verify-full\""));
}

fn grouped_fields() -> Vec<Field> {
    let spec = ConnectorSpecification::from_value(&json!({
        "properties": {
            "schema": { "type": "string", "order": 0, "group": "advanced" },
            "host": { "type": "string", "order": 1 },
            "mystery": { "type": "string", "order": 2, "group": "experimental" },
            "port": { "type": "integer", "order": 3, "group": "connection" },
            "database": { "type": "string", "order": 4, "group": "connection" }
        }
    }))
    .expect("Failed to read specification");
    normalize(&spec.root)
}

fn declared_groups() -> Vec<GroupDeclaration> {
    vec![
        GroupDeclaration {
            id: "connection".to_string(),
            title: Some("Connection".to_string()),
        },
        GroupDeclaration {
            id: "tuning".to_string(),
            title: Some("Tuning".to_string()),
        },
        GroupDeclaration {
            id: "advanced".to_string(),
            title: None,
        },
    ]
}

#[test]
fn test_assemble_groups_orders_sections() {
    let groups = assemble_groups(grouped_fields(), &declared_groups(), "default");

    let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    // Default first, declared next (empty "tuning" dropped), undeclared last.
    assert_eq!(ids, vec!["default", "connection", "advanced", "experimental"]);

    assert_eq!(groups[1].title.as_deref(), Some("Connection"));
    let connection: Vec<&str> = groups[1].fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(connection, vec!["port", "database"]);
    assert_eq!(groups[3].title, None);
}

#[test]
fn test_assemble_groups_without_fields_yields_empty_default() {
    let groups = assemble_groups(Vec::new(), &declared_groups(), "main");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, "main");
    assert!(groups[0].fields.is_empty());
}

#[test]
fn test_outline_shows_selected_branch_values() {
    let session = FormCompiler::new(&ssl_mode_spec())
        .unwrap()
        .compile_for_edit(&json!({ "ssl_mode": { "mode": "require", "ca_cert": "abc" } }));

    let outline = OutlineFormatter::format(&session.model.groups);
    assert_eq!(
        outline,
        "[default]\n  ssl_mode (oneOf: disable | require) = \"require\"\n    [require] ca_cert (string) = \"abc\"\n"
    );
}

#[test]
fn test_outline_masks_secrets() {
    let session = FormCompiler::new(&postgres_spec())
        .unwrap()
        .compile_for_edit(&json!({ "host": "db.internal", "password": "hunter2" }));

    let outline = OutlineFormatter::format(&session.model.groups);
    assert!(outline.starts_with("[connection] Connection\n"));
    assert!(outline.contains("  host (string, required) = \"db.internal\"\n"));
    assert!(outline.contains("  password (string, secret) = ********\n"));
    assert!(!outline.contains("hunter2"));
    assert!(outline.contains("[advanced] Advanced\n"));
}
