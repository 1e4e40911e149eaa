//! Common test fixtures: connector specifications and saved configurations.
use katachi::prelude::*;
use serde_json::{Value, json};

/// The minimal SSL-mode union: one branch with no extra fields, one with a CA cert.
#[allow(dead_code)]
pub fn ssl_mode_spec() -> Value {
    json!({
        "properties": {
            "ssl_mode": {
                "oneOf": [
                    { "properties": { "mode": { "const": "disable" } } },
                    { "properties": { "mode": { "const": "require" }, "ca_cert": { "type": "string" } } }
                ]
            }
        }
    })
}

/// A Postgres-like source with groups, a hidden field, a secret, and two unions.
#[allow(dead_code)]
pub fn postgres_spec() -> Value {
    json!({
        "title": "Postgres Source Spec",
        "type": "object",
        "required": ["host", "port", "database", "username"],
        "groups": [
            { "id": "connection", "title": "Connection" },
            { "id": "advanced", "title": "Advanced" }
        ],
        "properties": {
            "host": { "type": "string", "title": "Host", "order": 0, "group": "connection" },
            "port": {
                "type": "integer", "title": "Port", "order": 1, "default": 5432,
                "minimum": 0, "maximum": 65536, "examples": ["5432"], "group": "connection"
            },
            "database": { "type": "string", "title": "Database Name", "order": 2, "group": "connection" },
            "username": { "type": "string", "title": "Username", "order": 3, "group": "connection" },
            "password": {
                "type": "string", "title": "Password", "order": 4,
                "airbyte_secret": true, "group": "connection"
            },
            "jdbc_url_params": {
                "type": "string", "title": "JDBC URL Parameters", "order": 5,
                "airbyte_hidden": true, "group": "advanced"
            },
            "ssl_mode": {
                "type": "object", "title": "SSL Modes", "order": 6, "group": "connection",
                "oneOf": [
                    { "title": "disable", "properties": { "mode": { "type": "string", "const": "disable", "order": 0 } } },
                    { "title": "require", "properties": { "mode": { "type": "string", "const": "require", "order": 0 } } },
                    {
                        "title": "verify-ca",
                        "required": ["mode", "ca_certificate"],
                        "properties": {
                            "mode": { "type": "string", "const": "verify-ca", "order": 0 },
                            "ca_certificate": {
                                "type": "string", "title": "CA certificate", "order": 1,
                                "airbyte_secret": true, "multiline": true
                            },
                            "client_key_password": {
                                "type": "string", "title": "Client key password", "order": 4,
                                "airbyte_secret": true
                            }
                        }
                    }
                ]
            },
            "replication_method": {
                "type": "object", "title": "Update Method", "order": 7, "group": "advanced",
                "oneOf": [
                    {
                        "title": "Scan Changes with User Defined Cursor",
                        "properties": { "method": { "type": "string", "const": "Standard" } }
                    },
                    {
                        "title": "Read Changes using Write-Ahead Log (CDC)",
                        "required": ["method", "replication_slot", "publication"],
                        "properties": {
                            "method": { "type": "string", "const": "CDC" },
                            "plugin": {
                                "type": "string", "title": "Plugin", "order": 1,
                                "enum": ["pgoutput"], "default": "pgoutput"
                            },
                            "replication_slot": { "type": "string", "title": "Replication Slot", "order": 2 },
                            "publication": { "type": "string", "title": "Publication", "order": 3 }
                        }
                    }
                ]
            }
        }
    })
}

/// An S3-like destination with an array of bucket objects and a scalar tag list.
#[allow(dead_code)]
pub fn s3_spec() -> Value {
    json!({
        "properties": {
            "buckets": {
                "type": "array",
                "title": "Buckets",
                "order": 0,
                "items": {
                    "type": "object",
                    "required": ["name", "region"],
                    "properties": {
                        "region": { "type": "string", "title": "Region", "order": 1 },
                        "name": { "type": "string", "title": "Bucket name", "order": 0 },
                        "internal_id": { "type": "string", "airbyte_hidden": true }
                    }
                }
            },
            "tags": { "type": "array", "title": "Tags", "order": 1, "items": { "type": "string" } }
        }
    })
}

/// Two branches that both declare a `password` property.
#[allow(dead_code)]
pub fn shared_key_spec() -> Value {
    json!({
        "properties": {
            "credentials": {
                "title": "Authentication",
                "oneOf": [
                    {
                        "title": "Username and password",
                        "properties": {
                            "auth_type": { "const": "basic" },
                            "username": { "type": "string", "title": "Username", "order": 0 },
                            "password": { "type": "string", "title": "Password", "order": 1, "airbyte_secret": true }
                        }
                    },
                    {
                        "title": "Access token",
                        "properties": {
                            "auth_type": { "const": "token" },
                            "password": { "type": "string", "title": "Token", "airbyte_secret": true }
                        }
                    }
                ]
            }
        }
    })
}

/// A union whose branches each embed the same nested union.
#[allow(dead_code)]
pub fn nested_union_spec() -> Value {
    let tunnel = json!({
        "title": "Tunnel",
        "oneOf": [
            { "properties": { "tunnel_method": { "const": "NO_TUNNEL" } } },
            {
                "properties": {
                    "tunnel_method": { "const": "SSH_KEY_AUTH" },
                    "tunnel_host": { "type": "string", "title": "SSH host" }
                }
            }
        ]
    });
    json!({
        "properties": {
            "cluster": {
                "oneOf": [
                    { "title": "Self-hosted", "properties": { "cluster_type": { "const": "self" }, "tunnel": tunnel.clone() } },
                    { "title": "Cloud", "properties": { "cluster_type": { "const": "cloud" }, "tunnel": tunnel } }
                ]
            }
        }
    })
}

/// Compiles a specification document with default settings.
#[allow(dead_code)]
pub fn compile(document: &Value) -> FormModel {
    FormCompiler::new(document)
        .expect("Failed to read specification")
        .compile()
}

/// Ids of the top-level fields in group order.
#[allow(dead_code)]
pub fn top_level_ids(model: &FormModel) -> Vec<String> {
    model.top_level_fields().map(|f| f.id.clone()).collect()
}
