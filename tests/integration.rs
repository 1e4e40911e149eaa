//! Integration tests for Katachi
//!
//! End-to-end tests from a raw specification document to the renderer-facing model.
//!
mod common;
use common::*;
use katachi::prelude::*;
use serde_json::{Value, json};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_postgres_form_end_to_end() {
        let model = compile(&postgres_spec());
        assert_eq!(model.title.as_deref(), Some("Postgres Source Spec"));
        assert!(model.diagnostics.is_empty());

        let groups: Vec<(&str, Option<&str>)> = model
            .groups
            .iter()
            .map(|g| (g.id.as_str(), g.title.as_deref()))
            .collect();
        assert_eq!(
            groups,
            vec![("connection", Some("Connection")), ("advanced", Some("Advanced"))]
        );

        let connection: Vec<&str> = model.groups[0].fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            connection,
            vec!["host", "port", "database", "username", "password", "ssl_mode"]
        );
        assert!(model.find("jdbc_url_params").is_none());

        let port = model.find("port").unwrap();
        assert_eq!(port.field_type, SchemaType::Integer);
        assert_eq!(port.default, Some(json!(5432)));
        assert_eq!(port.minimum, Some(0.0));
        assert_eq!(port.maximum, Some(65536.0));
        assert!(port.required);

        let cert = model.find("ssl_mode.verify-ca.ca_certificate").unwrap();
        assert!(cert.required && cert.secret && cert.multiline);

        let replication = model.find("replication_method").unwrap();
        let titles: Vec<&str> = replication.enum_options.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Scan Changes with User Defined Cursor",
                "Read Changes using Write-Ahead Log (CDC)",
            ]
        );
        let cdc = replication.option_for(&json!("CDC")).unwrap();
        assert_eq!(cdc.discriminant_key, "method");
        assert!(replication.option_for(&json!("Xmin")).is_none());

        let plugin = model.find("replication_method.CDC.plugin").unwrap();
        assert_eq!(plugin.options, vec![json!("pgoutput")]);
        assert_eq!(plugin.default, Some(json!("pgoutput")));
    }

    #[test]
    fn test_model_json_uses_renderer_keys() {
        let model = compile(&postgres_spec());
        let json: Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();

        assert!(json.get("diagnostics").is_none());
        let host = &json["groups"][0]["fields"][0];
        assert_eq!(host["id"], json!("host"));
        assert_eq!(host["type"], json!("string"));
        assert_eq!(host["path"], json!(["host"]));

        let ssl = &json["groups"][0]["fields"][5];
        assert_eq!(ssl["kind"], json!("union"));
        assert_eq!(ssl["enumValues"], json!(["disable", "require", "verify-ca"]));
        assert_eq!(ssl["enumOptions"][0]["discriminantKey"], json!("mode"));
        assert_eq!(ssl["subFields"][0]["parentValue"], json!("verify-ca"));
        assert!(ssl.get("value").is_none());
    }

    #[test]
    fn test_edit_round_trip_through_json() {
        let compiler = FormCompiler::new(&postgres_spec()).expect("Failed to create compiler");
        let config = json!({
            "host": "db.internal",
            "ssl_mode": { "mode": "require" },
            "replication_method": {
                "method": "CDC",
                "plugin": "pgoutput",
                "replication_slot": "airbyte_slot",
                "publication": "airbyte_pub"
            }
        });

        let session = compiler.compile_for_edit(&config);
        assert!(session.report.is_empty(), "{:?}", session.report);

        let json: Value = serde_json::from_str(&session.model.to_json().unwrap()).unwrap();
        let replication = &json["groups"][1]["fields"][0];
        assert_eq!(replication["value"], json!("CDC"));
        let slot = replication["subFields"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["id"] == json!("replication_method.CDC.replication_slot"))
            .unwrap();
        assert_eq!(slot["value"], json!("airbyte_slot"));
    }

    #[test]
    fn test_string_documents_and_envelopes() {
        let document = json!({ "connectionSpecification": ssl_mode_spec() }).to_string();
        let compiler = FormCompiler::new(document.as_str()).expect("Failed to create compiler");
        assert_eq!(top_level_ids(&compiler.compile()), vec!["ssl_mode"]);
        assert_eq!(compiler.specification().root.properties.len(), 1);

        let error = FormCompiler::new("{ not json").err().unwrap();
        assert!(matches!(error, SchemaError::JsonParseError(_)));
    }

    #[test]
    fn test_malformed_properties_do_not_abort() {
        let spec = json!({
            "properties": {
                "host": { "type": "string" },
                "broken": { "oneOf": [{ "properties": { "title": { "type": "string" } } }] }
            }
        });
        let model = compile(&spec);

        assert_eq!(top_level_ids(&model), vec!["host"]);
        assert_eq!(
            model.diagnostics,
            vec![SchemaError::MalformedSchema {
                path: "broken".to_string(),
                kind: MalformedKind::MissingDiscriminant { branch_index: 0 },
            }]
        );
    }

    #[test]
    fn test_engine_config_from_json() {
        let config = EngineConfig::from_json(r#"{ "order_strategy": "declaration_walk" }"#)
            .expect("Failed to read engine config");
        assert_eq!(config.order_strategy, OrderStrategy::DeclarationWalk);
        assert_eq!(config.default_group_id, "default");
        assert_eq!(config.nested_default_order, 999);

        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
        assert!(EngineConfig::from_json(r#"{ "order_strategy": "random" }"#).is_err());
    }

    #[test]
    fn test_builder_settings_apply() {
        let spec = ConnectorSpecification::from_value(&ssl_mode_spec()).unwrap();
        let compiler = FormCompiler::builder(spec)
            .with_default_group("general")
            .with_order_strategy(OrderStrategy::DeclarationWalk)
            .build();

        assert_eq!(compiler.config().order_strategy, OrderStrategy::DeclarationWalk);
        let model = compiler.compile();
        assert_eq!(model.groups.len(), 1);
        assert_eq!(model.groups[0].id, "general");
        assert_eq!(model.find("ssl_mode").unwrap().order, 0);
    }

    #[test]
    fn test_custom_order_defaults() {
        let config = EngineConfig {
            top_level_default_order: 50,
            ..EngineConfig::default()
        };
        let spec = ConnectorSpecification::from_value(&json!({
            "properties": {
                "unordered": { "type": "string" },
                "pinned": { "type": "string", "order": 10 }
            }
        }))
        .unwrap();
        let model = FormCompiler::builder(spec).with_config(config).build().compile();

        assert_eq!(top_level_ids(&model), vec!["pinned", "unordered"]);
        assert_eq!(model.find("unordered").unwrap().order, 50);
    }
}
