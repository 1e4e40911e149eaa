use clap::Parser;
use rand::Rng;
use serde_json::{Map, Value, json};
use std::fs;

/// A CLI tool to generate random connector specifications for the Katachi engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_spec.json")]
    output: String,

    /// Number of top-level properties
    #[arg(long, default_value_t = 40)]
    properties: usize,

    /// Maximum nesting depth for unions, arrays and nested objects
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Number of declared groups to spread top-level properties over
    #[arg(long, default_value_t = 3)]
    groups: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.groups == 0 {
        eprintln!("Error: --groups must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating connector specification ({} properties, depth {}, {} groups)...",
        cli.properties, cli.depth, cli.groups
    );

    let groups: Vec<Value> = (0..cli.groups)
        .map(|i| json!({ "id": format!("group_{}", i), "title": format!("Section {}", i + 1) }))
        .collect();

    let mut properties = Map::new();
    let mut required = Vec::new();
    for i in 0..cli.properties {
        let key = format!("prop_{}", i);
        let mut property = generate_property(&mut rng, cli.depth, i);
        if let Some(object) = property.as_object_mut() {
            object.insert(
                "group".to_string(),
                json!(format!("group_{}", rng.random_range(0..cli.groups))),
            );
        }
        if rng.random_bool(0.3) {
            required.push(json!(key.clone()));
        }
        properties.insert(key, property);
    }

    let spec = json!({
        "connectionSpecification": {
            "title": "Generated Source Spec",
            "type": "object",
            "required": required,
            "groups": groups,
            "properties": properties,
        }
    });

    fs::write(&cli.output, serde_json::to_string_pretty(&spec)?)?;
    println!("Successfully generated and saved specification to '{}'", cli.output);
    Ok(())
}

/// Generates one property, recursing into unions, arrays and objects while depth remains.
fn generate_property(rng: &mut impl Rng, depth: usize, index: usize) -> Value {
    let roll = if depth == 0 { 0 } else { rng.random_range(0..10) };
    let mut property = match roll {
        7 => generate_union(rng, depth - 1),
        8 => json!({
            "type": "array",
            "items": { "type": "object", "properties": generate_object(rng, depth - 1, 3) },
        }),
        9 => json!({ "type": "object", "properties": generate_object(rng, depth - 1, 3) }),
        _ => generate_leaf(rng),
    };

    if let Some(object) = property.as_object_mut() {
        object.insert("title".to_string(), json!(format!("Property {}", index)));
        if rng.random_bool(0.7) {
            object.insert("order".to_string(), json!(rng.random_range(0..20)));
        }
        if rng.random_bool(0.05) {
            object.insert("airbyte_hidden".to_string(), json!(true));
        }
    }
    property
}

fn generate_leaf(rng: &mut impl Rng) -> Value {
    match rng.random_range(0..6) {
        0 => json!({ "type": "integer", "minimum": 0, "maximum": 65536 }),
        1 => json!({ "type": "boolean", "default": false }),
        2 => json!({ "type": "string", "airbyte_secret": true }),
        3 => json!({ "type": "string", "enum": ["alpha", "beta", "gamma"] }),
        4 => json!({ "type": "array", "items": { "type": "string" } }),
        _ => json!({ "type": "string", "examples": ["example"] }),
    }
}

fn generate_object(rng: &mut impl Rng, depth: usize, max: usize) -> Value {
    let count = rng.random_range(1..=max);
    let properties: Map<String, Value> = (0..count)
        .map(|i| (format!("field_{}", i), generate_property(rng, depth, i)))
        .collect();
    Value::Object(properties)
}

fn generate_union(rng: &mut impl Rng, depth: usize) -> Value {
    let branch_count = rng.random_range(2..=4);
    let branches: Vec<Value> = (0..branch_count)
        .map(|b| {
            let mut properties = match generate_object(rng, depth, 3) {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            properties.insert("kind".to_string(), json!({ "type": "string", "const": format!("variant_{}", b) }));
            json!({ "title": format!("Variant {}", b), "properties": properties })
        })
        .collect();
    json!({ "type": "object", "oneOf": branches })
}
