use clap::{Parser, ValueEnum};
use katachi::prelude::*;
use log::{info, warn};
use std::fs;
use std::time::Instant;

/// Output format for the compiled form.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Indented, human-readable outline
    Outline,
    /// The renderer-facing JSON model
    Json,
}

/// CLI-side mirror of `OrderStrategy` for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderCli {
    Declared,
    DeclarationWalk,
}

/// Compiles a connector specification into the form model a renderer receives
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the connector specification JSON file
    spec_path: String,

    /// Optional path to a saved configuration to re-open in edit mode
    #[arg(short = 'e', long)]
    edit: Option<String>,

    /// Optional path to an engine config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the ordering strategy from the config file
    #[arg(long, value_enum)]
    order: Option<OrderCli>,

    /// How to print the result
    #[arg(short, long, value_enum, default_value = "outline")]
    format: OutputFormat,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading ---
    let spec_json = read_file(&cli.spec_path, "specification");
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json(&read_file(path, "engine config"))
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid engine config '{}': {}", path, e))),
        None => EngineConfig::default(),
    };
    if let Some(order) = cli.order {
        config.order_strategy = match order {
            OrderCli::Declared => OrderStrategy::Declared,
            OrderCli::DeclarationWalk => OrderStrategy::DeclarationWalk,
        };
    }
    let existing = cli.edit.as_ref().map(|path| {
        serde_json::from_str::<serde_json::Value>(&read_file(path, "configuration"))
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration '{}': {}", path, e)))
    });

    // --- 2. Validation ---
    let spec = ConnectorSpecification::from_json(&spec_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Specification rejected: {}", e)));
    for diagnostic in &spec.diagnostics {
        warn!("{}", diagnostic);
    }

    // --- 3. Compilation ---
    let compile_start = Instant::now();
    let compiler = FormCompiler::builder(spec).with_config(config).build();
    let (model, report) = match &existing {
        Some(existing) => {
            let session = compiler.compile_for_edit(existing);
            (session.model, session.report)
        }
        None => (compiler.compile(), Vec::new()),
    };
    let compile_duration = compile_start.elapsed();

    // --- 4. Output ---
    match cli.format {
        OutputFormat::Outline => print!("{}", OutlineFormatter::format(&model.groups)),
        OutputFormat::Json => match model.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with_error(&format!("Could not serialize form model: {}", e)),
        },
    }

    for entry in &report {
        warn!("{}", entry);
    }
    info!(
        "Compiled {} groups / {} fields ({} skipped, {} unplaced values) in {:?} (total {:?})",
        model.groups.len(),
        model.fields().count(),
        model.diagnostics.len(),
        report.len(),
        compile_duration,
        total_start.elapsed()
    );
}

fn read_file(path: &str, what: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read {} file '{}': {}", what, path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
