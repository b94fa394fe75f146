//! querysh - completion console for a fluent SQL query-builder DSL.
//!
//! Loads a schema, wires the completion engine into a reedline editor, and
//! runs the interactive loop.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use querysh::cli::CliInterface;
use querysh::engine::CompletionEngine;
use querysh::error::Result;
use querysh::repl::ConsoleEngine;
use querysh::schema::Schema;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let (schema, schema_name) = load_schema(&cli)?;
    cli.print_banner(&schema_name, schema.tables.len());

    let engine = Arc::new(CompletionEngine::new(schema));
    let mut console = ConsoleEngine::new(engine, cli.config(), schema_name)?;
    console.run()
}

/// Initialize tracing from `RUST_LOG`, falling back to the CLI/config
/// level.
fn initialize_logging(cli: &CliInterface) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the schema file named on the command line, or the demo schema.
fn load_schema(cli: &CliInterface) -> Result<(Schema, String)> {
    match &cli.args().schema {
        Some(path) => {
            let schema = Schema::load(path)?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "schema".to_string());
            Ok((schema, name))
        }
        None => Ok((Schema::demo(), "demo".to_string())),
    }
}
