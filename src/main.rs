#![forbid(unsafe_code)]

mod config;
mod options;

use std::path::Path;

use anyhow::{Context, Result};
use structopt::StructOpt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use typehint_annotator::{HoverType, TypeMapBuilder};
use typehint_schema::Schema;

use config::Config;
use options::Options;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("info"))
                .unwrap(),
        )
        .init();
}

fn load_schema(path: &Path) -> Result<Schema> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load schema file '{}'.", path.display()))?;
    let schema = if path.extension().map_or(false, |ext| ext == "json") {
        Schema::from_introspection(&source)
    } else {
        Schema::parse(&source)
    };
    schema.with_context(|| format!("Failed to parse schema file '{}'.", path.display()))
}

fn main() -> Result<()> {
    let options: Options = Options::from_args();
    init_tracing();

    let config = Config::load(&options.config)?;
    let schema_path = options
        .schema
        .or(config.schema)
        .context("No schema file given, use `--schema` or the `schema` config key.")?;
    let schema = load_schema(&schema_path)?;

    let query = std::fs::read_to_string(&options.query)
        .with_context(|| format!("Failed to load query file '{}'.", options.query.display()))?;
    let document = parser::parse_query(&query)
        .with_context(|| format!("Failed to parse query file '{}'.", options.query.display()))?;

    let mut builder = TypeMapBuilder::new(&schema, &document).strict(options.strict || config.strict);
    if let Some(operation) = options.operation {
        builder = builder.operation_name(operation);
    }
    let annotations = builder.build()?;
    tracing::info!(
        fields = annotations.types.len(),
        unresolved_fragments = annotations.unresolved_fragments.len(),
        "Type map built."
    );

    let output = match &options.path {
        Some(path) => {
            let path = path.split('.').collect::<Vec<_>>();
            serde_json::to_value(
                annotations
                    .types
                    .lookup(&path)
                    .and_then(HoverType::from_node),
            )?
        }
        None => serde_json::to_value(&annotations.types)?,
    };

    let output = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", output);
    Ok(())
}
