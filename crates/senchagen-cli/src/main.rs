use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use senchagen_core::{derive_many_to_many, Error as CoreError, Schema};
use senchagen_export::{
    BodyStyle, ExportConfig, ExportEngine, ExportError, ExportOptions, ModelFormat, TableOutcome,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid schema file: {0}")]
    SchemaFile(#[from] serde_json::Error),
    #[error("invalid config file: {0}")]
    ConfigFile(#[from] toml::de::Error),
}

#[derive(Parser, Debug)]
#[command(name = "senchagen", version, about = "Sencha ExtJS model generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate model files from a schema snapshot.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Path to the schema snapshot (schema.json).
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
    /// Optional TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory for generated files.
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Target dialect.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Body style for the ExtJS4 dialect.
    #[arg(long, value_enum)]
    body_style: Option<BodyStyleArg>,
    /// Emit validation descriptors.
    #[arg(long)]
    validation: bool,
    /// Emit the REST proxy block.
    #[arg(long)]
    proxy: bool,
    /// Emit idProperty from the primary key.
    #[arg(long)]
    id_property: bool,
    /// Generate files for pure junction tables too.
    #[arg(long)]
    no_skip_many_to_many: bool,
    /// Namespace prefix for model references.
    #[arg(long)]
    class_prefix: Option<String>,
    /// Base class generated models extend.
    #[arg(long)]
    parent_class: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Extjs4,
    Extjs3,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BodyStyleArg {
    Nested,
    Statements,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Export(args) => run_export(args),
    }
}

fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let mut schema: Schema = serde_json::from_str(&std::fs::read_to_string(&args.schema)?)?;

    // Explicit links in the snapshot win; otherwise derive them from
    // the junction tables.
    if schema.tables.iter().all(|table| table.many_to_many.is_empty()) {
        derive_many_to_many(&mut schema);
    }

    let mut config = match &args.config {
        Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
        None => ExportConfig::default(),
    };
    apply_overrides(&mut config, &args);

    info!(schema = %args.schema.display(), out = %args.out.display(), "starting export");

    let engine = ExportEngine::new(ExportOptions {
        out_dir: args.out.clone(),
    });
    let result = engine.run(&schema, &config)?;

    let skipped_external = count_outcome(&result.report.tables, TableOutcome::External);
    let skipped_m2m = count_outcome(&result.report.tables, TableOutcome::ManyToMany);
    println!(
        "exported {} model(s) to {} ({} external, {} many-to-many skipped)",
        result.report.files_written,
        result.out_dir.display(),
        skipped_external,
        skipped_m2m,
    );

    Ok(())
}

fn apply_overrides(config: &mut ExportConfig, args: &ExportArgs) {
    if let Some(format) = args.format {
        config.format = match format {
            FormatArg::Extjs4 => ModelFormat::ExtJs4,
            FormatArg::Extjs3 => ModelFormat::ExtJs3,
        };
    }
    if let Some(style) = args.body_style {
        config.body_style = match style {
            BodyStyleArg::Nested => BodyStyle::Nested,
            BodyStyleArg::Statements => BodyStyle::Statements,
        };
    }
    if args.validation {
        config.generate_validation = true;
    }
    if args.proxy {
        config.generate_proxy = true;
    }
    if args.id_property {
        config.add_id_property = true;
    }
    if args.no_skip_many_to_many {
        config.skip_many_to_many = false;
    }
    if let Some(prefix) = &args.class_prefix {
        config.class_prefix = prefix.clone();
    }
    if let Some(parent) = &args.parent_class {
        config.parent_class = parent.clone();
    }
}

fn count_outcome(tables: &[senchagen_export::TableReport], outcome: TableOutcome) -> usize {
    tables.iter().filter(|entry| entry.outcome == outcome).count()
}
