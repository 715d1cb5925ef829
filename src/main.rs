use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yamlconf::file::loader::{load_config_file, load_config_from_stdin};
use yamlconf::settings::{ParserKind, Settings};
use yamlconf::{Config, ConfigTree};

/// yamlconf - query YAML configuration documents by dotted key
#[derive(Parser)]
#[command(name = "yamlconf")]
#[command(version)]
#[command(about = "Query YAML configuration documents by dotted key", long_about = None)]
struct Cli {
    /// Key in dotted notation, e.g. services.names[1].first
    key: String,

    /// YAML file to read (omit or use '-' to read stdin)
    file: Option<String>,

    /// How to read the value
    #[arg(short = 'a', long = "as", value_enum, default_value_t = ValueKind::String)]
    kind: ValueKind,

    /// YAML backend (overrides the settings file)
    #[arg(short, long, value_enum)]
    parser: Option<ParserKind>,

    /// Substitute ${VAR:-default} scalars from the environment
    #[arg(short, long)]
    env: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ValueKind {
    String,
    Int,
    List,
}

impl ValueKind {
    fn describe(self) -> &'static str {
        match self {
            ValueKind::String => "scalar",
            ValueKind::Int => "integer",
            ValueKind::List => "list of scalars",
        }
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("yamlconf={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Renders the value under `key`, or `None` when it is absent or mismatched.
fn render(config: &Config, key: &str, kind: ValueKind) -> Option<String> {
    match kind {
        ValueKind::String => config.get_string(key),
        ValueKind::Int => config.get_int(key).map(|value| value.to_string()),
        ValueKind::List => {
            let items = config.get_list::<ConfigTree>(key)?;
            let lines = items
                .iter()
                .map(|item| item.as_scalar().filter(|s| !s.is_null()).map(ToString::to_string))
                .collect::<Option<Vec<_>>>()?;
            Some(lines.join("\n"))
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (mut settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };
    if let Some(parser) = cli.parser {
        settings.parser = parser;
    }
    if cli.env {
        settings.interpolate_env = true;
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    init_logging(&settings.log_level);
    if let Some(err) = settings_error {
        tracing::warn!("ignoring settings: {:#}", err);
    }

    let parser = settings.document_parser();
    let config = match cli.file.as_deref() {
        None | Some("-") => load_config_from_stdin(parser.as_ref())?,
        Some(path) => load_config_file(path, parser.as_ref())
            .with_context(|| format!("Failed to load {}", path))?,
    };

    match render(&config, &cli.key, cli.kind) {
        Some(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            match config.lookup(&cli.key) {
                Err(err) => eprintln!("yamlconf: {}: {}", cli.key, err),
                Ok(node) => eprintln!(
                    "yamlconf: {}: expected {}, found {}",
                    cli.key,
                    cli.kind.describe(),
                    node.kind()
                ),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> Result<ExitCode> {
    run(Cli::parse())
}
