use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pypi_versions::config::{Config, LOG_ENV, LOG_FILE_NAME, LogConfig, data_dir};
use pypi_versions::output::{OutputFormat, RenderOptions, render};
use pypi_versions::query::tokens::{disambiguate, packages};
use pypi_versions::query::{QueryKind, QueryOptions, QueryOutcome, QueryRequest, QueryResolver};
use pypi_versions::version::channel::ChannelFilter;
use pypi_versions::version::registries::PypiRegistry;

const ROOT_EXAMPLES: &str = "\
Examples:
  # Display all available versions of pandas
  ppv pandas

  # Display only the latest stable version of pandas
  ppv pandas --latest

  # Include pre-release versions when displaying all versions
  ppv pandas --prerelease

  # Display available versions for multiple packages
  ppv pandas requests numpy

  # Display metadata of pandas
  ppv metadata pandas";

const DEPS_EXAMPLES: &str = "\
If the version is omitted, 'latest' is assumed. A token that looks like a
version is always bound to the package before it; use NAME@VERSION to bind
a version explicitly.

Examples:
  # Display dependencies of pandas version 1.5.3
  ppv deps pandas 1.5.3

  # Mixed version specifications
  ppv deps pandas 1.5.3 requests numpy latest

  # Explicit binding
  ppv deps pandas@1.5.3 requests@latest";

#[derive(Parser)]
#[command(name = "ppv")]
#[command(
    version,
    about = "Fetch available versions and metadata of packages from PyPI",
    after_help = ROOT_EXAMPLES,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    versions: VersionsArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Display available versions of the given packages
    #[command(mut_arg("packages", |arg| arg.required(true)))]
    Versions(VersionsArgs),

    /// Display dependencies of specific versions of packages
    #[command(after_help = DEPS_EXAMPLES)]
    Deps(DepsArgs),

    /// Display detailed metadata of the given packages
    Metadata(MetadataArgs),
}

#[derive(Args)]
struct VersionsArgs {
    /// Package names
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    /// Include pre-release versions
    #[arg(short, long)]
    prerelease: bool,

    /// Show only the latest version
    #[arg(short, long)]
    latest: bool,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

#[derive(Args)]
struct DepsArgs {
    /// Package names, each optionally followed by a version or 'latest'
    #[arg(required = true, value_name = "PACKAGE [VERSION]")]
    tokens: Vec<String>,

    /// Output dependencies in JSON format
    #[arg(short, long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

#[derive(Args)]
struct MetadataArgs {
    /// Package names
    #[arg(required = true, value_name = "PACKAGE")]
    packages: Vec<String>,

    /// Include package description in the output
    #[arg(short, long)]
    description: bool,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,

    #[command(flatten)]
    registry: RegistryArgs,
}

#[derive(Args)]
struct RegistryArgs {
    /// Base URL of the package index [default: from config, else https://pypi.org]
    #[arg(long, value_name = "URL")]
    index_url: Option<String>,

    /// Number of packages fetched at once
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,
}

/// Everything one run needs, with flags merged over the configuration file
struct Invocation {
    kind: QueryKind,
    requests: Vec<QueryRequest>,
    options: QueryOptions,
    render: RenderOptions,
    index_url: String,
}

impl Invocation {
    fn new(command: Command, config: &Config) -> Self {
        let (kind, requests, options, render, registry) = match command {
            Command::Versions(args) => (
                QueryKind::Versions,
                packages(&args.packages),
                QueryOptions {
                    channel: ChannelFilter::new(args.prerelease || config.include_prerelease),
                    latest_only: args.latest,
                    ..Default::default()
                },
                RenderOptions {
                    format: OutputFormat::from_json_flag(args.json),
                    show_description: false,
                },
                args.registry,
            ),
            Command::Deps(args) => (
                QueryKind::Dependencies,
                disambiguate(&args.tokens),
                QueryOptions::default(),
                RenderOptions {
                    format: OutputFormat::from_json_flag(args.json),
                    show_description: false,
                },
                args.registry,
            ),
            Command::Metadata(args) => (
                QueryKind::Metadata,
                packages(&args.packages),
                QueryOptions::default(),
                RenderOptions {
                    format: OutputFormat::from_json_flag(args.json),
                    show_description: args.description,
                },
                args.registry,
            ),
        };

        Self {
            kind,
            requests,
            options: QueryOptions {
                concurrency: registry.concurrency.unwrap_or(config.concurrency),
                ..options
            },
            render,
            index_url: registry
                .index_url
                .unwrap_or_else(|| config.index_url.clone()),
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let _guard = init_logging(&config.log);

    let command = cli.command.unwrap_or(Command::Versions(cli.versions));
    let invocation = Invocation::new(command, &config);

    if invocation.requests.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let registry = PypiRegistry::with_timeout(
        invocation.index_url,
        Duration::from_millis(config.timeout_ms),
    )
    .context("Failed to create HTTP client")?;
    let resolver = QueryResolver::new(Arc::new(registry), invocation.options);

    let outcomes = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(resolver.run(invocation.kind, invocation.requests));

    render(&outcomes, &invocation.render, &mut io::stdout().lock())
        .context("Failed to write output")?;

    if outcomes.iter().all(QueryOutcome::is_success) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Log to a file in the data directory so log lines never mix with query output.
///
/// Falls back to stderr when the data directory cannot be created.
fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));
    let log_dir = data_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .init();
        warn!("Failed to create data directory {:?}: {}", log_dir, e);
        return None;
    }

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME));
    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_writer(writer.clone()));
    let text_layer = (!config.json).then(|| fmt::layer().with_ansi(false).with_writer(writer));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    Some(guard)
}
