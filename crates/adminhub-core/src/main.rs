//! AdminHub CLI
//!
//! Command-line interface for the AdminHub dashboard.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use adminhub::actions::{Action, Backend, SimulatedBackend};
use adminhub::config::LoggingConfig;
use adminhub::export::{to_csv, ExportFormat, ExportOutcome, ExportTarget, Exporter};
use adminhub::models::ClientRecord;
use adminhub::reports::{range_from_bounds, ReportsView};
use adminhub::roster::{Roster, RosterQuery, SortDirection, SortField, StatusFilter};
use adminhub::shell::Route;
use adminhub::Config;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// AdminHub - client, report and team administration
#[derive(Parser)]
#[command(name = "adminhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ADMINHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (for commands that support it)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal dashboard
    #[cfg(feature = "tui")]
    Dashboard {
        /// Refresh rate in milliseconds (overrides the configuration)
        #[arg(long)]
        refresh: Option<u64>,
    },

    /// Query and export clients
    Clients {
        #[command(subcommand)]
        command: ClientsCommands,
    },

    /// Query and export reports
    Reports {
        #[command(subcommand)]
        command: ReportsCommands,
    },

    /// Show the route table
    Routes,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether the command takes over the terminal
    fn is_interactive(&self) -> bool {
        match self {
            #[cfg(feature = "tui")]
            Self::Dashboard { .. } => true,
            _ => false,
        }
    }
}

#[derive(Subcommand)]
enum ClientsCommands {
    /// List clients
    List {
        #[command(flatten)]
        view: ClientView,
    },

    /// Export clients to CSV
    Export {
        #[command(flatten)]
        view: ClientView,

        /// Output directory (the configured export directory if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ClientView {
    /// Case-insensitive text matched against name and email
    #[arg(long)]
    search: Option<String>,

    /// Status filter (all, Active, Inactive, Pending)
    #[arg(long, default_value = "all")]
    status: StatusFilter,

    /// Sort column (name, email, status, joinDate)
    #[arg(long, default_value = "name")]
    sort: SortField,

    /// Sort descending
    #[arg(long)]
    desc: bool,
}

impl ClientView {
    fn query(&self) -> RosterQuery {
        let direction = if self.desc { SortDirection::Desc } else { SortDirection::Asc };
        RosterQuery::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_status(self.status)
            .with_sort(self.sort, direction)
    }
}

#[derive(Subcommand)]
enum ReportsCommands {
    /// List reports
    List {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Export reports to CSV
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Output directory (the configured export directory if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct RangeArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    fn view(&self) -> ReportsView {
        let mut view = ReportsView::default();
        view.set_range(range_from_bounds(self.from, self.to));
        view
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging; the guard flushes the log file on exit
    let _guard = match init_logging(&config.logging, cli.verbose, cli.command.is_interactive()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Execute command
    let result = match cli.command {
        #[cfg(feature = "tui")]
        Commands::Dashboard { refresh } => run_dashboard(config, refresh).await,
        Commands::Clients { command } => run_clients(config, command, cli.format).await,
        Commands::Reports { command } => run_reports(config, command, cli.format).await,
        Commands::Routes => {
            print_routes();
            Ok(())
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Install the global subscriber.
///
/// Interactive commands log to a daily file so output does not tear the
/// screen; everything else logs to stderr, keeping stdout for data.
fn init_logging(
    config: &LoggingConfig,
    verbose: bool,
    to_file: bool,
) -> anyhow::Result<Option<WorkerGuard>> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = config.format == "json";

    if to_file {
        let directory = config.log_directory();
        std::fs::create_dir_all(&directory)?;
        let appender = tracing_appender::rolling::daily(&directory, "adminhub.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false);
        if json {
            builder.json().init();
        } else {
            builder.init();
        }
        return Ok(Some(guard));
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(None)
}

fn backend(config: &Config, output: Option<PathBuf>) -> Arc<dyn Backend> {
    let directory = output.unwrap_or_else(|| config.export.directory.clone());
    Arc::new(SimulatedBackend::new(config.actions.latency(), Exporter::new(directory)))
}

#[cfg(feature = "tui")]
async fn run_dashboard(config: Config, refresh: Option<u64>) -> anyhow::Result<()> {
    use adminhub::tui::App;
    use std::time::Duration;

    let refresh_rate = refresh.map_or_else(|| config.tui.refresh_rate(), Duration::from_millis);
    info!(refresh_ms = refresh_rate.as_millis() as u64, "Starting dashboard");

    let mut app = App::new()
        .with_refresh_rate(refresh_rate)
        .with_toast_ttl(config.tui.toast_ttl());
    app.run(backend(&config, None)).await?;

    Ok(())
}

async fn run_clients(
    config: Config,
    command: ClientsCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let roster = Roster::seeded();

    match command {
        ClientsCommands::List { view } => {
            let clients = roster.project(&view.query());
            print_clients(&clients, format)?;
        }
        ClientsCommands::Export { view, output } => {
            let clients = roster.project(&view.query());
            let action = Action::export(&clients, ExportTarget::Clients, ExportFormat::Csv)?;
            perform_export(&config, output, action).await?;
        }
    }
    Ok(())
}

async fn run_reports(
    config: Config,
    command: ReportsCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        ReportsCommands::List { range } => {
            let view = range.view();
            let reports = view.filtered();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
                OutputFormat::Csv => println!("{}", to_csv(&reports)?),
                OutputFormat::Text => {
                    println!("Total Reports: {} ({})", reports.len(), view.period_caption());
                    println!();
                    for report in &reports {
                        let kind = report.kind.to_string();
                        println!("{:<24} {:<12} {}", report.title, kind, report.date);
                        println!("    {}", report.summary);
                    }
                }
            }
        }
        ReportsCommands::Export { range, output } => {
            let reports = range.view().filtered();
            let action = Action::export(&reports, ExportTarget::Reports, ExportFormat::Csv)?;
            perform_export(&config, output, action).await?;
        }
    }
    Ok(())
}

async fn perform_export(
    config: &Config,
    output: Option<PathBuf>,
    action: Action,
) -> anyhow::Result<()> {
    let outcome = backend(config, output).perform(action).await?;
    info!(message = %outcome.message, "Export finished");

    match outcome.export {
        Some(ExportOutcome::Written { path, rows }) => {
            println!("{} ({rows} rows written to {})", outcome.message, path.display());
        }
        _ => println!("{}", outcome.message),
    }
    Ok(())
}

fn print_clients(clients: &[ClientRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(clients)?),
        OutputFormat::Csv => println!("{}", to_csv(clients)?),
        OutputFormat::Text => {
            if clients.is_empty() {
                println!("No clients found");
                return Ok(());
            }
            println!("{:<4} {:<24} {:<28} {:<10} JOINED", "ID", "NAME", "EMAIL", "STATUS");
            for client in clients {
                println!(
                    "{:<4} {:<24} {:<28} {:<10} {}",
                    client.id,
                    client.name,
                    client.email,
                    client.status.as_str(),
                    client.join_date
                );
            }
        }
    }
    Ok(())
}

fn print_routes() {
    for route in Route::ALL {
        println!("{:<20} {}", route.path(), route.title());
    }
    println!("{:<20} {}", Route::NotFound.path(), Route::NotFound.title());
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "adminhub", &mut io::stdout());
}
