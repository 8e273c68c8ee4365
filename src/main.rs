mod handlers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use maintlog::engine::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maintlog", version, about = "Know what your car needs next")]
struct Cli {
    /// State directory (holds state.db and optional catalog.json)
    #[arg(long, global = true, env = "MAINTLOG_DIR")]
    dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Initialize the maintenance log
    Init {
        /// Also write the built-in schedule to catalog.json for editing
        #[arg(long)]
        catalog: bool,
    },
    /// Show or set the current odometer reading
    Odometer {
        value: Option<f64>,
    },
    /// Record a completed service
    Log {
        task: String,
        /// Odometer at service time (defaults to the stored reading)
        #[arg(long, short = 'd')]
        distance: Option<f64>,
        /// Service date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Strict mode: require the exact task key (no fuzzy matching)
        #[arg(long)]
        strict: bool,
    },
    /// Show tasks ranked by urgency
    Due {
        /// Evaluate as of this date instead of today
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the maintenance catalog
    Tasks,
    /// Show recorded services, newest first
    History {
        /// Limit to one task
        task: Option<String>,
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Delete a mistaken service record
    Undo {
        id: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::new(cli.dir);

    match cli.command {
        Commands::Init { .. }
        | Commands::Odometer { value: Some(_) }
        | Commands::Log { .. }
        | Commands::Undo { .. } => dispatch_write_ops(&config, cli.command),
        Commands::Odometer { value: None }
        | Commands::Due { .. }
        | Commands::Tasks
        | Commands::History { .. } => dispatch_read_ops(&config, cli.command),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch_write_ops(config: &Config, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init { catalog } => handlers::init::handle(config, catalog),
        Commands::Odometer { value: Some(v) } => handlers::odometer::set(config, v),
        Commands::Log {
            task,
            distance,
            date,
            strict,
        } => handlers::log::handle(config, &task, distance, date.as_deref(), strict),
        Commands::Undo { id } => handlers::undo::handle(config, id),
        _ => unreachable!("Invalid write command dispatch"),
    }
}

fn dispatch_read_ops(config: &Config, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Odometer { value: None } => handlers::odometer::show(config),
        Commands::Due { date, json } => handlers::due::handle(config, date.as_deref(), json),
        Commands::Tasks => handlers::tasks::handle(config),
        Commands::History { task, limit } => handlers::history::handle(config, task.as_deref(), limit),
        _ => unreachable!("Invalid read command dispatch"),
    }
}
