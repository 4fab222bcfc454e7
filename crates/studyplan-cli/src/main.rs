//! studyplan CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::Session;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Adaptive daily study-time planner")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Plan file (CSV), overrides `data_file` from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Total daily hours for this invocation, overrides the config
    #[arg(long, global = true)]
    hours: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a plan with example subjects
    ///
    /// Honours --config, --data and --hours for the files it writes.
    Init,

    /// Add a subject
    Add {
        /// Subject name (no commas)
        #[arg(long)]
        name: String,

        /// Difficulty, 1-10
        #[arg(long)]
        difficulty: i64,

        /// Importance, 1-10
        #[arg(long)]
        importance: i64,

        /// Initial performance score, 0-100
        #[arg(long, default_value = "100.0")]
        perf: f64,
    },

    /// Remove a subject
    Remove {
        /// Subject name
        #[arg(long)]
        name: String,
    },

    /// List subjects
    List {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show or persist the total daily hours
    Hours {
        /// New budget to write into the config file
        #[arg(long)]
        set: Option<f64>,
    },

    /// Generate a fresh schedule from subject weights
    Schedule {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the current allocations without recomputing
    Show {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Record a performance score for a subject
    Record {
        /// Subject name
        #[arg(long)]
        name: String,

        /// Score, 0-100
        #[arg(long)]
        score: f64,
    },

    /// Rebalance current allocations from performance scores
    Adjust {
        /// Scores below this get more time
        #[arg(long)]
        low: Option<f64>,

        /// Scores above this get less time
        #[arg(long)]
        high: Option<f64>,

        /// Multiplier for underperforming subjects
        #[arg(long)]
        boost: Option<f64>,

        /// Multiplier for strong subjects
        #[arg(long)]
        reduce: Option<f64>,
    },

    /// Menu-driven session over stdin/stdout
    Interactive,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("studyplan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        data,
        hours,
        command,
    } = cli;
    let session = || Session::open(config.clone(), data.clone(), hours);

    match command {
        Commands::Init => commands::init::execute(config.as_deref(), data.as_deref(), hours),
        Commands::Add {
            name,
            difficulty,
            importance,
            perf,
        } => commands::subjects::add(&session()?, &name, difficulty, importance, perf),
        Commands::Remove { name } => commands::subjects::remove(&session()?, &name),
        Commands::List { format } => commands::subjects::list(&session()?, &format),
        Commands::Hours { set } => commands::hours::execute(&session()?, set),
        Commands::Schedule { format } => commands::schedule::generate(&session()?, &format),
        Commands::Show { format } => commands::schedule::show(&session()?, &format),
        Commands::Record { name, score } => {
            commands::subjects::record(&session()?, &name, score)
        }
        Commands::Adjust {
            low,
            high,
            boost,
            reduce,
        } => commands::schedule::adjust(&session()?, low, high, boost, reduce),
        Commands::Interactive => commands::interactive::execute(&session()?),
    }
}
