//! Quizboard entry point.

use clap::{Parser, Subcommand};
use quizboard::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// Quizboard: quiz planning dashboard
#[derive(Parser, Debug)]
#[command(name = "quizboard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server (default behavior)
    Serve {
        /// HTTP port. If not specified, uses the config file value.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List and manage quizzes
    Quizzes {
        /// Action: list, add, update, delete
        #[arg(short, long, default_value = "list")]
        action: String,
        /// Quiz ID (for update/delete)
        #[arg(short, long)]
        id: Option<String>,
        /// Quiz title (for add/update)
        #[arg(short, long)]
        title: Option<String>,
        /// Theme label (for add/update)
        #[arg(long)]
        theme: Option<String>,
        /// Publish date YYYY-MM-DD (for add/update)
        #[arg(short, long)]
        date: Option<String>,
        /// Score (for add/update)
        #[arg(short, long)]
        score: Option<u32>,
    },

    /// Show the aggregated calendar for a month
    Calendar {
        /// Month to display as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show quiz statistics and upcoming events
    Analytics,

    /// Ask the AI suggestion service
    Suggest {
        /// Action: ideas, date
        #[arg(short, long, default_value = "ideas")]
        action: String,
        /// Quiz title (for date)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Inspect or initialize the configuration file
    Config {
        /// Action: show, init
        #[arg(short, long, default_value = "show")]
        action: String,
        /// Target path for init (default: the user config directory)
        #[arg(short, long)]
        path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // For one-shot CLI commands, keep logging minimal
    let is_serve = matches!(args.command, Some(Command::Serve { .. }) | None);

    if is_serve {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
        tracing::info!("Starting quizboard v{}", env!("CARGO_PKG_VERSION"));
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(&args.config)?;

    match args.command {
        Some(Command::Serve { port }) => cli::run_serve(config, port).await,
        Some(Command::Quizzes {
            action,
            id,
            title,
            theme,
            date,
            score,
        }) => cli::run_quizzes(config, action, id, title, theme, date, score, args.json).await,
        Some(Command::Calendar { month }) => cli::run_calendar(config, month, args.json).await,
        Some(Command::Analytics) => cli::run_analytics(config, args.json).await,
        Some(Command::Suggest { action, title }) => {
            cli::run_suggest(config, action, title, args.json).await
        }
        Some(Command::Config { action, path }) => cli::run_config(config, action, path),
        None => cli::run_serve(config, None).await,
    }
}

fn load_config(path: &Option<String>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(shellexpand::tilde(path).as_ref())?,
        None => Config::load()?,
    };
    Ok(config)
}
