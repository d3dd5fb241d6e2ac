use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::{AppConfig, Portfolio};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A terminal portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of ~/.config/folio/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Portfolio content file (overrides general.content_path)
    #[arg(long, global = true)]
    content: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Leave a message in the contact outbox
    Contact {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, default_value = "Hello")]
        subject: String,
        #[arg(short, long)]
        message: String,
    },
    /// List projects, optionally for one category
    Projects {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Write a config file with every default spelled out
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(AppConfig::load_from(&config_path)?);

    let tui = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, tui)?;

    let content_path = cli.content.clone().or_else(|| config.content_path());

    match cli.command {
        Some(Commands::Run) | None => {
            let portfolio = Portfolio::load_or_default(content_path.as_deref())?;
            commands::run::run(config, portfolio).await
        }
        Some(Commands::Contact {
            name,
            email,
            subject,
            message,
        }) => {
            let mailer = folio_core::OutboxMailer::new(config.outbox_path());
            commands::contact::run(&mailer, &name, &email, &subject, &message).await
        }
        Some(Commands::Projects { category }) => {
            let portfolio = Portfolio::load_or_default(content_path.as_deref())?;
            commands::projects::run(&portfolio, category.as_deref())
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}

/// `RUST_LOG` wins over the configured level. The TUI owns the terminal, so
/// its logs go to a file instead of stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }

    Ok(())
}
