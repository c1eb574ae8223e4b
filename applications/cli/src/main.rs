/// Tapedeck - persistent playlist player for the terminal
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tapedeck_cli::{
    commands,
    config::AppConfig,
    console::Console,
    offline::register_offline_cache,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tapedeck")]
#[command(about = "Persistent audio playlist player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./tapedeck.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the database URL
    #[arg(long, global = true, env = "TAPEDECK_DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player (default)
    Play,
    /// Add audio files to the playlist
    Add {
        /// Files to add; non-audio files are skipped
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show the playlist
    List,
    /// Remove every track
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        config.storage.database_url = url;
    }
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut controller = commands::build_controller(&config);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            tracing::info!(database = %config.storage.database_url, "Starting Tapedeck");
            register_offline_cache(&config.offline_cache).await;

            let console = Console::stdin();
            commands::run_interactive(&mut controller, &console, config.transport.tick()).await?;
        }
        Commands::Add { paths } => {
            commands::add(&mut controller, &paths).await?;
        }
        Commands::List => {
            commands::list(&mut controller).await?;
        }
        Commands::Clear { yes } => {
            if yes {
                commands::clear(&mut controller, &true).await?;
            } else {
                commands::clear(&mut controller, &Console::stdin()).await?;
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
