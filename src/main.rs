use anyhow::Result;
use clap::{Parser, Subcommand};

/// recipebook - Recipes and shopping lists
#[derive(Parser)]
#[command(name = "recipebook")]
#[command(about = "Share recipes and turn them into shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop the local database if it exists and recreate it with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = recipebook::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    recipebook::observability::init_observability(
        "recipebook",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => recipebook::cli::serve(config, host, port).await,
        Commands::Migrate => recipebook::cli::migrate(&config).await,
        Commands::Reset => recipebook::cli::reset(&config).await,
    }
}
