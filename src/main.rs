use clap::{Parser, Subcommand};

mod app;
mod config;
mod core;
mod models;
mod utils;

#[derive(Parser)]
#[command(name = "cinescrape", about = "Movie search scraper, table merger and dashboard API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape each configured genre into a clean per-genre CSV table
    Scrape,
    /// Concatenate all per-genre tables into the unified dataset
    Merge,
    /// Serve the dashboard API over the merged dataset
    Serve,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match config::Config::init() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to initialize configuration: {e}");
            std::process::exit(1);
        }
    };
    app::common::init_logging(&config);

    let result = match cli.command {
        Commands::Scrape => app::scrape::run(&config).await.map(|_| ()),
        Commands::Merge => app::merge::run(&config),
        Commands::Serve => app::serve::run(&config).await,
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
