//! gradebook CLI - run and manage the gradebook HTTP backend
//!
//! Subcommands:
//! - `serve`: run the HTTP API server (students, scores, health)
//! - `migrate`: create the database tables and indexes, then exit

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use gradebook_server::{config, db, ServerConfig};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    author,
    version,
    about = "HTTP backend for student and score records"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create the database tables and indexes, then exit
    Migrate,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1", env = "GRADEBOOK_HOST")]
    host: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 8000, env = "GRADEBOOK_PORT")]
    port: u16,

    /// PostgreSQL connection string (otherwise assembled from DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before reading any settings
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => {
            let database_url = match args.database_url {
                Some(url) => url,
                None => config::database_url_from_env()?,
            };

            gradebook_server::serve(ServerConfig {
                host: args.host,
                port: args.port,
                database_url,
            })
            .await?;
        }
        Commands::Migrate => {
            let database_url = config::database_url_from_env()?;
            let pool = db::create_pool(&database_url).await?;

            db::migrations::run(&pool).await?;
            tracing::info!("Database ready");
        }
    }

    Ok(())
}
