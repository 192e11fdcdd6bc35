//! CLI administration tool for link-squeeze.
//!
//! Provides database maintenance and inspection commands without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! cargo run --bin admin -- migrate
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Show one short link
//! cargo run --bin admin -- inspect a1b2C3D
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use link_squeeze::config::mask_connection_string;
use link_squeeze::domain::repositories::LinkRepository;
use link_squeeze::infrastructure::persistence::PgLinkRepository;
use link_squeeze::utils::code_generator::is_valid_short_code;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-squeeze.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Show statistics
    Stats,

    /// Show a short link and its click count
    Inspect {
        /// Short code (7 characters, [0-9a-zA-Z])
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Inspect { code } => handle_inspect(&pool, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Applies the embedded migrations.
async fn handle_migrate(pool: &PgPool) -> Result<()> {
    println!("{}", "Applying migrations...".bright_blue());

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    println!("{}", "Migrations applied".green().bold());

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of counted clicks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints the stored record of one short code.
async fn handle_inspect(pool: &PgPool, code: &str) -> Result<()> {
    if !is_valid_short_code(code) {
        anyhow::bail!("'{}' is not a valid short code", code);
    }

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let link = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(link) = link else {
        println!("{}", format!("No short link with code '{}'", code).yellow());
        return Ok(());
    };

    println!("{}", "Short link".bright_blue().bold());
    println!();
    println!("  Code:    {}", link.code.cyan());
    println!("  Target:  {}", link.target_url.bright_white());
    println!(
        "  Clicks:  {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created: {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
