//! CLI administration tool for link-tracker.
//!
//! Mints owner tokens, shows totals and runs database diagnostics without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a bearer token for user 42, valid for 24 hours
//! cargo run --bin admin -- token issue --user-id 42 --ttl-hours 24
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: signing secret, required for `token issue`
//! - `DATABASE_URL`: PostgreSQL connection string, required for `stats` and `db`

use link_tracker::application::services::AuthService;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;

/// CLI tool for managing link-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage owner bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show link and click totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a signed token for an owner
    Issue {
        /// Owner user id (prompted if omitted)
        #[arg(short, long)]
        user_id: Option<i64>,

        /// Token lifetime in hours
        #[arg(short, long, default_value_t = 24)]
        ttl_hours: i64,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

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

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue {
            user_id,
            ttl_hours,
            yes,
        } => issue_token(user_id, ttl_hours, yes),
    }
}

/// Signs a token with `JWT_SECRET` and prints it with usage instructions.
fn issue_token(user_id: Option<i64>, ttl_hours: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "Issue owner token".bright_blue().bold());
    println!();

    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive");
    }

    let user_id = match user_id {
        Some(id) => id,
        None => Input::new().with_prompt("Owner user id").interact_text()?,
    };

    println!("  User id:  {}", user_id.to_string().bright_white());
    println!("  Valid for: {} hours", ttl_hours.to_string().bright_white());
    println!();

    if !skip_confirm
        && !Confirm::new()
            .with_prompt("Issue this token?")
            .default(true)
            .interact()?
    {
        println!("{}", "Cancelled".yellow());
        return Ok(());
    }

    let token = AuthService::new(&secret)
        .issue(user_id, chrono::Duration::hours(ttl_hours))
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{}", "Token issued".green().bold());
    println!();
    println!("  {}", token.bright_yellow());
    println!();
    println!("Use it as:");
    println!(
        "  {}",
        format!("curl -H 'Authorization: Bearer {token}' http://localhost:3000/links/mine")
            .dimmed()
    );

    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE expiry IS NOT NULL AND expiry < NOW()")
            .fetch_one(pool)
            .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_analytics")
        .fetch_one(pool)
        .await?;

    let owners_count: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT created_by) FROM links")
        .fetch_one(pool)
        .await?;

    println!("  Links:   {}", links_count.to_string().bright_green().bold());
    println!("  Expired: {}", expired_count.to_string().yellow());
    println!("  Clicks:  {}", clicks_count.to_string().bright_green().bold());
    println!("  Owners:  {}", owners_count.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
