//! Database migration lifecycle tool for Tavola.
//!
//! Usage:
//!   migrator init                  - Create bookkeeping and apply all migrations
//!   migrator migrate               - Apply all pending migrations
//!   migrator create <description>  - Generate a new empty migration file
//!   migrator current               - Show the current schema version
//!   migrator history               - List applied and pending migrations
//!   migrator seed                  - Insert the sample catalogue (idempotent)
//!   migrator reset                 - Roll back everything (asks for confirmation)
//!
//! Engine errors are printed verbatim; each migration applies inside the
//! engine's transaction, so a failed run never leaves a half-applied
//! version behind.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tavola_db::lock::MigrationLock;
use tavola_db::migration::{self, Migrator, MigratorTrait, generate};
use tavola_db::seed;

#[derive(Parser)]
#[command(name = "migrator", about = "Tavola database migration lifecycle tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the migration bookkeeping and apply all migrations
    Init,
    /// Apply all pending migrations in version order
    Migrate,
    /// Generate a new empty migration source file (does not touch the database)
    Create {
        /// Human-readable description, e.g. "add wishlist table"
        description: String,
        /// Migration source directory
        #[arg(long, default_value = "crates/db/src/migration")]
        dir: PathBuf,
    },
    /// Show the most recently applied schema version
    Current,
    /// List all schema versions in chronological order
    History,
    /// Insert the sample catalogue and accounts (idempotent)
    Seed,
    /// Roll back all migrations, dropping all schema objects and data
    Reset {
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migrator=info,tavola_db=info,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Command::Create { description, dir } => {
            let path = generate::write_migration(&dir, &description, Utc::now())?;
            println!("Created {}", path.display());
            println!("Rebuild the migrator to register the new version, then run `migrator migrate`.");
        }
        Command::Init => {
            let db = connect().await?;
            let lock = MigrationLock::acquire(&db).await?;
            let result = init(&db).await;
            lock.release(&db).await?;
            result?;
        }
        Command::Migrate => {
            let db = connect().await?;
            let lock = MigrationLock::acquire(&db).await?;
            let result = Migrator::up(&db, None).await;
            lock.release(&db).await?;
            result.context("migration failed")?;
            report_current(&db).await?;
        }
        Command::Current => {
            let db = connect().await?;
            report_current(&db).await?;
        }
        Command::History => {
            let db = connect().await?;
            let entries = migration::history(&db).await?;
            if entries.is_empty() {
                println!("No migrations registered");
            }
            for entry in entries {
                match entry.applied_at {
                    Some(at) => {
                        println!("{}  applied {}", entry.version, at.format("%Y-%m-%d %H:%M:%S UTC"));
                    }
                    None => println!("{}  (pending)", entry.version),
                }
            }
        }
        Command::Seed => {
            let db = connect().await?;
            let report = seed::run(&db).await?;
            println!(
                "Seeding complete: {} inserted, {} skipped (already present)",
                report.inserted, report.skipped
            );
        }
        Command::Reset { yes } => {
            if !yes && !confirm_reset()? {
                println!("Reset cancelled");
                return Ok(());
            }
            let db = connect().await?;
            let lock = MigrationLock::acquire(&db).await?;
            let result = Migrator::reset(&db).await;
            lock.release(&db).await?;
            result.context("reset failed")?;
            println!("Database reset; run `migrator init` to reinitialize.");
        }
    }

    Ok(())
}

/// Connects with a single-connection pool: the advisory lock is session
/// scoped and must stay on the session that acquires it.
async fn connect() -> anyhow::Result<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    tavola_db::connect_single(&url)
        .await
        .context("failed to connect to database")
}

async fn init(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::install(db)
        .await
        .context("failed to create migration bookkeeping")?;
    Migrator::up(db, None).await.context("migration failed")?;
    report_current(db).await?;
    println!("Database initialized; load sample data with `migrator seed`.");
    Ok(())
}

async fn report_current(db: &DatabaseConnection) -> anyhow::Result<()> {
    match migration::current_version(db).await? {
        Some(current) => println!(
            "Current version: {} (applied {})",
            current.version,
            current.applied_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("No migrations applied"),
    }
    Ok(())
}

/// Asks the operator to type `yes` before dropping everything.
fn confirm_reset() -> anyhow::Result<bool> {
    print!("WARNING: this drops all tables and data. Type 'yes' to continue: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_subcommand() {
        for args in [
            vec!["migrator", "init"],
            vec!["migrator", "migrate"],
            vec!["migrator", "current"],
            vec!["migrator", "history"],
            vec!["migrator", "seed"],
            vec!["migrator", "reset", "--yes"],
            vec!["migrator", "create", "add wishlist table"],
        ] {
            assert!(
                Cli::try_parse_from(args.iter().copied()).is_ok(),
                "failed to parse {args:?}"
            );
        }
    }

    #[test]
    fn test_create_requires_a_description() {
        assert!(Cli::try_parse_from(["migrator", "create"]).is_err());
    }

    #[test]
    fn test_reset_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["migrator", "reset"]).unwrap();
        match cli.command {
            Command::Reset { yes } => assert!(!yes),
            _ => panic!("expected reset"),
        }
    }
}
