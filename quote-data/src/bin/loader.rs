use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_data::MaterialLoader;
use quote_db_sqlite::SqliteRepository;

/// Load material rate data from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - name: material identifier (e.g. steel-3mm)
/// - unit: per-length, per-area, or per-piece
/// - rate_per_unit: price per unit as a decimal (e.g. 0.01)
/// - currency: ISO code (EUR, USD, GBP, JPY)
#[derive(Parser, Debug)]
#[command(name = "quote-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing material rates
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g. sqlite:quotes.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:quotes.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading material rates from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = MaterialLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = MaterialLoader::load(&repo, &records)
        .await
        .context("Failed to load material rates into database")?;

    println!(
        "Successfully loaded {} materials into the database.",
        inserted
    );

    Ok(())
}
