mod logging;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use quote_core::calculations::{QuoteCalculator, QuoteInput, default_tax_rate};
use quote_core::notify::QuoteNotification;
use quote_core::{NewQuote, QuoteRepository, SubscriptionStatus, dxf};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Quote engine for the laser-cutting workshop: price DXF cut files against
/// the material rate table, inspect the rate table, and manage workshop
/// subscriptions.
#[derive(Parser, Debug)]
#[command(name = "quote-cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database (bare path or :memory:)
    #[arg(short, long, default_value = "quotes.db", global = true)]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a DXF cut file against a material
    Price {
        /// Path to the DXF file
        #[arg(short, long)]
        file: PathBuf,

        /// Material name from the rate table (e.g. steel-3mm)
        #[arg(short, long)]
        material: String,

        /// Number of copies to cut
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Tax rate as a fraction
        #[arg(long, default_value_t = default_tax_rate())]
        tax_rate: Decimal,

        /// Quote net prices without tax
        #[arg(long, default_value_t = false)]
        no_tax: bool,

        /// Persist the quote for the given workshop and print the
        /// notification fields for the mailer
        #[arg(long)]
        workshop: Option<i64>,

        /// Record as a binding order instead of a price enquiry
        #[arg(long, default_value_t = false)]
        order: bool,

        #[arg(long, default_value = "")]
        customer_name: String,

        #[arg(long, default_value = "")]
        customer_phone: String,

        #[arg(long, default_value = "")]
        customer_email: String,
    },

    /// List the material rate table
    Materials,

    /// List workshops and their subscription state
    Workshops,

    /// Change a workshop's subscription status
    SetSubscription {
        /// Workshop id
        #[arg(short, long)]
        workshop: i64,

        /// New status: trial, active, suspended, or expired
        #[arg(short, long)]
        status: String,

        /// Last day the subscription is valid (YYYY-MM-DD); omit for
        /// open-ended
        #[arg(short, long)]
        until: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let repo = quote_db_sqlite::open(&args.database)
        .await
        .with_context(|| format!("Failed to open database: {}", args.database))?;

    match args.command {
        Command::Price {
            file,
            material,
            quantity,
            tax_rate,
            no_tax,
            workshop,
            order,
            customer_name,
            customer_phone,
            customer_email,
        } => {
            price(
                &repo,
                PriceArgs {
                    file,
                    material,
                    quantity,
                    tax_rate,
                    no_tax,
                    workshop,
                    order,
                    customer_name,
                    customer_phone,
                    customer_email,
                },
            )
            .await
        }
        Command::Materials => list_materials(&repo).await,
        Command::Workshops => list_workshops(&repo).await,
        Command::SetSubscription {
            workshop,
            status,
            until,
        } => set_subscription(&repo, workshop, &status, until).await,
    }
}

struct PriceArgs {
    file: PathBuf,
    material: String,
    quantity: u32,
    tax_rate: Decimal,
    no_tax: bool,
    workshop: Option<i64>,
    order: bool,
    customer_name: String,
    customer_phone: String,
    customer_email: String,
}

async fn price(
    repo: &dyn QuoteRepository,
    args: PriceArgs,
) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read: {}", args.file.display()))?;
    let metrics = dxf::extract_metrics(&content)
        .with_context(|| format!("Failed to parse DXF: {}", args.file.display()))?;

    info!(
        cut_length_mm = metrics.cut_length_mm,
        area_mm2 = metrics.area_mm2,
        piece_count = metrics.piece_count,
        "extracted geometry metrics"
    );

    let material = repo
        .get_material(&args.material)
        .await
        .with_context(|| format!("Unknown material: {}", args.material))?;

    let input = QuoteInput {
        metrics,
        quantity: args.quantity,
        tax_enabled: !args.no_tax,
        tax_rate: args.tax_rate,
    };
    let breakdown = QuoteCalculator::new(&material).calculate(&input)?;

    println!(
        "Material:   {} ({}, {} {})",
        material.name,
        material.unit.as_str(),
        material.rate_per_unit,
        material.currency.as_str()
    );
    println!("Cut length: {:.1} mm", metrics.cut_length_mm);
    println!("Area:       {:.1} mm²", metrics.area_mm2);
    println!("Pieces:     {}", metrics.piece_count);
    println!("Quantity:   {}", args.quantity);
    println!("Unit cost:  {}", material.currency.format(breakdown.unit_cost));
    println!("Subtotal:   {}", material.currency.format(breakdown.subtotal));
    println!("Tax:        {}", material.currency.format(breakdown.tax));
    println!("Total:      {}", material.currency.format(breakdown.total));

    let Some(workshop_id) = args.workshop else {
        return Ok(());
    };

    let workshop = repo
        .get_workshop(workshop_id)
        .await
        .with_context(|| format!("Unknown workshop: {workshop_id}"))?;
    if !workshop.subscription_active_on(Utc::now().date_naive()) {
        warn!(
            workshop = %workshop.name,
            status = workshop.status.as_str(),
            "workshop subscription is not active"
        );
    }

    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let quote = repo
        .create_quote(NewQuote {
            workshop_id,
            customer_name: args.customer_name.clone(),
            customer_phone: args.customer_phone.clone(),
            customer_email: args.customer_email.clone(),
            file_name: file_name.clone(),
            material_name: material.name.clone(),
            quantity: args.quantity,
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            total: breakdown.total,
            tax_enabled: !args.no_tax,
            is_order: args.order,
        })
        .await
        .context("Failed to save quote")?;

    info!(quote_id = quote.id, "quote saved");

    let notification = QuoteNotification::from_breakdown(
        &breakdown,
        &workshop.contact_email,
        &args.customer_name,
        &args.customer_phone,
        &args.customer_email,
        &file_name,
        &material.name,
        args.quantity,
        !args.no_tax,
        args.order,
    );

    println!();
    println!("Notification fields:");
    for (key, value) in notification.fields() {
        println!("  {key}: {value}");
    }

    Ok(())
}

async fn list_materials(repo: &dyn QuoteRepository) -> Result<()> {
    let materials = repo.list_materials().await?;
    if materials.is_empty() {
        println!("No materials loaded. Run quote-data-loader first.");
        return Ok(());
    }

    for material in materials {
        println!(
            "{:<20} {:<12} {} {}",
            material.name,
            material.unit.as_str(),
            material.rate_per_unit,
            material.currency.as_str()
        );
    }
    Ok(())
}

async fn list_workshops(repo: &dyn QuoteRepository) -> Result<()> {
    let today = Utc::now().date_naive();
    let workshops = repo.list_workshops().await?;

    for workshop in workshops {
        let until = workshop
            .subscription_until
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open-ended".to_string());
        let active = if workshop.subscription_active_on(today) {
            "active"
        } else {
            "inactive"
        };
        println!(
            "#{:<4} {:<24} {:<10} until {:<12} [{}]",
            workshop.id, workshop.name, workshop.status.as_str(), until, active
        );
    }
    Ok(())
}

async fn set_subscription(
    repo: &dyn QuoteRepository,
    workshop_id: i64,
    status: &str,
    until: Option<NaiveDate>,
) -> Result<()> {
    let Some(status) = SubscriptionStatus::parse(status) else {
        bail!("unknown status '{status}' (expected trial, active, suspended, or expired)");
    };

    repo.update_subscription(workshop_id, status, until)
        .await
        .with_context(|| format!("Failed to update workshop {workshop_id}"))?;

    info!(
        workshop = workshop_id,
        status = status.as_str(),
        "subscription updated"
    );
    Ok(())
}
