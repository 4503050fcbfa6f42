//! Stock-Out Forecast CLI
//!
//! Command-line interface for running inventory projections

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use stockout_forecast::catalog::{filter_rows, vendors, CatalogRunner};
use stockout_forecast::product::{self, parse_date, IncomingStock, DEFAULT_PROJECTION_DAYS};
use stockout_forecast::projection::{daily_growth_rate, ProjectionConfig, ProjectionEngine, UrgencyThresholds, DEFAULT_WARNING_DAYS};
use stockout_forecast::report::{stock_out_label, weekly_table, RiskBadge};
use stockout_forecast::settings::{self, SettingsFile};
use stockout_forecast::ProjectionInput;

#[derive(Debug, Parser)]
#[command(name = "stockout-forecast", version, about = "Forecast stock-outs and reorder deadlines")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Reference date for day 0 (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Number of days to simulate
    #[arg(long, global = true, default_value_t = DEFAULT_PROJECTION_DAYS)]
    days: u32,

    /// Reorder days at or below which urgency is critical
    #[arg(long, global = true, default_value_t = 0, allow_negative_numbers = true)]
    critical_days: i64,

    /// Reorder days at or below which urgency is warning
    #[arg(long, global = true, default_value_t = DEFAULT_WARNING_DAYS)]
    warning_days: i64,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a single product from flags
    Single {
        /// Units on hand today
        #[arg(long, allow_negative_numbers = true)]
        inventory: f64,

        /// Average units sold per day
        #[arg(long)]
        sales: f64,

        /// Monthly growth multiplier (1.0 = flat)
        #[arg(long, default_value_t = settings::DEFAULT_MONTHLY_GROWTH_RATE)]
        growth: f64,

        /// Supplier lead time in days
        #[arg(long, default_value_t = settings::DEFAULT_LEAD_TIME_DAYS)]
        lead_time: i64,

        /// Scheduled delivery as DATE:QTY, repeatable
        #[arg(long = "incoming", value_parser = parse_incoming)]
        incoming: Vec<IncomingStock>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Project every product in a CSV listing
    Catalog {
        /// products.csv (product_id,title,vendor,current_inventory,avg_daily_sales)
        products: PathBuf,

        /// incoming.csv (product_id,expected_date,quantity)
        #[arg(long)]
        incoming: Option<PathBuf>,

        /// Settings JSON with shop defaults and product overrides
        #[arg(long = "settings")]
        settings_path: Option<PathBuf>,

        /// Only show products from this vendor
        #[arg(long)]
        vendor: Option<String>,

        /// Only show products whose title contains this text
        #[arg(long)]
        search: Option<String>,

        /// Write the listing to a CSV file
        #[arg(long = "csv")]
        csv_out: Option<PathBuf>,
    },
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

fn parse_incoming(value: &str) -> Result<IncomingStock, String> {
    let (date, quantity) = value
        .split_once(':')
        .ok_or_else(|| format!("expected DATE:QTY, got '{}'", value))?;
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
    Ok(IncomingStock::new(date, quantity))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let today = cli
        .common
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let config = ProjectionConfig {
        projection_days: cli.common.days,
        thresholds: UrgencyThresholds {
            critical_days: cli.common.critical_days,
            warning_days: cli.common.warning_days,
        },
    };

    match cli.command {
        Command::Single { inventory, sales, growth, lead_time, incoming, json } => {
            let input = ProjectionInput::new(inventory, sales, growth, lead_time)
                .with_incoming_stock(incoming)
                .with_projection_days(cli.common.days);
            run_single(&input, config, today, json)
        }
        Command::Catalog { products, incoming, settings_path, vendor, search, csv_out } => {
            let products = product::load_products(&products)
                .with_context(|| format!("failed to load products from {}", products.display()))?;

            let mut runner = CatalogRunner::new(config);
            if let Some(path) = settings_path {
                let loaded: SettingsFile = settings::load_settings(&path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?;
                runner = runner.with_settings(loaded);
            }
            if let Some(path) = incoming {
                let loaded = product::load_incoming(&path)
                    .with_context(|| format!("failed to load incoming stock from {}", path.display()))?;
                runner = runner.with_incoming(loaded);
            }

            let rows = runner.run(&products, today);
            let shown = filter_rows(&rows, search.as_deref(), vendor.as_deref());

            println!("Stock-Out Forecast as of {}", today);
            println!("Vendors: {}", vendors(&products).join(", "));
            println!();
            println!("{:<14} {:<28} {:>10} {:>8} {:>8} {:>12} {:<14}",
                "Product", "Title", "Inventory", "Sales", "Days", "Reorder by", "Status");
            println!("{}", "-".repeat(100));
            for row in &shown {
                println!("{:<14} {:<28} {:>10.0} {:>8.1} {:>8} {:>12} {:<14}",
                    row.product_id,
                    row.title,
                    row.current_inventory,
                    row.avg_daily_sales,
                    row.days_until_stock_out
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| format!("{}+", cli.common.days)),
                    row.must_reorder_by
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    row.badge.label(),
                );
            }

            if let Some(path) = csv_out {
                let mut writer = csv::Writer::from_path(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                for row in &shown {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                println!("\nListing written to: {}", path.display());
            }
            Ok(())
        }
    }
}

fn run_single(input: &ProjectionInput, config: ProjectionConfig, today: NaiveDate, json: bool) -> Result<()> {
    input.validate_at(today).context("invalid projection input")?;

    let engine = ProjectionEngine::new(config);
    let result = engine.project(input, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Stock-Out Forecast as of {}", today);
    println!("  Inventory:       {:.2}", input.current_inventory);
    println!("  Avg Daily Sales: {:.2}", input.avg_daily_sales);
    println!("  Monthly Growth:  {:.4} (daily {:.6})", input.monthly_growth_rate, daily_growth_rate(input.monthly_growth_rate));
    println!("  Lead Time:       {} days", input.lead_time_days);
    println!();
    println!("  Days Until Stock-Out: {}", stock_out_label(&result));
    if let Some(date) = result.stock_out_date {
        println!("  Stock-Out Date:       {}", date);
    }
    if let Some(date) = result.must_reorder_by {
        println!("  Must Reorder By:      {}", date);
    }
    println!("  Status:               {} ({})", RiskBadge::from_result(&result), result.reorder_urgency);

    println!("\nWeekly Projection:");
    println!("{:>12} {:>14} {:>12} {:>10}", "Date", "Inventory", "Incoming", "Sales/Day");
    println!("{}", "-".repeat(52));
    for point in weekly_table(&result) {
        let incoming = if point.incoming_stock > 0.0 {
            format!("+{}", point.incoming_stock)
        } else {
            "-".to_string()
        };
        println!("{:>12} {:>14.2} {:>12} {:>10.1}", point.date, point.inventory, incoming, point.daily_sales);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Days Projected:  {}", summary.total_days);
    println!("  Total Incoming:  {:.2} over {} deliveries", summary.total_incoming, summary.delivery_days);
    println!("  Final Inventory: {:.2}", summary.final_inventory);
    println!("  Final Sales/Day: {:.2}", summary.final_daily_sales);
    Ok(())
}
