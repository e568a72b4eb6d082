//! salespipe CLI - rebuild and load the normalized sales schema from a
//! denormalized tab-delimited export.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use salespipe::{Database, PipelineConfig};

#[derive(Parser)]
#[command(name = "salespipe")]
#[command(version, about = "Load a denormalized sales export into a normalized schema", long_about = None)]
struct Cli {
    /// Path to the tab-delimited source file
    input: PathBuf,

    /// Database connection string (a file path for SQLite)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Rows per batched INSERT statement
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Print the per-table row counts as JSON on success
    #[arg(long)]
    stats_json: bool,
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let database = match Database::new(&cli.database_url) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            process::exit(1);
        }
    };
    let mut conn = match database.get_connection() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to acquire connection: {}", e);
            process::exit(1);
        }
    };

    let config = PipelineConfig {
        batch_size: cli.batch_size,
    };
    match salespipe::run_with_config(&cli.input, &mut conn, &config) {
        Ok(stats) => {
            tracing::info!(
                "Load complete: {} regions, {} countries, {} categories, {} products, {} customers, {} order details",
                stats.regions,
                stats.countries,
                stats.product_categories,
                stats.products,
                stats.customers,
                stats.order_details
            );
            if cli.stats_json {
                match serde_json::to_string_pretty(&stats) {
                    Ok(json) => println!("{}", json),
                    Err(e) => tracing::error!("Failed to serialize stats: {}", e),
                }
            }
        }
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            process::exit(1);
        }
    }
}
