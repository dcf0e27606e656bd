use clap::{Parser, Subcommand};
use tracing::error;

use std::sync::Arc;

use medallion_warehouse::config::Config;
use medallion_warehouse::logging;
use medallion_warehouse::pipeline::Refresh;
use medallion_warehouse::storage::{InMemoryStore, WarehouseStore};

#[derive(Parser)]
#[command(name = "medallion_warehouse")]
#[command(about = "Bronze/Silver/Gold sales warehouse pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full refresh: load extracts, rebuild Silver, build Gold,
    /// run the quality checks
    Refresh {
        /// Print the run summary as JSON instead of the plain report
        #[arg(long)]
        json: bool,
    },
    /// Run only the Gold validator over the extracts, publishing nothing
    Check,
    /// Run the detection-only data-quality audit over the raw extracts
    Audit,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Refresh { json } => {
            println!("🚀 Running full warehouse refresh...");

            let store: Arc<dyn WarehouseStore> = Arc::new(InMemoryStore::new());
            let refresh = Refresh::new(store, config);

            match refresh.run().await {
                Ok(summary) if json => {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                    if !summary.gate_passed() {
                        std::process::exit(1);
                    }
                }
                Ok(summary) => {
                    println!("\n📊 Refresh Results:");
                    println!("   Run id: {}", summary.run_id);
                    println!("   Bronze rows: {}", summary.bronze_rows);
                    println!("   Silver rows: {}", summary.silver_rows);
                    println!("   Customer dimension: {}", summary.customer_dim_rows);
                    println!("   Product dimension: {}", summary.product_dim_rows);
                    println!("   Sales fact: {}", summary.fact_rows);
                    println!("   Duration: {}ms", summary.duration_ms);

                    if summary.gate_passed() {
                        println!("✅ Quality gate passed");
                    } else {
                        println!("\n❌ Quality gate FAILED:");
                        for dup in &summary.validation.duplicate_keys {
                            println!(
                                "   - duplicate surrogate key {} in {} ({} rows)",
                                dup.surrogate_key, dup.dimension, dup.count
                            );
                        }
                        for orphan in &summary.validation.orphaned_facts {
                            println!(
                                "   - orphaned fact {}: {:?}",
                                orphan.order_number, orphan.missing
                            );
                        }
                        // Non-empty validator output is the failure contract:
                        // this Gold build must not be published downstream.
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    error!("Refresh failed: {}", e);
                    println!("❌ Refresh failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Check => {
            println!("🔍 Running Gold validator...");

            let store: Arc<dyn WarehouseStore> = Arc::new(InMemoryStore::new());
            let refresh = Refresh::new(store, config);

            match refresh.run_check() {
                Ok(report) if report.is_clean() => {
                    println!("✅ Quality gate passed");
                }
                Ok(report) => {
                    println!("\n❌ Quality gate FAILED:");
                    for dup in &report.duplicate_keys {
                        println!(
                            "   - duplicate surrogate key {} in {} ({} rows)",
                            dup.surrogate_key, dup.dimension, dup.count
                        );
                    }
                    for orphan in &report.orphaned_facts {
                        println!(
                            "   - orphaned fact {}: {:?}",
                            orphan.order_number, orphan.missing
                        );
                    }
                    std::process::exit(1);
                }
                Err(e) => {
                    error!("Check failed: {}", e);
                    println!("❌ Check failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Audit => {
            println!("🔎 Running detection-only audit...");

            let store: Arc<dyn WarehouseStore> = Arc::new(InMemoryStore::new());
            let refresh = Refresh::new(store, config);

            match refresh.run_audit() {
                Ok(findings) if findings.is_empty() => {
                    println!("✅ No findings");
                }
                Ok(findings) => {
                    println!("\n⚠️  {} findings:", findings.len());
                    for finding in &findings {
                        println!(
                            "   - [{:?}] {}.{}: {}",
                            finding.kind, finding.entity, finding.field, finding.description
                        );
                    }
                }
                Err(e) => {
                    error!("Audit failed: {}", e);
                    println!("❌ Audit failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
