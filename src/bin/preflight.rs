use inventory_api::infra::{config, telemetry};
use inventory_api::InventoryService;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--init-schema]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           PORT, PUBLIC_DIR, DB_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let init_schema = args.iter().any(|a| a == "--init-schema");

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let port = config::port()?;
    let public_dir = config::public_dir();
    let max_connections = config::db_max_connections()?;

    println!("> Preflight:");
    println!("  PORT={}", port);
    println!("  PUBLIC_DIR={}", public_dir.display());
    println!("  DB_MAX_CONNECTIONS={}", max_connections);
    println!(
        "  SPA entry: {}",
        if public_dir.join("index.html").is_file() { "present" } else { "MISSING" }
    );

    let inventory = InventoryService::connect(&database_url, 1).await?;
    inventory.ping().await?;
    println!("  Database: reachable");

    if init_schema {
        inventory.ensure_schema().await?;
        println!("  Schema: ensured (products, moves)");
    }

    let mut missing = Vec::new();
    for table in ["products", "moves"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(inventory.pool())
        .await?;

        if exists {
            let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(inventory.pool())
                .await?;
            println!("  Table {}: {} rows", table, count);
        } else {
            println!("  Table {}: MISSING", table);
            missing.push(table);
        }
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "missing tables: {} (re-run with --init-schema or start api_server once)",
            missing.join(", ")
        );
    }

    println!("> Preflight OK");
    Ok(())
}
