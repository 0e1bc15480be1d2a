// Create the sample events directly in the events file.
// Usage: cargo run --bin seed_events -- [--data-dir <dir>] [--force]

use clap::Parser;
use std::path::PathBuf;

use proofpass_api::services::seed_data;
use proofpass_api::services::EventStore;
use proofpass_api::Config;

#[derive(Parser)]
#[command(about = "Seed the ProofPass event store with sample events")]
struct Args {
    /// Directory holding events.json (defaults to DATA_DIR or ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Add the samples even if the store already has events
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proofpass_api=info".into())
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let store = EventStore::new(config.data_dir.clone());
    let created = seed_data::seed_sample_events(&store, &config, args.force).await?;

    if created == 0 {
        println!("Store at {} already has events; use --force to add samples anyway.", store.path().display());
        return Ok(());
    }

    println!("✅ Created {} events in {}", created, store.path().display());
    for event in store.load_events().await? {
        println!("   {}  {} ({} tickets @ {})", event.id, event.name, event.total_tickets, event.price_per_ticket);
    }

    Ok(())
}
