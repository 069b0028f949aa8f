use clap::{Parser, Subcommand};
use redbench::config::Config;
use redbench::{
    AlphanumericGenerator, LifecycleBenchmark, RateDrivenBenchmark, RedisConnector,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    scenario: Scenario,
}

#[derive(Subcommand)]
enum Scenario {
    /// Random GET/SET/DEL/PING mix at a fixed rate; prints average RPS
    Rate,
    /// SET, GET, then DELETE a generated key population
    Lifecycle,
}

async fn run_rate(config: &Config, connector: &RedisConnector) -> anyhow::Result<()> {
    let payload = match config.seed {
        Some(seed) => AlphanumericGenerator::seeded(seed.wrapping_add(1)),
        None => AlphanumericGenerator::new(),
    };

    let report = RateDrivenBenchmark::new(config.rate.clone())
        .with_seed(config.seed)
        .run(connector, &payload)
        .await?;

    println!("Average RPS: {}", report.rps);
    if config.json_output {
        println!("JSON: {}", serde_json::to_string(&report)?);
    }

    // In-flight operations are abandoned with the runtime; no QUIT is sent.
    Ok(())
}

async fn run_lifecycle(config: &Config, connector: &RedisConnector) -> anyhow::Result<()> {
    let payload = match config.seed {
        Some(seed) => AlphanumericGenerator::seeded(seed),
        None => AlphanumericGenerator::new(),
    };

    let report = LifecycleBenchmark::new(config.lifecycle.clone())
        .run(connector, &payload)
        .await?;

    for timing in &report.phases {
        if let Some(rate) = timing.ops_per_sec() {
            info!("{} phase: {:.0} ops/s", timing.phase, rate);
        }
    }
    info!(
        "Lifecycle complete: {} keys, {} operations",
        report.population,
        report.total_operations()
    );

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redbench=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    let connector = RedisConnector::new(config.store_url.clone());
    info!("Benchmarking store at {}", connector.url());

    match cli.scenario {
        Scenario::Rate => run_rate(&config, &connector).await,
        Scenario::Lifecycle => run_lifecycle(&config, &connector).await,
    }
}
