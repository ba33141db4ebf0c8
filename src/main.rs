use fundflow::sources::FileSource;
use fundflow::{run_dashboard, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env();
    config.indicators.validate()?;

    if config.candle_limit < config.indicators.min_candles() {
        tracing::warn!(
            "CANDLE_LIMIT {} is below the {} candles needed for a ready snapshot",
            config.candle_limit,
            config.indicators.min_candles()
        );
    }

    info!("Reading market data from {}", config.data_dir);
    let source = FileSource::new(&config.data_dir);
    let results = run_dashboard(&source, &config).await?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
