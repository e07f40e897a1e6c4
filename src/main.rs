use tracing_subscriber::{EnvFilter, fmt};
use tracing::info;

use oceanside::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "oceanside",
        "oceanside starting: RUST_LOG='{}', port={}, allowed_origins={:?}, db_op_timeout={:?}",
        rust_log, config.port, config.allowed_origins, config.db_op_deadline
    );

    oceanside::server::run(config).await
}
