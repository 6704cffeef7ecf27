use address_proxy::config::config_search_paths;
use address_proxy::{build_router, AppState, GoogleValidator, ProxyConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "address-proxy",
    about = "Validate postal addresses through the Google Address Validation API",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; the environment may already carry the key.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "address_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        for (i, path) in config_search_paths().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        return Ok(());
    }

    let mut config = ProxyConfig::find_and_load(cli.config.as_deref())?;

    if let Some(port) = cli.port {
        config.port = port;
    }

    // A missing key is not fatal; every validation request then answers 500.
    let api_key = match config.resolve_api_key() {
        Ok(key) => Some(key),
        Err(e) => {
            warn!(error = %e, "Starting without an API key; validation requests will fail");
            None
        }
    };
    let validator = GoogleValidator::from_config(&config, api_key)?;

    info!("address-proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("  Upstream:  {}", validator.endpoint());
    info!(
        "  Key env:   {} ({})",
        config.upstream.api_key_env,
        if validator.has_api_key() { "set" } else { "missing" }
    );
    info!(
        "  Timeouts:  connect={}s request={}s",
        config.upstream.connect_timeout_secs, config.upstream.timeout_secs
    );
    info!("  Port:      {}", config.port);

    let state = Arc::new(AppState {
        config: config.clone(),
        validator: Arc::new(validator),
    });

    let app = build_router(state);
    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);
    info!("  POST http://localhost:{}/validate-address/", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
