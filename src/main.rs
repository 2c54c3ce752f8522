use anyhow::Context;
use clap::Parser;
use hipflights::utils::{logger, validation::Validate};
use hipflights::{
    build_router, CliConfig, Dispatcher, FlightSearch, FlightServer, HttpScraperClient,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hipflights");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.load().context("failed to load configuration")?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let settings = config.scraper_settings();
    tracing::info!(
        scraper_host = %settings.host,
        providers = ?settings.providers,
        timeout = ?settings.timeout,
        "scraper configuration loaded"
    );

    let client = HttpScraperClient::new(&settings)?;
    let dispatcher = Dispatcher::from_settings(client, &settings)?;
    let search = Arc::new(FlightSearch::new(dispatcher));

    let server = FlightServer::start(build_router(search), &config.server.host, config.server.port)
        .await
        .context("failed to start HTTP server")?;

    tracing::info!("✈️  Serving flight search on {}", server.search_url());
    println!("✈️  Serving flight search on {}", server.search_url());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    server.shutdown();
    Ok(())
}
