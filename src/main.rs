use clap::Parser;
use std::sync::Arc;
use studio_api::utils::{logger, validation::Validate};
use studio_api::{build_router, AppState, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(args.verbose);
    }

    tracing::info!("Starting studio-api");

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Missing credentials are not fatal at startup; the endpoints that need
    // them answer with a configuration error instead.
    if config.generator_api_key().is_none() {
        tracing::warn!("⚠️ GEMINI_API_KEY not set, blueprint generation will be unavailable");
    }
    if config.mail_api_key().is_none() {
        tracing::warn!("⚠️ RESEND_API_KEY not set, contact form delivery will be unavailable");
    }

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = Arc::new(AppState { config });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("✅ Listening on {}", addr);

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
