use std::sync::Arc;

use tracing::{error, info};

use driveindex::{AppState, Config, DriveClient, IdCodec, ListingSettings, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = driveindex::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        driveindex::logging::init_console_only(&config.logging.level);
    }

    info!("Drive Index");

    if let Err(e) = run(config).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> driveindex::Result<()> {
    config.validate()?;

    let provider = DriveClient::new(&config.drive)?;
    let codec = IdCodec::new(&config.codec.secret)?;
    let settings = ListingSettings::from_config(&config);
    let state = AppState::new(Arc::new(provider), codec, settings)?;

    let server = WebServer::new(&config.server, Arc::new(state))?;
    info!("Server configured on {}", server.addr());
    server.run().await?;
    Ok(())
}
