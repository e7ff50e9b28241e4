use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use dart_calendar::cache::Cache;
use dart_calendar::client::Client;
use dart_calendar::config::Settings;
use dart_calendar::server::router;
use dart_calendar::Provider;

/// Serves iCal calendars of dart league match programs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the settings file)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(bind) = args.bind {
        settings.bind_address = bind;
    }

    let cache = match &settings.cache_file {
        None => Cache::new(),
        Some(path) => match Cache::from_file(path) {
            Ok(cache) => cache,
            Err(err) => {
                log::warn!("Invalid cache file: {}. Using a default cache", err);
                Cache::with_backing_file(path)
            }
        },
    };

    let client = Client::new(settings.api_url.clone());
    let provider = Arc::new(Provider::new(client, cache, &settings)?);
    let app = router(provider);

    let listener = tokio::net::TcpListener::bind(settings.bind_address.as_str()).await?;
    log::info!("Serving calendars on http://{}", settings.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
