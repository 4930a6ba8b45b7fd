use actix_web::middleware::{Compress, DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use spotify_lyrics_api::{
    config::Config,
    providers::{spotify::SpotifyProvider, LyricsProvider},
    server::{self, AppState},
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    // A missing SP_DC stops us here, before anything binds
    let provider: Arc<dyn LyricsProvider> =
        Arc::new(SpotifyProvider::from_config(&config).context("configure Spotify access")?);

    // Fetch the first token in the background so the first request is quick
    let warm = Arc::clone(&provider);
    actix_web::rt::spawn(async move {
        if let Err(e) = warm.warm_up().await {
            warn!("Initial token fetch failed: {e}");
        }
    });

    let state = web::Data::new(AppState::new(provider));

    info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Server", "spotify-lyrics-api")))
            .configure(server::configure_service)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
