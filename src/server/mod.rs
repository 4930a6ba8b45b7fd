pub mod error;
pub mod response;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::ServerMessage;
use crate::providers::LyricsProvider;

const ROOT_MESSAGE: &str =
    "This is the root of the API, no content here. Try other endpoints explained in the documentation.";
const MISSING_URL_MESSAGE: &str = "You must provide a Spotify URL to get the lyrics. Try '/lyrics/<a-spotify-link>' instead or other mentioned methods in the docs.";

pub struct AppState {
    pub provider: Arc<dyn LyricsProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn LyricsProvider>) -> Self {
        Self { provider }
    }
}

#[derive(Debug, Deserialize)]
pub struct LyricsQuery {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/lyrics", web::get().to(lyrics_by_query))
        .route("/lyrics/{spotify_url:.*}", web::get().to(lyrics_by_path));
}

async fn root() -> HttpResponse {
    HttpResponse::BadRequest().json(ServerMessage::info(ROOT_MESSAGE))
}

async fn lyrics_by_query(
    state: web::Data<AppState>,
    query: web::Query<LyricsQuery>,
) -> HttpResponse {
    match query.url.as_deref() {
        Some(url) => response::handle(state.provider.as_ref(), url, query.kind.as_deref()).await,
        None => HttpResponse::BadRequest().json(ServerMessage::info(MISSING_URL_MESSAGE)),
    }
}

async fn lyrics_by_path(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<TypeQuery>,
) -> HttpResponse {
    // The extractor has already percent-decoded the segment, `%2F` included
    let spotify_url = path.into_inner();

    response::handle(state.provider.as_ref(), &spotify_url, query.kind.as_deref()).await
}
