use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};

use crate::error::LyricsError;
use crate::models::ServerMessage;

impl ResponseError for LyricsError {
    fn status_code(&self) -> StatusCode {
        match self {
            LyricsError::InvalidUrl | LyricsError::InvalidType(_) => StatusCode::BAD_REQUEST,
            LyricsError::LyricsNotFound => StatusCode::NOT_FOUND,
            LyricsError::InvalidCredential
            | LyricsError::UpstreamUnavailable(_)
            | LyricsError::Decode(_) => StatusCode::BAD_GATEWAY,
            LyricsError::MissingCredential | LyricsError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            LyricsError::Other(e) => {
                error!("Unhandled failure: {e:#}");
                format!("An unknown error occurred: {e}")
            }
            other => {
                if status.is_server_error() {
                    warn!("{other}");
                }
                other.to_string()
            }
        };

        HttpResponse::build(status).json(ServerMessage::error(message))
    }
}
