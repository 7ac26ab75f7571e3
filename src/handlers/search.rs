use actix_web::{http::header::ContentType, web, HttpResponse, Result};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::SearchError;
use crate::models::ErrorResponse;
use crate::AppState;

/// Relays a book search to the provider.
///
/// Any failure collapses into a 500 with `{"error": ...}`; the provider's
/// own status code is not reflected.
pub async fn search_books(state: web::Data<AppState>, payload: web::Payload) -> Result<HttpResponse> {
    let request_id = Uuid::new_v4();
    let limit = state.config.server.max_json_payload_size;

    let result = match read_body(payload, limit).await {
        Ok(body) => state.search_service.search(&body).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(payload) => {
            info!(%request_id, bytes = payload.len(), "Book search relayed");
            Ok(HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(payload))
        }
        Err(e) => {
            error!(%request_id, "Book search error: {:?}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::from(&e)))
        }
    }
}

/// Collects the request body, failing once it grows past `limit` bytes.
async fn read_body(mut payload: web::Payload, limit: usize) -> Result<Bytes, SearchError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            SearchError::invalid_body(format!("Failed to read request body: {}", e))
        })?;
        if body.len() + chunk.len() > limit {
            return Err(SearchError::invalid_body(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
