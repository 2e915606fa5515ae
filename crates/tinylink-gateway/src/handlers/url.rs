use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, ShortLinkResponse};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortLinkResponse>)> {
    let Json(request) = payload?;
    let original_url = request.into_validated()?;

    let link = state.shortener().create(&original_url).await?;
    info!(code = %link.short_code, id = link.id, "created short link");

    Ok((StatusCode::CREATED, Json(link.into())))
}

pub async fn redirect_handler(
    short_code: std::result::Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response> {
    // A segment that does not even decode to UTF-8 cannot name a stored link.
    let Ok(Path(short_code)) = short_code else {
        return Err(not_found());
    };

    let link = state
        .shortener()
        .find_by_code(&short_code)
        .await?
        .ok_or_else(not_found)?;

    // `from_bytes` admits UTF-8 beyond ASCII; control characters were
    // rejected when the link was created.
    let location = HeaderValue::from_bytes(link.original_url.as_bytes()).map_err(|e| {
        AppError::Internal(format!(
            "stored url for '{}' is not a valid header: {e}",
            link.short_code
        ))
    })?;

    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}

fn not_found() -> AppError {
    AppError::NotFound("URL not found".to_string())
}
