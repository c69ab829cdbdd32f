use super::types::{ErrorResponse, PredictResponse, StatusResponse};
use crate::{Error, Result, history::HistoryEntry, prediction::PredictionService};
use axum::{
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Multipart field carrying the uploaded image.
pub const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn home() -> &'static str {
    "Sports Predictor API is running! Use the frontend to upload images."
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "API is running. Send a POST request with an image to predict.".to_string(),
        mode: state.service.classifier().mode().to_string(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<PredictResponse>, ApiError> {
    let image_bytes = match multipart {
        Ok(multipart) => read_file(multipart).await,
        Err(rejection) => {
            warn!("Request is not a multipart upload: {}", rejection);
            Err(Error::MissingInput)
        }
    }
    .map_err(to_api_error)?;

    info!("Received prediction request with {} bytes", image_bytes.len());

    let service = Arc::clone(&state.service);
    let prediction = tokio::task::spawn_blocking(move || service.predict(&image_bytes))
        .await
        .map_err(|e| Error::internal(format!("prediction task failed: {e}")))
        .and_then(|result| result)
        .map_err(to_api_error)?;

    Ok(Json(prediction.into()))
}

pub async fn history(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<HistoryEntry>>, ApiError> {
    state.service.history().map(Json).map_err(to_api_error)
}

async fn read_file(mut multipart: Multipart) -> Result<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.is_empty() {
            return Err(Error::MissingInput);
        }
        return Ok(bytes);
    }

    Err(Error::MissingInput)
}

fn upload_error(err: MultipartError) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(err.body_text())
    } else {
        Error::upload(err.body_text())
    }
}

/// Full detail goes to the log; the client only sees a fixed message.
fn to_api_error(err: Error) -> ApiError {
    let (status, message) = match &err {
        Error::MissingInput => (StatusCode::BAD_REQUEST, "No file uploaded"),
        Error::Upload(_) => (StatusCode::BAD_REQUEST, "Malformed upload"),
        Error::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "Uploaded file is too large"),
        Error::Decode(_) => (StatusCode::BAD_REQUEST, "Uploaded file is not a valid image"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed"),
    };

    if err.is_client_error() {
        warn!("Rejected prediction request: {}", err);
    } else {
        error!("Failed to process prediction request: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
