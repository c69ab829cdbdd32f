use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use serde_json::Value;
use sports_classifier::{
    catalog::Catalog,
    classifier::{Classifier, SimulatedModel},
    history::HistoryRing,
    prediction::PredictionService,
    server::{self, handlers::AppState},
};
use std::io::Cursor;
use std::sync::Arc;

pub const BOUNDARY: &str = "sports-classifier-test-boundary";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Service wired to a seeded simulation model and the built-in catalog.
pub fn create_test_service(capacity: usize) -> Arc<PredictionService> {
    let catalog = Catalog::builtin();
    let classifier = Classifier::Simulated(SimulatedModel::with_seed(catalog.len(), 7));
    Arc::new(PredictionService::new(
        Arc::new(catalog),
        Arc::new(classifier),
        Arc::new(HistoryRing::new(capacity)),
    ))
}

pub fn create_test_app() -> Router {
    let state = AppState {
        service: create_test_service(10),
    };
    server::router(state, MAX_UPLOAD_BYTES)
}

pub fn sample_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = ImageBuffer::from_pixel(width, height, Rgb(color));
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

pub fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let gradient = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 90])
    });
    encode(DynamicImage::ImageRgb8(gradient), ImageFormat::Jpeg)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(field: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, "upload.bin", content)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
