use crate::captioner::Captioner;
use crate::config::Config;
use crate::constants::{DEFAULT_LANGUAGE, INVALID_SUMMARY_FLAG, MISSING_FILE, NOT_AN_IMAGE};
use crate::errors::ApiError;
use crate::utils::validate_image;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{any::Any, error::Error, sync::Arc};
use tower_http::catch_panic::CatchPanicLayer;

const INDEX_HTML: &str = include_str!("../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub captioner: Arc<Captioner>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub original_caption: String,
    pub improved_caption: String,
    pub summary: Option<String>,
    pub image_base64: String,
    pub filename: Option<String>,
    pub provider: String,
    pub language: String,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Fields of a `POST /upload-image/` form.
#[derive(Debug)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub language: String,
    pub include_summary: bool,
}

impl UploadForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm {
            file: None,
            language: DEFAULT_LANGUAGE.to_string(),
            include_summary: false,
        };

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    // Checked before the body is read or decoded.
                    let content_type = field
                        .content_type()
                        .filter(|ct| ct.starts_with("image/"))
                        .map(str::to_string)
                        .ok_or_else(|| ApiError::BadRequest(NOT_AN_IMAGE.to_string()))?;
                    let filename = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await?;
                    form.file = Some(UploadedFile {
                        filename,
                        content_type,
                        bytes,
                    });
                }
                "language" => {
                    let language = field.text().await?;
                    if !language.trim().is_empty() {
                        form.language = language;
                    }
                }
                "include_summary" => {
                    let raw = field.text().await?;
                    form.include_summary = parse_form_bool(&raw)
                        .ok_or_else(|| ApiError::BadRequest(INVALID_SUMMARY_FLAG.to_string()))?;
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

pub fn parse_form_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        _ => None,
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = UploadForm::from_multipart(&mut multipart).await?;
    let file = form
        .file
        .ok_or_else(|| ApiError::BadRequest(MISSING_FILE.to_string()))?;

    log::info!(
        "Captioning {} ({} bytes, language={}, summary={})",
        file.filename.as_deref().unwrap_or("<unnamed>"),
        file.bytes.len(),
        form.language,
        form.include_summary
    );

    let image = validate_image(file.bytes, Some(&file.content_type))?;
    let captions = state
        .captioner
        .run(&image, &form.language, form.include_summary)
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        original_caption: captions.original,
        improved_caption: captions.improved,
        summary: captions.summary,
        image_base64: base64::encode(&image.bytes),
        filename: file.filename,
        provider: state.captioner.provider().to_string(),
        language: form.language,
    }))
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(cause).into_response()
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/upload-image/", post(upload_image))
}

/// Wraps `routes` in the upload limit and panic handler and binds the state.
pub fn with_middleware(
    routes: Router<AppState>,
    captioner: Captioner,
    max_upload_bytes: usize,
) -> Router {
    let state = AppState {
        captioner: Arc::new(captioner),
    };

    routes
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

pub fn build_router(captioner: Captioner, max_upload_bytes: usize) -> Router {
    with_middleware(routes(), captioner, max_upload_bytes)
}

pub async fn serve(config: &Config, captioner: Captioner) -> Result<(), Box<dyn Error>> {
    let demo = captioner.is_demo();
    let router = build_router(captioner, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    log::info!(
        "Listening on {} ({} mode)",
        listener.local_addr()?,
        if demo { "demo" } else { "live" }
    );
    axum::serve(listener, router).await?;
    Ok(())
}
