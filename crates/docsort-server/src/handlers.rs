//! HTTP request handlers for the document sorting API.
//!
//! Implements upload, listing, deletion, preview and health check endpoints using axum.

use crate::config::dotted_extension;
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router as AxumRouter,
};
use docsort_domain::traits::{DocumentListing, DocumentStore};
use docsort_domain::{generate_stored_filename, UploadedFile};
use docsort_llm::OpenAiProvider;
use docsort_pipeline::{BatchProcessor, BatchSummary};
use docsort_store::{FsDocumentStore, StoreError};
use docsort_text::FileTextExtractor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, warn, Level};

/// Multipart field carrying uploaded files
pub const UPLOAD_FIELD: &str = "files";

/// The batch processor wired with the production adapters
pub type Processor = BatchProcessor<FileTextExtractor, OpenAiProvider, FsDocumentStore>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Batch processor for uploads
    pub processor: Arc<Processor>,
    /// Document store (shared with the processor)
    pub store: Arc<FsDocumentStore>,
    /// Transient upload directory
    pub upload_dir: Arc<PathBuf>,
    /// Accepted extensions, lower-case with the leading dot
    pub allowed_extensions: Arc<Vec<String>>,
    /// Files accepted in one request
    pub max_files: usize,
    /// Request body limit in bytes
    pub max_request_bytes: usize,
    /// Model name when the classifier is configured
    pub classifier_model: Option<String>,
}

impl AppState {
    fn is_allowed(&self, filename: &str) -> bool {
        dotted_extension(filename).is_some_and(|ext| {
            self.allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&ext))
        })
    }
}

/// Upload response: the batch summary plus a success flag
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always true; per-file failures live in `results`
    pub success: bool,
    /// Counts and per-file outcomes
    #[serde(flatten)]
    pub summary: BatchSummary,
}

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always true on a 2xx response
    pub success: bool,
    /// Human-readable confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Whether uploads are classified by a model
    pub classifier_configured: bool,
    /// Model name when configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Upload request carried no files
    #[error("No files uploaded")]
    NoFiles,

    /// Upload request exceeded the per-request file limit
    #[error("Too many files: at most {0} per upload")]
    TooManyFiles(usize),

    /// Upload had a disallowed extension
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Malformed multipart body
    #[error("Invalid upload: {0}")]
    Multipart(String),

    /// Document store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoFiles
            | ApiError::TooManyFiles(_)
            | ApiError::UnsupportedFileType(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => match e {
                StoreError::FileNotFound
                | StoreError::MetadataNotFound
                | StoreError::FolderNotFound => StatusCode::NOT_FOUND,
                StoreError::InvalidName(_) | StoreError::NotADirectory | StoreError::NotAFile => {
                    StatusCode::BAD_REQUEST
                }
                StoreError::Io(_) | StoreError::Serialization(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "Request failed");
        } else {
            debug!(error = %self, "Request rejected");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Remove uploads already written for a rejected request
async fn discard_uploads(files: &[UploadedFile]) {
    for file in files {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %file.path.display(), error = %e, "Failed to discard upload");
            }
        }
    }
}

/// Stream every `files` part to the upload directory
///
/// Any other part name is rejected. Files are pushed onto `files` before
/// their bytes are written so a failure part-way through still leaves every
/// path available for cleanup.
async fn receive_files(
    state: &AppState,
    multipart: &mut Multipart,
    files: &mut Vec<UploadedFile>,
) -> Result<(), ApiError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            return Err(ApiError::Multipart(format!(
                "unexpected field {:?}",
                field.name().unwrap_or_default()
            )));
        }

        let original = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::Multipart("file part without a filename".to_string()))?;

        if files.len() >= state.max_files {
            return Err(ApiError::TooManyFiles(state.max_files));
        }
        if !state.is_allowed(&original) {
            return Err(ApiError::UnsupportedFileType(
                dotted_extension(&original).unwrap_or(original),
            ));
        }

        let path = state.upload_dir.join(generate_stored_filename(&original));
        let mut out = tokio::fs::File::create(&path).await?;
        files.push(UploadedFile::new(path.clone(), original, 0));

        let mut size = 0u64;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?
        {
            out.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        out.flush().await?;

        if let Some(file) = files.last_mut() {
            file.size = size;
            debug!(file = %file.original_filename, bytes = size, "Received upload");
        }
    }
    Ok(())
}

/// POST /api/upload - Classify and store a batch of files
async fn upload_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();
    if let Err(e) = receive_files(&state, &mut multipart, &mut files).await {
        discard_uploads(&files).await;
        return Err(e);
    }
    if files.is_empty() {
        return Err(ApiError::NoFiles);
    }

    info!("Processing {} files", files.len());
    // Detached so a dropped request still finishes the batch and its cleanup
    let processor = state.processor.clone();
    let summary = tokio::spawn(async move { processor.process_batch(files).await })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!(
        "Processing complete: {} successful, {} failed",
        summary.successful, summary.failed
    );

    Ok(Json(UploadResponse {
        success: true,
        summary,
    }))
}

/// GET /api/documents - Every folder with its documents
async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentListing>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// DELETE /api/documents/:folder/:filename - Delete one document and its sidecar
async fn delete_document(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    info!("Delete request for: {}/{}", folder, filename);
    state.store.delete_document(&folder, &filename).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: None,
    }))
}

/// DELETE /api/folders/:folder - Delete a folder and all its contents
async fn delete_folder(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    info!("Delete folder request for: {}", folder);
    state.store.delete_folder(&folder).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: Some(format!(
            "Folder '{}' and all its contents have been deleted",
            folder
        )),
    }))
}

/// Content type served for a stored file's extension
pub fn mime_for(filename: &str) -> &'static str {
    match dotted_extension(filename).as_deref() {
        Some(".pdf") => "application/pdf",
        Some(".docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some(".txt") => "text/plain",
        Some(".jpg") | Some(".jpeg") => "image/jpeg",
        Some(".png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// GET /api/documents/:folder/:filename/preview - Stream a stored file inline
async fn preview_document(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let path = state.store.document_path(&folder, &filename).await?;

    let file = tokio::fs::File::open(&path).await?;
    let len = file.metadata().await?.len();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_for(&filename))
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", filename.replace('"', "'")),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// GET /health - Liveness and classifier status
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        classifier_configured: state.classifier_model.is_some(),
        model: state.classifier_model.clone(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_request_bytes);

    AxumRouter::new()
        .route("/api/upload", post(upload_documents))
        .route("/api/documents", get(list_documents))
        .route("/api/documents/:folder/:filename", delete(delete_document))
        .route(
            "/api/documents/:folder/:filename/preview",
            get(preview_document),
        )
        .route("/api/folders/:folder", delete(delete_folder))
        .route("/health", get(health_check))
        .layer(body_limit)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
