//! Route handlers for the upload service

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::application::{GenerateCallbacks, GenerateError, PublishError};

use super::payload::{FailureEntry, FilesResponse, GenerateResponse, UploadResponse};
use super::AppState;

/// Multipart field carrying the uploaded file
const UPLOAD_FIELD: &str = "file";

const INDEX_PAGE: &str = include_str!("index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// `POST /upload`
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart body");
                return bad_upload(format!("Malformed upload: {}", e));
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        match field.bytes().await {
            Ok(bytes) => {
                upload = Some((file_name, bytes));
                break;
            }
            Err(e) => return bad_upload(format!("Failed to read upload: {}", e)),
        }
    }

    let Some((file_name, bytes)) = upload else {
        return bad_upload("No file uploaded");
    };

    match state.publisher.execute(&file_name, &bytes).await {
        Ok(output) => {
            info!(file = %file_name, page = %output.page, "upload rendered");
            let body = UploadResponse {
                success: true,
                message: "File uploaded and HTML generated".to_string(),
                output_file: Some(output.output_path.display().to_string()),
                download_url: Some(output.download_url),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            let status = publish_status(&e);
            if status.is_server_error() {
                error!(file = %file_name, error = %e, "upload failed");
            } else {
                warn!(file = %file_name, error = %e, "upload rejected");
            }
            (status, Json(UploadResponse::failure(e.to_string()))).into_response()
        }
    }
}

/// `POST /generate`
pub async fn generate(State(state): State<AppState>) -> Response {
    let report = match state.generator.render_all(GenerateCallbacks::default()).await {
        Ok(report) => report,
        Err(e) => {
            let status = generate_status(&e);
            warn!(error = %e, "batch generation aborted");
            return (status, Json(GenerateResponse::failure(e.to_string()))).into_response();
        }
    };

    let generated_files: Vec<String> = report
        .generated()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect();

    let failures: Vec<FailureEntry> = report
        .failures()
        .map(|(source, e)| FailureEntry {
            source: source.display().to_string(),
            error: e.to_string(),
        })
        .collect();

    let message = if failures.is_empty() {
        format!("Generated {} file(s) successfully", generated_files.len())
    } else {
        format!(
            "Generated {} of {} file(s)",
            generated_files.len(),
            report.pages.len()
        )
    };

    let body = GenerateResponse {
        success: failures.is_empty(),
        message,
        generated_files,
        failures,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /files`
pub async fn list_files(State(state): State<AppState>) -> Response {
    match state.catalog.list().await {
        Ok(files) => Json(FilesResponse { files }).into_response(),
        Err(e) => {
            error!(error = %e, "listing pages failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// `GET /downloads/:filename`
pub async fn download(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    match state.catalog.open(&filename).await {
        Ok(Some(page)) => {
            let disposition = format!("attachment; filename=\"{}\"", page.name);
            (
                [
                    (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                page.bytes,
            )
                .into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "file not found").into_response(),
        Err(e) => {
            error!(file = %filename, error = %e, "download failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn bad_upload(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(UploadResponse::failure(message)),
    )
        .into_response()
}

/// HTTP status for a failed upload
fn publish_status(e: &PublishError) -> StatusCode {
    match e {
        PublishError::InvalidFileName(_) | PublishError::NotUtf8 { .. } => StatusCode::BAD_REQUEST,
        PublishError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PublishError::Generate(inner) => generate_status(inner),
    }
}

/// HTTP status for a failed render or batch
fn generate_status(e: &GenerateError) -> StatusCode {
    match e {
        GenerateError::NoSourceFilesFound(_)
        | GenerateError::SourceRead(_)
        | GenerateError::InvalidFileName(_)
        | GenerateError::DuplicateOutput { .. } => StatusCode::BAD_REQUEST,
        GenerateError::MissingContentDirectory(_)
        | GenerateError::ContentUnreadable(_)
        | GenerateError::MissingTemplate(_)
        | GenerateError::TemplateUnreadable(_)
        | GenerateError::OutputWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
