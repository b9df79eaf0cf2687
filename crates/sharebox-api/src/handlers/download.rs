use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ResolutionService;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
};
use futures::StreamExt;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use sharebox_core::AppError;

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            let keep = c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\');
            if keep {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}

#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File bytes", content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(resolution), fields(operation = "download_file"))]
pub async fn download_file(
    State(resolution): State<ResolutionService>,
    Path(id): Path<String>,
) -> Result<Response<Body>, HttpAppError> {
    let (record, stream) = resolution.fetch(&id).await?;

    // Relay chunks as they arrive
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_type = mime_guess::from_ext(&record.format).first_or_octet_stream();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&record.filename),
        )
        .header(header::CACHE_CONTROL, "private, max-age=0")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_pass_through() {
        assert_eq!(
            content_disposition("a.txt"),
            "attachment; filename=\"a.txt\"; filename*=UTF-8''a%2Etxt"
        );
    }

    #[test]
    fn quotes_and_non_ascii_are_replaced_in_fallback() {
        let value = content_disposition("rapport \"final\" é.pdf");
        assert!(value.starts_with("attachment; filename=\"rapport _final_ _.pdf\""));
        assert!(value.contains("%C3%A9"));
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }
}
