use crate::constants::{UPLOAD_FIELD, UPLOAD_FIELD_ALIAS};
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::IngestionService;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use sharebox_core::models::UploadResponse;
use sharebox_core::AppError;

const FILE_NEEDED: &str = "File needed!";

/// A file pulled out of the multipart body.
struct UploadedFile {
    data: Bytes,
    original_name: String,
    content_type: String,
}

/// Extract the single file field (`myFile`, or `file`) from the form.
/// Other fields, and text parts under the file field names, are ignored;
/// a second file part is rejected.
async fn extract_multipart_file(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default();
        if field_name != UPLOAD_FIELD && field_name != UPLOAD_FIELD_ALIAS {
            continue;
        }

        // Only a part with a filename is a file
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        if file.is_some() {
            return Err(AppError::BadRequest(
                "Multiple file fields are not allowed; send exactly one file".to_string(),
            ));
        }

        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

        file = Some(UploadedFile {
            data,
            original_name,
            content_type,
        });
    }

    file.ok_or_else(|| AppError::BadRequest(FILE_NEEDED.to_string()))
}

#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "One file in the `myFile` field"),
    responses(
        (status = 200, description = "File stored and recorded", body = UploadResponse),
        (status = 400, description = "No file provided, or the object store rejected it", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(ingestion): State<IngestionService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    // A body that is not multipart at all carries no file either.
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection, "Upload without multipart body");
        AppError::BadRequest(FILE_NEEDED.to_string())
    })?;

    let file = extract_multipart_file(multipart).await?;

    let outcome = ingestion
        .upload(&file.original_name, &file.content_type, file.data)
        .await?;

    Ok(Json(UploadResponse {
        id: outcome.record.id,
        download_page_link: outcome.download_page_link,
    }))
}
