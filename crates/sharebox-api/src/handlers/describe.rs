use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ResolutionService;
use axum::{
    extract::{Path, State},
    Json,
};
use sharebox_core::models::FileSummary;

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File metadata", body = FileSummary),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn describe_file(
    State(resolution): State<ResolutionService>,
    Path(id): Path<String>,
) -> Result<Json<FileSummary>, HttpAppError> {
    let summary = resolution.describe(&id).await?;
    Ok(Json(summary))
}
