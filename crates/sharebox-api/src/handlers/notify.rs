use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::NotificationService;
use axum::{extract::State, Json};
use sharebox_core::models::{MessageResponse, NotifyRequest};

#[utoipa::path(
    post,
    path = "/api/files/email",
    tag = "files",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Email sent and sender/receiver recorded", body = MessageResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Mail transport failure", body = ErrorResponse)
    )
)]
pub async fn notify_recipient(
    State(notification): State<NotificationService>,
    ValidatedJson(request): ValidatedJson<NotifyRequest>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    notification
        .notify(&request.id, &request.email_from, &request.email_to)
        .await?;

    Ok(Json(MessageResponse::new("Email Sent")))
}
