//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use sharebox_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sharebox API",
        version = "0.1.0",
        description = "Upload a file, get a download-page link, fetch it back, and email the link to someone."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::describe::describe_file,
        handlers::download::download_file,
        handlers::notify::notify_recipient,
    ),
    components(schemas(
        models::UploadResponse,
        models::FileSummary,
        models::NotifyRequest,
        models::MessageResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "files", description = "File upload, lookup, download and sharing")
    )
)]
struct ApiDoc;
