//! API constants

/// Prefix of every file route
pub const API_PREFIX: &str = "/api/files";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "myFile";

/// Alternate multipart field name, accepted for generic clients.
pub const UPLOAD_FIELD_ALIAS: &str = "file";

pub const OPENAPI_PATH: &str = "/api/openapi.json";
