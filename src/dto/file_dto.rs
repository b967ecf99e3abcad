use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upload body: raw content arrives base64-encoded, per the mobile client's
/// contract. Size and type are re-checked server-side regardless of what the
/// client validated.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadFilePayload {
    #[validate(length(min = 1))]
    pub file_name: String,
    #[validate(length(min = 1))]
    pub file_data: String,
    #[validate(length(min = 1))]
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub url: String,
}
