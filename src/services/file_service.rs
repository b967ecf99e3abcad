use base64::Engine;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tokio::fs;
use uuid::Uuid;

use crate::dto::file_dto::UploadFilePayload;
use crate::error::{Error, Result};

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf", "jpg", "jpeg", "png", "webp"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

fn extension_of(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

/// Content sniffing for the formats with well-known signatures. The client
/// checks types before upload, but nothing it says is trusted here.
fn check_magic_bytes(ext: &str, data: &[u8]) -> Result<()> {
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }
    Ok(())
}

/// Accepts raw base64 or a full `data:` URL and returns the decoded bytes.
fn decode_payload(file_data: &str) -> Result<Bytes> {
    let encoded = match file_data.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => file_data,
    };
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map(Bytes::from)
        .map_err(|_| Error::BadRequest("File data is not valid base64".into()))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredFile {
    pub file_id: String,
    pub url: String,
}

#[derive(Clone)]
pub struct FileService {
    pool: PgPool,
    uploads_dir: String,
    max_bytes: usize,
}

impl FileService {
    pub fn new(pool: PgPool, uploads_dir: String, max_bytes: usize) -> Self {
        Self {
            pool,
            uploads_dir,
            max_bytes,
        }
    }

    /// Decodes, re-validates, and writes the content. The stored name is the
    /// sha256 of the bytes, so identical uploads land on the same file.
    async fn store(&self, payload: &UploadFilePayload, allowed: &[&str]) -> Result<StoredFile> {
        let ext = extension_of(&payload.file_name);
        if !allowed.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!(
                "File type .{} is not allowed",
                ext
            )));
        }
        if payload.mime_type.starts_with("image/") && !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Error::BadRequest(
                "Declared image type does not match file extension".into(),
            ));
        }

        let data = decode_payload(&payload.file_data)?;
        if data.is_empty() {
            return Err(Error::BadRequest("Uploaded file is empty".into()));
        }
        if data.len() > self.max_bytes {
            return Err(Error::BadRequest(format!(
                "File exceeds the {} byte upload limit",
                self.max_bytes
            )));
        }
        check_magic_bytes(&ext, &data)?;

        let digest = hex::encode(Sha256::digest(&data));
        let file_id = format!("{}.{}", digest, ext);

        fs::create_dir_all(&self.uploads_dir).await?;
        let path = format!("{}/{}", self.uploads_dir, file_id);
        fs::write(&path, &data).await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "failed to write upload");
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(StoredFile {
            url: format!("/uploads/{}", file_id),
            file_id,
        })
    }

    pub async fn store_resume(
        &self,
        user_id: Uuid,
        payload: &UploadFilePayload,
    ) -> Result<StoredFile> {
        let stored = self.store(payload, ALLOWED_EXTENSIONS).await?;

        let updated = sqlx::query("UPDATE candidate_profiles SET resume_id = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(&stored.file_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if updated == 0 {
            return Err(Error::NotFound("Candidate profile not found".to_string()));
        }

        Ok(stored)
    }

    pub async fn store_profile_image(
        &self,
        user_id: Uuid,
        payload: &UploadFilePayload,
    ) -> Result<StoredFile> {
        let stored = self.store(payload, IMAGE_EXTENSIONS).await?;

        sqlx::query("UPDATE users SET profile_image = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(&stored.file_id)
            .execute(&self.pool)
            .await?;

        Ok(stored)
    }

    /// JD uploads aren't tied to a row yet; the id is handed back for the
    /// requisition payload to carry.
    pub async fn store_jd(&self, payload: &UploadFilePayload) -> Result<StoredFile> {
        self.store(payload, ALLOWED_EXTENSIONS).await
    }

    pub async fn delete(&self, file_id: &str) -> Result<()> {
        let valid = !file_id.is_empty()
            && file_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.')
            && !file_id.contains("..");
        if !valid {
            return Err(Error::BadRequest("Invalid file id".to_string()));
        }

        let path = format!("{}/{}", self.uploads_dir, file_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound("File not found".to_string()))
            }
            Err(e) => Err(Error::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_with_bin_fallback() {
        assert_eq!(extension_of("Resume.PDF"), "pdf");
        assert_eq!(extension_of("noext"), "bin");
    }

    #[test]
    fn pdf_magic_bytes_are_enforced() {
        assert!(check_magic_bytes("pdf", b"%PDF-1.7 ...").is_ok());
        assert!(check_magic_bytes("pdf", b"<html>").is_err());
    }

    #[test]
    fn png_magic_bytes_are_enforced() {
        assert!(check_magic_bytes("png", &[0x89, 0x50, 0x4E, 0x47, 0x0D]).is_ok());
        assert!(check_magic_bytes("png", &[0xFF, 0xD8, 0x00]).is_err());
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"hello");
        let with_prefix = format!("data:text/plain;base64,{}", encoded);
        assert_eq!(&decode_payload(&with_prefix).unwrap()[..], b"hello");
        assert_eq!(&decode_payload(&encoded).unwrap()[..], b"hello");
    }

    #[test]
    fn garbage_base64_is_rejected() {
        assert!(decode_payload("!!not-base64!!").is_err());
    }
}
