use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

use crate::consts::consts::MAX_AVATAR_BYTES;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please select an image file")]
    NotAnImage(String),

    #[error("File size must be less than 5MB")]
    TooLarge(u64),

    #[error("Unable to read the selected file: {0}")]
    Unreadable(String),
}

impl UploadError {
    pub fn message_key(&self) -> &'static str {
        match self {
            UploadError::NotAnImage(_) => "Please select an image file",
            UploadError::TooLarge(_) => "File size must be less than 5MB",
            UploadError::Unreadable(_) => "Unable to read the selected file",
        }
    }
}

/// A file picked for upload, described the way a file picker reports it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub path: PathBuf,
    pub mime_type: String,
    pub size: u64,
}

impl FileUpload {
    /// Describes the file at `path`. The MIME type is inferred from the extension unless given.
    pub fn from_path(path: impl Into<PathBuf>, mime_type: Option<String>) -> Result<Self, UploadError> {
        let path = path.into();

        let metadata = std::fs::metadata(&path)
            .map_err(|e| UploadError::Unreadable(format!("{}: {}", path.display(), e)))?;

        if !metadata.is_file() {
            return Err(UploadError::Unreadable(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let mime_type = mime_type.unwrap_or_else(|| mime_from_path(&path).to_string());

        Ok(Self {
            path,
            mime_type,
            size: metadata.len(),
        })
    }
}

pub fn mime_from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Checks type then size, nothing is read from disk
pub fn validate_upload(upload: &FileUpload) -> Result<(), UploadError> {
    if !upload.mime_type.starts_with("image/") {
        return Err(UploadError::NotAnImage(upload.mime_type.clone()));
    }

    if upload.size > MAX_AVATAR_BYTES {
        return Err(UploadError::TooLarge(upload.size));
    }

    Ok(())
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Reads the whole file and encodes it as a data URL
pub async fn read_as_data_url(upload: FileUpload) -> Result<String, UploadError> {
    let bytes = tokio::fs::read(&upload.path)
        .await
        .map_err(|e| UploadError::Unreadable(format!("{}: {}", upload.path.display(), e)))?;

    log::debug!(
        "Read {} bytes from [{}]",
        bytes.len(),
        upload.path.display()
    );

    Ok(encode_data_url(&upload.mime_type, &bytes))
}
