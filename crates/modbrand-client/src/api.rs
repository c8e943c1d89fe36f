//! The service contract, independent of transport.

use async_trait::async_trait;
use thiserror::Error;

use modbrand_core::{BrandImage, PendingImage, User};

/// Branding service errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body could not be understood.
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Text the service sent back with a rejection, if any.
    pub fn server_text(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP (no status to report).
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// An image file staged for the `image-upload` multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Build an upload, guessing the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Everything the dashboard needs from the branding service.
///
/// All calls are credentialed with the configured session. Client-side role
/// checks are a convenience; the service authorizes each privileged call.
#[async_trait]
pub trait BrandApi: Send + Sync {
    /// `GET /session`. `Ok(None)` means "no usable identity" (non-200, empty
    /// or null body, record without a login).
    async fn session(&self) -> Result<Option<User>, ApiError>;

    /// `POST /logout`.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /brand/list`: the caller's own images.
    async fn list_images(&self) -> Result<Vec<BrandImage>, ApiError>;

    /// `POST /brand/submit` with the multipart `image-upload` field.
    async fn submit(&self, upload: &Upload) -> Result<(), ApiError>;

    /// `GET /brand/pending`: every image awaiting review.
    async fn list_pending(&self) -> Result<Vec<PendingImage>, ApiError>;

    /// `POST /brand/pending/accept?id=`.
    async fn accept(&self, id: &str) -> Result<(), ApiError>;

    /// `DELETE /brand/delete?id=`. Owners delete their own images; staff and
    /// admins may delete any, which is how a submission gets rejected.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// `POST /brand/verify?user=`. Admin only.
    async fn verify_user(&self, user_id: &str) -> Result<(), ApiError>;

    /// `GET /brand` liveness probe; returns the body text.
    async fn ping(&self) -> Result<String, ApiError>;
}
