use bytes::Bytes;
use thiserror::Error;

/// Raised when a detection request is constructed from an empty byte buffer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("image payload is empty")]
pub struct EmptyImage;

/// A single image submission bound for the remote workflow.
///
/// Carries the raw upload bytes plus the client-supplied filename. The
/// filename is only consulted to pick a file suffix when the image has to be
/// staged on disk; no image-format validation happens at this layer.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    bytes: Bytes,
    filename_hint: String,
}

impl DetectionRequest {
    pub fn new(bytes: Bytes, filename_hint: impl Into<String>) -> Result<Self, EmptyImage> {
        if bytes.is_empty() {
            return Err(EmptyImage);
        }
        Ok(Self {
            bytes,
            filename_hint: filename_hint.into(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename_hint(&self) -> &str {
        &self.filename_hint
    }
}
