use thiserror::Error;

/// Message shown to the user for any failed generation
pub const GENERATION_FAILED_MESSAGE: &str = "Orbital data synchronization failed. Please try again.";

/// Every way a texture request can fail. All variants are one failure class
/// for the caller: the request is over and may be retried.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Response(#[from] serde_json::Error),

    #[error("model returned no image")]
    EmptyResult,

    #[error("invalid image payload: {0}")]
    Payload(#[from] base64::DecodeError),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

impl TextureError {
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}
