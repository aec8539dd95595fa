//! Client for the generative image API that produces planet surface textures.

pub mod client;
pub mod error;
pub mod prompts;

pub use client::{GeminiClient, GeneratedImage, TextureGenerator, extract_inline_image};
pub use error::{GENERATION_FAILED_MESSAGE, TextureError};
