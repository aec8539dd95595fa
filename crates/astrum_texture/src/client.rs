use astrum_core::AstrumConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::TextureError;
use crate::prompts;

/// Something that can turn a planet id into an image.
/// Implementations block; callers run them off the main thread.
pub trait TextureGenerator: Send + Sync + 'static {
    fn generate(&self, planet_id: &str) -> Result<GeneratedImage, TextureError>;
}

/// Raw image returned by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    pub fn from_base64(mime_type: &str, data: &str) -> Result<Self, TextureError> {
        let bytes = STANDARD.decode(data.trim())?;
        if bytes.is_empty() {
            return Err(TextureError::EmptyResult);
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// `data:<mime>;base64,<payload>` reference
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// Decode into pixels. Format is sniffed from the bytes, not the mime type.
    pub fn decode(&self) -> Result<image::DynamicImage, TextureError> {
        Ok(image::load_from_memory(&self.bytes)?)
    }
}

// --- Wire format ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Pull the first inline image out of a `generateContent` response body.
/// Only the first candidate is considered.
pub fn extract_inline_image(body: &str) -> Result<GeneratedImage, TextureError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.inline_data))
        .ok_or(TextureError::EmptyResult)?;
    GeneratedImage::from_base64(&inline.mime_type, &inline.data)
}

/// Gemini image model over the REST `generateContent` endpoint
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiClient {
    pub fn from_config(config: &AstrumConfig) -> Self {
        Self {
            endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            model: config.image_model.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextureGenerator for GeminiClient {
    fn generate(&self, planet_id: &str) -> Result<GeneratedImage, TextureError> {
        let key = self.api_key.as_deref().ok_or(TextureError::MissingApiKey)?;
        let prompt = prompts::prompt_for(planet_id);

        log::info!("Texture: requesting {} from {}", planet_id, self.model);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        let response = client
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(TextureError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let image = extract_inline_image(&body)?;
        log::info!(
            "Texture: received {} ({} bytes) for {}",
            image.mime_type,
            image.bytes.len(),
            planet_id
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn extracts_first_inline_part() {
        let payload = STANDARD.encode(png_bytes());
        let body = format!(
            r#"{{"candidates":[{{"content":{{"parts":[
                {{"text":"here you go"}},
                {{"inlineData":{{"mimeType":"image/png","data":"{payload}"}}}}
            ]}}}}]}}"#
        );
        let image = extract_inline_image(&body).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, png_bytes());
        assert!(image.data_url().starts_with("data:image/png;base64,"));

        let decoded = image.decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 1));
    }

    #[test]
    fn text_only_response_is_empty_result() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#;
        assert!(matches!(extract_inline_image(body), Err(TextureError::EmptyResult)));
        assert!(matches!(extract_inline_image("{}"), Err(TextureError::EmptyResult)));
    }

    #[test]
    fn garbage_is_a_response_error() {
        assert!(matches!(extract_inline_image("not json"), Err(TextureError::Response(_))));
    }

    #[test]
    fn bad_base64_is_a_payload_error() {
        let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"@@@"}}]}}]}"#;
        assert!(matches!(extract_inline_image(body), Err(TextureError::Payload(_))));
    }

    #[test]
    fn non_image_bytes_fail_to_decode() {
        let image = GeneratedImage {
            mime_type: "image/png".to_string(),
            bytes: b"definitely not a png".to_vec(),
        };
        assert!(matches!(image.decode(), Err(TextureError::Decode(_))));
    }

    #[test]
    fn missing_key_fails_without_network() {
        let client = GeminiClient::from_config(&AstrumConfig::default());
        assert!(matches!(client.generate("earth"), Err(TextureError::MissingApiKey)));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let mut config = AstrumConfig::default();
        config.api_endpoint = "http://localhost:9/v1/".to_string();
        config.image_model = "m".to_string();
        let client = GeminiClient::from_config(&config);
        assert_eq!(client.url(), "http://localhost:9/v1/models/m:generateContent");
    }
}
