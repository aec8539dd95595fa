use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variables checked for the image generation credential, in order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Default config file looked up next to the working directory
pub const CONFIG_FILE: &str = "astrum.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AstrumConfig {
    /// Credential for the image generation API. Absence only surfaces when a
    /// generation is requested.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the generative API
    pub api_endpoint: String,
    /// Image-capable model name
    pub image_model: String,
    /// Upper bound for one generation request
    pub request_timeout_secs: u64,
    /// Background stars
    pub star_count: u32,
    /// Seed for deterministic star placement
    pub star_seed: u64,
    /// Splash duration before the fade starts
    pub intro_secs: f32,
    pub intro_fade_secs: f32,
}

impl Default for AstrumConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            request_timeout_secs: 120,
            star_count: 6000,
            star_seed: 42,
            intro_secs: 4.0,
            intro_fade_secs: 1.0,
        }
    }
}

impl AstrumConfig {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Config parse error: {e}"))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|e| format!("Read error: {e}"))?;
        Self::from_json(&text)
    }

    /// Take the credential from the first non-empty variable in [`API_KEY_VARS`]
    pub fn with_env_overrides(self) -> Self {
        let key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.trim().is_empty());
        self.with_api_key(key)
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }
}
