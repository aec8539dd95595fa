use astrum_core::AstrumConfig;
use astrum_core::config::CONFIG_FILE;
use bevy::prelude::*;
use std::path::PathBuf;

use super::session::Session;

/// Loaded configuration, env overrides applied
#[derive(Resource, Debug, Clone)]
pub struct Settings(pub AstrumConfig);

/// Loads configuration and installs the session state
pub struct SessionPlugin {
    pub config_path: PathBuf,
}

impl Default for SessionPlugin {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_FILE),
        }
    }
}

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        let config = match AstrumConfig::load(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{} ({}), using defaults", e, self.config_path.display());
                AstrumConfig::default()
            }
        }
        .with_env_overrides();

        if config.api_key.is_none() {
            info!("No API key set; texture generation will report a failure when requested");
        }

        app.insert_resource(Settings(config))
            .init_resource::<Session>();
    }
}
