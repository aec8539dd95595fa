use bevy::prelude::*;

/// Top-level screen flow: splash first, then the interactive scene
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Intro,
    Running,
}
