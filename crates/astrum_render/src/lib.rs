pub mod bodies;
pub mod camera;
pub mod generation;
pub mod hud;
pub mod intro;
pub mod materials;
pub mod plugin;
pub mod scene;

pub use generation::{GenerateTextureRequested, TextureBackend};
pub use plugin::AstrumRenderPlugin;
