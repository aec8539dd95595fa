pub mod appearance;
pub mod catalog;
pub mod config;
pub mod constants;

pub use appearance::*;
pub use catalog::*;
pub use config::AstrumConfig;
pub use constants::*;
