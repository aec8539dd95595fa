pub mod flight;
pub mod motion;
pub mod plugin;
pub mod session;
pub mod state;

pub use plugin::{SessionPlugin, Settings};
pub use session::{GenerationTicket, Session};
pub use state::AppState;
