//! Constants, configuration and the session that ties the simulation together.

pub mod config;
pub mod constants;
pub mod session;

pub use config::GameConfig;
pub use session::{Session, SessionEvent};
