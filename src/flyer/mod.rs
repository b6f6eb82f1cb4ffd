//! Player-controlled flyer.
//!
//! Waits on the ground until the first jump, then flies under gravity with
//! each jump replacing its vertical velocity. The first collision freezes it
//! for the rest of the session.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
