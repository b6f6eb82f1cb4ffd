//! Utility modules: build info and file persistence.

pub mod build_info;
pub mod persistence;

pub use build_info::*;
