//! Browser-side services.
//!
//! # Services
//!
//! - [`gateway`] - Processing service access over `gloo-net`
//! - [`timer`] - `setTimeout` clock for the refresh scheduler

pub mod gateway;
pub mod timer;

pub use gateway::*;
pub use timer::*;
