//! Strata Core
//!
//! This crate contains the pieces every other Strata crate builds on: the
//! typed event model and its dispatcher, input state tracking, the platform
//! boundary, and the logging and profiling setup.

pub mod config;
pub mod event;
pub mod input;
pub mod logging;
pub mod math;
pub mod platform;
pub mod profiling;
