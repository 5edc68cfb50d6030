//! winit backend for Strata: one native window, pumped once per frame.

pub mod event;
pub mod time;
pub mod window;

pub use window::{Presenter, Window, WindowDescriptor, WindowError, WinitWindow};
