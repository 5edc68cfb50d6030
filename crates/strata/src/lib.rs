//! Strata - a layered real-time application framework
//!
//! Strata owns the frame loop of a windowed application. It translates
//! platform notifications into typed events and routes them through an
//! ordered stack of layers:
//!
//! - **Layers**: units of per-frame logic with attach/detach hooks
//! - **Layer stack**: regular layers below, overlays above
//! - **Application**: the single frame loop driver and event entry point
//! - **Cameras**: orthographic and perspective cameras with controllers
//!
//! # Quick Start
//!
//! ```no_run
//! use strata::prelude::*;
//!
//! struct Sandbox;
//!
//! impl Layer for Sandbox {
//!     fn on_event(&mut self, event: &mut Event) {
//!         EventDispatcher::new(event).dispatch(|press: &KeyPressEvent| {
//!             tracing::info!("pressed {}", press.code());
//!             false
//!         });
//!     }
//! }
//!
//! fn main() -> Result<(), ApplicationError> {
//!     let mut app = Application::new(ApplicationConfig::new().with_title("Sandbox"))?;
//!     app.push_layer(Sandbox);
//!     app.run();
//!     Ok(())
//! }
//! ```
//!
//! # Event order
//!
//! Layers update in push order (regular layers, then overlays). Events travel
//! the other way: the topmost overlay sees an event first, and routing stops
//! at the first layer that marks it handled.

pub mod application;
pub mod camera;
pub mod input;
pub mod layer;
pub mod layer_stack;
pub mod time;

// Re-export core types
pub use strata_core as core;
pub use strata_core::math;

#[cfg(feature = "winit")]
pub use strata_winit as winit;

pub use application::{AppHandle, Application, ApplicationConfig};
#[cfg(feature = "winit")]
pub use application::ApplicationError;
pub use input::Input;
pub use layer::{Layer, LayerId};
pub use layer_stack::LayerStack;
pub use time::FrameClock;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::{AppHandle, Application, ApplicationConfig};
    #[cfg(feature = "winit")]
    pub use crate::application::ApplicationError;
    pub use crate::camera::{
        OrthographicCamera, OrthographicCameraController, PerspectiveCamera,
        PerspectiveCameraController,
    };
    pub use crate::input::Input;
    pub use crate::layer::{Layer, LayerId};

    pub use strata_core::config::ProfilingMode;
    pub use strata_core::event::{
        Event, EventCategory, EventDispatcher, EventKind, EventVariant, KeyPressEvent,
        KeyReleaseEvent, KeyTypeEvent, MouseButtonPressEvent, MouseButtonReleaseEvent,
        MouseMoveEvent, MouseScrollEvent, WindowCloseEvent, WindowFocusEvent, WindowMoveEvent,
        WindowResizeEvent,
    };
    pub use strata_core::input::{KeyCode, MouseButton};

    // Core math types
    pub use strata_core::math::{Mat4, Vec2, Vec3, Vec4};
}
