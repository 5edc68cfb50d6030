//! Polling-style input queries against the live application.

use strata_core::input::{KeyCode, MouseButton};
use strata_core::math::{UVec2, Vec2};

use crate::application::Application;

/// Static input queries.
///
/// Every query reads the input state the platform keeps current, so results
/// reflect all events delivered so far, including the one currently being
/// routed.
///
/// # Panics
/// Every query panics when no application exists.
pub struct Input;

impl Input {
    pub fn is_key_pressed(code: KeyCode) -> bool {
        Application::get().input().read().is_key_down(code)
    }

    pub fn is_mouse_button_pressed(button: MouseButton) -> bool {
        Application::get().input().read().is_button_down(button)
    }

    /// Cursor position in window pixels, origin at the top-left.
    pub fn mouse_position() -> Vec2 {
        Application::get().input().read().cursor_position()
    }

    pub fn mouse_x() -> f32 {
        Self::mouse_position().x
    }

    pub fn mouse_y() -> f32 {
        Self::mouse_position().y
    }

    pub fn window_size() -> UVec2 {
        Application::get().input().read().window_size()
    }

    pub fn is_window_focused() -> bool {
        Application::get().input().read().is_focused()
    }
}
