//! Layers: the units of per-frame behavior driven by the application.

use std::any::type_name;
use std::fmt;

use strata_core::event::Event;

/// A unit of per-frame logic owned by the [`LayerStack`](crate::layer_stack::LayerStack).
///
/// Every hook has a no-op default, so a layer only implements what it needs.
///
/// # Example
///
/// ```
/// use strata::layer::Layer;
/// use strata::core::event::{Event, EventDispatcher, KeyPressEvent};
/// use strata::core::input::KeyCode;
///
/// struct Pause {
///     paused: bool,
/// }
///
/// impl Layer for Pause {
///     fn on_event(&mut self, event: &mut Event) {
///         EventDispatcher::new(event).dispatch(|key: &KeyPressEvent| {
///             if key.code() == KeyCode::ESCAPE {
///                 self.paused = !self.paused;
///                 return true;
///             }
///             false
///         });
///     }
/// }
/// ```
pub trait Layer {
    /// Diagnostic label. Defaults to the type name.
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    /// Called exactly once, when the layer is pushed.
    fn on_attach(&mut self) {}

    /// Called exactly once, when the layer is popped or the stack is dropped.
    fn on_detach(&mut self) {}

    /// Called at the start of every frame, before any layer updates.
    fn pre_update(&mut self) {}

    /// Called once per frame with the seconds since the previous frame.
    ///
    /// `delta_time` is never negative and may be zero on the first frame.
    #[allow(unused_variables)]
    fn update(&mut self, delta_time: f32) {}

    /// Called after `update`, before the platform is serviced.
    fn post_update(&mut self) {}

    /// Offered every event that reaches this layer.
    ///
    /// Marking the event handled stops it from reaching layers further down
    /// the stack.
    #[allow(unused_variables)]
    fn on_event(&mut self, event: &mut Event) {}
}

/// Handle returned when a layer is pushed, used to pop it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub(crate) u64);

impl LayerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl Layer for Empty {}

    struct Named;
    impl Layer for Named {
        fn name(&self) -> &str {
            "Named"
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Empty.name().ends_with("Empty"));
        assert_eq!(Named.name(), "Named");
    }

    #[test]
    fn test_defaults_leave_event_untouched() {
        let mut event = Event::from(strata_core::event::WindowCloseEvent::new());
        let mut layer = Empty;
        layer.on_attach();
        layer.update(0.0);
        layer.on_event(&mut event);
        layer.on_detach();
        assert!(!event.is_handled());
    }

    #[test]
    fn test_layer_id_display() {
        assert_eq!(LayerId(3).to_string(), "Layer#3");
    }
}
