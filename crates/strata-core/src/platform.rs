//! Boundary between the engine and a windowing/input backend.

use crate::event::Event;
use crate::input::SharedInput;

/// Receives events from a platform, one call per native notification.
pub trait EventSink {
    fn on_event(&mut self, event: &mut Event);
}

impl<F> EventSink for F
where
    F: FnMut(&mut Event),
{
    fn on_event(&mut self, event: &mut Event) {
        self(event)
    }
}

/// A window and input source driven once per frame.
///
/// The engine lends its single event entry point to every
/// [`on_update`](Platform::on_update) call. Implementations must invoke it
/// synchronously for each pending notification before returning; events are
/// never queued past the call that produced them.
pub trait Platform {
    /// Window title, for diagnostics.
    fn title(&self) -> &str;

    /// Seconds elapsed since the platform started, from a monotonic clock.
    fn time(&self) -> f64;

    /// Pumps pending notifications into `sink`, then presents the frame.
    fn on_update(&mut self, sink: &mut dyn EventSink);

    /// Input state kept current by this platform.
    fn input(&self) -> SharedInput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, WindowFocusEvent};

    #[test]
    fn test_closure_is_an_event_sink() {
        let mut seen = Vec::new();
        let mut sink = |event: &mut Event| {
            seen.push(event.kind());
            event.mark_handled();
        };

        let mut event = Event::from(WindowFocusEvent::new(true));
        let dyn_sink: &mut dyn EventSink = &mut sink;
        dyn_sink.on_event(&mut event);

        assert!(event.is_handled());
        assert_eq!(seen, vec![EventKind::WindowFocus]);
    }
}
