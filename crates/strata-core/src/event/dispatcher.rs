use super::{Event, EventVariant};

/// Offers one event to typed handlers.
///
/// Each [`dispatch`](Self::dispatch) call is an independent type check: when
/// the event is of the requested variant the handler runs and its result is
/// OR-ed into the event's `handled` flag. A handler returning `true` does not
/// stop later `dispatch` calls on the same dispatcher; callers that want early
/// exit check [`is_handled`](Self::is_handled) themselves.
///
/// ```
/// use strata_core::event::{Event, EventDispatcher, MouseScrollEvent, WindowResizeEvent};
/// use strata_core::math::Vec2;
///
/// let mut event = Event::from(MouseScrollEvent::new(Vec2::new(0.0, 2.0)));
/// let mut zoom = 1.0;
///
/// let mut dispatcher = EventDispatcher::new(&mut event);
/// let matched = dispatcher.dispatch(|e: &MouseScrollEvent| {
///     zoom -= e.y() * 0.25;
///     false
/// });
/// assert!(matched);
/// assert!(!dispatcher.dispatch(|_: &WindowResizeEvent| true));
///
/// assert_eq!(zoom, 0.5);
/// assert!(!event.is_handled());
/// ```
#[derive(Debug)]
pub struct EventDispatcher<'a> {
    event: &'a mut Event,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(event: &'a mut Event) -> Self {
        Self { event }
    }

    /// Runs `handler` if the event is a `T`.
    ///
    /// Returns whether the kind matched, independent of what the handler
    /// returned.
    pub fn dispatch<T, F>(&mut self, handler: F) -> bool
    where
        T: EventVariant,
        F: FnOnce(&T) -> bool,
    {
        if self.event.kind() != T::KIND {
            return false;
        }

        let Some(payload) = T::narrow(&self.event.data) else {
            return false;
        };

        if handler(payload) {
            self.event.mark_handled();
        }
        true
    }

    pub fn is_handled(&self) -> bool {
        self.event.is_handled()
    }

    pub fn event(&self) -> &Event {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        KeyPressEvent, MouseButtonPressEvent, WindowCloseEvent, WindowResizeEvent,
    };
    use crate::input::{KeyCode, MouseButton};

    #[test]
    fn test_mismatch_leaves_event_untouched() {
        let mut event = Event::from(WindowResizeEvent::new(800, 600));
        let mut called = false;

        let matched = EventDispatcher::new(&mut event).dispatch(|_: &WindowCloseEvent| {
            called = true;
            true
        });

        assert!(!matched);
        assert!(!called);
        assert!(!event.is_handled());
    }

    #[test]
    fn test_match_ors_handler_result() {
        let mut event = Event::from(WindowCloseEvent::new());
        let matched = EventDispatcher::new(&mut event).dispatch(|_: &WindowCloseEvent| true);
        assert!(matched);
        assert!(event.is_handled());
    }

    #[test]
    fn test_false_result_does_not_clear_handled() {
        let mut event = Event::from(KeyPressEvent::new(KeyCode::A, 0));
        event.mark_handled();

        let matched = EventDispatcher::new(&mut event).dispatch(|_: &KeyPressEvent| false);

        assert!(matched);
        assert!(event.is_handled());
    }

    #[test]
    fn test_handler_sees_narrowed_payload() {
        let mut event = Event::from(MouseButtonPressEvent::new(MouseButton::MIDDLE));
        let mut seen = None;

        EventDispatcher::new(&mut event).dispatch(|e: &MouseButtonPressEvent| {
            seen = Some(e.button());
            false
        });

        assert_eq!(seen, Some(MouseButton::MIDDLE));
    }

    #[test]
    fn test_handled_does_not_stop_later_dispatches() {
        let mut event = Event::from(KeyPressEvent::new(KeyCode::Q, 0));
        let mut calls = 0;

        let mut dispatcher = EventDispatcher::new(&mut event);
        assert!(dispatcher.dispatch(|_: &KeyPressEvent| {
            calls += 1;
            true
        }));
        assert!(dispatcher.is_handled());
        assert!(dispatcher.dispatch(|_: &KeyPressEvent| {
            calls += 1;
            false
        }));

        assert_eq!(calls, 2);
        assert!(event.is_handled());
    }
}
