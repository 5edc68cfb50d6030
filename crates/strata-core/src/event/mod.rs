//! Typed window and input events.
//!
//! An [`Event`] wraps one variant of the closed [`EventData`] set together with
//! a `handled` flag. The variant, and with it the [`EventKind`] and
//! [`EventCategory`] flags, is fixed when the event is built; the only thing
//! that changes while the event is routed is the flag, and it only ever goes
//! from `false` to `true`.
//!
//! ```
//! use strata_core::event::{Event, EventCategory, EventKind, WindowResizeEvent};
//!
//! let mut event = Event::from(WindowResizeEvent::new(800, 600));
//! assert_eq!(event.kind(), EventKind::WindowResize);
//! assert!(event.is_in_category(EventCategory::APPLICATION));
//! assert_eq!(event.to_string(), "WindowResizeEvent: 800, 600");
//!
//! assert!(!event.is_handled());
//! event.mark_handled();
//! assert!(event.is_handled());
//! ```

mod dispatcher;

pub use dispatcher::EventDispatcher;

use std::fmt;

use glam::{IVec2, UVec2, Vec2};

use crate::input::{KeyCode, MouseButton};

bitflags::bitflags! {
    /// Coarse event classification used for filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u8 {
        const APPLICATION = 1 << 0;
        const INPUT = 1 << 1;
        const KEYBOARD = 1 << 2;
        const MOUSE = 1 << 3;
        const MOUSE_BUTTON = 1 << 4;
    }
}

/// Discriminator of an event variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WindowClose,
    WindowResize,
    WindowFocus,
    WindowMove,
    KeyPress,
    KeyRelease,
    KeyType,
    MouseButtonPress,
    MouseButtonRelease,
    MouseMove,
    MouseScroll,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::WindowClose,
        EventKind::WindowResize,
        EventKind::WindowFocus,
        EventKind::WindowMove,
        EventKind::KeyPress,
        EventKind::KeyRelease,
        EventKind::KeyType,
        EventKind::MouseButtonPress,
        EventKind::MouseButtonRelease,
        EventKind::MouseMove,
        EventKind::MouseScroll,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            EventKind::WindowClose => "WindowClose",
            EventKind::WindowResize => "WindowResize",
            EventKind::WindowFocus => "WindowFocus",
            EventKind::WindowMove => "WindowMove",
            EventKind::KeyPress => "KeyPress",
            EventKind::KeyRelease => "KeyRelease",
            EventKind::KeyType => "KeyType",
            EventKind::MouseButtonPress => "MouseButtonPress",
            EventKind::MouseButtonRelease => "MouseButtonRelease",
            EventKind::MouseMove => "MouseMove",
            EventKind::MouseScroll => "MouseScroll",
        }
    }

    pub const fn categories(self) -> EventCategory {
        match self {
            EventKind::WindowClose
            | EventKind::WindowResize
            | EventKind::WindowFocus
            | EventKind::WindowMove => EventCategory::APPLICATION,
            EventKind::KeyPress | EventKind::KeyRelease | EventKind::KeyType => {
                EventCategory::KEYBOARD.union(EventCategory::INPUT)
            }
            EventKind::MouseButtonPress | EventKind::MouseButtonRelease => {
                EventCategory::MOUSE_BUTTON.union(EventCategory::INPUT)
            }
            EventKind::MouseMove | EventKind::MouseScroll => {
                EventCategory::MOUSE.union(EventCategory::INPUT)
            }
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by every concrete event payload.
///
/// `KIND` is the static identity used by [`EventDispatcher`] to match an
/// event before narrowing it with [`EventVariant::narrow`].
pub trait EventVariant: Into<EventData> + fmt::Display + 'static {
    const KIND: EventKind;

    /// Returns the payload if `data` holds this variant.
    fn narrow(data: &EventData) -> Option<&Self>;
}

/// Payload of an event, one variant per [`EventKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    WindowClose(WindowCloseEvent),
    WindowResize(WindowResizeEvent),
    WindowFocus(WindowFocusEvent),
    WindowMove(WindowMoveEvent),
    KeyPress(KeyPressEvent),
    KeyRelease(KeyReleaseEvent),
    KeyType(KeyTypeEvent),
    MouseButtonPress(MouseButtonPressEvent),
    MouseButtonRelease(MouseButtonReleaseEvent),
    MouseMove(MouseMoveEvent),
    MouseScroll(MouseScrollEvent),
}

macro_rules! impl_event_variants {
    ($($ty:ident => $kind:ident),* $(,)?) => {
        $(
            impl EventVariant for $ty {
                const KIND: EventKind = EventKind::$kind;

                fn narrow(data: &EventData) -> Option<&Self> {
                    match data {
                        EventData::$kind(event) => Some(event),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for EventData {
                fn from(event: $ty) -> Self {
                    EventData::$kind(event)
                }
            }

            impl From<$ty> for Event {
                fn from(event: $ty) -> Self {
                    Event::new(event)
                }
            }
        )*

        impl EventData {
            pub fn kind(&self) -> EventKind {
                match self {
                    $(EventData::$kind(_) => EventKind::$kind,)*
                }
            }
        }

        impl fmt::Display for EventData {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(EventData::$kind(event) => fmt::Display::fmt(event, f),)*
                }
            }
        }
    };
}

impl_event_variants! {
    WindowCloseEvent => WindowClose,
    WindowResizeEvent => WindowResize,
    WindowFocusEvent => WindowFocus,
    WindowMoveEvent => WindowMove,
    KeyPressEvent => KeyPress,
    KeyReleaseEvent => KeyRelease,
    KeyTypeEvent => KeyType,
    MouseButtonPressEvent => MouseButtonPress,
    MouseButtonReleaseEvent => MouseButtonRelease,
    MouseMoveEvent => MouseMove,
    MouseScrollEvent => MouseScroll,
}

/// One platform or input occurrence on its way through the layer stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    data: EventData,
    handled: bool,
}

impl Event {
    pub fn new(data: impl Into<EventData>) -> Self {
        Self {
            data: data.into(),
            handled: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn categories(&self) -> EventCategory {
        self.kind().categories()
    }

    /// True when the event carries any of the flags in `category`.
    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.categories().intersects(category)
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Marks the event as consumed. There is no way to clear the flag again.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Returns the payload if this event is a `T`.
    pub fn get<T: EventVariant>(&self) -> Option<&T> {
        if self.kind() == T::KIND {
            T::narrow(&self.data)
        } else {
            None
        }
    }

    pub fn is<T: EventVariant>(&self) -> bool {
        self.kind() == T::KIND
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data, f)
    }
}

/// The user asked for the window to close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCloseEvent;

impl WindowCloseEvent {
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Display for WindowCloseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WindowCloseEvent")
    }
}

/// The window's client area changed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResizeEvent {
    size: UVec2,
}

impl WindowResizeEvent {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }
}

impl fmt::Display for WindowResizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowResizeEvent: {}, {}", self.size.x, self.size.y)
    }
}

/// The window gained or lost input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFocusEvent {
    focused: bool,
}

impl WindowFocusEvent {
    pub fn new(focused: bool) -> Self {
        Self { focused }
    }

    pub fn focused(&self) -> bool {
        self.focused
    }
}

impl fmt::Display for WindowFocusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowFocusEvent: {}", self.focused)
    }
}

/// The window moved on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMoveEvent {
    position: IVec2,
}

impl WindowMoveEvent {
    pub fn new(position: IVec2) -> Self {
        Self { position }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }
}

impl fmt::Display for WindowMoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowMoveEvent: {}, {}", self.position.x, self.position.y)
    }
}

/// A key went down, or auto-repeated while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressEvent {
    code: KeyCode,
    repeat_count: u32,
}

impl KeyPressEvent {
    pub fn new(code: KeyCode, repeat_count: u32) -> Self {
        Self { code, repeat_count }
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat_count > 0
    }
}

impl fmt::Display for KeyPressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KeyPressEvent: {} ({} repeats)",
            self.code, self.repeat_count
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleaseEvent {
    code: KeyCode,
}

impl KeyReleaseEvent {
    pub fn new(code: KeyCode) -> Self {
        Self { code }
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }
}

impl fmt::Display for KeyReleaseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyReleaseEvent: {}", self.code)
    }
}

/// Text input: one character produced by the keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTypeEvent {
    character: char,
}

impl KeyTypeEvent {
    pub fn new(character: char) -> Self {
        Self { character }
    }

    pub fn character(&self) -> char {
        self.character
    }

    /// Unicode scalar value of the typed character.
    pub fn codepoint(&self) -> u32 {
        self.character as u32
    }
}

impl fmt::Display for KeyTypeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyTypeEvent: {}", self.codepoint())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressEvent {
    button: MouseButton,
}

impl MouseButtonPressEvent {
    pub fn new(button: MouseButton) -> Self {
        Self { button }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl fmt::Display for MouseButtonPressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseButtonPressEvent: {}", self.button)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleaseEvent {
    button: MouseButton,
}

impl MouseButtonReleaseEvent {
    pub fn new(button: MouseButton) -> Self {
        Self { button }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }
}

impl fmt::Display for MouseButtonReleaseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseButtonReleaseEvent: {}", self.button)
    }
}

/// Cursor position in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    position: Vec2,
}

impl MouseMoveEvent {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl fmt::Display for MouseMoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseMoveEvent: {}, {}", self.position.x, self.position.y)
    }
}

/// Scroll wheel offset, in lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvent {
    offset: Vec2,
}

impl MouseScrollEvent {
    pub fn new(offset: Vec2) -> Self {
        Self { offset }
    }

    pub fn x(&self) -> f32 {
        self.offset.x
    }

    pub fn y(&self) -> f32 {
        self.offset.y
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl fmt::Display for MouseScrollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseScrollEvent: {}, {}", self.offset.x, self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_of_each() -> Vec<Event> {
        vec![
            WindowCloseEvent::new().into(),
            WindowResizeEvent::new(800, 600).into(),
            WindowFocusEvent::new(true).into(),
            WindowMoveEvent::new(IVec2::new(10, -4)).into(),
            KeyPressEvent::new(KeyCode::A, 0).into(),
            KeyReleaseEvent::new(KeyCode::A).into(),
            KeyTypeEvent::new('a').into(),
            MouseButtonPressEvent::new(MouseButton::LEFT).into(),
            MouseButtonReleaseEvent::new(MouseButton::LEFT).into(),
            MouseMoveEvent::new(Vec2::new(1.5, 2.0)).into(),
            MouseScrollEvent::new(Vec2::new(0.0, 1.0)).into(),
        ]
    }

    #[test]
    fn test_every_kind_is_constructible() {
        let kinds: Vec<EventKind> = one_of_each().iter().map(Event::kind).collect();
        assert_eq!(kinds, EventKind::ALL.to_vec());
    }

    #[test]
    fn test_handled_starts_false() {
        for event in one_of_each() {
            assert!(!event.is_handled(), "{} started handled", event.name());
        }
    }

    #[test]
    fn test_mark_handled_is_sticky() {
        let mut event = Event::from(KeyPressEvent::new(KeyCode::ESCAPE, 0));
        event.mark_handled();
        event.mark_handled();
        assert!(event.is_handled());
    }

    #[test]
    fn test_categories() {
        let close = Event::from(WindowCloseEvent::new());
        assert_eq!(close.categories(), EventCategory::APPLICATION);
        assert!(!close.is_in_category(EventCategory::INPUT));

        let key = Event::from(KeyTypeEvent::new('x'));
        assert!(key.is_in_category(EventCategory::KEYBOARD));
        assert!(key.is_in_category(EventCategory::INPUT));
        assert!(!key.is_in_category(EventCategory::MOUSE));

        let press = Event::from(MouseButtonPressEvent::new(MouseButton::RIGHT));
        assert_eq!(
            press.categories(),
            EventCategory::MOUSE_BUTTON | EventCategory::INPUT
        );
        assert!(!press.is_in_category(EventCategory::MOUSE));

        let scroll = Event::from(MouseScrollEvent::new(Vec2::ZERO));
        assert_eq!(scroll.categories(), EventCategory::MOUSE | EventCategory::INPUT);
    }

    #[test]
    fn test_static_and_dynamic_kind_agree() {
        assert_eq!(WindowResizeEvent::KIND, EventKind::WindowResize);
        let event = Event::from(WindowResizeEvent::new(1, 2));
        assert_eq!(event.kind(), WindowResizeEvent::KIND);
        assert!(event.is::<WindowResizeEvent>());
        assert!(!event.is::<WindowCloseEvent>());
    }

    #[test]
    fn test_get_narrows_payload() {
        let event = Event::from(KeyPressEvent::new(KeyCode::W, 3));
        let press = event.get::<KeyPressEvent>().expect("key press payload");
        assert_eq!(press.code(), KeyCode::W);
        assert_eq!(press.repeat_count(), 3);
        assert!(press.is_repeat());
        assert!(event.get::<KeyReleaseEvent>().is_none());
    }

    #[test]
    fn test_display_strings() {
        let rendered: Vec<String> = one_of_each().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "WindowCloseEvent",
                "WindowResizeEvent: 800, 600",
                "WindowFocusEvent: true",
                "WindowMoveEvent: 10, -4",
                "KeyPressEvent: 65 (0 repeats)",
                "KeyReleaseEvent: 65",
                "KeyTypeEvent: 97",
                "MouseButtonPressEvent: 0",
                "MouseButtonReleaseEvent: 0",
                "MouseMoveEvent: 1.5, 2",
                "MouseScrollEvent: 0, 1",
            ]
        );
    }

    #[test]
    fn test_names_match_kind() {
        for event in one_of_each() {
            assert_eq!(event.name(), event.kind().to_string());
        }
    }
}
