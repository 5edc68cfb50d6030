use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use glam::{IVec2, UVec2, Vec2};
use parking_lot::RwLock;

use crate::event::{Event, EventData};

/// Platform-defined keyboard key code.
///
/// Printable keys use their ASCII value; named keys follow the GLFW numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const UNKNOWN: Self = Self(-1);

    pub const SPACE: Self = Self(32);
    pub const APOSTROPHE: Self = Self(39);
    pub const COMMA: Self = Self(44);
    pub const MINUS: Self = Self(45);
    pub const PERIOD: Self = Self(46);
    pub const SLASH: Self = Self(47);

    pub const DIGIT_0: Self = Self(48);
    pub const DIGIT_1: Self = Self(49);
    pub const DIGIT_2: Self = Self(50);
    pub const DIGIT_3: Self = Self(51);
    pub const DIGIT_4: Self = Self(52);
    pub const DIGIT_5: Self = Self(53);
    pub const DIGIT_6: Self = Self(54);
    pub const DIGIT_7: Self = Self(55);
    pub const DIGIT_8: Self = Self(56);
    pub const DIGIT_9: Self = Self(57);

    pub const SEMICOLON: Self = Self(59);
    pub const EQUAL: Self = Self(61);

    pub const A: Self = Self(65);
    pub const B: Self = Self(66);
    pub const C: Self = Self(67);
    pub const D: Self = Self(68);
    pub const E: Self = Self(69);
    pub const F: Self = Self(70);
    pub const G: Self = Self(71);
    pub const H: Self = Self(72);
    pub const I: Self = Self(73);
    pub const J: Self = Self(74);
    pub const K: Self = Self(75);
    pub const L: Self = Self(76);
    pub const M: Self = Self(77);
    pub const N: Self = Self(78);
    pub const O: Self = Self(79);
    pub const P: Self = Self(80);
    pub const Q: Self = Self(81);
    pub const R: Self = Self(82);
    pub const S: Self = Self(83);
    pub const T: Self = Self(84);
    pub const U: Self = Self(85);
    pub const V: Self = Self(86);
    pub const W: Self = Self(87);
    pub const X: Self = Self(88);
    pub const Y: Self = Self(89);
    pub const Z: Self = Self(90);

    pub const LEFT_BRACKET: Self = Self(91);
    pub const BACKSLASH: Self = Self(92);
    pub const RIGHT_BRACKET: Self = Self(93);
    pub const GRAVE_ACCENT: Self = Self(96);

    pub const ESCAPE: Self = Self(256);
    pub const ENTER: Self = Self(257);
    pub const TAB: Self = Self(258);
    pub const BACKSPACE: Self = Self(259);
    pub const INSERT: Self = Self(260);
    pub const DELETE: Self = Self(261);
    pub const RIGHT: Self = Self(262);
    pub const LEFT: Self = Self(263);
    pub const DOWN: Self = Self(264);
    pub const UP: Self = Self(265);
    pub const PAGE_UP: Self = Self(266);
    pub const PAGE_DOWN: Self = Self(267);
    pub const HOME: Self = Self(268);
    pub const END: Self = Self(269);

    pub const F1: Self = Self(290);
    pub const F2: Self = Self(291);
    pub const F3: Self = Self(292);
    pub const F4: Self = Self(293);
    pub const F5: Self = Self(294);
    pub const F6: Self = Self(295);
    pub const F7: Self = Self(296);
    pub const F8: Self = Self(297);
    pub const F9: Self = Self(298);
    pub const F10: Self = Self(299);
    pub const F11: Self = Self(300);
    pub const F12: Self = Self(301);

    pub const LEFT_SHIFT: Self = Self(340);
    pub const LEFT_CONTROL: Self = Self(341);
    pub const LEFT_ALT: Self = Self(342);
    pub const LEFT_SUPER: Self = Self(343);
    pub const RIGHT_SHIFT: Self = Self(344);
    pub const RIGHT_CONTROL: Self = Self(345);
    pub const RIGHT_ALT: Self = Self(346);
    pub const RIGHT_SUPER: Self = Self(347);
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-defined mouse button id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MouseButton(pub u16);

impl MouseButton {
    pub const LEFT: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const MIDDLE: Self = Self(2);
    pub const BACK: Self = Self(3);
    pub const FORWARD: Self = Self(4);
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input state shared between a platform and the code that queries it.
pub type SharedInput = Arc<RwLock<InputState>>;

/// Snapshot of which keys and buttons are down, where the cursor is and how
/// the window is laid out.
///
/// Platforms feed every event they emit through [`InputState::apply`] before
/// delivering it, so queries made from inside an event handler already see
/// that event.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: AHashSet<KeyCode>,
    buttons_down: AHashSet<MouseButton>,
    cursor_position: Vec2,
    scroll_offset: Vec2,
    window_size: UVec2,
    window_position: IVec2,
    focused: bool,
}

impl InputState {
    pub fn new(window_size: UVec2) -> Self {
        Self {
            window_size,
            focused: true,
            ..Default::default()
        }
    }

    /// Wraps a fresh state for sharing.
    pub fn shared(window_size: UVec2) -> SharedInput {
        Arc::new(RwLock::new(Self::new(window_size)))
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &Event) {
        match event.data() {
            EventData::KeyPress(e) => {
                self.keys_down.insert(e.code());
            }
            EventData::KeyRelease(e) => {
                self.keys_down.remove(&e.code());
            }
            EventData::MouseButtonPress(e) => {
                self.buttons_down.insert(e.button());
            }
            EventData::MouseButtonRelease(e) => {
                self.buttons_down.remove(&e.button());
            }
            EventData::MouseMove(e) => self.cursor_position = e.position(),
            EventData::MouseScroll(e) => self.scroll_offset = e.offset(),
            EventData::WindowResize(e) => self.window_size = e.size(),
            EventData::WindowMove(e) => self.window_position = e.position(),
            EventData::WindowFocus(e) => self.focused = e.focused(),
            EventData::KeyType(_) | EventData::WindowClose(_) => {}
        }
    }

    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Offset of the most recent scroll notification.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    pub fn window_size(&self) -> UVec2 {
        self.window_size
    }

    pub fn window_position(&self) -> IVec2 {
        self.window_position
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}
