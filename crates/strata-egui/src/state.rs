use strata_core::event::{
    Event, EventData, KeyPressEvent, KeyReleaseEvent, MouseButtonPressEvent,
    MouseButtonReleaseEvent, MouseMoveEvent, MouseScrollEvent,
};
use strata_core::input::{KeyCode, MouseButton};
use strata_core::math::UVec2;
use strata_core::profiling::profile_function;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// If true, egui wants exclusive use of this event (e.g. a mouse click on
    /// an egui window, or entering text into a text field).
    pub consumed: bool,

    /// Do we need an egui refresh because of this event?
    pub repaint: bool,
}

impl EventResponse {
    const IGNORED: Self = Self {
        consumed: false,
        repaint: false,
    };

    fn repaint(consumed: bool) -> Self {
        Self {
            consumed,
            repaint: true,
        }
    }
}

/// Accumulates engine events into the next [`egui::RawInput`].
pub struct State {
    context: egui::Context,
    input: egui::RawInput,
    screen_size: UVec2,
    pointer_pos_in_points: Option<egui::Pos2>,
    any_pointer_button_down: bool,
}

impl State {
    pub fn new(context: egui::Context, screen_size: UVec2) -> Self {
        Self {
            context,
            input: egui::RawInput {
                focused: true,
                ..Default::default()
            },
            screen_size,
            pointer_pos_in_points: None,
            any_pointer_button_down: false,
        }
    }

    pub fn screen_size(&self) -> UVec2 {
        self.screen_size
    }

    pub fn set_screen_size(&mut self, size: UVec2) {
        self.screen_size = size;
    }

    pub fn is_any_pointer_button_down(&self) -> bool {
        self.any_pointer_button_down
    }

    /// Drains everything gathered since the last call, stamped with `time`
    /// in seconds.
    pub fn take_input(&mut self, time: f64) -> egui::RawInput {
        profile_function!();
        let size_in_points = egui::vec2(self.screen_size.x as f32, self.screen_size.y as f32)
            / self.pixels_per_point();

        self.input.screen_rect = (size_in_points.x > 0.0 && size_in_points.y > 0.0)
            .then(|| egui::Rect::from_min_size(egui::Pos2::ZERO, size_in_points));
        self.input.time = Some(time);

        self.input.take()
    }

    pub fn pixels_per_point(&self) -> f32 {
        self.context.zoom_factor()
    }

    pub fn on_event(&mut self, event: &Event) -> EventResponse {
        profile_function!();
        match event.data() {
            EventData::WindowFocus(focus) => {
                self.input.focused = focus.focused();
                self.input
                    .events
                    .push(egui::Event::WindowFocused(focus.focused()));
                EventResponse::repaint(false)
            }

            EventData::WindowResize(resize) => {
                self.screen_size = resize.size();
                EventResponse::repaint(false)
            }

            EventData::MouseButtonPress(press) => {
                self.on_mouse_button_press(press);
                EventResponse::repaint(self.context.wants_pointer_input())
            }

            EventData::MouseButtonRelease(release) => {
                self.on_mouse_button_release(release);
                EventResponse::repaint(self.context.wants_pointer_input())
            }

            EventData::MouseScroll(scroll) => {
                self.on_mouse_wheel(scroll);
                EventResponse::repaint(self.context.wants_pointer_input())
            }

            EventData::MouseMove(moved) => {
                self.on_cursor_moved(moved);
                EventResponse::repaint(self.context.is_using_pointer())
            }

            EventData::KeyPress(press) => {
                self.on_key_press(press);
                EventResponse::repaint(self.context.wants_keyboard_input())
            }

            EventData::KeyRelease(release) => {
                self.on_key_release(release);
                EventResponse::repaint(self.context.wants_keyboard_input())
            }

            EventData::KeyType(typed) => {
                let chr = typed.character();
                let is_cmd = self.input.modifiers.ctrl || self.input.modifiers.command;
                if is_printable_char(chr) && !is_cmd {
                    self.input.events.push(egui::Event::Text(chr.to_string()));
                }
                EventResponse::repaint(self.context.wants_keyboard_input())
            }

            EventData::WindowClose(_) | EventData::WindowMove(_) => EventResponse::IGNORED,
        }
    }

    fn on_mouse_button_press(&mut self, press: &MouseButtonPressEvent) {
        self.push_pointer_button(press.button(), true);
    }

    fn on_mouse_button_release(&mut self, release: &MouseButtonReleaseEvent) {
        self.push_pointer_button(release.button(), false);
    }

    fn push_pointer_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(pos) = self.pointer_pos_in_points
            && let Some(button) = translate_mouse_button(button)
        {
            self.input.events.push(egui::Event::PointerButton {
                pos,
                button,
                pressed,
                modifiers: self.input.modifiers,
            });

            self.any_pointer_button_down = pressed;
        }
    }

    fn on_cursor_moved(&mut self, moved: &MouseMoveEvent) {
        let pixels_per_point = self.pixels_per_point();
        let pos_in_points = egui::pos2(
            moved.x() / pixels_per_point,
            moved.y() / pixels_per_point,
        );
        self.pointer_pos_in_points = Some(pos_in_points);

        self.input
            .events
            .push(egui::Event::PointerMoved(pos_in_points));
    }

    fn on_mouse_wheel(&mut self, scroll: &MouseScrollEvent) {
        self.input.events.push(egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(scroll.x(), scroll.y()),
            modifiers: self.input.modifiers,
        });
    }

    fn on_key_press(&mut self, press: &KeyPressEvent) {
        self.update_modifiers(press.code(), true);

        let Some(key) = key_from_key_code(press.code()) else {
            return;
        };

        if is_cut_command(self.input.modifiers, key) {
            self.input.events.push(egui::Event::Cut);
            return;
        }
        if is_copy_command(self.input.modifiers, key) {
            self.input.events.push(egui::Event::Copy);
            return;
        }

        self.input.events.push(egui::Event::Key {
            key,
            physical_key: Some(key),
            pressed: true,
            repeat: press.is_repeat(),
            modifiers: self.input.modifiers,
        });
    }

    fn on_key_release(&mut self, release: &KeyReleaseEvent) {
        self.update_modifiers(release.code(), false);

        if let Some(key) = key_from_key_code(release.code()) {
            self.input.events.push(egui::Event::Key {
                key,
                physical_key: Some(key),
                pressed: false,
                repeat: false,
                modifiers: self.input.modifiers,
            });
        }
    }

    fn update_modifiers(&mut self, code: KeyCode, pressed: bool) {
        let modifiers = &mut self.input.modifiers;
        match code {
            KeyCode::LEFT_SHIFT | KeyCode::RIGHT_SHIFT => modifiers.shift = pressed,
            KeyCode::LEFT_ALT | KeyCode::RIGHT_ALT => modifiers.alt = pressed,
            KeyCode::LEFT_CONTROL | KeyCode::RIGHT_CONTROL => {
                modifiers.ctrl = pressed;
                if !cfg!(target_os = "macos") {
                    modifiers.command = pressed;
                }
            }
            KeyCode::LEFT_SUPER | KeyCode::RIGHT_SUPER if cfg!(target_os = "macos") => {
                modifiers.mac_cmd = pressed;
                modifiers.command = pressed;
            }
            _ => {}
        }
    }
}

fn is_printable_char(chr: char) -> bool {
    let is_in_private_use_area = ('\u{e000}'..='\u{f8ff}').contains(&chr)
        || ('\u{f0000}'..='\u{ffffd}').contains(&chr)
        || ('\u{100000}'..='\u{10fffd}').contains(&chr);

    !is_in_private_use_area && !chr.is_ascii_control()
}

fn is_cut_command(modifiers: egui::Modifiers, keycode: egui::Key) -> bool {
    (modifiers.command && keycode == egui::Key::X)
        || (cfg!(target_os = "windows") && modifiers.shift && keycode == egui::Key::Delete)
}

fn is_copy_command(modifiers: egui::Modifiers, keycode: egui::Key) -> bool {
    (modifiers.command && keycode == egui::Key::C)
        || (cfg!(target_os = "windows") && modifiers.ctrl && keycode == egui::Key::Insert)
}

fn translate_mouse_button(button: MouseButton) -> Option<egui::PointerButton> {
    match button {
        MouseButton::LEFT => Some(egui::PointerButton::Primary),
        MouseButton::RIGHT => Some(egui::PointerButton::Secondary),
        MouseButton::MIDDLE => Some(egui::PointerButton::Middle),
        MouseButton::BACK => Some(egui::PointerButton::Extra1),
        MouseButton::FORWARD => Some(egui::PointerButton::Extra2),
        _ => None,
    }
}

fn key_from_key_code(code: KeyCode) -> Option<egui::Key> {
    use egui::Key;

    Some(match code {
        KeyCode::DOWN => Key::ArrowDown,
        KeyCode::LEFT => Key::ArrowLeft,
        KeyCode::RIGHT => Key::ArrowRight,
        KeyCode::UP => Key::ArrowUp,
        KeyCode::ESCAPE => Key::Escape,
        KeyCode::TAB => Key::Tab,
        KeyCode::BACKSPACE => Key::Backspace,
        KeyCode::ENTER => Key::Enter,
        KeyCode::INSERT => Key::Insert,
        KeyCode::DELETE => Key::Delete,
        KeyCode::HOME => Key::Home,
        KeyCode::END => Key::End,
        KeyCode::PAGE_UP => Key::PageUp,
        KeyCode::PAGE_DOWN => Key::PageDown,
        KeyCode::SPACE => Key::Space,
        KeyCode::COMMA => Key::Comma,
        KeyCode::PERIOD => Key::Period,
        KeyCode::SEMICOLON => Key::Semicolon,
        KeyCode::BACKSLASH => Key::Backslash,
        KeyCode::SLASH => Key::Slash,
        KeyCode::LEFT_BRACKET => Key::OpenBracket,
        KeyCode::RIGHT_BRACKET => Key::CloseBracket,
        KeyCode::GRAVE_ACCENT => Key::Backtick,
        KeyCode::APOSTROPHE => Key::Quote,
        KeyCode::MINUS => Key::Minus,
        KeyCode::EQUAL => Key::Equals,
        KeyCode::DIGIT_0 => Key::Num0,
        KeyCode::DIGIT_1 => Key::Num1,
        KeyCode::DIGIT_2 => Key::Num2,
        KeyCode::DIGIT_3 => Key::Num3,
        KeyCode::DIGIT_4 => Key::Num4,
        KeyCode::DIGIT_5 => Key::Num5,
        KeyCode::DIGIT_6 => Key::Num6,
        KeyCode::DIGIT_7 => Key::Num7,
        KeyCode::DIGIT_8 => Key::Num8,
        KeyCode::DIGIT_9 => Key::Num9,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode(letter) if (KeyCode::A.0..=KeyCode::Z.0).contains(&letter) => {
            let name = char::from(letter as u8).to_string();
            return Key::from_name(&name);
        }
        _ => {
            tracing::trace!("No egui key for key code {code}");
            return None;
        }
    })
}
