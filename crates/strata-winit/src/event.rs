//! Translation from winit notifications to Strata events.

use strata_core::event::{
    Event, KeyPressEvent, KeyReleaseEvent, KeyTypeEvent, MouseButtonPressEvent,
    MouseButtonReleaseEvent, MouseMoveEvent, MouseScrollEvent, WindowCloseEvent,
    WindowFocusEvent, WindowMoveEvent, WindowResizeEvent,
};
use strata_core::input::{KeyCode, MouseButton};
use strata_core::math::{IVec2, Vec2};
pub use winit::event::{ElementState, MouseScrollDelta, WindowEvent as WinitEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Pixel-precise scroll deltas are divided by this to get line offsets.
pub const PIXELS_PER_LINE: f32 = 10.0;

/// Translates one winit window notification, calling `emit` for each Strata
/// event it produces, in order.
///
/// A key press that also produces text emits the key press first, then one
/// key-type event per printable character.
pub fn translate(event: &WinitEvent, mut emit: impl FnMut(Event)) {
    match event {
        WinitEvent::CloseRequested => emit(WindowCloseEvent::new().into()),
        WinitEvent::Resized(size) => emit(WindowResizeEvent::new(size.width, size.height).into()),
        WinitEvent::Focused(focused) => emit(WindowFocusEvent::new(*focused).into()),
        WinitEvent::Moved(pos) => emit(WindowMoveEvent::new(IVec2::new(pos.x, pos.y)).into()),
        WinitEvent::KeyboardInput { event, .. } => {
            let code = map_key(event.physical_key);
            match event.state {
                ElementState::Pressed => {
                    let repeat_count = u32::from(event.repeat);
                    emit(KeyPressEvent::new(code, repeat_count).into());

                    if let Some(text) = &event.text {
                        for character in text.chars().filter(|c| !c.is_control()) {
                            emit(KeyTypeEvent::new(character).into());
                        }
                    }
                }
                ElementState::Released => emit(KeyReleaseEvent::new(code).into()),
            }
        }
        WinitEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            match state {
                ElementState::Pressed => emit(MouseButtonPressEvent::new(button).into()),
                ElementState::Released => emit(MouseButtonReleaseEvent::new(button).into()),
            }
        }
        WinitEvent::CursorMoved { position, .. } => emit(
            MouseMoveEvent::new(Vec2::new(position.x as f32, position.y as f32)).into(),
        ),
        WinitEvent::MouseWheel { delta, .. } => {
            emit(MouseScrollEvent::new(scroll_offset(*delta)).into())
        }
        // Redraws are driven by the frame loop, not by the platform.
        WinitEvent::RedrawRequested => {}
        other => tracing::trace!("ignoring window event: {:?}", other),
    }
}

/// Converts a wheel delta to an offset in lines.
pub fn scroll_offset(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
        MouseScrollDelta::PixelDelta(pos) => {
            Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
        }
    }
}

pub fn map_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as Winit;

    match button {
        Winit::Left => MouseButton::LEFT,
        Winit::Right => MouseButton::RIGHT,
        Winit::Middle => MouseButton::MIDDLE,
        Winit::Back => MouseButton::BACK,
        Winit::Forward => MouseButton::FORWARD,
        Winit::Other(id) => MouseButton(id),
    }
}

pub fn map_key(key: PhysicalKey) -> KeyCode {
    let PhysicalKey::Code(code) = key else {
        return KeyCode::UNKNOWN;
    };

    match code {
        WinitKeyCode::Space => KeyCode::SPACE,
        WinitKeyCode::Quote => KeyCode::APOSTROPHE,
        WinitKeyCode::Comma => KeyCode::COMMA,
        WinitKeyCode::Minus => KeyCode::MINUS,
        WinitKeyCode::Period => KeyCode::PERIOD,
        WinitKeyCode::Slash => KeyCode::SLASH,
        WinitKeyCode::Semicolon => KeyCode::SEMICOLON,
        WinitKeyCode::Equal => KeyCode::EQUAL,
        WinitKeyCode::BracketLeft => KeyCode::LEFT_BRACKET,
        WinitKeyCode::Backslash => KeyCode::BACKSLASH,
        WinitKeyCode::BracketRight => KeyCode::RIGHT_BRACKET,
        WinitKeyCode::Backquote => KeyCode::GRAVE_ACCENT,

        WinitKeyCode::Digit0 => KeyCode::DIGIT_0,
        WinitKeyCode::Digit1 => KeyCode::DIGIT_1,
        WinitKeyCode::Digit2 => KeyCode::DIGIT_2,
        WinitKeyCode::Digit3 => KeyCode::DIGIT_3,
        WinitKeyCode::Digit4 => KeyCode::DIGIT_4,
        WinitKeyCode::Digit5 => KeyCode::DIGIT_5,
        WinitKeyCode::Digit6 => KeyCode::DIGIT_6,
        WinitKeyCode::Digit7 => KeyCode::DIGIT_7,
        WinitKeyCode::Digit8 => KeyCode::DIGIT_8,
        WinitKeyCode::Digit9 => KeyCode::DIGIT_9,

        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyB => KeyCode::B,
        WinitKeyCode::KeyC => KeyCode::C,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyE => KeyCode::E,
        WinitKeyCode::KeyF => KeyCode::F,
        WinitKeyCode::KeyG => KeyCode::G,
        WinitKeyCode::KeyH => KeyCode::H,
        WinitKeyCode::KeyI => KeyCode::I,
        WinitKeyCode::KeyJ => KeyCode::J,
        WinitKeyCode::KeyK => KeyCode::K,
        WinitKeyCode::KeyL => KeyCode::L,
        WinitKeyCode::KeyM => KeyCode::M,
        WinitKeyCode::KeyN => KeyCode::N,
        WinitKeyCode::KeyO => KeyCode::O,
        WinitKeyCode::KeyP => KeyCode::P,
        WinitKeyCode::KeyQ => KeyCode::Q,
        WinitKeyCode::KeyR => KeyCode::R,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyT => KeyCode::T,
        WinitKeyCode::KeyU => KeyCode::U,
        WinitKeyCode::KeyV => KeyCode::V,
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyX => KeyCode::X,
        WinitKeyCode::KeyY => KeyCode::Y,
        WinitKeyCode::KeyZ => KeyCode::Z,

        WinitKeyCode::Escape => KeyCode::ESCAPE,
        WinitKeyCode::Enter => KeyCode::ENTER,
        WinitKeyCode::Tab => KeyCode::TAB,
        WinitKeyCode::Backspace => KeyCode::BACKSPACE,
        WinitKeyCode::Insert => KeyCode::INSERT,
        WinitKeyCode::Delete => KeyCode::DELETE,
        WinitKeyCode::ArrowRight => KeyCode::RIGHT,
        WinitKeyCode::ArrowLeft => KeyCode::LEFT,
        WinitKeyCode::ArrowDown => KeyCode::DOWN,
        WinitKeyCode::ArrowUp => KeyCode::UP,
        WinitKeyCode::PageUp => KeyCode::PAGE_UP,
        WinitKeyCode::PageDown => KeyCode::PAGE_DOWN,
        WinitKeyCode::Home => KeyCode::HOME,
        WinitKeyCode::End => KeyCode::END,

        WinitKeyCode::F1 => KeyCode::F1,
        WinitKeyCode::F2 => KeyCode::F2,
        WinitKeyCode::F3 => KeyCode::F3,
        WinitKeyCode::F4 => KeyCode::F4,
        WinitKeyCode::F5 => KeyCode::F5,
        WinitKeyCode::F6 => KeyCode::F6,
        WinitKeyCode::F7 => KeyCode::F7,
        WinitKeyCode::F8 => KeyCode::F8,
        WinitKeyCode::F9 => KeyCode::F9,
        WinitKeyCode::F10 => KeyCode::F10,
        WinitKeyCode::F11 => KeyCode::F11,
        WinitKeyCode::F12 => KeyCode::F12,

        WinitKeyCode::ShiftLeft => KeyCode::LEFT_SHIFT,
        WinitKeyCode::ControlLeft => KeyCode::LEFT_CONTROL,
        WinitKeyCode::AltLeft => KeyCode::LEFT_ALT,
        WinitKeyCode::SuperLeft => KeyCode::LEFT_SUPER,
        WinitKeyCode::ShiftRight => KeyCode::RIGHT_SHIFT,
        WinitKeyCode::ControlRight => KeyCode::RIGHT_CONTROL,
        WinitKeyCode::AltRight => KeyCode::RIGHT_ALT,
        WinitKeyCode::SuperRight => KeyCode::RIGHT_SUPER,

        _ => KeyCode::UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::event::EventKind;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::keyboard::NativeKeyCode;

    fn collect(event: &WinitEvent) -> Vec<Event> {
        let mut out = Vec::new();
        translate(event, |e| out.push(e));
        out
    }

    #[test]
    fn test_resize_translates_to_physical_size() {
        let events = collect(&WinitEvent::Resized(PhysicalSize::new(800, 600)));
        assert_eq!(events.len(), 1);
        let resize = events[0].get::<WindowResizeEvent>().expect("resize");
        assert_eq!((resize.width(), resize.height()), (800, 600));
    }

    #[test]
    fn test_window_notifications() {
        let kinds: Vec<EventKind> = [
            WinitEvent::CloseRequested,
            WinitEvent::Focused(false),
            WinitEvent::Moved(PhysicalPosition::new(5, 7)),
        ]
        .iter()
        .flat_map(collect)
        .map(|e| e.kind())
        .collect();

        assert_eq!(
            kinds,
            vec![
                EventKind::WindowClose,
                EventKind::WindowFocus,
                EventKind::WindowMove
            ]
        );
    }

    #[test]
    fn test_redraw_is_ignored() {
        assert!(collect(&WinitEvent::RedrawRequested).is_empty());
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(
            scroll_offset(MouseScrollDelta::LineDelta(0.0, -2.0)),
            Vec2::new(0.0, -2.0)
        );
        assert_eq!(
            scroll_offset(MouseScrollDelta::PixelDelta(PhysicalPosition::new(20.0, 5.0))),
            Vec2::new(2.0, 0.5)
        );
    }

    #[test]
    fn test_mouse_buttons() {
        use winit::event::MouseButton as Winit;
        assert_eq!(map_mouse_button(Winit::Left), MouseButton::LEFT);
        assert_eq!(map_mouse_button(Winit::Right), MouseButton::RIGHT);
        assert_eq!(map_mouse_button(Winit::Middle), MouseButton::MIDDLE);
        assert_eq!(map_mouse_button(Winit::Other(7)), MouseButton(7));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::KeyA)), KeyCode::A);
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::KeyA)), KeyCode(65));
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::Digit7)), KeyCode(55));
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::Escape)), KeyCode::ESCAPE);
        assert_eq!(map_key(PhysicalKey::Code(WinitKeyCode::F12)), KeyCode::F12);
        assert_eq!(
            map_key(PhysicalKey::Code(WinitKeyCode::NumpadAdd)),
            KeyCode::UNKNOWN
        );
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            KeyCode::UNKNOWN
        );
    }
}
