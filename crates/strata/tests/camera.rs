//! Integration tests for the camera controllers.

use strata::camera::{
    MIN_ZOOM, OrthographicCameraController, PerspectiveCameraController,
};
use strata::core::event::{Event, KeyPressEvent, MouseScrollEvent, WindowResizeEvent};
use strata::core::input::{InputState, KeyCode};
use strata::math::{UVec2, Vec2, Vec3};

const EPSILON: f32 = 1e-5;

fn input_with(keys: &[KeyCode]) -> InputState {
    let mut input = InputState::new(UVec2::new(1600, 900));
    for &code in keys {
        input.apply(&KeyPressEvent::new(code, 0).into());
    }
    input
}

fn scroll(y: f32) -> Event {
    MouseScrollEvent::new(Vec2::new(0.0, y)).into()
}

fn assert_vec3_eq(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

// ============================================================================
// Orthographic
// ============================================================================

#[test]
fn test_ortho_scroll_zooms_and_clamps() {
    let mut controller = OrthographicCameraController::new(16.0 / 9.0, false);
    assert_eq!(controller.zoom_level(), 1.0);

    let mut event = scroll(1.0);
    controller.on_event(&mut event);
    assert_eq!(controller.zoom_level(), 0.75);
    assert!(!event.is_handled());

    controller.on_event(&mut scroll(10.0));
    assert_eq!(controller.zoom_level(), MIN_ZOOM);

    controller.on_event(&mut scroll(-2.0));
    assert_eq!(controller.zoom_level(), MIN_ZOOM + 0.5);
}

#[test]
fn test_ortho_resize_updates_aspect_without_consuming() {
    let mut controller = OrthographicCameraController::new(1.0, false);

    let mut event = Event::from(WindowResizeEvent::new(800, 400));
    controller.on_event(&mut event);

    assert_eq!(controller.aspect_ratio(), 2.0);
    assert!(!event.is_handled());

    // Minimized windows report zero height and leave the aspect alone.
    controller.on_event(&mut Event::from(WindowResizeEvent::new(800, 0)));
    assert_eq!(controller.aspect_ratio(), 2.0);
}

#[test]
fn test_ortho_wasd_moves_relative_to_rotation() {
    let mut controller = OrthographicCameraController::new(1.0, false);

    controller.update_with(&input_with(&[KeyCode::D, KeyCode::W]), 0.5);
    // Initial translation speed is 5 units per second.
    assert_vec3_eq(controller.camera().position(), Vec3::new(2.5, 2.5, 0.0));

    // Translation speed now follows the zoom level.
    controller.update_with(&input_with(&[KeyCode::A]), 1.0);
    assert_vec3_eq(controller.camera().position(), Vec3::new(1.5, 2.5, 0.0));
}

#[test]
fn test_ortho_rotation_wraps() {
    let mut controller = OrthographicCameraController::new(1.0, true);

    controller.update_with(&input_with(&[KeyCode::Q]), 1.5);
    // 270 degrees wraps to -90.
    assert!((controller.camera().rotation() + 90.0).abs() < EPSILON);

    controller.update_with(&input_with(&[KeyCode::E]), 0.5);
    assert!((controller.camera().rotation() - 180.0).abs() < EPSILON);
}

#[test]
fn test_ortho_rotation_disabled_ignores_q() {
    let mut controller = OrthographicCameraController::new(1.0, false);
    controller.update_with(&input_with(&[KeyCode::Q]), 1.0);
    assert_eq!(controller.camera().rotation(), 0.0);
}

// ============================================================================
// Perspective
// ============================================================================

#[test]
fn test_perspective_scroll_scales_fov() {
    let mut controller = PerspectiveCameraController::new(60.0, 1.0, 0.1, 100.0);
    assert_eq!(controller.fov(), 60.0);

    controller.on_event(&mut scroll(2.0));
    assert_eq!(controller.zoom_level(), 0.5);
    assert_eq!(controller.fov(), 30.0);
    assert_eq!(controller.camera().fov(), 30.0);

    controller.on_event(&mut scroll(-20.0));
    assert_eq!(controller.fov(), PerspectiveCameraController::MAX_FOV);
}

#[test]
fn test_perspective_resize_keeps_clip_planes() {
    let mut controller = PerspectiveCameraController::new(45.0, 1.0, 0.5, 50.0);
    controller.on_event(&mut Event::from(WindowResizeEvent::new(1920, 1080)));

    assert!((controller.aspect_ratio() - 16.0 / 9.0).abs() < EPSILON);
    assert_eq!(controller.camera().near(), 0.5);
    assert_eq!(controller.camera().far(), 50.0);
}

#[test]
fn test_perspective_q_e_move_along_z() {
    let mut controller = PerspectiveCameraController::new(45.0, 1.0, 0.1, 100.0);

    controller.update_with(&input_with(&[KeyCode::Q, KeyCode::S]), 0.2);
    assert_vec3_eq(controller.camera().position(), Vec3::new(0.0, -1.0, 1.0));

    controller.update_with(&input_with(&[KeyCode::E]), 0.2);
    assert_vec3_eq(controller.camera().position(), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn test_key_press_is_not_consumed() {
    let mut controller = OrthographicCameraController::new(1.0, false);
    let mut event = Event::from(KeyPressEvent::new(KeyCode::W, 0));
    controller.on_event(&mut event);
    assert!(!event.is_handled());
}
