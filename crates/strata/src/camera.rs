//! Cameras and keyboard/mouse driven camera controllers.
//!
//! Projections use OpenGL clip-space conventions (right-handed, depth in
//! `[-1, 1]`). Rotations are in degrees about the Z axis.
//!
//! # Example
//!
//! ```
//! use strata::camera::OrthographicCamera;
//! use strata::math::Vec3;
//!
//! let mut camera = OrthographicCamera::new(-1.6, 1.6, -0.9, 0.9);
//! camera.set_position(Vec3::new(0.5, 0.0, 0.0));
//! camera.set_rotation(45.0);
//!
//! let view_projection = camera.view_projection();
//! # let _ = view_projection;
//! ```

use strata_core::event::{Event, EventDispatcher, MouseScrollEvent, WindowResizeEvent};
use strata_core::input::{InputState, KeyCode};
use strata_core::math::{Mat4, Vec3};

use crate::application::Application;

/// Zoom never drops below this.
pub const MIN_ZOOM: f32 = 0.25;
/// Zoom change per scrolled line.
pub const ZOOM_STEP: f32 = 0.25;

fn view_matrix(position: Vec3, rotation: f32) -> Mat4 {
    let transform = Mat4::from_translation(position) * Mat4::from_rotation_z(rotation.to_radians());
    transform.inverse()
}

#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    projection: Mat4,
    view: Mat4,
    view_projection: Mat4,
    position: Vec3,
    rotation: f32,
}

impl OrthographicCamera {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let projection = Mat4::orthographic_rh_gl(left, right, bottom, top, -1.0, 1.0);
        Self {
            projection,
            view: Mat4::IDENTITY,
            view_projection: projection,
            position: Vec3::ZERO,
            rotation: 0.0,
        }
    }

    pub fn set_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.projection = Mat4::orthographic_rh_gl(left, right, bottom, top, -1.0, 1.0);
        self.update_view();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.update_view();
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    fn update_view(&mut self) {
        self.view = view_matrix(self.position, self.rotation);
        self.view_projection = self.projection * self.view;
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    projection: Mat4,
    view: Mat4,
    view_projection: Mat4,
    position: Vec3,
    rotation: f32,
    /// Vertical field of view in degrees
    fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            position: Vec3::ZERO,
            rotation: 0.0,
            fov,
            aspect_ratio,
            near,
            far,
        };
        camera.set_projection(fov, aspect_ratio, near, far);
        camera
    }

    pub fn set_projection(&mut self, fov: f32, aspect_ratio: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect_ratio = aspect_ratio;
        self.near = near;
        self.far = far;
        self.projection = Mat4::perspective_rh_gl(fov.to_radians(), aspect_ratio, near, far);
        self.update_view();
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.update_view();
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    fn update_view(&mut self) {
        self.view = view_matrix(self.position, self.rotation);
        self.view_projection = self.projection * self.view;
    }
}

/// Moves `position` in the XY plane with WASD, relative to `rotation`.
fn planar_motion(input: &InputState, position: &mut Vec3, rotation: f32, distance: f32) {
    let (sin, cos) = rotation.to_radians().sin_cos();

    if input.is_key_down(KeyCode::A) {
        position.x -= cos * distance;
        position.y -= sin * distance;
    } else if input.is_key_down(KeyCode::D) {
        position.x += cos * distance;
        position.y += sin * distance;
    }

    if input.is_key_down(KeyCode::W) {
        position.x += -sin * distance;
        position.y += cos * distance;
    } else if input.is_key_down(KeyCode::S) {
        position.x -= -sin * distance;
        position.y -= cos * distance;
    }
}

fn zoom_after_scroll(zoom: f32, scroll: &MouseScrollEvent) -> f32 {
    (zoom - scroll.y() * ZOOM_STEP).max(MIN_ZOOM)
}

fn aspect_after_resize(resize: &WindowResizeEvent) -> Option<f32> {
    // A minimized window reports a zero height.
    (resize.height() > 0).then(|| resize.width() as f32 / resize.height() as f32)
}

/// 2D camera driven by WASD (and optionally Q/E rotation), zoomed with the
/// mouse wheel.
///
/// The controller never consumes events, so layers below it still see scroll
/// and resize events.
#[derive(Debug, Clone)]
pub struct OrthographicCameraController {
    aspect_ratio: f32,
    zoom_level: f32,
    camera: OrthographicCamera,
    rotation: bool,
    camera_position: Vec3,
    camera_rotation: f32,
    translation_speed: f32,
    rotation_speed: f32,
}

impl OrthographicCameraController {
    pub fn new(aspect_ratio: f32, rotation: bool) -> Self {
        let zoom_level = 1.0;
        Self {
            aspect_ratio,
            zoom_level,
            camera: OrthographicCamera::new(
                -aspect_ratio * zoom_level,
                aspect_ratio * zoom_level,
                -zoom_level,
                zoom_level,
            ),
            rotation,
            camera_position: Vec3::ZERO,
            camera_rotation: 0.0,
            translation_speed: 5.0,
            rotation_speed: 180.0,
        }
    }

    /// Polls the live application's input and moves the camera.
    pub fn on_update(&mut self, delta_time: f32) {
        let input = Application::get().input();
        let input = input.read();
        self.update_with(&input, delta_time);
    }

    pub fn update_with(&mut self, input: &InputState, delta_time: f32) {
        planar_motion(
            input,
            &mut self.camera_position,
            self.camera_rotation,
            self.translation_speed * delta_time,
        );

        if self.rotation {
            if input.is_key_down(KeyCode::Q) {
                self.camera_rotation += self.rotation_speed * delta_time;
            } else if input.is_key_down(KeyCode::E) {
                self.camera_rotation -= self.rotation_speed * delta_time;
            }

            if self.camera_rotation > 180.0 {
                self.camera_rotation -= 360.0;
            } else if self.camera_rotation <= -180.0 {
                self.camera_rotation += 360.0;
            }

            self.camera.set_rotation(self.camera_rotation);
        }

        self.camera.set_position(self.camera_position);
        self.translation_speed = self.zoom_level;
    }

    pub fn on_event(&mut self, event: &mut Event) {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch(|e: &MouseScrollEvent| {
            self.zoom_level = zoom_after_scroll(self.zoom_level, e);
            self.update_projection();
            false
        });
        dispatcher.dispatch(|e: &WindowResizeEvent| {
            if let Some(aspect_ratio) = aspect_after_resize(e) {
                self.aspect_ratio = aspect_ratio;
                self.update_projection();
            }
            false
        });
    }

    fn update_projection(&mut self) {
        let (aspect, zoom) = (self.aspect_ratio, self.zoom_level);
        self.camera.set_projection(-aspect * zoom, aspect * zoom, -zoom, zoom);
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrthographicCamera {
        &mut self.camera
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    pub fn set_zoom_level(&mut self, level: f32) {
        self.zoom_level = level.max(MIN_ZOOM);
        self.update_projection();
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

/// 3D camera driven by WASD in the XY plane and Q/E along Z. The mouse wheel
/// scales the field of view.
#[derive(Debug, Clone)]
pub struct PerspectiveCameraController {
    aspect_ratio: f32,
    zoom_level: f32,
    base_fov: f32,
    camera: PerspectiveCamera,
    camera_position: Vec3,
    camera_rotation: f32,
    translation_speed: f32,
}

impl PerspectiveCameraController {
    pub const MIN_FOV: f32 = 1.0;
    pub const MAX_FOV: f32 = 179.0;

    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            aspect_ratio,
            zoom_level: 1.0,
            base_fov: fov,
            camera: PerspectiveCamera::new(fov, aspect_ratio, near, far),
            camera_position: Vec3::ZERO,
            camera_rotation: 0.0,
            translation_speed: 5.0,
        }
    }

    pub fn on_update(&mut self, delta_time: f32) {
        let input = Application::get().input();
        let input = input.read();
        self.update_with(&input, delta_time);
    }

    pub fn update_with(&mut self, input: &InputState, delta_time: f32) {
        let distance = self.translation_speed * delta_time;
        planar_motion(input, &mut self.camera_position, self.camera_rotation, distance);

        if input.is_key_down(KeyCode::Q) {
            self.camera_position.z += distance;
        } else if input.is_key_down(KeyCode::E) {
            self.camera_position.z -= distance;
        }

        self.camera.set_position(self.camera_position);
    }

    pub fn on_event(&mut self, event: &mut Event) {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch(|e: &MouseScrollEvent| {
            self.zoom_level = zoom_after_scroll(self.zoom_level, e);
            self.update_projection();
            false
        });
        dispatcher.dispatch(|e: &WindowResizeEvent| {
            if let Some(aspect_ratio) = aspect_after_resize(e) {
                self.aspect_ratio = aspect_ratio;
                self.update_projection();
            }
            false
        });
    }

    /// Field of view for the current zoom level, in degrees.
    pub fn fov(&self) -> f32 {
        (self.base_fov * self.zoom_level).clamp(Self::MIN_FOV, Self::MAX_FOV)
    }

    fn update_projection(&mut self) {
        let (near, far) = (self.camera.near(), self.camera.far());
        self.camera
            .set_projection(self.fov(), self.aspect_ratio, near, far);
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    pub fn set_zoom_level(&mut self, level: f32) {
        self.zoom_level = level.max(MIN_ZOOM);
        self.update_projection();
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::math::Vec4;

    #[test]
    fn test_view_inverts_translation() {
        let mut camera = OrthographicCamera::default();
        camera.set_position(Vec3::new(0.5, -0.25, 0.0));

        let clip = camera.view_projection() * Vec4::new(0.5, -0.25, 0.0, 1.0);
        assert!(clip.truncate().length() < 1e-6);
    }

    #[test]
    fn test_rotation_is_about_z() {
        let mut camera = OrthographicCamera::default();
        camera.set_rotation(90.0);

        // Rotating the camera +90 degrees makes world +Y appear along view +X.
        let view = camera.view() * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert!((view.x - 1.0).abs() < 1e-5);
        assert!(view.y.abs() < 1e-5);
    }

    #[test]
    fn test_perspective_accessors() {
        let camera = PerspectiveCamera::new(45.0, 2.0, 0.1, 100.0);
        assert_eq!(camera.fov(), 45.0);
        assert_eq!(camera.aspect_ratio(), 2.0);
        assert_eq!((camera.near(), camera.far()), (0.1, 100.0));
        assert_eq!(camera.view(), Mat4::IDENTITY);
    }
}
