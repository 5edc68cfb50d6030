//! Sandbox Example - layers, overlays and a camera controller
//!
//! Pushes a game layer driving an orthographic camera (WASD to move, Q/E to
//! rotate, mouse wheel to zoom) and a debug overlay that swallows right
//! clicks so the game layer below never sees them.
//!
//! Run with: cargo run --example sandbox

use strata::prelude::*;

struct Game {
    controller: OrthographicCameraController,
    elapsed: f32,
}

impl Game {
    fn new() -> Self {
        Self {
            controller: OrthographicCameraController::new(1024.0 / 512.0, true),
            elapsed: 0.0,
        }
    }
}

impl Layer for Game {
    fn name(&self) -> &str {
        "Game"
    }

    fn on_attach(&mut self) {
        tracing::info!("Game attached");
    }

    fn on_detach(&mut self) {
        tracing::info!("Game detached");
    }

    fn update(&mut self, delta_time: f32) {
        self.controller.on_update(delta_time);

        self.elapsed += delta_time;
        if self.elapsed >= 1.0 {
            self.elapsed = 0.0;
            let camera = self.controller.camera();
            tracing::info!(
                "Camera at {:?}, rotation {:.1}, zoom {:.2}, cursor {:?}",
                camera.position(),
                camera.rotation(),
                self.controller.zoom_level(),
                Input::mouse_position()
            );
        }
    }

    fn on_event(&mut self, event: &mut Event) {
        self.controller.on_event(event);

        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch(|press: &KeyPressEvent| {
            if !press.is_repeat() {
                tracing::info!("Key pressed: {}", press.code());
            }
            false
        });
        dispatcher.dispatch(|press: &MouseButtonPressEvent| {
            tracing::info!("Mouse button {} reached the game", press.button());
            false
        });
    }
}

struct DebugOverlay;

impl Layer for DebugOverlay {
    fn name(&self) -> &str {
        "DebugOverlay"
    }

    fn on_event(&mut self, event: &mut Event) {
        EventDispatcher::new(event).dispatch(|press: &MouseButtonPressEvent| {
            if press.button() == MouseButton::RIGHT {
                tracing::info!("Overlay consumed a right click");
                return true;
            }
            false
        });
    }
}

fn main() -> Result<(), ApplicationError> {
    let mut app = Application::new(
        ApplicationConfig::new()
            .with_title("Strata Sandbox")
            .with_profiling(ProfilingMode::On),
    )?;

    app.push_layer(Game::new());
    app.push_overlay(DebugOverlay);
    app.run();

    Ok(())
}
