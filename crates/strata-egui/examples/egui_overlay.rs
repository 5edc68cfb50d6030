//! Egui Overlay Example
//!
//! Pushes an egui overlay above a layer that reports the clicks it receives.
//! Clicks landing on an egui window are consumed by the overlay and never
//! reach the layer below.
//!
//! Run with: cargo run -p strata-egui --example egui_overlay

use strata::prelude::*;
use strata_egui::{EguiLayer, Slider, egui};

struct ClickReporter;

impl Layer for ClickReporter {
    fn name(&self) -> &str {
        "ClickReporter"
    }

    fn on_event(&mut self, event: &mut Event) {
        EventDispatcher::new(event).dispatch(|press: &MouseButtonPressEvent| {
            tracing::info!(
                "Click {} at {:?} reached the scene",
                press.button(),
                Input::mouse_position()
            );
            false
        });
    }
}

struct DemoState {
    show_settings: bool,
    show_another_window: bool,
    value: f32,
    counter: u32,
    dark_mode: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            show_settings: true,
            show_another_window: false,
            value: 0.0,
            counter: 0,
            dark_mode: true,
        }
    }
}

impl DemoState {
    fn ui(&mut self, ctx: &egui::Context) {
        egui::Window::new("Hello, world!").show(ctx, |ui| {
            ui.label("This is some useful text.");
            ui.checkbox(&mut self.show_settings, "Settings Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(Slider::new(&mut self.value, 0.0..=1.0).text("float"));

            if ui.button(format!("Button{}", self.counter)).clicked() {
                self.counter += 1;
                tracing::info!("Button pressed {} times", self.counter);
            }
        });

        if self.show_another_window {
            egui::Window::new("Another Window").show(ctx, |ui| {
                ui.label("Hello from another window!");
                if ui.button("Close Me").clicked() {
                    self.show_another_window = false;
                }
            });
        }

        if self.show_settings {
            egui::Window::new("Settings")
                .open(&mut self.show_settings)
                .show(ctx, |ui| {
                    if ui.checkbox(&mut self.dark_mode, "Dark mode").changed() {
                        let visuals = if self.dark_mode {
                            egui::Visuals::dark()
                        } else {
                            egui::Visuals::light()
                        };
                        ctx.set_visuals(visuals);
                    }
                    ui.label(format!(
                        "Frame time: {:.2} ms",
                        ctx.input(|input| input.unstable_dt) * 1000.0
                    ));
                });
        }
    }
}

fn main() -> Result<(), ApplicationError> {
    let mut app = Application::new(ApplicationConfig::new().with_title("Strata Egui Overlay"))?;

    let mut demo = DemoState::default();
    app.push_layer(ClickReporter);
    app.push_overlay(EguiLayer::new(move |ctx| demo.ui(ctx)));
    app.run();

    Ok(())
}
