//! Egui integration for Strata.
//!
//! [`EguiLayer`] is an overlay that runs one egui pass per frame: the pass
//! opens in `pre_update`, user UI code runs in `update`, and the finished
//! output is tessellated in `post_update` and handed to an [`EguiPainter`].
//! Drawing the primitives is the painter's job; [`NullPainter`] discards them.

mod state;

use strata::application::Application;
use strata::layer::Layer;
use strata_core::event::{Event, MouseButtonPressEvent};
use strata_core::math::UVec2;
use strata_core::profiling::profile_function;

use state::State;

// Re-export egui types
pub use egui::{
    self, Align, Align2, ClippedPrimitive, Color32, Context as EguiContext, Id, Key, Layout,
    Modifiers, Pos2, Rect, Response, RichText, Slider, TexturesDelta, Ui, Vec2, Visuals, Widget,
};
pub use state::EventResponse;

/// Size of the render target a painter draws into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenDescriptor {
    pub size_in_pixels: [u32; 2],
    pub pixels_per_point: f32,
}

/// Receives the tessellated output of every egui pass.
pub trait EguiPainter {
    fn paint(
        &mut self,
        primitives: &[ClippedPrimitive],
        textures_delta: &TexturesDelta,
        screen: &ScreenDescriptor,
    );
}

/// Painter that drops everything it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPainter;

impl EguiPainter for NullPainter {
    fn paint(
        &mut self,
        primitives: &[ClippedPrimitive],
        _textures_delta: &TexturesDelta,
        _screen: &ScreenDescriptor,
    ) {
        tracing::trace!("Discarding {} egui primitives", primitives.len());
    }
}

type UiFn = Box<dyn FnMut(&egui::Context)>;

/// Overlay layer hosting an egui context.
///
/// Mouse button presses over egui areas are consumed so layers underneath
/// never see clicks meant for the UI. Every other event passes through.
///
/// # Example
///
/// ```rust
/// use strata::layer::Layer;
/// use strata_egui::EguiLayer;
///
/// let mut layer = EguiLayer::new(|ctx| {
///     egui::Window::new("Hello").show(ctx, |ui| {
///         ui.label("Hello, world!");
///     });
/// });
///
/// layer.pre_update();
/// layer.update(1.0 / 60.0);
/// layer.post_update();
/// ```
pub struct EguiLayer {
    context: egui::Context,
    state: State,
    ui: UiFn,
    painter: Box<dyn EguiPainter>,
    time: f64,
    in_pass: bool,
}

impl EguiLayer {
    pub const DEFAULT_SCREEN_SIZE: UVec2 = UVec2::new(1024, 512);

    pub fn new(ui: impl FnMut(&egui::Context) + 'static) -> Self {
        let context = egui::Context::default();
        let state = State::new(context.clone(), Self::DEFAULT_SCREEN_SIZE);

        Self {
            context,
            state,
            ui: Box::new(ui),
            painter: Box::new(NullPainter),
            time: 0.0,
            in_pass: false,
        }
    }

    pub fn with_painter(mut self, painter: impl EguiPainter + 'static) -> Self {
        self.painter = Box::new(painter);
        self
    }

    /// Get the egui context for direct access.
    pub fn context(&self) -> &egui::Context {
        &self.context
    }

    pub fn screen_size(&self) -> UVec2 {
        self.state.screen_size()
    }

    /// Whether the last button event egui received over a known pointer
    /// position was a press.
    pub fn is_pointer_button_down(&self) -> bool {
        self.state.is_any_pointer_button_down()
    }

    fn screen_descriptor(&self, pixels_per_point: f32) -> ScreenDescriptor {
        let size = self.state.screen_size();
        ScreenDescriptor {
            size_in_pixels: [size.x, size.y],
            pixels_per_point,
        }
    }
}

impl Layer for EguiLayer {
    fn name(&self) -> &str {
        "EguiLayer"
    }

    fn on_attach(&mut self) {
        self.context.set_visuals(egui::Visuals::dark());

        // Pick up the real window size when attached to a running application.
        if let Some(app) = Application::try_get() {
            self.state.set_screen_size(app.input().read().window_size());
        }

        tracing::info!("EguiLayer attached");
    }

    fn on_detach(&mut self) {
        tracing::info!("EguiLayer detached");
    }

    fn pre_update(&mut self) {
        profile_function!();
        let raw_input = self.state.take_input(self.time);
        self.context.begin_pass(raw_input);
        self.in_pass = true;
    }

    fn update(&mut self, delta_time: f32) {
        profile_function!();
        self.time += f64::from(delta_time);
        if self.in_pass {
            (self.ui)(&self.context);
        }
    }

    fn post_update(&mut self) {
        profile_function!();
        if !self.in_pass {
            return;
        }
        self.in_pass = false;

        let output = self.context.end_pass();
        let primitives = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);
        let screen = self.screen_descriptor(output.pixels_per_point);

        self.painter
            .paint(&primitives, &output.textures_delta, &screen);
    }

    fn on_event(&mut self, event: &mut Event) {
        let response = self.state.on_event(event);
        if response.consumed && event.is::<MouseButtonPressEvent>() {
            event.mark_handled();
        }
    }
}
