use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use strata_core::event::{Event, WindowResizeEvent};
use strata_core::input::{InputState, SharedInput};
use strata_core::math::UVec2;
use strata_core::platform::{EventSink, Platform};
use strata_core::profiling::profile_function;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{WindowAttributes, WindowId};

pub use winit::window::Window as WinitWindow;

use crate::event::translate;
use crate::time::Clock;

pub struct WindowDescriptor {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub visible: bool,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Strata Window".to_string(),
            width: 1024,
            height: 512,
            resizable: true,
            visible: true,
        }
    }
}

impl WindowDescriptor {
    fn attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
            .with_visible(self.visible)
    }
}

/// Hook invoked once per frame, after events are pumped, to present whatever
/// was drawn into the window.
pub trait Presenter {
    fn present(&mut self, window: &WinitWindow);
}

#[derive(Debug)]
pub enum WindowError {
    EventLoop(EventLoopError),
    Os(OsError),
    /// The event loop never resumed, so no native window exists.
    NotCreated,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::EventLoop(err) => write!(f, "failed to create event loop: {}", err),
            WindowError::Os(err) => write!(f, "failed to create window: {}", err),
            WindowError::NotCreated => f.write_str("window was not created"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::EventLoop(err) => Some(err),
            WindowError::Os(err) => Some(err),
            WindowError::NotCreated => None,
        }
    }
}

impl From<EventLoopError> for WindowError {
    fn from(err: EventLoopError) -> Self {
        WindowError::EventLoop(err)
    }
}

impl From<OsError> for WindowError {
    fn from(err: OsError) -> Self {
        WindowError::Os(err)
    }
}

/// State the event loop handler needs; kept apart from the `EventLoop` so the
/// two can be borrowed at the same time.
struct Shell {
    descriptor: WindowDescriptor,
    window: Option<Arc<WinitWindow>>,
    input: SharedInput,
    clock: Clock,
    presenter: Option<Box<dyn Presenter>>,
    error: Option<OsError>,
}

struct Pump<'a> {
    shell: &'a mut Shell,
    sink: Option<&'a mut dyn EventSink>,
}

impl ApplicationHandler for Pump<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.window.is_some() {
            return;
        }

        match event_loop.create_window(self.shell.descriptor.attributes()) {
            Ok(window) => {
                let size = window.inner_size();
                self.shell
                    .input
                    .write()
                    .apply(&WindowResizeEvent::new(size.width, size.height).into());
                self.shell.window = Some(Arc::new(window));
            }
            Err(err) => {
                tracing::error!("Failed to create window: {}", err);
                self.shell.error = Some(err);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let input = &self.shell.input;
        let sink = &mut self.sink;

        translate(&event, |mut event: Event| {
            input.write().apply(&event);
            if let Some(sink) = sink.as_mut() {
                sink.on_event(&mut event);
            }
        });
    }
}

/// A single native window plus the event loop that feeds it.
///
/// The loop is pumped without blocking once per [`Platform::on_update`]; every
/// notification is translated and delivered before that call returns.
pub struct Window {
    event_loop: EventLoop<()>,
    shell: Shell,
}

impl Window {
    pub fn new(descriptor: WindowDescriptor) -> Result<Self, WindowError> {
        let event_loop = EventLoop::new()?;
        let input = InputState::shared(UVec2::new(descriptor.width, descriptor.height));

        let mut window = Self {
            event_loop,
            shell: Shell {
                descriptor,
                window: None,
                input,
                clock: Clock::new(),
                presenter: None,
                error: None,
            },
        };

        // The native window is created from `resumed`, which the first pump delivers.
        window.pump(None);

        if let Some(err) = window.shell.error.take() {
            return Err(WindowError::Os(err));
        }
        if window.shell.window.is_none() {
            return Err(WindowError::NotCreated);
        }

        tracing::info!(
            "Created window \"{}\" ({}x{})",
            window.shell.descriptor.title,
            window.shell.descriptor.width,
            window.shell.descriptor.height
        );

        Ok(window)
    }

    pub fn descriptor(&self) -> &WindowDescriptor {
        &self.shell.descriptor
    }

    /// The native window, for renderers that need a surface.
    pub fn handle(&self) -> Option<&Arc<WinitWindow>> {
        self.shell.window.as_ref()
    }

    pub fn set_presenter(&mut self, presenter: impl Presenter + 'static) {
        self.shell.presenter = Some(Box::new(presenter));
    }

    fn pump<'s>(&'s mut self, sink: Option<&'s mut dyn EventSink>) {
        let mut pump = Pump {
            shell: &mut self.shell,
            sink,
        };

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut pump)
        {
            tracing::warn!("Event loop exited with code {}", code);
        }
    }

    fn present(&mut self) {
        let Some(window) = &self.shell.window else {
            return;
        };

        if let Some(presenter) = &mut self.shell.presenter {
            presenter.present(window);
        }
        window.request_redraw();
    }
}

impl Platform for Window {
    fn title(&self) -> &str {
        &self.shell.descriptor.title
    }

    fn time(&self) -> f64 {
        self.shell.clock.seconds()
    }

    fn on_update(&mut self, sink: &mut dyn EventSink) {
        profile_function!();
        self.pump(Some(sink));
        self.present();
    }

    fn input(&self) -> SharedInput {
        self.shell.input.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor() {
        let desc = WindowDescriptor::default();
        assert_eq!(desc.title, "Strata Window");
        assert_eq!((desc.width, desc.height), (1024, 512));
        assert!(desc.resizable);
        assert!(desc.visible);
    }

    fn assert_platform<P: Platform + 'static>() {}

    #[test]
    fn test_window_is_a_platform() {
        assert_platform::<Window>();

        // The sink lent to `on_update` only needs to live for the call.
        let mut seen = Vec::new();
        let mut sink = |event: &mut strata_core::event::Event| seen.push(event.kind());
        let _lent: &mut dyn EventSink = &mut sink;
    }

    #[test]
    fn test_error_display() {
        assert_eq!(WindowError::NotCreated.to_string(), "window was not created");
    }
}
