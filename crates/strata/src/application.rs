//! The application: owns the platform, the layer stack and the frame loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use strata_core::config::ProfilingMode;
use strata_core::event::{Event, EventDispatcher, WindowCloseEvent};
use strata_core::input::SharedInput;
use strata_core::logging;
use strata_core::platform::Platform;
use strata_core::profiling::{self, profile_function, profile_scope};
use strata_core::strata_assert;

#[cfg(feature = "winit")]
use strata_winit::{Window, WindowDescriptor, WindowError};

use crate::layer::{Layer, LayerId};
use crate::layer_stack::LayerStack;
use crate::time::FrameClock;

/// Settings for [`Application::new`].
///
/// # Example
///
/// ```
/// use strata::application::ApplicationConfig;
///
/// let config = ApplicationConfig::new()
///     .with_title("Sandbox")
///     .with_size(1280, 720);
/// assert_eq!(config.title, "Sandbox");
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Install the global tracing subscriber on construction
    pub logging: bool,
    /// Filter used when `RUST_LOG` is unset
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationConfig {
    /// Defaults:
    /// - Title: "Strata Application"
    /// - Size: 1024x512
    /// - Logging on, profiling off
    pub fn new() -> Self {
        Self {
            title: "Strata Application".to_string(),
            width: 1024,
            height: 512,
            resizable: true,
            logging: true,
            log_filter: logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }
}

#[cfg(feature = "winit")]
#[derive(Debug)]
pub enum ApplicationError {
    Window(WindowError),
}

#[cfg(feature = "winit")]
impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::Window(err) => write!(f, "window backend failed: {}", err),
        }
    }
}

#[cfg(feature = "winit")]
impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplicationError::Window(err) => Some(err),
        }
    }
}

#[cfg(feature = "winit")]
impl From<WindowError> for ApplicationError {
    fn from(err: WindowError) -> Self {
        ApplicationError::Window(err)
    }
}

/// Process-wide view of the live application.
///
/// Obtained through [`Application::get`]; cheap to clone.
#[derive(Clone)]
pub struct AppHandle {
    title: Arc<str>,
    input: SharedInput,
}

impl AppHandle {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn input(&self) -> SharedInput {
        self.input.clone()
    }
}

static INSTANCE_LIVE: AtomicBool = AtomicBool::new(false);
static INSTANCE: RwLock<Option<AppHandle>> = parking_lot::const_rwlock(None);

/// Holds the single-instance reservation; releasing it clears the global slot.
struct InstanceGuard;

impl InstanceGuard {
    fn reserve() -> Self {
        let reserved = INSTANCE_LIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        strata_assert!(reserved, "Application already exists!");
        Self
    }

    fn publish(&self, handle: AppHandle) {
        *INSTANCE.write() = Some(handle);
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        INSTANCE.write().take();
        INSTANCE_LIVE.store(false, Ordering::Release);
    }
}

/// The frame loop driver.
///
/// Exactly one application may be alive at a time; constructing a second one
/// while the first is alive aborts with an error log.
///
/// # Example
///
/// ```no_run
/// use strata::prelude::*;
///
/// struct Game;
/// impl Layer for Game {
///     fn update(&mut self, delta_time: f32) {
///         tracing::trace!("frame took {delta_time}s");
///     }
/// }
///
/// fn main() -> Result<(), ApplicationError> {
///     let mut app = Application::new(ApplicationConfig::new().with_title("Game"))?;
///     app.push_layer(Game);
///     app.run();
///     Ok(())
/// }
/// ```
pub struct Application {
    // Field order is drop order: layers detach while the platform and the
    // global handle are still alive.
    layers: LayerStack,
    platform: Box<dyn Platform>,
    running: bool,
    clock: FrameClock,
    _instance: InstanceGuard,
}

impl Application {
    /// Initialises logging and profiling per `config`, then opens the window.
    #[cfg(feature = "winit")]
    pub fn new(config: ApplicationConfig) -> Result<Self, ApplicationError> {
        if config.logging {
            logging::init_with_filter(&config.log_filter);
        }
        profiling::init_profiling(config.profiling);

        let instance = InstanceGuard::reserve();
        let window = Window::new(WindowDescriptor {
            title: config.title,
            width: config.width,
            height: config.height,
            resizable: config.resizable,
            visible: true,
        })?;

        Ok(Self::assemble(instance, Box::new(window)))
    }

    /// Builds an application around an already constructed platform.
    pub fn with_platform(platform: impl Platform + 'static) -> Self {
        let instance = InstanceGuard::reserve();
        Self::assemble(instance, Box::new(platform))
    }

    fn assemble(instance: InstanceGuard, platform: Box<dyn Platform>) -> Self {
        instance.publish(AppHandle {
            title: Arc::from(platform.title()),
            input: platform.input(),
        });

        tracing::info!("Application \"{}\" created", platform.title());

        Self {
            layers: LayerStack::new(),
            clock: FrameClock::new(platform.time()),
            platform,
            running: true,
            _instance: instance,
        }
    }

    /// Handle to the live application.
    ///
    /// # Panics
    /// When no application exists.
    pub fn get() -> AppHandle {
        Self::try_get().unwrap_or_else(|| {
            tracing::error!("assertion failed: no application exists");
            panic!("no application exists");
        })
    }

    pub fn try_get() -> Option<AppHandle> {
        INSTANCE.read().clone()
    }

    /// Runs frames until a window-close event (or [`close`](Self::close))
    /// clears the running flag.
    pub fn run(&mut self) {
        tracing::info!("Running application \"{}\"", self.platform.title());

        while self.running {
            self.frame();
        }

        tracing::info!(
            "Application \"{}\" stopped after {} frames",
            self.platform.title(),
            self.clock.frame_count()
        );
    }

    fn frame(&mut self) {
        profiling::new_frame();
        profile_function!();

        let delta_time = self.clock.tick(self.platform.time());

        {
            profile_scope!("layers");
            for layer in self.layers.iter_mut() {
                layer.pre_update();
                layer.update(delta_time);
                layer.post_update();
            }
        }

        let Self {
            running,
            layers,
            platform,
            ..
        } = self;
        platform.on_update(&mut |event: &mut Event| route_event(running, layers, event));
    }

    /// The single event entry point.
    ///
    /// Window-close stops the loop and is marked handled, yet is still offered
    /// to the layers. Every event then walks the stack from the top overlay
    /// down and stops at the first layer that marks it handled.
    pub fn on_event(&mut self, event: &mut Event) {
        route_event(&mut self.running, &mut self.layers, event);
    }

    pub fn push_layer(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.layers.push_layer(layer)
    }

    pub fn push_overlay(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.layers.push_overlay(layer)
    }

    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        self.layers.pop_layer(id)
    }

    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        self.layers.pop_overlay(id)
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the loop after the current frame.
    pub fn close(&mut self) {
        self.running = false;
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    pub fn handle(&self) -> AppHandle {
        AppHandle {
            title: Arc::from(self.platform.title()),
            input: self.platform.input(),
        }
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        tracing::info!("Shutting down application \"{}\"", self.platform.title());
    }
}

fn route_event(running: &mut bool, layers: &mut LayerStack, event: &mut Event) {
    profile_function!();
    tracing::trace!("Routing {}", event);

    EventDispatcher::new(event).dispatch(|_: &WindowCloseEvent| {
        tracing::info!("Window close requested");
        *running = false;
        true
    });

    for layer in layers.iter_mut().rev() {
        layer.on_event(event);
        if event.is_handled() {
            tracing::trace!("{} handled by {}", event.name(), layer.name());
            break;
        }
    }
}
