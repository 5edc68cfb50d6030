//! Scripted platform for driving an application without a window.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use strata_core::event::{Event, EventKind, WindowCloseEvent};
use strata_core::input::{InputState, SharedInput};
use strata_core::math::UVec2;
use strata_core::platform::{EventSink, Platform};

/// An event as the platform saw it once the sink returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub kind: EventKind,
    pub handled: bool,
}

/// What the platform observed; shared so tests can inspect it after the
/// platform has moved into an application.
#[derive(Debug, Default)]
pub struct PlatformProbe {
    pub updates: usize,
    pub time_samples: usize,
    pub deliveries: Vec<Delivery>,
}

/// A headless [`Platform`] that replays a script.
///
/// Each [`on_update`](Platform::on_update) delivers the next scripted batch of
/// events and then advances the clock to the next scripted time. When the
/// batches run out, a window-close event is delivered instead, so
/// `Application::run` terminates.
///
/// # Example
///
/// ```rust
/// use strata_core::event::{Event, WindowResizeEvent};
/// use strata_test_utils::MockPlatform;
///
/// let platform = MockPlatform::new("Test")
///     .with_times([0.0, 0.5])
///     .with_frame(vec![Event::from(WindowResizeEvent::new(800, 600))]);
///
/// let probe = platform.probe();
/// assert_eq!(probe.lock().updates, 0);
/// ```
pub struct MockPlatform {
    title: String,
    times: Vec<f64>,
    cursor: usize,
    frames: VecDeque<Vec<Event>>,
    auto_close: bool,
    input: SharedInput,
    probe: Arc<Mutex<PlatformProbe>>,
}

impl MockPlatform {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            times: vec![0.0],
            cursor: 0,
            frames: VecDeque::new(),
            auto_close: true,
            input: InputState::shared(UVec2::new(1024, 512)),
            probe: Arc::new(Mutex::new(PlatformProbe::default())),
        }
    }

    /// Clock readings, one per frame. The last reading repeats once the
    /// script is exhausted.
    pub fn with_times(mut self, times: impl IntoIterator<Item = f64>) -> Self {
        self.times = times.into_iter().collect();
        if self.times.is_empty() {
            self.times.push(0.0);
        }
        self
    }

    /// Appends one frame's worth of events.
    pub fn with_frame(mut self, events: Vec<Event>) -> Self {
        self.frames.push_back(events);
        self
    }

    /// Appends `count` frames that deliver nothing.
    pub fn with_idle_frames(mut self, count: usize) -> Self {
        self.frames.extend((0..count).map(|_| Vec::new()));
        self
    }

    /// Keeps delivering empty frames instead of closing once the script ends.
    pub fn without_auto_close(mut self) -> Self {
        self.auto_close = false;
        self
    }

    pub fn probe(&self) -> Arc<Mutex<PlatformProbe>> {
        self.probe.clone()
    }

    fn deliver(&self, mut event: Event, sink: &mut dyn EventSink) {
        self.input.write().apply(&event);
        sink.on_event(&mut event);
        self.probe.lock().deliveries.push(Delivery {
            kind: event.kind(),
            handled: event.is_handled(),
        });
    }
}

impl Platform for MockPlatform {
    fn title(&self) -> &str {
        &self.title
    }

    fn time(&self) -> f64 {
        self.probe.lock().time_samples += 1;
        self.times[self.cursor.min(self.times.len() - 1)]
    }

    fn on_update(&mut self, sink: &mut dyn EventSink) {
        self.probe.lock().updates += 1;

        match self.frames.pop_front() {
            Some(batch) => {
                for event in batch {
                    self.deliver(event, sink);
                }
            }
            None if self.auto_close => self.deliver(WindowCloseEvent::new().into(), sink),
            None => {}
        }

        self.cursor += 1;
    }

    fn input(&self) -> SharedInput {
        self.input.clone()
    }
}
