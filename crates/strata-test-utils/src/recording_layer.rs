//! A layer that records every hook it receives.

use std::sync::Arc;

use parking_lot::Mutex;
use strata::layer::Layer;
use strata_core::event::{Event, EventKind};

/// One hook invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Attach,
    Detach,
    PreUpdate,
    Update(f32),
    PostUpdate,
    /// `handled` is the flag as the layer received it.
    Event { kind: EventKind, handled: bool },
}

/// Shared, ordered record of hook calls across any number of layers.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, Call)>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, layer: &str, call: Call) {
        self.calls.lock().push((layer.to_string(), call));
    }

    /// Every call in order, tagged with the layer name.
    pub fn entries(&self) -> Vec<(String, Call)> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, layer: &str) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|(name, _)| name == layer)
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// Names of the layers that received `call`, in order.
    pub fn layers_with(&self, call: &Call) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(_, c)| c == call)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Names of the layers that were offered an event of `kind`, in order.
    pub fn receivers_of(&self, kind: EventKind) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(_, c)| matches!(c, Call::Event { kind: k, .. } if *k == kind))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Deltas passed to `update` on `layer`, in order.
    pub fn deltas_for(&self, layer: &str) -> Vec<f32> {
        self.calls_for(layer)
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(delta) => Some(delta),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, layer: &str, call: &Call) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(name, c)| name == layer && c == call)
            .count()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

/// Custom event behavior run after recording.
pub type Hook = Box<dyn FnMut(&mut Event)>;

/// A [`Layer`] that logs every hook into a [`CallLog`] and optionally marks
/// chosen event kinds handled.
///
/// # Example
///
/// ```rust
/// use strata::layer::Layer;
/// use strata_core::event::{Event, EventKind, MouseButtonPressEvent};
/// use strata_core::input::MouseButton;
/// use strata_test_utils::{Call, CallLog, RecordingLayer};
///
/// let log = CallLog::new();
/// let mut layer = RecordingLayer::new("ui", &log).consuming(EventKind::MouseButtonPress);
///
/// let mut event = Event::from(MouseButtonPressEvent::new(MouseButton::LEFT));
/// layer.on_event(&mut event);
///
/// assert!(event.is_handled());
/// assert_eq!(
///     log.calls_for("ui"),
///     vec![Call::Event { kind: EventKind::MouseButtonPress, handled: false }]
/// );
/// ```
pub struct RecordingLayer {
    name: String,
    log: CallLog,
    consumes: Vec<EventKind>,
    hook: Option<Hook>,
}

impl RecordingLayer {
    pub fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            consumes: Vec::new(),
            hook: None,
        }
    }

    /// Marks events of `kind` handled.
    pub fn consuming(mut self, kind: EventKind) -> Self {
        self.consumes.push(kind);
        self
    }

    pub fn with_hook(mut self, hook: impl FnMut(&mut Event) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl Layer for RecordingLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_attach(&mut self) {
        self.log.record(&self.name, Call::Attach);
    }

    fn on_detach(&mut self) {
        self.log.record(&self.name, Call::Detach);
    }

    fn pre_update(&mut self) {
        self.log.record(&self.name, Call::PreUpdate);
    }

    fn update(&mut self, delta_time: f32) {
        self.log.record(&self.name, Call::Update(delta_time));
    }

    fn post_update(&mut self) {
        self.log.record(&self.name, Call::PostUpdate);
    }

    fn on_event(&mut self, event: &mut Event) {
        self.log.record(
            &self.name,
            Call::Event {
                kind: event.kind(),
                handled: event.is_handled(),
            },
        );

        if self.consumes.contains(&event.kind()) {
            event.mark_handled();
        }

        if let Some(hook) = self.hook.as_mut() {
            hook(event);
        }
    }
}
