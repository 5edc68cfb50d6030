//! Integration tests for the application frame loop and event routing.
//!
//! Only one application may be alive per process, so every test takes
//! `SERIAL` before constructing one.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use strata::math::UVec2;
use strata::prelude::*;
use strata_test_utils::{Call, CallLog, Delivery, MockPlatform, RecordingLayer};

static SERIAL: Mutex<()> = parking_lot::const_mutex(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock()
}

fn names(app: &Application) -> Vec<String> {
    app.layers().iter().map(|l| l.name().to_string()).collect()
}

fn press(button: MouseButton) -> Event {
    MouseButtonPressEvent::new(button).into()
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_routing_walks_stack_in_reverse_and_stops_when_handled() {
    let _serial = serial();
    let log = CallLog::new();
    let mut app = Application::with_platform(MockPlatform::new("routing").without_auto_close());

    app.push_layer(RecordingLayer::new("A", &log));
    app.push_layer(RecordingLayer::new("B", &log).consuming(EventKind::MouseButtonPress));
    app.push_overlay(RecordingLayer::new("C", &log));

    let mut event = press(MouseButton::LEFT);
    app.on_event(&mut event);

    assert!(event.is_handled());
    assert_eq!(log.receivers_of(EventKind::MouseButtonPress), vec!["C", "B"]);
    assert_eq!(
        log.calls_for("C").last(),
        Some(&Call::Event {
            kind: EventKind::MouseButtonPress,
            handled: false
        })
    );
}

#[test]
fn test_unhandled_event_reaches_every_layer() {
    let _serial = serial();
    let log = CallLog::new();
    let mut app = Application::with_platform(MockPlatform::new("resize").without_auto_close());

    app.push_layer(RecordingLayer::new("A", &log));
    app.push_layer(RecordingLayer::new("B", &log));
    app.push_overlay(RecordingLayer::new("C", &log));

    let mut event = Event::from(WindowResizeEvent::new(800, 600));
    app.on_event(&mut event);

    assert!(!event.is_handled());
    assert!(app.is_running());
    assert_eq!(log.receivers_of(EventKind::WindowResize), vec!["C", "B", "A"]);
}

#[test]
fn test_window_close_is_handled_by_the_application() {
    let _serial = serial();
    let log = CallLog::new();
    let mut app = Application::with_platform(MockPlatform::new("close").without_auto_close());

    app.push_layer(RecordingLayer::new("A", &log));
    app.push_overlay(RecordingLayer::new("C", &log));

    let mut event = Event::from(WindowCloseEvent::new());
    app.on_event(&mut event);

    assert!(event.is_handled());
    assert!(!app.is_running());
    // The topmost layer is still offered the event, already handled.
    assert_eq!(log.receivers_of(EventKind::WindowClose), vec!["C"]);
    assert_eq!(
        log.calls_for("C").last(),
        Some(&Call::Event {
            kind: EventKind::WindowClose,
            handled: true
        })
    );
}

// ============================================================================
// Layer stack through the application
// ============================================================================

#[test]
fn test_overlays_stay_on_top() {
    let _serial = serial();
    let log = CallLog::new();
    let mut app = Application::with_platform(MockPlatform::new("zones"));

    app.push_layer(RecordingLayer::new("A", &log));
    app.push_overlay(RecordingLayer::new("X", &log));
    app.push_layer(RecordingLayer::new("B", &log));

    assert_eq!(names(&app), vec!["A", "B", "X"]);
    assert_eq!(log.layers_with(&Call::Attach), vec!["A", "X", "B"]);
}

#[test]
fn test_pop_layer_does_not_touch_overlays() {
    let _serial = serial();
    let log = CallLog::new();
    let mut app = Application::with_platform(MockPlatform::new("pop"));

    let a = app.push_layer(RecordingLayer::new("A", &log));
    let x = app.push_overlay(RecordingLayer::new("X", &log));

    assert!(app.pop_layer(x).is_none());
    assert_eq!(names(&app), vec!["A", "X"]);
    assert_eq!(log.count("X", &Call::Detach), 0);

    let popped = app.pop_layer(a).expect("A is a regular layer");
    assert_eq!(popped.name(), "A");
    assert_eq!(log.count("A", &Call::Detach), 1);
    assert_eq!(names(&app), vec!["X"]);
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn test_run_exits_on_window_close() {
    let _serial = serial();
    let log = CallLog::new();
    let platform = MockPlatform::new("run").with_idle_frames(2);
    let probe = platform.probe();

    let mut app = Application::with_platform(platform);
    app.push_layer(RecordingLayer::new("A", &log));
    app.run();

    assert!(!app.is_running());
    assert_eq!(app.clock().frame_count(), 3);
    assert_eq!(log.count("A", &Call::PreUpdate), 3);

    let probe = probe.lock();
    assert_eq!(probe.updates, 3);
    assert_eq!(
        probe.deliveries,
        vec![Delivery {
            kind: EventKind::WindowClose,
            handled: true
        }]
    );
}

#[test]
fn test_layers_update_in_forward_order() {
    let _serial = serial();
    let log = CallLog::new();
    let mut app = Application::with_platform(MockPlatform::new("order"));

    app.push_overlay(RecordingLayer::new("X", &log));
    app.push_layer(RecordingLayer::new("A", &log));
    app.push_layer(RecordingLayer::new("B", &log));
    log.clear();

    // The only frame closes the window, so no further frame runs.
    app.run();

    let per_frame: Vec<(String, Call)> = log
        .entries()
        .into_iter()
        .filter(|(_, call)| !matches!(call, Call::Event { .. }))
        .collect();

    let expected: Vec<(String, Call)> = ["A", "B", "X"]
        .iter()
        .flat_map(|name| {
            [Call::PreUpdate, Call::Update(0.0), Call::PostUpdate]
                .into_iter()
                .map(move |call| (name.to_string(), call))
        })
        .collect();

    assert_eq!(per_frame, expected);
}

#[test]
fn test_delta_is_difference_of_frame_samples() {
    let _serial = serial();
    let log = CallLog::new();
    let platform = MockPlatform::new("delta")
        .with_times([1.0, 1.25, 2.0, 2.0])
        .with_idle_frames(3);

    let mut app = Application::with_platform(platform);
    app.push_layer(RecordingLayer::new("A", &log));
    app.run();

    assert_eq!(log.deltas_for("A"), vec![0.0, 0.25, 0.75, 0.0]);
    assert!(log.deltas_for("A").iter().all(|delta| *delta >= 0.0));
}

#[test]
fn test_scripted_events_update_input_before_delivery() {
    let _serial = serial();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = CallLog::new();

    let platform = MockPlatform::new("input").with_frame(vec![
        press(MouseButton::RIGHT),
        WindowResizeEvent::new(800, 600).into(),
    ]);

    let mut app = Application::with_platform(platform);
    let sink = seen.clone();
    app.push_layer(RecordingLayer::new("A", &log).with_hook(move |event| {
        if event.is::<MouseButtonPressEvent>() {
            sink.lock().push(Input::is_mouse_button_pressed(MouseButton::RIGHT));
        }
    }));
    app.run();

    assert_eq!(*seen.lock(), vec![true]);
    assert_eq!(Input::window_size(), UVec2::new(800, 600));
    assert!(!Input::is_key_pressed(KeyCode::A));
}

// ============================================================================
// Singleton and teardown
// ============================================================================

struct DetachProbe {
    app_alive_on_detach: Arc<Mutex<Option<bool>>>,
}

impl Layer for DetachProbe {
    fn on_detach(&mut self) {
        *self.app_alive_on_detach.lock() = Some(Application::try_get().is_some());
    }
}

#[test]
fn test_teardown_detaches_layers_while_instance_is_live() {
    let _serial = serial();
    let log = CallLog::new();
    let alive = Arc::new(Mutex::new(None));

    {
        let mut app = Application::with_platform(MockPlatform::new("teardown"));
        app.push_overlay(RecordingLayer::new("X", &log));
        app.push_layer(RecordingLayer::new("A", &log));
        app.push_layer(DetachProbe {
            app_alive_on_detach: alive.clone(),
        });
        app.push_layer(RecordingLayer::new("B", &log));

        assert_eq!(Application::get().title(), "teardown");
        log.clear();
    }

    assert_eq!(log.layers_with(&Call::Detach), vec!["A", "B", "X"]);
    assert_eq!(*alive.lock(), Some(true));
    assert!(Application::try_get().is_none());
}

#[test]
fn test_instance_slot_is_released_on_drop() {
    let _serial = serial();

    let app = Application::with_platform(MockPlatform::new("first"));
    assert_eq!(Application::get().title(), "first");
    drop(app);
    assert!(Application::try_get().is_none());

    let _app = Application::with_platform(MockPlatform::new("second"));
    assert_eq!(Application::get().title(), "second");
}

#[test]
#[should_panic(expected = "Application already exists!")]
fn test_second_instance_is_fatal() {
    let _serial = serial();
    let _first = Application::with_platform(MockPlatform::new("first"));
    let _second = Application::with_platform(MockPlatform::new("second"));
}

#[test]
#[should_panic(expected = "no application exists")]
fn test_get_without_application_is_fatal() {
    let _serial = serial();
    Application::get();
}
