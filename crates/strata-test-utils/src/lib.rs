//! Test utilities for Strata.
//!
//! - [`MockPlatform`] drives an application headlessly from a script of clock
//!   readings and event batches.
//! - [`RecordingLayer`] records every hook it receives into a shared
//!   [`CallLog`], optionally consuming chosen event kinds.
//!
//! Shared state uses `parking_lot` locks so probes can be inspected after
//! ownership of the platform or layer moved into an application.

pub mod mock_platform;
pub mod recording_layer;

pub use mock_platform::{Delivery, MockPlatform, PlatformProbe};
pub use recording_layer::{Call, CallLog, Hook, RecordingLayer};
