//! Rotary knob input
//!
//! Turns pointer drags into a cumulative rotation angle per knob.
//!
//! # Module layout
//!
//! - `geometry` - pointer positions, knob bounds, angle math
//! - `controller` - one knob's drag session and cumulative rotation
//! - `dispatcher` - routes drag events to whichever knob is being dragged

/// Pointer and bounding-box geometry
pub mod geometry;

/// Single-knob drag tracking
pub mod controller;

/// Two-knob event routing
pub mod dispatcher;

pub use controller::{KnobController, RotationCallback};
pub use dispatcher::{KnobDispatcher, KnobId, RotationChanged};
pub use geometry::{normalize_degrees, pointer_angle, unwrap_delta, Bounds, Point};
