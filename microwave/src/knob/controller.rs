use std::fmt;

use super::geometry::{normalize_degrees, pointer_angle, unwrap_delta, Bounds, Point};

/// Callback invoked with the new cumulative rotation after every drag sample
pub type RotationCallback = Box<dyn FnMut(f64) + Send>;

/// An in-progress drag on one knob
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    /// Knob centre captured at drag start
    center: Point,
    /// Pointer angle of the previous sample
    last_angle: f64,
}

/// Rotary knob driven by pointer drags
///
/// Keeps an unbounded cumulative rotation: dragging two full turns
/// clockwise yields 720°, not 0°.
pub struct KnobController {
    rotation: f64,
    session: Option<DragSession>,
    on_rotate: Option<RotationCallback>,
}

impl KnobController {
    pub fn new() -> Self {
        Self::with_rotation(0.0)
    }

    /// Knob starting at a given cumulative rotation
    pub fn with_rotation(rotation: f64) -> Self {
        Self {
            rotation,
            session: None,
            on_rotate: None,
        }
    }

    /// Register the rotation-changed callback, replacing any previous one
    pub fn on_rotate<F>(&mut self, callback: F)
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_rotate = Some(Box::new(callback));
    }

    /// Cumulative rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation reduced into [0, 360)
    pub fn normalized(&self) -> f64 {
        normalize_degrees(self.rotation)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a drag: remember the pointer angle around the knob centre
    ///
    /// Starting a new drag while one is active simply re-anchors it.
    pub fn drag_start(&mut self, pointer: Point, bounds: Bounds) {
        let center = bounds.center();
        let last_angle = pointer_angle(pointer, center);
        self.session = Some(DragSession { center, last_angle });
        tracing::trace!(angle = last_angle, rotation = self.rotation, "Knob drag started");
    }

    /// Feed one pointer sample
    ///
    /// Returns the new cumulative rotation, or `None` if no drag is active.
    pub fn drag_move(&mut self, pointer: Point) -> Option<f64> {
        let session = self.session.as_mut()?;

        let current = pointer_angle(pointer, session.center);
        let delta = unwrap_delta(current - session.last_angle);
        session.last_angle = current;

        self.rotation += delta;

        if let Some(callback) = self.on_rotate.as_mut() {
            callback(self.rotation);
        }

        Some(self.rotation)
    }

    /// End the drag; the rotation is left where it is
    ///
    /// Returns whether a drag was active.
    pub fn drag_end(&mut self) -> bool {
        let was_dragging = self.session.take().is_some();
        if was_dragging {
            tracing::trace!(rotation = self.rotation, "Knob drag ended");
        }
        was_dragging
    }
}

impl Default for KnobController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KnobController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnobController")
            .field("rotation", &self.rotation)
            .field("session", &self.session)
            .field("has_callback", &self.on_rotate.is_some())
            .finish()
    }
}
