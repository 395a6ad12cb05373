use std::fmt;

use serde::{Deserialize, Serialize};

use super::controller::KnobController;
use super::geometry::{Bounds, Point};

/// The two knobs on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnobId {
    /// Chooses the cooking mode
    Selection,
    /// Dials power, then the timer once power is confirmed
    Adjustment,
}

impl KnobId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for KnobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emitted after a drag sample turned a knob
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationChanged {
    pub knob: KnobId,
    /// New cumulative rotation in degrees
    pub rotation: f64,
}

/// Routes pointer drags to the knob that is being dragged
///
/// Each knob owns its own drag session; the dispatcher only remembers
/// which one received the last drag start. Single-pointer input is assumed.
#[derive(Debug, Default)]
pub struct KnobDispatcher {
    selection: KnobController,
    adjustment: KnobController,
    active: Option<KnobId>,
}

impl KnobDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn knob(&self, id: KnobId) -> &KnobController {
        match id {
            KnobId::Selection => &self.selection,
            KnobId::Adjustment => &self.adjustment,
        }
    }

    pub fn knob_mut(&mut self, id: KnobId) -> &mut KnobController {
        match id {
            KnobId::Selection => &mut self.selection,
            KnobId::Adjustment => &mut self.adjustment,
        }
    }

    /// Knob currently being dragged
    pub fn active(&self) -> Option<KnobId> {
        self.active
    }

    pub fn drag_start(&mut self, id: KnobId, pointer: Point, bounds: Bounds) {
        if let Some(previous) = self.active.replace(id) {
            if previous != id {
                // Lost drag end from the host; drop the stale session
                self.knob_mut(previous).drag_end();
            }
        }
        self.knob_mut(id).drag_start(pointer, bounds);
        tracing::debug!(knob = %id, "Drag started");
    }

    /// Route a pointer sample to the active knob
    pub fn drag_move(&mut self, pointer: Point) -> Option<RotationChanged> {
        let knob = self.active?;
        let rotation = self.knob_mut(knob).drag_move(pointer)?;
        Some(RotationChanged { knob, rotation })
    }

    /// End the active drag, returning which knob was released
    pub fn drag_end(&mut self) -> Option<KnobId> {
        let knob = self.active.take()?;
        self.knob_mut(knob).drag_end();
        tracing::debug!(knob = %knob, rotation = self.knob(knob).rotation(), "Drag ended");
        Some(knob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEL: Point = Point { x: 100.0, y: 100.0 };
    const ADJ: Point = Point { x: 300.0, y: 100.0 };

    fn on(center: Point, deg: f64) -> Point {
        Point::on_circle(center, 30.0, deg)
    }

    #[test]
    fn test_knob_id_display() {
        assert_eq!(KnobId::Selection.to_string(), "selection");
        assert_eq!(KnobId::Adjustment.name(), "adjustment");
    }

    #[test]
    fn test_moves_without_drag_are_dropped() {
        let mut dispatcher = KnobDispatcher::new();
        assert!(dispatcher.drag_move(on(SEL, 10.0)).is_none());
        assert!(dispatcher.drag_end().is_none());
    }

    #[test]
    fn test_routes_to_active_knob_only() {
        let mut dispatcher = KnobDispatcher::new();
        dispatcher.drag_start(KnobId::Adjustment, on(ADJ, 0.0), Bounds::centered(ADJ, 60.0));

        let changed = dispatcher.drag_move(on(ADJ, 40.0)).unwrap();
        assert_eq!(changed.knob, KnobId::Adjustment);
        assert!((changed.rotation - 40.0).abs() < 1e-6);

        assert_eq!(dispatcher.knob(KnobId::Selection).rotation(), 0.0);
        assert_eq!(dispatcher.drag_end(), Some(KnobId::Adjustment));
        assert_eq!(dispatcher.active(), None);
    }

    #[test]
    fn test_switching_knobs_releases_previous() {
        let mut dispatcher = KnobDispatcher::new();
        dispatcher.drag_start(KnobId::Selection, on(SEL, 0.0), Bounds::centered(SEL, 60.0));
        dispatcher.drag_move(on(SEL, 50.0));

        dispatcher.drag_start(KnobId::Adjustment, on(ADJ, 0.0), Bounds::centered(ADJ, 60.0));
        assert!(!dispatcher.knob(KnobId::Selection).is_dragging());
        assert!(dispatcher.knob(KnobId::Adjustment).is_dragging());

        let changed = dispatcher.drag_move(on(ADJ, 10.0)).unwrap();
        assert_eq!(changed.knob, KnobId::Adjustment);
        assert!((dispatcher.knob(KnobId::Selection).rotation() - 50.0).abs() < 1e-6);
    }
}
