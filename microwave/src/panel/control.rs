use serde::{Deserialize, Serialize};

use crate::knob::{Bounds, KnobDispatcher, KnobId, Point, RotationChanged};
use crate::oven::{
    Button, Effect, NoticeDelays, OvenMachine, OvenMode, OvenResult, Phase, Rejection,
    StartButtonLabel,
};

/// Events the host UI delivers to the panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelInput {
    DragStart {
        knob: KnobId,
        pointer: Point,
        bounds: Bounds,
    },
    DragMove {
        pointer: Point,
    },
    DragEnd,
    Press {
        button: Button,
    },
}

/// Everything the host needs to render the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub phase: Phase,
    pub display_text: String,
    pub start_button_label: StartButtonLabel,
    pub mode: OvenMode,
    pub power_level: u8,
    pub timer_minutes: u16,
    pub is_timer_confirmed: bool,
    pub is_cooking: bool,
    pub remaining_seconds: u32,
    /// Cumulative selection-knob rotation, for drawing the knob
    pub selection_angle: f64,
    /// Cumulative adjustment-knob rotation
    pub adjustment_angle: f64,
}

impl From<&ControlPanel> for PanelView {
    fn from(panel: &ControlPanel) -> Self {
        let machine = panel.machine();
        let state = machine.state();
        Self {
            phase: machine.phase(),
            display_text: machine.display_text(),
            start_button_label: machine.start_button_label(),
            mode: state.mode,
            power_level: state.power_level,
            timer_minutes: state.timer_minutes,
            is_timer_confirmed: state.is_timer_confirmed,
            is_cooking: state.is_cooking,
            remaining_seconds: state.remaining_seconds,
            selection_angle: panel.knobs().knob(KnobId::Selection).rotation(),
            adjustment_angle: panel.knobs().knob(KnobId::Adjustment).rotation(),
        }
    }
}

impl Default for PanelView {
    fn default() -> Self {
        Self::from(&ControlPanel::default())
    }
}

/// Result of one input: the resulting view and the rejection, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reaction {
    pub view: PanelView,
    pub rejection: Option<Rejection>,
}

/// Both knobs wired to the oven state machine
///
/// Knob rotations are interpreted by the machine as soon as they happen.
/// Purely synchronous; timers are the caller's job (see [`Effect`]).
#[derive(Debug, Default)]
pub struct ControlPanel {
    knobs: KnobDispatcher,
    machine: OvenMachine,
}

impl ControlPanel {
    pub fn new(delays: NoticeDelays) -> Self {
        Self {
            knobs: KnobDispatcher::new(),
            machine: OvenMachine::new(delays),
        }
    }

    pub fn knobs(&self) -> &KnobDispatcher {
        &self.knobs
    }

    pub fn machine(&self) -> &OvenMachine {
        &self.machine
    }

    pub fn view(&self) -> PanelView {
        PanelView::from(self)
    }

    pub fn apply(&mut self, input: PanelInput) -> OvenResult<()> {
        let result = match input {
            PanelInput::DragStart {
                knob,
                pointer,
                bounds,
            } => {
                self.drag_start(knob, pointer, bounds);
                Ok(())
            }
            PanelInput::DragMove { pointer } => self.drag_move(pointer).map(|_| ()),
            PanelInput::DragEnd => {
                self.drag_end();
                Ok(())
            }
            PanelInput::Press { button } => self.press(button),
        };

        debug_assert!(
            self.machine.state().holds_invariants(),
            "oven state out of range: {:?}",
            self.machine.state()
        );
        result
    }

    pub fn drag_start(&mut self, knob: KnobId, pointer: Point, bounds: Bounds) {
        self.knobs.drag_start(knob, pointer, bounds);
    }

    /// Route a drag sample; the rotated knob's new angle goes to the machine
    pub fn drag_move(&mut self, pointer: Point) -> OvenResult<Option<RotationChanged>> {
        let Some(changed) = self.knobs.drag_move(pointer) else {
            return Ok(None);
        };

        match changed.knob {
            KnobId::Selection => self.machine.rotate_selection(changed.rotation)?,
            KnobId::Adjustment => self.machine.rotate_adjustment(changed.rotation)?,
        }
        Ok(Some(changed))
    }

    pub fn drag_end(&mut self) -> Option<KnobId> {
        self.knobs.drag_end()
    }

    pub fn press(&mut self, button: Button) -> OvenResult<()> {
        tracing::debug!(button = ?button, "Button pressed");
        self.machine.press(button)
    }

    pub fn tick(&mut self) {
        self.machine.tick();
    }

    pub fn settle(&mut self, generation: u64) -> bool {
        self.machine.settle(generation)
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.machine.drain_effects()
    }
}
