use std::fmt;

use serde::Serialize;

use super::dial::{MAX_POWER, MAX_TIMER_MINUTES, TIMER_STEP_MINUTES};
use super::mode::OvenMode;

/// Settings and countdown of the oven
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvenState {
    pub mode: OvenMode,
    /// 0 while unset, otherwise 1..=10
    pub power_level: u8,
    pub timer_minutes: u16,
    /// Set by the first confirm press; the adjustment knob then dials the timer
    pub is_timer_confirmed: bool,
    pub is_cooking: bool,
    pub remaining_seconds: u32,
}

impl OvenState {
    /// Clear power, timer and confirmation, keeping the mode
    pub fn clear_settings(&mut self) {
        self.power_level = 0;
        self.timer_minutes = 0;
        self.is_timer_confirmed = false;
    }

    /// Back to the power-on state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the structural invariants of the record
    pub fn holds_invariants(&self) -> bool {
        let cooking_ok = !self.is_cooking || (self.is_timer_confirmed && self.timer_minutes > 0);
        let power_ok = self.power_level <= MAX_POWER;
        let timer_ok = self.timer_minutes <= MAX_TIMER_MINUTES
            && self.timer_minutes % TIMER_STEP_MINUTES == 0;
        let timer_gated = self.is_timer_confirmed || self.timer_minutes == 0;
        cooking_ok && power_ok && timer_ok && timer_gated
    }
}

/// Coarse phase of the panel, derived from [`OvenState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// No mode selected
    Idle,
    /// Mode chosen, power not dialed
    ModeSelected,
    /// Power dialed, not yet confirmed
    PowerSet,
    /// Power confirmed, timer being dialed (or stopped mid-cook)
    TimerPending,
    /// Countdown running
    Cooking,
    /// Countdown reached zero; full reset pending
    Finished,
}

impl Phase {
    /// Derive the phase; `finishing` is true while the post-cook reset is pending
    pub fn derive(state: &OvenState, finishing: bool) -> Self {
        if state.is_cooking {
            Self::Cooking
        } else if finishing {
            Self::Finished
        } else if state.is_timer_confirmed {
            Self::TimerPending
        } else if state.power_level > 0 {
            Self::PowerSet
        } else if state.mode.is_selected() {
            Self::ModeSelected
        } else {
            Self::Idle
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ModeSelected => "ModeSelected",
            Self::PowerSet => "PowerSet",
            Self::TimerPending => "TimerPending",
            Self::Cooking => "Cooking",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
