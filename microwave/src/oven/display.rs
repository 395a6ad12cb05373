//! Display text
//!
//! The display shows either a transient notice or text derived from the
//! current [`OvenState`].

use serde::Serialize;

use super::error::NoticeLength;
use super::state::OvenState;

pub const SELECT_MODE_TEXT: &str = "Select mode";
pub const DIAL_TIMER_TEXT: &str = "Set timer with adjustment knob";
pub const STOPPED_TEXT: &str = "Cooking stopped";
pub const DONE_TEXT: &str = "DONE! Enjoy your meal!";

/// Label of the start/stop button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StartButtonLabel {
    Start,
    Stop,
}

impl StartButtonLabel {
    pub fn for_state(state: &OvenState) -> Self {
        if state.is_cooking { Self::Stop } else { Self::Start }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }
}

/// Text temporarily replacing the state-derived display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub length: NoticeLength,
    /// Event generation that raised the notice
    pub generation: u64,
}

/// `m:ss` for a remaining-seconds count
pub fn format_clock(remaining_seconds: u32) -> String {
    let mins = remaining_seconds / 60;
    let secs = remaining_seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// Display text derived from the state alone
pub fn render(state: &OvenState) -> String {
    let mode = state.mode;
    let power = state.power_level;

    if state.is_cooking {
        format!(
            "COOKING: {} | Power: {} | {}",
            mode,
            power,
            format_clock(state.remaining_seconds)
        )
    } else if state.is_timer_confirmed && state.timer_minutes > 0 {
        format!("{} | Power: {} | Timer: {} min", mode, power, state.timer_minutes)
    } else if mode.is_selected() && power > 0 {
        format!("{} | Power: {}", mode, power)
    } else if mode.is_selected() {
        format!("Mode: {}", mode)
    } else {
        SELECT_MODE_TEXT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oven::OvenMode;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(18000), "300:00");
    }

    #[test]
    fn test_render_each_stage() {
        let mut state = OvenState::default();
        assert_eq!(render(&state), "Select mode");

        state.mode = OvenMode::TurboGrill;
        assert_eq!(render(&state), "Mode: Turbo Grill");

        state.power_level = 6;
        assert_eq!(render(&state), "Turbo Grill | Power: 6");

        state.is_timer_confirmed = true;
        assert_eq!(render(&state), "Turbo Grill | Power: 6");

        state.timer_minutes = 15;
        assert_eq!(render(&state), "Turbo Grill | Power: 6 | Timer: 15 min");

        state.is_cooking = true;
        state.remaining_seconds = 899;
        assert_eq!(render(&state), "COOKING: Turbo Grill | Power: 6 | 14:59");
    }

    #[test]
    fn test_start_button_label() {
        let mut state = OvenState::default();
        assert_eq!(StartButtonLabel::for_state(&state).as_str(), "Start");
        state.is_cooking = true;
        assert_eq!(StartButtonLabel::for_state(&state), StartButtonLabel::Stop);
    }
}
