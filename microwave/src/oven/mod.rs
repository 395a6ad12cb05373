//! Oven state machine
//!
//! Owns the cooking mode, power, timer and countdown, and interprets knob
//! angles according to the current state.
//!
//! # Module layout
//!
//! - `mode` - the cooking modes and selection-knob sectors
//! - `dial` - adjustment-knob angle to power / timer minutes
//! - `state` - the state record and derived phase
//! - `display` - display text and notices
//! - `error` - rejected actions
//! - `machine` - transitions, countdown and deferred settles

mod dial;
mod display;
mod error;
mod machine;
mod mode;
mod state;

pub use dial::{
    power_from_angle, timer_from_angle, MAX_POWER, MAX_TIMER_MINUTES, MIN_POWER,
    TIMER_STEP_MINUTES,
};
pub use display::{
    format_clock, render, Notice, StartButtonLabel, DIAL_TIMER_TEXT, DONE_TEXT,
    SELECT_MODE_TEXT, STOPPED_TEXT,
};
pub use error::{NoticeLength, OvenResult, Rejection};
pub use machine::{Button, Effect, NoticeDelays, OvenMachine, Settle};
pub use mode::OvenMode;
pub use state::{OvenState, Phase};
