//! Cooking state machine
//!
//! Synchronous and clock-free: every handler mutates the state, updates the
//! display and queues [`Effect`]s. Whoever owns the machine runs the effects
//! (arming the countdown, scheduling delayed settles) and feeds ticks and
//! settles back in.
//!
//! ```text
//!  Idle ──[selection knob]──▶ ModeSelected ──[adjustment knob]──▶ PowerSet
//!   ▲                              ▲                                │
//!   │                            [back]                         [confirm]
//!   │                              │                                ▼
//!   │                           PowerSet ◀────────[back]──────  TimerPending
//!   │                                                               │
//!   │                                               [confirm / start, timer > 0]
//!   │                                                               ▼
//!   └──[long delay]── Finished ◀──[countdown hits 0]──────────── Cooking
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::dial::{power_from_angle, timer_from_angle};
use super::display::{self, Notice, StartButtonLabel, DIAL_TIMER_TEXT, DONE_TEXT, STOPPED_TEXT};
use super::error::{NoticeLength, OvenResult, Rejection};
use super::mode::OvenMode;
use super::state::{OvenState, Phase};

/// Action buttons on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Confirms power, then on the second press starts cooking
    Confirm,
    /// Starts cooking, or stops it while cooking
    StartStop,
    /// Dedicated stop button
    Stop,
    /// Steps back one setting
    Back,
}

/// Deferred work applied when a notice expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Settle {
    /// Clear power, timer and confirmation after a stop
    ClearSettings,
    /// Return to Idle after the countdown finished
    FullReset,
}

/// Side effects requested by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start the one-second countdown ticker
    ArmCountdown,
    /// Stop the countdown ticker; must be safe to repeat
    DisarmCountdown,
    /// Call [`OvenMachine::settle`] with `generation` after `after`
    ScheduleSettle { generation: u64, after: Duration },
}

/// How long each notice length lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeDelays {
    pub short: Duration,
    pub medium: Duration,
    pub long: Duration,
}

impl NoticeDelays {
    pub fn of(&self, length: NoticeLength) -> Duration {
        match length {
            NoticeLength::Short => self.short,
            NoticeLength::Medium => self.medium,
            NoticeLength::Long => self.long,
        }
    }
}

impl Default for NoticeDelays {
    fn default() -> Self {
        Self {
            short: Duration::from_millis(1000),
            medium: Duration::from_millis(2000),
            long: Duration::from_millis(3000),
        }
    }
}

/// The oven's state machine
#[derive(Debug)]
pub struct OvenMachine {
    state: OvenState,
    notice: Option<Notice>,
    /// Settle waiting for the current notice to expire
    pending: Option<Settle>,
    /// Bumped by every state-affecting event
    generation: u64,
    delays: NoticeDelays,
    effects: Vec<Effect>,
}

impl OvenMachine {
    pub fn new(delays: NoticeDelays) -> Self {
        Self {
            state: OvenState::default(),
            notice: None,
            pending: None,
            generation: 0,
            delays,
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> &OvenState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending(&self) -> Option<Settle> {
        self.pending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        Phase::derive(&self.state, self.pending == Some(Settle::FullReset))
    }

    /// Text currently on the display
    pub fn display_text(&self) -> String {
        match &self.notice {
            Some(notice) => notice.text.clone(),
            None => display::render(&self.state),
        }
    }

    pub fn start_button_label(&self) -> StartButtonLabel {
        StartButtonLabel::for_state(&self.state)
    }

    /// Take the effects queued since the last call
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Selection knob turned to a new cumulative angle
    pub fn rotate_selection(&mut self, angle: f64) -> OvenResult<()> {
        let mode = OvenMode::from_angle(angle);
        if mode == self.state.mode {
            return Ok(());
        }
        if self.state.is_cooking {
            return self.reject(Rejection::MustStopFirst);
        }

        self.touch();
        self.state.mode = mode;
        self.state.clear_settings();

        tracing::debug!(mode = %mode, phase = %self.phase(), "Mode changed");
        Ok(())
    }

    /// Adjustment knob turned to a new cumulative angle
    ///
    /// Dials power until the first confirm, the timer afterwards.
    pub fn rotate_adjustment(&mut self, angle: f64) -> OvenResult<()> {
        if !self.state.mode.is_selected() {
            return self.reject(Rejection::ModeNotSelected);
        }
        if self.state.is_cooking {
            return self.reject(Rejection::MustStopFirst);
        }

        if self.state.is_timer_confirmed {
            let minutes = timer_from_angle(angle);
            if minutes != self.state.timer_minutes {
                self.touch();
                self.state.timer_minutes = minutes;
                tracing::debug!(timer_minutes = minutes, "Timer dialed");
            }
        } else {
            let power = power_from_angle(angle);
            if power != self.state.power_level {
                self.touch();
                self.state.power_level = power;
                tracing::debug!(power = power, "Power dialed");
            }
        }
        Ok(())
    }

    pub fn press(&mut self, button: Button) -> OvenResult<()> {
        match button {
            Button::Confirm => self.confirm(),
            Button::StartStop => self.start_stop(),
            Button::Stop => self.stop(),
            Button::Back => self.back(),
        }
    }

    /// First press locks in power; second press starts cooking
    pub fn confirm(&mut self) -> OvenResult<()> {
        if !self.state.mode.is_selected() {
            return self.reject(Rejection::ModeNotSelected);
        }
        if self.state.power_level == 0 {
            return self.reject(Rejection::PowerNotSet);
        }

        if !self.state.is_timer_confirmed {
            self.touch();
            self.state.is_timer_confirmed = true;
            self.state.timer_minutes = 0;
            self.show(DIAL_TIMER_TEXT, NoticeLength::Medium);
            tracing::debug!(power = self.state.power_level, "Power confirmed, awaiting timer");
            return Ok(());
        }

        if self.state.timer_minutes == 0 {
            return self.reject(Rejection::TimerNotSet);
        }
        if self.state.is_cooking {
            return self.reject(Rejection::AlreadyCooking);
        }

        self.touch();
        self.begin_cooking();
        Ok(())
    }

    pub fn start_stop(&mut self) -> OvenResult<()> {
        if self.state.is_cooking {
            self.stop_cooking();
            return Ok(());
        }

        if !self.state.mode.is_selected() {
            return self.reject(Rejection::ModeNotSelected);
        }
        if self.state.power_level == 0 {
            return self.reject(Rejection::PowerNotSet);
        }
        if self.state.timer_minutes == 0 {
            return self.reject(Rejection::TimerNotSet);
        }

        self.touch();
        self.begin_cooking();
        Ok(())
    }

    pub fn stop(&mut self) -> OvenResult<()> {
        if !self.state.is_cooking {
            return self.reject(Rejection::NotCooking);
        }
        self.stop_cooking();
        Ok(())
    }

    pub fn back(&mut self) -> OvenResult<()> {
        if self.state.is_cooking {
            return self.reject(Rejection::MustStopFirst);
        }

        self.touch();
        if self.state.is_timer_confirmed {
            self.state.timer_minutes = 0;
            self.state.is_timer_confirmed = false;
        } else if self.state.power_level > 0 {
            self.state.power_level = 0;
        } else {
            self.state.reset();
        }

        tracing::debug!(phase = %self.phase(), "Stepped back");
        Ok(())
    }

    /// One countdown second elapsed
    pub fn tick(&mut self) {
        if !self.state.is_cooking {
            // queued before the countdown was disarmed
            tracing::trace!("Ignoring tick while not cooking");
            return;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            return;
        }

        self.touch();
        self.state.is_cooking = false;
        self.effects.push(Effect::DisarmCountdown);
        self.show(DONE_TEXT, NoticeLength::Long);
        self.pending = Some(Settle::FullReset);

        tracing::info!(mode = %self.state.mode, "Cooking finished");
    }

    /// A scheduled settle came due
    ///
    /// Returns false when a newer event already superseded it.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "Stale settle dropped");
            return false;
        }

        self.notice = None;
        if let Some(settle) = self.pending.take() {
            self.apply(settle);
        }
        true
    }

    fn begin_cooking(&mut self) {
        self.state.is_cooking = true;
        self.state.remaining_seconds = u32::from(self.state.timer_minutes) * 60;
        self.effects.push(Effect::ArmCountdown);

        tracing::info!(
            mode = %self.state.mode,
            power = self.state.power_level,
            timer_minutes = self.state.timer_minutes,
            "Cooking started"
        );
    }

    fn stop_cooking(&mut self) {
        self.touch();
        self.state.is_cooking = false;
        self.state.remaining_seconds = 0;
        self.effects.push(Effect::DisarmCountdown);
        self.show(STOPPED_TEXT, NoticeLength::Medium);
        self.pending = Some(Settle::ClearSettings);

        tracing::info!(mode = %self.state.mode, "Cooking stopped");
    }

    fn apply(&mut self, settle: Settle) {
        match settle {
            Settle::ClearSettings => self.state.clear_settings(),
            Settle::FullReset => self.state.reset(),
        }
        tracing::debug!(settle = ?settle, phase = %self.phase(), "Settled");
    }

    /// Start a new event generation for an accepted transition
    ///
    /// Drops the notice and any pending settle: the transition acts on the
    /// live state, so a clear or reset scheduled earlier no longer applies.
    fn touch(&mut self) {
        self.generation += 1;
        self.notice = None;
        if let Some(settle) = self.pending.take() {
            tracing::debug!(settle = ?settle, "Pending settle superseded");
        }
    }

    fn show(&mut self, text: &str, length: NoticeLength) {
        let after = self.delays.of(length);
        self.notice = Some(Notice {
            text: text.to_string(),
            length,
            generation: self.generation,
        });
        self.effects.push(Effect::ScheduleSettle {
            generation: self.generation,
            after,
        });
    }

    fn reject(&mut self, rejection: Rejection) -> OvenResult<()> {
        let prompt = rejection.prompt();
        let already_showing = self.notice.as_ref().is_some_and(|n| n.text == prompt);

        // State and any pending settle stay as they are; only the notice is
        // replaced, and its revert carries the pending settle along
        if !already_showing {
            self.generation += 1;
            self.show(&prompt, rejection.notice_length());
        }

        tracing::warn!(rejection = ?rejection, phase = %self.phase(), "Action rejected");
        Err(rejection)
    }
}

impl Default for OvenMachine {
    fn default() -> Self {
        Self::new(NoticeDelays::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mid-sector angles
    const GRILL: f64 = 150.0;
    const MW: f64 = 60.0;
    const POWER_4: f64 = 120.0;
    const TIMER_25: f64 = 32.0;

    fn ready_machine() -> OvenMachine {
        let mut m = OvenMachine::default();
        m.rotate_selection(GRILL).unwrap();
        m.rotate_adjustment(POWER_4).unwrap();
        m.confirm().unwrap();
        m.rotate_adjustment(TIMER_25).unwrap();
        m.drain_effects();
        m
    }

    fn last_settle(effects: &[Effect]) -> (u64, Duration) {
        effects
            .iter()
            .rev()
            .find_map(|e| match e {
                Effect::ScheduleSettle { generation, after } => Some((*generation, *after)),
                _ => None,
            })
            .expect("settle scheduled")
    }

    #[test]
    fn test_initial_display() {
        let m = OvenMachine::default();
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.display_text(), "Select mode");
        assert_eq!(m.start_button_label(), StartButtonLabel::Start);
    }

    #[test]
    fn test_same_sector_is_noop() {
        let mut m = OvenMachine::default();
        m.rotate_selection(GRILL).unwrap();
        let generation = m.generation();

        m.rotate_selection(GRILL + 10.0).unwrap();
        assert_eq!(m.generation(), generation);
        assert_eq!(m.state().mode, OvenMode::Grill);
    }

    #[test]
    fn test_mode_change_resets_settings() {
        let mut m = ready_machine();
        assert!(m.state().is_timer_confirmed);

        m.rotate_selection(MW).unwrap();
        assert_eq!(m.state().mode, OvenMode::Microwave);
        assert_eq!(m.state().power_level, 0);
        assert_eq!(m.state().timer_minutes, 0);
        assert!(!m.state().is_timer_confirmed);
        assert_eq!(m.phase(), Phase::ModeSelected);
    }

    #[test]
    fn test_selecting_off_returns_to_idle() {
        let mut m = ready_machine();
        m.rotate_selection(10.0).unwrap();
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.display_text(), "Select mode");
    }

    #[test]
    fn test_first_confirm_schedules_prompt() {
        let mut m = OvenMachine::default();
        m.rotate_selection(GRILL).unwrap();
        m.rotate_adjustment(POWER_4).unwrap();
        m.drain_effects();

        m.confirm().unwrap();
        assert_eq!(m.display_text(), "Set timer with adjustment knob");
        let (generation, after) = last_settle(&m.drain_effects());
        assert_eq!(after, Duration::from_secs(2));

        assert!(m.settle(generation));
        assert_eq!(m.display_text(), "Grill | Power: 4");
    }

    #[test]
    fn test_rejection_notice_reverts() {
        let mut m = OvenMachine::default();
        assert_eq!(m.confirm(), Err(Rejection::ModeNotSelected));
        assert_eq!(m.display_text(), "Please select mode first!");

        let (generation, _) = last_settle(&m.drain_effects());
        assert!(m.settle(generation));
        assert_eq!(m.display_text(), "Select mode");
    }

    #[test]
    fn test_repeated_rejection_not_rescheduled() {
        let mut m = OvenMachine::default();
        let _ = m.rotate_adjustment(10.0);
        let _ = m.rotate_adjustment(20.0);
        let _ = m.rotate_adjustment(30.0);

        let scheduled = m
            .drain_effects()
            .into_iter()
            .filter(|e| matches!(e, Effect::ScheduleSettle { .. }))
            .count();
        assert_eq!(scheduled, 1);
    }

    #[test]
    fn test_stale_settle_is_dropped() {
        let mut m = OvenMachine::default();
        let _ = m.confirm();
        let (stale, _) = last_settle(&m.drain_effects());

        m.rotate_selection(GRILL).unwrap();
        let _ = m.confirm();
        assert_eq!(m.display_text(), "Please set power first!");

        assert!(!m.settle(stale));
        assert_eq!(m.display_text(), "Please set power first!");
    }

    #[test]
    fn test_start_arms_and_stop_disarms() {
        let mut m = ready_machine();
        m.start_stop().unwrap();
        assert_eq!(m.drain_effects(), vec![Effect::ArmCountdown]);
        assert_eq!(m.start_button_label(), StartButtonLabel::Stop);
        assert_eq!(m.state().remaining_seconds, 1500);

        m.start_stop().unwrap();
        let effects = m.drain_effects();
        assert_eq!(effects[0], Effect::DisarmCountdown);
        assert_eq!(m.display_text(), "Cooking stopped");
        assert_eq!(m.pending(), Some(Settle::ClearSettings));

        let (generation, _) = last_settle(&effects);
        assert!(m.settle(generation));
        assert_eq!(m.state().mode, OvenMode::Grill);
        assert_eq!(m.state().power_level, 0);
        assert_eq!(m.phase(), Phase::ModeSelected);
    }

    #[test]
    fn test_rejection_while_clear_pending_keeps_state() {
        let mut m = ready_machine();
        m.start_stop().unwrap();
        m.stop().unwrap();
        m.drain_effects();
        let before = m.state().clone();

        assert_eq!(m.stop(), Err(Rejection::NotCooking));
        assert_eq!(m.state(), &before);
        assert_eq!(m.pending(), Some(Settle::ClearSettings));
        assert_eq!(m.display_text(), "Not cooking");

        // The rejection's revert carries the pending clear
        let (generation, after) = last_settle(&m.drain_effects());
        assert_eq!(after, Duration::from_secs(1));
        assert!(m.settle(generation));
        assert_eq!(m.phase(), Phase::ModeSelected);
        assert_eq!(m.state().mode, OvenMode::Grill);
    }

    #[test]
    fn test_back_while_clear_pending_acts_on_live_state() {
        let mut m = ready_machine();
        m.start_stop().unwrap();
        m.stop().unwrap();
        let (stale, _) = last_settle(&m.drain_effects());
        assert_eq!(m.phase(), Phase::TimerPending);

        m.back().unwrap();
        assert_eq!(m.phase(), Phase::PowerSet);
        assert_eq!(m.state().mode, OvenMode::Grill);
        assert_eq!(m.state().power_level, 4);
        assert_eq!(m.pending(), None);

        assert!(!m.settle(stale));
        assert_eq!(m.phase(), Phase::PowerSet);
        assert_eq!(m.display_text(), "Grill | Power: 4");
    }

    #[test]
    fn test_restart_while_clear_pending_keeps_settings() {
        let mut m = ready_machine();
        m.start_stop().unwrap();
        m.stop().unwrap();
        let (stale, _) = last_settle(&m.drain_effects());

        m.start_stop().unwrap();
        assert_eq!(m.phase(), Phase::Cooking);
        assert_eq!(m.state().remaining_seconds, 1500);

        assert!(!m.settle(stale));
        assert!(m.state().is_cooking);
        assert_eq!(m.state().power_level, 4);
    }

    #[test]
    fn test_ticks_count_down_and_finish() {
        let mut m = OvenMachine::default();
        m.rotate_selection(GRILL).unwrap();
        m.rotate_adjustment(POWER_4).unwrap();
        m.confirm().unwrap();
        m.rotate_adjustment(8.0).unwrap(); // 5 minutes
        m.confirm().unwrap();
        m.drain_effects();

        m.tick();
        assert_eq!(m.display_text(), "COOKING: Grill | Power: 4 | 4:59");

        for _ in 0..298 {
            m.tick();
        }
        assert!(m.state().is_cooking);
        assert_eq!(m.display_text(), "COOKING: Grill | Power: 4 | 0:01");

        m.tick();
        assert!(!m.state().is_cooking);
        assert_eq!(m.phase(), Phase::Finished);
        assert_eq!(m.display_text(), "DONE! Enjoy your meal!");

        let effects = m.drain_effects();
        assert_eq!(effects[0], Effect::DisarmCountdown);
        let (generation, after) = last_settle(&effects);
        assert_eq!(after, Duration::from_secs(3));

        assert!(m.settle(generation));
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(*m.state(), OvenState::default());
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let mut m = OvenMachine::default();
        m.tick();
        assert_eq!(m.generation(), 0);
        assert!(m.drain_effects().is_empty());
    }

    #[test]
    fn test_knobs_locked_while_cooking() {
        let mut m = ready_machine();
        m.start_stop().unwrap();

        assert_eq!(m.rotate_selection(MW), Err(Rejection::MustStopFirst));
        assert_eq!(m.rotate_adjustment(200.0), Err(Rejection::MustStopFirst));
        assert_eq!(m.state().mode, OvenMode::Grill);
        assert_eq!(m.state().timer_minutes, 25);
        assert!(m.state().holds_invariants());
    }

    #[test]
    fn test_press_dispatch() {
        let mut m = OvenMachine::default();
        assert_eq!(m.press(Button::Stop), Err(Rejection::NotCooking));
        assert_eq!(m.press(Button::StartStop), Err(Rejection::ModeNotSelected));
        assert_eq!(m.press(Button::Back), Ok(()));
    }
}
