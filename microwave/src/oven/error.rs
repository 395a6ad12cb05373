use serde::Serialize;
use thiserror::Error;

/// How long a transient notice stays on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLength {
    Short,
    Medium,
    Long,
}

/// A user action the oven refused
///
/// The action leaves the state untouched; the display shows the prompt
/// until the notice reverts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    #[error("Please select mode first!")]
    ModeNotSelected,

    #[error("Please set power first!")]
    PowerNotSet,

    #[error("Please set timer first!")]
    TimerNotSet,

    #[error("Already cooking!")]
    AlreadyCooking,

    #[error("Not cooking")]
    NotCooking,

    #[error("Stop cooking first!")]
    MustStopFirst,
}

impl Rejection {
    /// Prompt shown on the display
    pub fn prompt(&self) -> String {
        self.to_string()
    }

    pub fn notice_length(&self) -> NoticeLength {
        match self {
            Self::AlreadyCooking | Self::NotCooking => NoticeLength::Short,
            Self::ModeNotSelected
            | Self::PowerNotSet
            | Self::TimerNotSet
            | Self::MustStopFirst => NoticeLength::Medium,
        }
    }
}

/// Result type for oven actions
pub type OvenResult<T> = Result<T, Rejection>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts() {
        assert_eq!(Rejection::ModeNotSelected.prompt(), "Please select mode first!");
        assert_eq!(Rejection::PowerNotSet.prompt(), "Please set power first!");
        assert_eq!(Rejection::TimerNotSet.prompt(), "Please set timer first!");
        assert_eq!(Rejection::AlreadyCooking.prompt(), "Already cooking!");
        assert_eq!(Rejection::NotCooking.prompt(), "Not cooking");
        assert_eq!(Rejection::MustStopFirst.prompt(), "Stop cooking first!");
    }

    #[test]
    fn test_notice_lengths() {
        assert_eq!(Rejection::NotCooking.notice_length(), NoticeLength::Short);
        assert_eq!(Rejection::AlreadyCooking.notice_length(), NoticeLength::Short);
        assert_eq!(Rejection::TimerNotSet.notice_length(), NoticeLength::Medium);
        assert_eq!(Rejection::MustStopFirst.notice_length(), NoticeLength::Medium);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Rejection::MustStopFirst).unwrap();
        assert_eq!(json, "\"MUST_STOP_FIRST\"");

        let json = serde_json::to_string(&NoticeLength::Long).unwrap();
        assert_eq!(json, "\"long\"");
    }
}
