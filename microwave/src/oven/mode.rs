use std::fmt;

use serde::{Deserialize, Serialize};

use crate::knob::normalize_degrees;

/// Cooking modes in selection-knob order
///
/// `Off` sits at index 0 and doubles as "no mode selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OvenMode {
    #[default]
    Off,
    Microwave,
    MicrowaveAir,
    Grill,
    TurboGrill,
    GrillMicrowave,
    GrillMicrowaveAir,
    GrillAir,
}

impl OvenMode {
    /// All modes, in the order they appear around the selection knob
    pub const ALL: [OvenMode; 8] = [
        OvenMode::Off,
        OvenMode::Microwave,
        OvenMode::MicrowaveAir,
        OvenMode::Grill,
        OvenMode::TurboGrill,
        OvenMode::GrillMicrowave,
        OvenMode::GrillMicrowaveAir,
        OvenMode::GrillAir,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Width of one mode's sector on the selection knob
    pub const SECTOR_DEGREES: f64 = 360.0 / Self::COUNT as f64;

    /// Mode whose sector contains the given (unbounded) knob angle
    pub fn from_angle(angle: f64) -> Self {
        let index = (normalize_degrees(angle) / Self::SECTOR_DEGREES).floor() as usize % Self::COUNT;
        Self::ALL[index]
    }

    /// Whether a real cooking mode is selected
    pub fn is_selected(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Label shown on the display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Microwave => "MW",
            Self::MicrowaveAir => "MW + air",
            Self::Grill => "Grill",
            Self::TurboGrill => "Turbo Grill",
            Self::GrillMicrowave => "Grill + MW",
            Self::GrillMicrowaveAir => "Grill + MW + air",
            Self::GrillAir => "Grill + air",
        }
    }
}

impl fmt::Display for OvenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
