//! Vehicle motion state shared by the fleet, the simulation loop, and output.

/// What a vehicle did (or was prevented from doing) during the last tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MotionState {
    /// Advanced toward its target (or snapped onto it) this tick.
    Moving,
    /// Held position: not yet activated, collision risk, or move rejected.
    Waiting,
    /// Active but asked to stay put (zero manual input).
    #[default]
    Idle,
}

impl MotionState {
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, MotionState::Moving)
    }

    /// Upper-case label used in telemetry payloads and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Moving  => "MOVING",
            MotionState::Waiting => "WAITING",
            MotionState::Idle    => "IDLE",
        }
    }
}

impl std::fmt::Display for MotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
