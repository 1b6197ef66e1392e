use serde::{Deserialize, Serialize};

use crate::stone::{StoneId, StoneState};
use crate::team::{PerTeam, Team};

/// Phase of the match state machine.
///
/// `Setup` and `MatchOver` are the only non-looping phases; `MatchOver`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Setup,
    ThrowAim,
    ThrowRelease,
    StoneInMotion,
    EndThrowEvaluation,
    EndScoring,
    EndTransition,
    MatchOver,
}

/// Outcome of one scored end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndScoreResult {
    /// 1-based end number.
    pub end: u8,
    /// The scoring team, or None for a blank end.
    pub team: Option<Team>,
    /// Points awarded, 0..=8.
    pub points: u8,
    /// The scoring team's stone closest to the button.
    pub closest: Option<StoneState>,
    /// All stones still in play when the end completed.
    pub stones: Vec<StoneState>,
}

impl EndScoreResult {
    pub fn blank(end: u8, stones: Vec<StoneState>) -> Self {
        Self {
            end,
            team: None,
            points: 0,
            closest: None,
            stones,
        }
    }
}

/// Observable events emitted by the core for UI/audio/camera/AI
/// collaborators. Payloads are snapshots; none carry references into the
/// core's internal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    PhaseChanged { phase: MatchPhase },
    StoneCollision { a: StoneId, b: StoneId },
    StoneOutOfPlay { stone: StoneState },
    AllStonesStopped,
    EndScored(EndScoreResult),
    MatchOver { winner: Option<Team>, score: PerTeam<u8> },
}
