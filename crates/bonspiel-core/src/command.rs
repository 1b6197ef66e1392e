use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Lateral drift direction imparted by the stone's rotation.
///
/// The mapping from (team, direction) to a signed curl factor is mirrored
/// between the teams; see `curl_sign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurlDirection {
    InTurn,
    OutTurn,
}

/// A committed throw, produced once by an input collaborator and consumed
/// once by the match engine. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrowCommand {
    pub team: Team,
    /// Normalized launch power, 0.0..=1.0. Mapped linearly onto the
    /// configured launch speed range.
    pub power: f32,
    /// Aim offset in degrees from the centerline. Positive aims right.
    pub aim_degrees: f32,
    pub curl: CurlDirection,
    /// 0-based throw number within the end (0..16).
    pub throw_index: u8,
    pub timestamp: String,
}

impl ThrowCommand {
    pub fn new(
        team: Team,
        power: f32,
        aim_degrees: f32,
        curl: CurlDirection,
        throw_index: u8,
    ) -> Self {
        Self {
            team,
            power: power.clamp(0.0, 1.0),
            aim_degrees,
            curl,
            throw_index,
            timestamp: timestamp_now(),
        }
    }
}

/// One tick's worth of sweeping from the active team's collaborator.
/// Produced repeatedly while a stone is in motion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepCommand {
    /// Normalized sweep intensity, 0.0..=1.0.
    pub intensity: f32,
    /// Duration of the tick this sample covers, in seconds.
    pub dt: f32,
    pub timestamp: String,
}

impl SweepCommand {
    pub fn new(intensity: f32, dt: f32) -> Self {
        Self {
            intensity: intensity.clamp(0.0, 1.0),
            dt,
            timestamp: timestamp_now(),
        }
    }
}

/// Signed curl factor for a throw: each team's InTurn/OutTurn map to
/// opposite lateral directions.
pub fn curl_sign(team: Team, curl: CurlDirection) -> f32 {
    match (team, curl) {
        (Team::Red, CurlDirection::InTurn) | (Team::Yellow, CurlDirection::OutTurn) => 1.0,
        (Team::Red, CurlDirection::OutTurn) | (Team::Yellow, CurlDirection::InTurn) => -1.0,
    }
}

/// Returns a simple ISO 8601 timestamp (Unix epoch seconds with Z suffix).
pub fn timestamp_now() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}Z", dur.as_secs())
}
