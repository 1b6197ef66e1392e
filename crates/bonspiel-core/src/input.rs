use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Context handed to an input collaborator when the engine requests a
/// throw: who is throwing, and where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowContext {
    pub team: Team,
    /// 1-based end number.
    pub end: u8,
    /// 0-based throw number within the end (0..16).
    pub throw_index: u8,
}

/// The input boundary: calls the match engine makes on an external
/// provider (human gesture decoder, AI, network peer).
///
/// Providers answer asynchronously by invoking `on_throw_committed` /
/// `on_sweep_update` on the engine at some later tick. The engine never
/// blocks waiting for them.
pub trait InputCollaborator {
    /// A throw is wanted from this collaborator's team.
    fn begin_throw_input(&mut self, ctx: ThrowContext);

    /// The launched stone is in motion; sweep updates are being accepted.
    fn begin_sweep_input(&mut self, team: Team);

    /// Motion has ended; further sweep updates will be dropped.
    fn end_sweep_input(&mut self, team: Team);
}

/// A collaborator that ignores every request. Useful for hosts that feed
/// commands from an outer event loop rather than reacting to requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCollaborator;

impl InputCollaborator for NullCollaborator {
    fn begin_throw_input(&mut self, _ctx: ThrowContext) {}

    fn begin_sweep_input(&mut self, _team: Team) {}

    fn end_sweep_input(&mut self, _team: Team) {}
}
