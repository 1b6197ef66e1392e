pub mod collision;
pub mod config;
pub mod kinematics;
pub mod pool;
pub mod scoring;

use serde::{Deserialize, Serialize};

use bonspiel_core::command::{SweepCommand, ThrowCommand};
use bonspiel_core::events::{MatchEvent, MatchPhase};
use bonspiel_core::input::{InputCollaborator, ThrowContext};
use bonspiel_core::stone::StoneState;
use bonspiel_core::team::{PerTeam, Team};

use config::{ConfigError, SimConfig};
use pool::StonePool;

/// Alternating throws per end, eight per team.
pub const THROWS_PER_END: u8 = 16;

/// Match bookkeeping owned by the engine and mutated only through its
/// transition methods. Hosts read it as a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// 1-based end number.
    pub end: u8,
    /// 0-based throw number within the current end.
    pub throw_index: u8,
    /// Team throwing last in the current end.
    pub hammer: Team,
    /// Team whose throw or sweep input is currently wanted.
    pub throwing: Team,
    /// Cumulative score.
    pub totals: PerTeam<u8>,
    /// Per-end score history, one entry per completed end.
    pub end_scores: PerTeam<Vec<u8>>,
    pub phase: MatchPhase,
    /// Seconds spent in the current phase; drives the scoring and
    /// transition display delays.
    pub phase_elapsed: f32,
}

/// The match state machine: sequences throws, ends, and game-over,
/// driving the stone pool and the scoring engine.
///
/// Built once per match with the config and one input collaborator per
/// team; everything it needs is injected here. The host owns the clock
/// and calls `tick(dt)` at a fixed rate; observable events come back
/// from `tick` as plain values.
pub struct MatchEngine {
    config: SimConfig,
    pool: StonePool,
    state: MatchState,
    inputs: PerTeam<Box<dyn InputCollaborator>>,
    /// Events produced since the last tick drained them, including those
    /// raised while handling commands.
    pending_events: Vec<MatchEvent>,
}

impl MatchEngine {
    pub fn new(config: SimConfig, inputs: PerTeam<Box<dyn InputCollaborator>>) -> Self {
        let pool = StonePool::new(&config);
        let state = MatchState {
            end: 1,
            throw_index: 0,
            hammer: config.first_hammer,
            throwing: config.first_hammer.opponent(),
            totals: PerTeam::default(),
            end_scores: PerTeam::default(),
            phase: MatchPhase::Setup,
            phase_elapsed: 0.0,
        };
        Self {
            config,
            pool,
            state,
            inputs,
            pending_events: Vec::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Snapshots of every in-play stone.
    pub fn stone_states(&self) -> Vec<StoneState> {
        self.pool.stone_states()
    }

    /// Validate the config, reset the sheet, and request the first
    /// throw. The non-hammer team always throws first.
    pub fn start_match(&mut self) -> Result<(), ConfigError> {
        self.config.validate()?;

        self.pool.reset_sheet(&self.config);
        self.state = MatchState {
            end: 1,
            throw_index: 0,
            hammer: self.config.first_hammer,
            throwing: self.config.first_hammer.opponent(),
            totals: PerTeam::default(),
            end_scores: PerTeam::default(),
            phase: MatchPhase::Setup,
            phase_elapsed: 0.0,
        };
        self.request_throw();
        Ok(())
    }

    /// A collaborator committed a throw. Accepted only while aiming, and
    /// only from the active team for the current throw; anything else is
    /// a stale callback and is dropped.
    pub fn on_throw_committed(&mut self, command: ThrowCommand) {
        if self.state.phase != MatchPhase::ThrowAim {
            tracing::debug!(phase = ?self.state.phase, "Dropped throw outside aim phase");
            return;
        }
        if command.team != self.state.throwing || command.throw_index != self.state.throw_index {
            tracing::debug!(
                team = ?command.team,
                throw_index = command.throw_index,
                "Dropped stale throw command"
            );
            return;
        }

        self.set_phase(MatchPhase::ThrowRelease);

        // Teams alternate, so each team's next stone is throw/2.
        let stone_index = self.state.throw_index / 2;
        self.pool.launch(&command, stone_index, &self.config);

        self.set_phase(MatchPhase::StoneInMotion);
        let team = self.state.throwing;
        self.inputs[team].begin_sweep_input(team);
    }

    /// A collaborator updated sweep intensity. Dropped unless a stone is
    /// in motion.
    pub fn on_sweep_update(&mut self, command: SweepCommand) {
        if self.state.phase != MatchPhase::StoneInMotion {
            tracing::debug!(phase = ?self.state.phase, "Dropped sweep outside motion phase");
            return;
        }
        self.pool.apply_sweep(&command);
    }

    /// Advance the match by one fixed-timestep tick and return the
    /// events produced since the previous tick.
    pub fn tick(&mut self, dt: f32) -> Vec<MatchEvent> {
        self.state.phase_elapsed += dt;

        match self.state.phase {
            MatchPhase::StoneInMotion => {
                let pool_events = self.pool.tick(dt, &self.config);
                let stopped = pool_events
                    .iter()
                    .any(|e| matches!(e, MatchEvent::AllStonesStopped));
                self.pending_events.extend(pool_events);
                if stopped {
                    self.finish_throw();
                }
            },
            MatchPhase::EndScoring => {
                if self.state.phase_elapsed >= self.config.score_display_secs {
                    self.set_phase(MatchPhase::EndTransition);
                }
            },
            MatchPhase::EndTransition => {
                if self.state.phase_elapsed >= self.config.end_transition_secs {
                    self.advance_end();
                }
            },
            _ => {},
        }

        std::mem::take(&mut self.pending_events)
    }

    /// Motion has ended: close out the throw, then either hand the sheet
    /// to the next thrower or score the end.
    fn finish_throw(&mut self) {
        let thrower = self.state.throwing;
        self.inputs[thrower].end_sweep_input(thrower);

        self.set_phase(MatchPhase::EndThrowEvaluation);
        self.state.throw_index += 1;
        self.state.throwing = thrower.opponent();

        if self.state.throw_index >= THROWS_PER_END {
            self.score_end();
        } else {
            self.request_throw();
        }
    }

    fn score_end(&mut self) {
        self.set_phase(MatchPhase::EndScoring);

        let result = scoring::score_end(self.state.end, &self.pool.stone_states(), &self.config);

        for team in Team::BOTH {
            let points = if result.team == Some(team) {
                result.points
            } else {
                0
            };
            self.state.end_scores[team].push(points);
        }
        if let Some(scorer) = result.team {
            self.state.totals[scorer] += result.points;
            // Losing the end wins the hammer; a blank end keeps it.
            self.state.hammer = scorer.opponent();
        }

        tracing::debug!(
            end = result.end,
            team = ?result.team,
            points = result.points,
            "End scored"
        );
        self.pending_events.push(MatchEvent::EndScored(result));
    }

    /// The post-scoring display delay has elapsed: either the match is
    /// over or the next end begins.
    fn advance_end(&mut self) {
        if self.state.end >= self.config.total_ends {
            self.set_phase(MatchPhase::MatchOver);
            let score = self.state.totals.clone();
            let winner = match score.red.cmp(&score.yellow) {
                std::cmp::Ordering::Greater => Some(Team::Red),
                std::cmp::Ordering::Less => Some(Team::Yellow),
                std::cmp::Ordering::Equal => None,
            };
            self.pending_events.push(MatchEvent::MatchOver { winner, score });
            return;
        }

        self.state.end += 1;
        self.state.throw_index = 0;
        self.pool.reset_sheet(&self.config);
        self.state.throwing = self.state.hammer.opponent();
        self.request_throw();
    }

    fn request_throw(&mut self) {
        self.set_phase(MatchPhase::ThrowAim);
        let team = self.state.throwing;
        let ctx = ThrowContext {
            team,
            end: self.state.end,
            throw_index: self.state.throw_index,
        };
        self.inputs[team].begin_throw_input(ctx);
    }

    fn set_phase(&mut self, phase: MatchPhase) {
        tracing::debug!(from = ?self.state.phase, to = ?phase, "Phase transition");
        self.state.phase = phase;
        self.state.phase_elapsed = 0.0;
        self.pending_events.push(MatchEvent::PhaseChanged { phase });
    }
}
