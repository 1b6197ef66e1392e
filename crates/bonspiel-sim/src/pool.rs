use bonspiel_core::command::{SweepCommand, ThrowCommand, curl_sign};
use bonspiel_core::events::MatchEvent;
use bonspiel_core::stone::{StoneId, StoneState, Vec2};
use bonspiel_core::team::{PerTeam, Team};

use crate::collision;
use crate::config::SimConfig;
use crate::kinematics::Stone;

/// Stones each team throws per end.
pub const STONES_PER_TEAM: usize = 8;

/// Owner of every stone in the match.
///
/// Both pools are pre-allocated and parked off-sheet; an end's throws
/// reuse the same records, re-parked by `reset_sheet`. All mutation goes
/// through this API; observers get snapshots only.
pub struct StonePool {
    stones: PerTeam<Vec<Stone>>,
    /// Set on launch, cleared when the all-stopped signal fires. Guards
    /// the signal to exactly once per motion episode.
    episode_active: bool,
    /// The stone delivered in the current episode, for the hog-line
    /// check once everything is at rest.
    last_launched: Option<StoneId>,
}

impl StonePool {
    pub fn new(config: &SimConfig) -> Self {
        let stones = PerTeam::from_fn(|team| {
            (0..STONES_PER_TEAM as u8)
                .map(|index| {
                    let id = StoneId::new(team, index);
                    Stone::parked(id, park_position(id, config))
                })
                .collect()
        });
        Self {
            stones,
            episode_active: false,
            last_launched: None,
        }
    }

    /// Deliver the given stone from the hack. An index outside the
    /// 8-stone pool is a caller error and is dropped silently.
    pub fn launch(&mut self, command: &ThrowCommand, stone_index: u8, config: &SimConfig) {
        if stone_index as usize >= STONES_PER_TEAM {
            tracing::debug!(
                team = ?command.team,
                stone_index,
                "Dropped launch for out-of-range stone index"
            );
            return;
        }

        let speed = config.launch_speed(command.power);
        let sign = curl_sign(command.team, command.curl);
        let hack = Vec2::new(0.0, -config.hack_distance);

        let id = StoneId::new(command.team, stone_index);
        self.stone_mut(id).launch(hack, speed, command.aim_degrees, sign);
        self.episode_active = true;
        self.last_launched = Some(id);
    }

    /// Broadcast sweep intensity to every currently-moving stone.
    /// Stationary stones are unaffected.
    pub fn apply_sweep(&mut self, command: &SweepCommand) {
        for id in arena_order() {
            let stone = self.stone_mut(id);
            if stone.is_moving() {
                stone.apply_sweep(command.intensity);
            }
        }
    }

    /// Advance the whole sheet one tick: integrate every moving stone,
    /// then boundary exits, then collisions, then the stop signal — in
    /// that order, so no stone collides using a stale position and a
    /// boundary exit cancels any collision computed for it this tick.
    pub fn tick(&mut self, dt: f32, config: &SimConfig) -> Vec<MatchEvent> {
        let mut events = Vec::new();

        for id in arena_order() {
            self.stone_mut(id).integrate(dt, config);
        }

        self.check_boundaries(config, &mut events);
        self.check_collisions(config, &mut events);

        if self.episode_active && !self.any_moving() {
            self.finish_episode(config, &mut events);
        }

        events
    }

    /// Snapshots of every in-play stone, in pool order.
    pub fn stone_states(&self) -> Vec<StoneState> {
        arena_order()
            .filter_map(|id| {
                let stone = self.stone(id);
                stone.is_in_play().then(|| stone.snapshot())
            })
            .collect()
    }

    pub fn any_moving(&self) -> bool {
        arena_order().any(|id| self.stone(id).is_moving())
    }

    /// Force-stop and re-park every stone; called between ends and at
    /// match start.
    pub fn reset_sheet(&mut self, config: &SimConfig) {
        for id in arena_order() {
            *self.stone_mut(id) = Stone::parked(id, park_position(id, config));
        }
        self.episode_active = false;
        self.last_launched = None;
    }

    fn check_boundaries(&mut self, config: &SimConfig, events: &mut Vec<MatchEvent>) {
        for id in arena_order() {
            let stone = self.stone(id);
            if !stone.is_in_play() {
                continue;
            }
            let pos = stone.position;
            if pos.y > config.back_line_distance || pos.x.abs() > config.sheet_half_width {
                let stone = self.stone_mut(id);
                stone.force_out();
                let snapshot = stone.snapshot();
                events.push(MatchEvent::StoneOutOfPlay { stone: snapshot });
            }
        }
    }

    fn check_collisions(&mut self, config: &SimConfig, events: &mut Vec<MatchEvent>) {
        for mover in arena_order() {
            for other in arena_order() {
                if other == mover {
                    continue;
                }
                // The mover may have been stopped or knocked out by an
                // earlier pair this tick.
                let m = self.stone(mover);
                if !m.is_moving() || !m.is_in_play() {
                    break;
                }
                let o = self.stone(other);
                if !o.is_in_play() {
                    continue;
                }

                let (p1, v1) = (m.position, m.velocity());
                let (p2, v2) = (o.position, o.velocity());
                if !collision::stones_overlap(p1, p2, config.stone_radius) {
                    continue;
                }

                if let Some((v1_after, v2_after)) =
                    collision::resolve(p1, v1, p2, v2, config.restitution)
                {
                    self.stone_mut(mover).set_velocity(v1_after, config);
                    // A struck stationary stone starts moving here and is
                    // picked up by the outer scan and the stop signal.
                    self.stone_mut(other).set_velocity(v2_after, config);
                    events.push(MatchEvent::StoneCollision { a: mover, b: other });
                }

                let (q1, q2) = collision::separate(p1, p2, config.stone_radius);
                self.stone_mut(mover).position = q1;
                self.stone_mut(other).position = q2;
            }
        }
    }

    /// Close out a motion episode: hog-line check on the delivered
    /// stone, then the one-shot all-stopped signal.
    fn finish_episode(&mut self, config: &SimConfig, events: &mut Vec<MatchEvent>) {
        if let Some(id) = self.last_launched.take() {
            let stone = self.stone_mut(id);
            let cleared_hog =
                stone.position.y - config.stone_radius > -config.hog_line_distance;
            if stone.is_in_play() && !cleared_hog {
                stone.force_out();
                let snapshot = stone.snapshot();
                events.push(MatchEvent::StoneOutOfPlay { stone: snapshot });
            }
        }
        self.episode_active = false;
        events.push(MatchEvent::AllStonesStopped);
    }

    fn stone(&self, id: StoneId) -> &Stone {
        &self.stones[id.team][id.index as usize]
    }

    fn stone_mut(&mut self, id: StoneId) -> &mut Stone {
        &mut self.stones[id.team][id.index as usize]
    }
}

/// Pool iteration order: red stones 0..8, then yellow stones 0..8.
fn arena_order() -> impl Iterator<Item = StoneId> {
    Team::BOTH.into_iter().flat_map(|team| {
        (0..STONES_PER_TEAM as u8).map(move |index| StoneId::new(team, index))
    })
}

/// Off-sheet park slot for an unused stone: beside the hack, one row per
/// team, spaced by index.
fn park_position(id: StoneId, config: &SimConfig) -> Vec2 {
    let side = match id.team {
        Team::Red => -1.0,
        Team::Yellow => 1.0,
    };
    Vec2::new(
        side * (config.sheet_half_width + 4.0 * config.stone_radius),
        -config.hack_distance - 1.0 - id.index as f32 * 3.0 * config.stone_radius,
    )
}
