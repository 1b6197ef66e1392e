use bonspiel_core::events::EndScoreResult;
use bonspiel_core::stone::{StoneState, Vec2};
use bonspiel_core::team::{PerTeam, Team};

use crate::config::SimConfig;

/// Distance from a stone center to the button.
pub fn distance_to_button(position: Vec2) -> f32 {
    position.length()
}

/// Whether a stone counts as "in the house": touching the outer ring
/// counts, so the test radius is house radius plus stone radius.
/// Also used directly by AI collaborators when ranking targets.
pub fn stone_in_house(stone: &StoneState, config: &SimConfig) -> bool {
    distance_to_button(stone.position) <= config.scoring_radius()
}

/// Score a completed end from the final stone positions.
///
/// The team with the stone nearest the button scores one point per stone
/// closer than the opponent's nearest qualifying stone, counted inward-
/// out until the first stone that fails the test. Neither team counting
/// is a blank end; so is a dead-even nearest pair, since neither side
/// can claim shot rock.
pub fn score_end(end: u8, stones: &[StoneState], config: &SimConfig) -> EndScoreResult {
    let mut ranked: PerTeam<Vec<(f32, StoneState)>> = PerTeam::default();

    for stone in stones {
        if !stone.is_in_play {
            continue;
        }
        let dist = distance_to_button(stone.position);
        if dist <= config.scoring_radius() {
            ranked[stone.id.team].push((dist, *stone));
        }
    }
    for team in Team::BOTH {
        ranked[team].sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let nearest = PerTeam::from_fn(|team| {
        ranked[team].first().map_or(f32::INFINITY, |(dist, _)| *dist)
    });

    let scorer = match (ranked.red.is_empty(), ranked.yellow.is_empty()) {
        (true, true) => return EndScoreResult::blank(end, stones.to_vec()),
        (false, true) => Team::Red,
        (true, false) => Team::Yellow,
        (false, false) if nearest.red < nearest.yellow => Team::Red,
        (false, false) if nearest.yellow < nearest.red => Team::Yellow,
        // Dead-even shot stones: nobody holds shot rock.
        (false, false) => return EndScoreResult::blank(end, stones.to_vec()),
    };

    let opponent_nearest = nearest[scorer.opponent()];
    let points = ranked[scorer]
        .iter()
        .take_while(|(dist, _)| *dist < opponent_nearest)
        .count() as u8;

    EndScoreResult {
        end,
        team: Some(scorer),
        points,
        closest: ranked[scorer].first().map(|(_, stone)| *stone),
        stones: stones.to_vec(),
    }
}
