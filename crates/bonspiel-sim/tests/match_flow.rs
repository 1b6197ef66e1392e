//! End-to-end match scenarios driving the public engine API only.

use bonspiel_core::command::{CurlDirection, SweepCommand, ThrowCommand};
use bonspiel_core::events::{MatchEvent, MatchPhase};
use bonspiel_core::stone::StoneState;
use bonspiel_core::team::{PerTeam, Team};
use bonspiel_core::test_helpers::{RecordingCollaborator, RequestLog, last_throw_request};
use bonspiel_sim::config::SimConfig;
use bonspiel_sim::{MatchEngine, THROWS_PER_END};

const DT: f32 = 0.02;

fn started_engine(config: SimConfig) -> (MatchEngine, PerTeam<RequestLog>) {
    let (red, red_log) = RecordingCollaborator::new();
    let (yellow, yellow_log) = RecordingCollaborator::new();
    let mut engine = MatchEngine::new(config, PerTeam::new(Box::new(red), Box::new(yellow)));
    engine.start_match().expect("default config is valid");
    (engine, PerTeam::new(red_log, yellow_log))
}

/// Commit a throw for the currently-requested context and tick until the
/// sheet settles, optionally sweeping at full intensity the whole way.
fn play_throw(
    engine: &mut MatchEngine,
    logs: &PerTeam<RequestLog>,
    power: f32,
    aim_degrees: f32,
    curl: CurlDirection,
    sweep: bool,
) -> Vec<MatchEvent> {
    let team = engine.state().throwing;
    let ctx = last_throw_request(&logs[team]).expect("a throw was requested");
    engine.on_throw_committed(ThrowCommand::new(
        team,
        power,
        aim_degrees,
        curl,
        ctx.throw_index,
    ));
    assert_eq!(engine.phase(), MatchPhase::StoneInMotion);

    let mut events = Vec::new();
    for _ in 0..100_000 {
        if sweep {
            engine.on_sweep_update(SweepCommand::new(1.0, DT));
        }
        events.extend(engine.tick(DT));
        if engine.phase() != MatchPhase::StoneInMotion {
            return events;
        }
    }
    panic!("throw never settled");
}

fn skip_end_break(engine: &mut MatchEngine) -> Vec<MatchEvent> {
    let mut events = engine.tick(engine.config().score_display_secs + 0.1);
    events.extend(engine.tick(engine.config().end_transition_secs + 0.1));
    events
}

#[test]
fn full_power_travel_envelope_and_curl_convention() {
    // Long sheet so even a full-power throw rests on it.
    let config = SimConfig {
        hack_distance: 40.0,
        ..SimConfig::default()
    };
    let hack_y = -config.hack_distance;
    let (mut engine, _logs) = started_engine(config);

    // Yellow's out-turn curls to the thrower's right (+x).
    let team = engine.state().throwing;
    assert_eq!(team, Team::Yellow);
    engine.on_throw_committed(ThrowCommand::new(team, 1.0, 0.0, CurlDirection::OutTurn, 0));

    let launched = engine.stone_states();
    assert_eq!(launched.len(), 1);
    assert!(
        (launched[0].velocity.length() - engine.config().max_launch_speed).abs() < 1e-4,
        "power 1.0 launches at max speed"
    );

    let mut resting: Option<StoneState> = None;
    for _ in 0..100_000 {
        for event in engine.tick(DT) {
            // The stone rests far short of this sheet's hog line and is
            // cleared when motion ends; its snapshot keeps the resting spot.
            if let MatchEvent::StoneOutOfPlay { stone } = event {
                resting = Some(stone);
            }
        }
        if engine.phase() != MatchPhase::StoneInMotion {
            break;
        }
    }

    let resting = resting.expect("hogged stone was cleared with a snapshot");
    let traveled_forward = resting.position.y - hack_y;
    assert!(
        (27.0..30.0).contains(&traveled_forward),
        "full-power travel {traveled_forward} outside the tuned envelope"
    );
    assert!(
        resting.position.x > 0.05,
        "lateral offset {} must follow the thrower's curl convention",
        resting.position.x
    );
}

#[test]
fn sweeping_carries_a_draw_farther() {
    let rest_y = |sweep: bool| {
        let (mut engine, logs) = started_engine(SimConfig::default());
        play_throw(&mut engine, &logs, 0.7, 0.0, CurlDirection::InTurn, sweep);
        let states = engine.stone_states();
        assert_eq!(states.len(), 1, "a 0.7-power draw stays on the sheet");
        states[0].position.y
    };

    let unswept = rest_y(false);
    let swept = rest_y(true);
    assert!(
        swept > unswept + 0.5,
        "sweeping must extend the draw: swept {swept}, unswept {unswept}"
    );
}

#[test]
fn takeout_removes_the_shot_stone() {
    let (mut engine, logs) = started_engine(SimConfig::default());

    // Yellow draws into the house.
    play_throw(&mut engine, &logs, 0.8, 0.0, CurlDirection::InTurn, false);
    let shot = engine.stone_states()[0];
    assert_eq!(shot.id.team, Team::Yellow);

    // Yellow's in-turn curled left, so red answers with an out-turn on
    // the same side, aimed to meet the resting line.
    let events = play_throw(&mut engine, &logs, 1.0, -1.0, CurlDirection::OutTurn, false);

    assert!(
        events
            .iter()
            .any(|e| matches!(e, MatchEvent::StoneCollision { .. })),
        "takeout must strike the shot stone"
    );
    let removed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::StoneOutOfPlay { stone } => Some(stone.id),
            _ => None,
        })
        .collect();
    assert!(
        removed.contains(&shot.id),
        "struck stone should be driven out the back: {removed:?}"
    );

    let stops = events
        .iter()
        .filter(|e| matches!(e, MatchEvent::AllStonesStopped))
        .count();
    assert_eq!(stops, 1, "one stop signal per motion episode");

    // The shooter sticks around; the shot stone is gone.
    let remaining = engine.stone_states();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id.team, Team::Red);
}

#[test]
fn scripted_match_is_deterministic() {
    let script = [
        (0.80, 0.0, CurlDirection::InTurn),
        (0.75, -1.5, CurlDirection::OutTurn),
        (0.85, 0.5, CurlDirection::InTurn),
        (0.70, 2.0, CurlDirection::OutTurn),
        (0.82, -0.5, CurlDirection::InTurn),
        (0.78, 1.0, CurlDirection::InTurn),
    ];

    let run = || {
        let (mut engine, logs) = started_engine(SimConfig::default());
        for &(power, aim, curl) in &script {
            play_throw(&mut engine, &logs, power, aim, curl, false);
        }
        (
            engine
                .stone_states()
                .iter()
                .map(|s| (s.id, s.position, s.spin))
                .collect::<Vec<_>>(),
            engine.state().throw_index,
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn two_end_match_bookkeeping() {
    let config = SimConfig {
        total_ends: 2,
        ..SimConfig::default()
    };
    let (mut engine, logs) = started_engine(config);

    // End 1: everything hogged except the hammer's final draw.
    for index in 0..THROWS_PER_END {
        let power = if index == THROWS_PER_END - 1 { 0.85 } else { 0.0 };
        play_throw(&mut engine, &logs, power, 0.0, CurlDirection::InTurn, false);
    }
    assert_eq!(engine.state().totals, PerTeam::new(1, 0));
    assert_eq!(engine.state().hammer, Team::Yellow, "scorer loses the hammer");
    skip_end_break(&mut engine);

    assert_eq!(engine.state().end, 2);
    assert_eq!(engine.state().throwing, Team::Red, "non-hammer throws first");
    assert!(engine.stone_states().is_empty());

    // End 2: all sixteen hogged — a blank end.
    for _ in 0..THROWS_PER_END {
        play_throw(&mut engine, &logs, 0.0, 0.0, CurlDirection::InTurn, false);
    }
    assert_eq!(engine.state().hammer, Team::Yellow, "blank end keeps the hammer");

    let events = skip_end_break(&mut engine);
    assert_eq!(engine.phase(), MatchPhase::MatchOver);

    let over = events
        .iter()
        .find_map(|e| match e {
            MatchEvent::MatchOver { winner, score } => Some((*winner, score.clone())),
            _ => None,
        })
        .expect("MatchOver event");
    assert_eq!(over.0, Some(Team::Red));
    assert_eq!(over.1, PerTeam::new(1, 0));

    assert_eq!(engine.state().end_scores[Team::Red], vec![1, 0]);
    assert_eq!(engine.state().end_scores[Team::Yellow], vec![0, 0]);
}
