//! Signal hunting and the escape attempt: the win condition and its odds.

use forestbot::game::{
    escape_chance, resolve, Action, GameData, GameEngine, GameStore, GameTunables, PlayerState,
};
use chrono::Utc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tempfile::TempDir;

#[test]
fn signal_spends_ap_and_sometimes_advances() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(31);
    let mut state = PlayerState::new(Utc::now());

    for _ in 0..5 {
        resolve(&mut state, &Action::CatchSignal, &data, &tun, &mut rng);
    }
    assert_eq!(state.action_points, 0);
    // Progress only moves in whole steps.
    assert_eq!(state.signal_progress % tun.signal_step, 0);

    // Out of AP: further attempts are log-only.
    let progress = state.signal_progress;
    resolve(&mut state, &Action::CatchSignal, &data, &tun, &mut rng);
    assert_eq!(state.signal_progress, progress);
    assert!(state.log.last().unwrap().contains("Too tired"));
}

#[test]
fn signal_progress_accumulates_over_many_days() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(32);
    let mut state = PlayerState::new(Utc::now());

    for _ in 0..20 {
        for _ in 0..5 {
            resolve(&mut state, &Action::CatchSignal, &data, &tun, &mut rng);
        }
        resolve(&mut state, &Action::Sleep, &data, &tun, &mut rng);
    }
    // 100 coin flips; landing none would mean a broken RNG path.
    assert!(state.signal_progress > 0);
}

#[test]
fn escape_chance_is_never_certain() {
    let tun = GameTunables::default();
    let mut state = PlayerState::new(Utc::now());

    state.karma = i32::MIN / 2;
    assert_eq!(escape_chance(&state, &tun), 1);

    state.karma = 0;
    state.signal_progress = 10_000;
    assert_eq!(escape_chance(&state, &tun), 95);
}

#[test]
fn karma_improves_the_odds() {
    let tun = GameTunables::default();
    let mut low = PlayerState::new(Utc::now());
    let mut high = PlayerState::new(Utc::now());
    low.karma = -40;
    high.karma = 40;
    assert!(escape_chance(&high, &tun) > escape_chance(&low, &tun));
}

#[test]
fn failed_escape_keeps_the_game_going() {
    let data = GameData::builtin();
    let tun = GameTunables {
        escape_base_chance: 0, // clamps to the 1% floor
        ..Default::default()
    };
    let mut rng = SmallRng::seed_from_u64(33);
    let mut state = PlayerState::new(Utc::now());

    let mut failures = 0;
    for _ in 0..20 {
        let resolution = resolve(&mut state, &Action::AttemptEscape, &data, &tun, &mut rng);
        if !resolution.ended {
            failures += 1;
        }
    }
    assert!(failures >= 15, "1% odds should fail most attempts");
    assert!(state.log.iter().any(|l| l.contains("No way out")));
}

#[test]
fn winning_escape_removes_the_saved_game() {
    let dir = TempDir::new().expect("tempdir");
    let store = GameStore::open(dir.path()).expect("store");
    let engine =
        GameEngine::new(store, GameData::builtin(), GameTunables::default()).expect("engine");
    let mut rng = SmallRng::seed_from_u64(34);

    let mut state = engine.load_or_new("runner");
    state.signal_progress = 10_000;
    engine.store().save("runner", &state).expect("save");

    let mut won = false;
    for _ in 0..100 {
        let reply = engine.apply_with_rng("runner", &Action::AttemptEscape, &mut rng);
        if reply.game_over {
            won = true;
            assert!(reply.state.log.last().unwrap().contains("made it out"));
            break;
        }
    }
    assert!(won, "95% odds should land within 100 attempts");
    assert!(engine.store().load("runner").expect("load").is_none());

    // Next contact starts over from day one.
    let fresh = engine.load_or_new("runner");
    assert_eq!(fresh.day, 1);
    assert_eq!(fresh.signal_progress, 0);
}
