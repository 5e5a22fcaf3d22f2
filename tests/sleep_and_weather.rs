//! Sleep mechanics are deterministic except for the weather resample.

use forestbot::game::{resolve, Action, GameData, GameTunables, PlayerState, Weather};
use chrono::Utc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashMap;

#[test]
fn three_sleeps_reach_day_four() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(21);
    let mut state = PlayerState::new(Utc::now());

    for expected in [2u32, 3, 4] {
        state.action_points = 1;
        resolve(&mut state, &Action::Sleep, &data, &tun, &mut rng);
        assert_eq!(state.day, expected);
        assert_eq!(state.action_points, 5);
    }
}

#[test]
fn sleep_costs_hunger_and_clamps() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(22);
    let mut state = PlayerState::new(Utc::now());
    state.hunger = 10;

    resolve(&mut state, &Action::Sleep, &data, &tun, &mut rng);
    assert_eq!(state.hunger, 0);
}

#[test]
fn sleep_resets_the_daily_find_counter() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(23);
    let mut state = PlayerState::new(Utc::now());

    resolve(&mut state, &Action::Explore, &data, &tun, &mut rng);
    resolve(&mut state, &Action::Explore, &data, &tun, &mut rng);
    assert!(state.finds_today >= 2 || !state.story.is_none());
    resolve(&mut state, &Action::Sleep, &data, &tun, &mut rng);
    assert_eq!(state.finds_today, 0);
}

#[test]
fn weather_distribution_matches_the_weights() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(24);
    let mut state = PlayerState::new(Utc::now());

    let mut seen: HashMap<&'static str, u32> = HashMap::new();
    for _ in 0..3000 {
        resolve(&mut state, &Action::Sleep, &data, &tun, &mut rng);
        *seen.entry(state.weather.label()).or_insert(0) += 1;
    }

    let clear = seen.get("clear").copied().unwrap_or(0);
    let cloudy = seen.get("cloudy").copied().unwrap_or(0);
    let rain = seen.get("rain").copied().unwrap_or(0);
    assert_eq!(clear + cloudy + rain, 3000);
    // 70/20/10 weighting, with generous slack for a distribution test.
    assert!((1900..=2300).contains(&clear), "clear={}", clear);
    assert!((400..=800).contains(&cloudy), "cloudy={}", cloudy);
    assert!((150..=450).contains(&rain), "rain={}", rain);
}

#[test]
fn optional_restorative_sleep_is_a_tunable() {
    let data = GameData::builtin();
    let tun = GameTunables {
        sleep_hp_restore: 10,
        sleep_thirst_restore: 5,
        ..Default::default()
    };
    let mut rng = SmallRng::seed_from_u64(25);
    let mut state = PlayerState::new(Utc::now());
    state.hp = 50;
    state.thirst = 50;

    resolve(&mut state, &Action::Sleep, &data, &tun, &mut rng);
    assert_eq!(state.hp, 60);
    assert_eq!(state.thirst, 55);
}

#[test]
fn rain_enables_water_collection() {
    let data = GameData::builtin();
    let tun = GameTunables::default();
    let mut rng = SmallRng::seed_from_u64(26);
    let mut state = PlayerState::new(Utc::now());

    state.weather = Weather::Cloudy;
    resolve(&mut state, &Action::CollectWater, &data, &tun, &mut rng);
    assert_eq!(state.inventory.count("water_bottle"), 0);

    state.weather = Weather::Rain;
    resolve(&mut state, &Action::CollectWater, &data, &tun, &mut rng);
    assert_eq!(state.inventory.count("water_bottle"), 3);

    // Already at the cap; a second pass is a log-only no-op.
    resolve(&mut state, &Action::CollectWater, &data, &tun, &mut rng);
    assert_eq!(state.inventory.count("water_bottle"), 3);
}
