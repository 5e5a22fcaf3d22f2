//! The single entry point mapping `(state, action)` to a new state.
//!
//! Every precondition failure recovers locally: a journal line, no other
//! mutation, nothing surfaced to the transport. Stat deltas always clamp.
//! Randomness comes in through the `Rng` parameter so tests can seed it.

use log::debug;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::game::crafting;
use crate::game::data::{ExploreOutcome, GameData, GameTunables};
use crate::game::story;
use crate::game::types::{PlayerState, Weather};

/// Canonical action set accepted from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Explore,
    Drink,
    Sleep,
    CollectWater,
    CatchSignal,
    AttemptEscape,
    Craft { recipe_id: String },
    UseItem { item_id: String },
    DropItem { item_id: String },
    InspectItem { item_id: String },
    StoryChoice { choice_id: String },
    TextInput { text: String },
}

/// What the caller needs to know beyond the mutated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The game ended this action (successful escape); the caller deletes
    /// the stored record.
    pub ended: bool,
}

impl Resolution {
    fn ongoing() -> Self {
        Self { ended: false }
    }

    fn ended() -> Self {
        Self { ended: true }
    }
}

/// Resolve one action against the player's state.
pub fn resolve<R: Rng + ?Sized>(
    state: &mut PlayerState,
    action: &Action,
    data: &GameData,
    tun: &GameTunables,
    rng: &mut R,
) -> Resolution {
    match action {
        Action::StoryChoice { choice_id } => {
            if story::choose(state, &data.encounters, choice_id) == story::ChoiceOutcome::Stale {
                debug!("stale story choice ignored: {}", choice_id);
            }
            Resolution::ongoing()
        }
        Action::TextInput { text } => {
            if story::submit_text(state, &data.encounters, text) == story::TextOutcome::Stale {
                debug!("free text outside a text-entry node ignored");
            }
            Resolution::ongoing()
        }
        _ if !state.story.is_none() => {
            // A scripted encounter is pending; everything except its own
            // choices is stale input.
            debug!("action {:?} ignored while a story is pending", action);
            Resolution::ongoing()
        }
        Action::Explore => explore(state, data, tun, rng),
        Action::Drink => drink(state, tun),
        Action::Sleep => sleep(state, tun, rng),
        Action::CollectWater => collect_water(state, tun),
        Action::CatchSignal => catch_signal(state, tun, rng),
        Action::AttemptEscape => attempt_escape(state, tun, rng),
        Action::Craft { recipe_id } => {
            crafting::craft(state, &data.recipes, recipe_id);
            Resolution::ongoing()
        }
        Action::UseItem { item_id } => use_item(state, data, item_id),
        Action::DropItem { item_id } => drop_item(state, data, item_id),
        Action::InspectItem { item_id } => inspect_item(state, data, item_id),
    }
}

fn too_tired(state: &mut PlayerState) -> Resolution {
    state.add_log("Too tired. You need to rest.");
    Resolution::ongoing()
}

fn explore<R: Rng + ?Sized>(
    state: &mut PlayerState,
    data: &GameData,
    tun: &GameTunables,
    rng: &mut R,
) -> Resolution {
    if state.action_points == 0 {
        return too_tired(state);
    }
    state.action_points -= 1;
    state.adjust_hunger(-(tun.explore_hunger_cost as i32));
    state.adjust_thirst(-(tun.explore_thirst_cost as i32));
    state.finds_today += 1;

    // Scripted encounters preempt the random table.
    if let Some(encounter) = story::eligible(state, &data.encounters) {
        let encounter = encounter.clone();
        story::begin(state, &encounter);
        return Resolution::ongoing();
    }

    let dist = WeightedIndex::new(data.explore_events.iter().map(|e| e.weight))
        .expect("validated explore table is non-empty with positive weights");
    let event = &data.explore_events[dist.sample(rng)];
    state.add_log(event.text.clone());
    match &event.outcome {
        ExploreOutcome::FindItem { item, qty } => {
            state.inventory.add(item, *qty);
            state.add_log(format!("Found: {}", data.item_name(item)));
            if let Some(def) = data.item(item) {
                if let Some(hint) = &def.hint {
                    if state.hinted_items.insert(item.clone()) {
                        state.add_log(hint.clone());
                    }
                }
            }
        }
        ExploreOutcome::FindWater { qty } => {
            let room = tun.water_bottle_cap.saturating_sub(state.inventory.count("water_bottle"));
            let added = (*qty).min(room);
            if added > 0 {
                state.inventory.add("water_bottle", added);
                state.add_log("You fill a bottle.");
            } else {
                state.add_log("Your bottles are already full.");
            }
        }
        ExploreOutcome::Injury { hp } => {
            state.adjust_hp(-(*hp as i32));
        }
    }
    Resolution::ongoing()
}

fn drink(state: &mut PlayerState, tun: &GameTunables) -> Resolution {
    if state.action_points == 0 {
        return too_tired(state);
    }
    if !state.inventory.has("water_bottle", 1) {
        state.add_log("Your bottle is empty.");
        return Resolution::ongoing();
    }
    state.action_points -= 1;
    state.inventory.remove("water_bottle", 1);
    state.adjust_thirst(tun.drink_thirst_restore as i32);
    state.add_log("You drink deep.");
    Resolution::ongoing()
}

fn sleep<R: Rng + ?Sized>(
    state: &mut PlayerState,
    tun: &GameTunables,
    rng: &mut R,
) -> Resolution {
    state.day += 1;
    state.action_points = tun.action_points_per_day;
    state.adjust_hunger(-(tun.sleep_hunger_cost as i32));
    state.adjust_hp(tun.sleep_hp_restore as i32);
    state.adjust_thirst(tun.sleep_thirst_restore as i32);
    state.weather = Weather::sample(rng);
    state.finds_today = 0;
    state.add_log(format!(
        "Day {}. You slept; the sky is {}.",
        state.day,
        state.weather.label()
    ));
    Resolution::ongoing()
}

fn collect_water(state: &mut PlayerState, tun: &GameTunables) -> Resolution {
    if state.weather != Weather::Rain {
        state.add_log("Not a drop falling. Wait for rain.");
        return Resolution::ongoing();
    }
    let current = state.inventory.count("water_bottle");
    if current >= tun.water_bottle_cap {
        state.add_log("Your bottles are already full.");
        return Resolution::ongoing();
    }
    let added = tun.water_bottle_cap - current;
    state.inventory.add("water_bottle", added);
    state.add_log("You set out everything that holds water and let the rain work.");
    Resolution::ongoing()
}

fn catch_signal<R: Rng + ?Sized>(
    state: &mut PlayerState,
    tun: &GameTunables,
    rng: &mut R,
) -> Resolution {
    if state.action_points == 0 {
        return too_tired(state);
    }
    state.action_points -= 1;
    if rng.gen_bool(0.5) {
        state.signal_progress += tun.signal_step;
        state.add_log("A faint signal. You note the bearing.");
    } else {
        state.add_log("Nothing but static.");
    }
    Resolution::ongoing()
}

/// Escape chance in percent: base + karma/10 + accumulated signal bearings,
/// clamped so it is never certain either way.
pub fn escape_chance(state: &PlayerState, tun: &GameTunables) -> u32 {
    let raw = tun.escape_base_chance as i64
        + (state.karma / 10) as i64
        + state.signal_progress as i64;
    raw.clamp(1, 95) as u32
}

fn attempt_escape<R: Rng + ?Sized>(
    state: &mut PlayerState,
    tun: &GameTunables,
    rng: &mut R,
) -> Resolution {
    let chance = escape_chance(state, tun);
    if rng.gen_range(1..=100) <= chance {
        state.add_log("You break the treeline. A road. Voices. You made it out.");
        Resolution::ended()
    } else {
        state.add_log("Hours of walking and the same mossy boulder again. No way out yet.");
        Resolution::ongoing()
    }
}

fn use_item(state: &mut PlayerState, data: &GameData, item_id: &str) -> Resolution {
    if !state.inventory.has(item_id, 1) {
        state.add_log("You don't have that.");
        return Resolution::ongoing();
    }
    let Some(def) = data.item(item_id) else {
        state.add_log("No use for that.");
        return Resolution::ongoing();
    };
    if !def.on_use.is_empty() {
        let effects = def.on_use.clone();
        state.inventory.remove(item_id, 1);
        for effect in &effects {
            effect.apply(state);
        }
        state.add_log(format!("Used: {}", def.name));
        return Resolution::ongoing();
    }
    if let Some(slot) = def.slot {
        if state.equipment.contains_key(&slot) {
            state.add_log(format!("Your {} slot is already taken.", slot.label()));
            return Resolution::ongoing();
        }
        state.inventory.remove(item_id, 1);
        state.equipment.insert(slot, def.id.clone());
        state.add_log(format!("Equipped: {}", def.name));
        return Resolution::ongoing();
    }
    state.add_log("No use for that.");
    Resolution::ongoing()
}

fn drop_item(state: &mut PlayerState, data: &GameData, item_id: &str) -> Resolution {
    if state.inventory.remove(item_id, 1) == 0 {
        state.add_log("You don't have that.");
    } else {
        state.add_log(format!("Dropped: {}", data.item_name(item_id)));
    }
    Resolution::ongoing()
}

fn inspect_item(state: &mut PlayerState, data: &GameData, item_id: &str) -> Resolution {
    match data.item(item_id) {
        Some(def) => state.add_log(format!("{}: {}", def.name, def.description)),
        None => state.add_log("Nothing special about it."),
    }
    Resolution::ongoing()
}
