//! Scripted multi-step encounters.
//!
//! Each encounter is a data record: a declarative trigger predicate, an entry
//! node, and a small node graph. Nodes carry scripted text and a fixed choice
//! menu; exactly one node kind redirects the next free-text input instead
//! (pet naming). Story state transitions happen only here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::data::Effect;
use crate::game::types::{EquipSlot, PlayerState, StoryState};

/// Requirement that a specific item occupies a specific slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquippedReq {
    pub slot: EquipSlot,
    pub item: String,
}

/// Declarative predicate deciding when an encounter may start. All present
/// fields must hold simultaneously; thresholds are minimums.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncounterTrigger {
    #[serde(default)]
    pub equipped: Option<EquippedReq>,
    #[serde(default)]
    pub min_day: Option<u32>,
    #[serde(default)]
    pub min_action_points: Option<u32>,
    #[serde(default)]
    pub min_items: BTreeMap<String, u32>,
}

impl EncounterTrigger {
    pub fn matches(&self, state: &PlayerState) -> bool {
        if let Some(req) = &self.equipped {
            if state.equipped(req.slot) != Some(req.item.as_str()) {
                return false;
            }
        }
        if let Some(day) = self.min_day {
            if state.day < day {
                return false;
            }
        }
        if let Some(ap) = self.min_action_points {
            if state.action_points < ap {
                return false;
            }
        }
        self.min_items
            .iter()
            .all(|(item, qty)| state.inventory.has(item, *qty))
    }
}

/// Free-text entry rules attached to a node (the pet-naming step).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextEntry {
    /// Re-prompt shown when the submitted name is empty or whitespace.
    pub reject: String,
    /// Accept line; `{name}` is replaced with the stored name.
    pub accept: String,
    pub max_len: usize,
    pub slot: EquipSlot,
    pub karma_bonus: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryChoice {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub effects: Vec<Effect>,
    pub outcome: String,
    /// Follow-up node id; `None` resolves the encounter.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryNode {
    /// Globally unique across all encounters.
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<StoryChoice>,
    #[serde(default)]
    pub text_entry: Option<TextEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Encounter {
    pub id: String,
    #[serde(default)]
    pub trigger: EncounterTrigger,
    pub entry: String,
    pub nodes: Vec<StoryNode>,
}

impl Encounter {
    pub fn node(&self, node_id: &str) -> Option<&StoryNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }
}

/// Locate a node by id across all encounters.
pub fn find_node<'a>(encounters: &'a [Encounter], node_id: &str) -> Option<&'a StoryNode> {
    encounters.iter().find_map(|e| e.node(node_id))
}

/// First encounter whose trigger currently holds. Encounters never re-fire:
/// anything already in `completed_stories` is skipped, and a trigger is only
/// consulted while no story is active.
pub fn eligible<'a>(state: &PlayerState, encounters: &'a [Encounter]) -> Option<&'a Encounter> {
    if !state.story.is_none() {
        return None;
    }
    encounters
        .iter()
        .filter(|e| !state.completed_stories.contains(&e.id))
        .find(|e| e.trigger.matches(state))
}

/// Start an encounter: journal the entry node's text and point the story
/// state at its choice menu. Marks the encounter consumed so it cannot
/// trigger again, whatever path the player takes through it.
pub fn begin(state: &mut PlayerState, encounter: &Encounter) {
    state.completed_stories.insert(encounter.id.clone());
    if let Some(node) = encounter.node(&encounter.entry) {
        state.add_log(node.text.clone());
        state.story = next_state_for(node);
    }
}

fn next_state_for(node: &StoryNode) -> StoryState {
    if node.text_entry.is_some() {
        StoryState::TextEntry {
            node_id: node.id.clone(),
        }
    } else {
        StoryState::Node {
            node_id: node.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// Effects applied and outcome journaled; `resolved` when the story
    /// returned to free exploration.
    Applied { resolved: bool },
    /// Choice does not belong to the pending node (stale or duplicate
    /// input); nothing changed.
    Stale,
}

/// Resolve a choice action against the pending node.
pub fn choose(state: &mut PlayerState, encounters: &[Encounter], choice_id: &str) -> ChoiceOutcome {
    let StoryState::Node { node_id } = state.story.clone() else {
        return ChoiceOutcome::Stale;
    };
    let Some(node) = find_node(encounters, &node_id) else {
        // Node vanished from the content tables (seed override changed);
        // drop back to free exploration rather than wedge the player.
        state.story = StoryState::None;
        return ChoiceOutcome::Stale;
    };
    let Some(choice) = node.choices.iter().find(|c| c.id == choice_id) else {
        return ChoiceOutcome::Stale;
    };

    for effect in &choice.effects {
        effect.apply(state);
    }
    state.add_log(choice.outcome.clone());

    match &choice.next {
        Some(next_id) => match find_node(encounters, next_id) {
            Some(next) => {
                state.add_log(next.text.clone());
                state.story = next_state_for(next);
                ChoiceOutcome::Applied { resolved: false }
            }
            None => {
                state.story = StoryState::None;
                ChoiceOutcome::Applied { resolved: true }
            }
        },
        None => {
            state.story = StoryState::None;
            ChoiceOutcome::Applied { resolved: true }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    Accepted { name: String },
    /// Empty or whitespace-only input; re-prompted, state unchanged.
    Rejected,
    Stale,
}

/// Feed a free-text line to the pending text-entry node.
pub fn submit_text(state: &mut PlayerState, encounters: &[Encounter], input: &str) -> TextOutcome {
    let StoryState::TextEntry { node_id } = state.story.clone() else {
        return TextOutcome::Stale;
    };
    let Some(node) = find_node(encounters, &node_id) else {
        state.story = StoryState::None;
        return TextOutcome::Stale;
    };
    let Some(entry) = &node.text_entry else {
        state.story = StoryState::None;
        return TextOutcome::Stale;
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        state.add_log(entry.reject.clone());
        return TextOutcome::Rejected;
    }

    let name: String = trimmed.chars().take(entry.max_len).collect();
    state.equipment.insert(entry.slot, name.clone());
    state.karma += entry.karma_bonus;
    state.add_log(entry.accept.replace("{name}", &name));
    state.story = StoryState::None;
    TextOutcome::Accepted { name }
}
