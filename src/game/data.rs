//! Static content tables and gameplay tunables.
//!
//! Everything the resolver consults (item catalog, crafting recipes, the
//! weighted exploration table, scripted encounters) is data, loaded once
//! at startup. The built-in tables below are the canonical content;
//! JSON seeds under `data/seeds/` may replace any of them (see
//! [`crate::game::seed_loader`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::crafting::Recipe;
use crate::game::errors::GameError;
use crate::game::story::{Encounter, EncounterTrigger, EquippedReq, StoryChoice, StoryNode, TextEntry};
use crate::game::types::{EquipSlot, PlayerState};

/// A single state mutation used by item effects and story choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Hp { amount: i32 },
    Hunger { amount: i32 },
    Thirst { amount: i32 },
    Karma { amount: i32 },
    GiveItem { item: String, qty: u32 },
    /// Removes up to `qty`; counts never go negative.
    TakeItem { item: String, qty: u32 },
    /// Clears a slot; the occupant is consumed, not returned.
    Unequip { slot: EquipSlot },
}

impl Effect {
    pub fn apply(&self, state: &mut PlayerState) {
        match self {
            Effect::Hp { amount } => state.adjust_hp(*amount),
            Effect::Hunger { amount } => state.adjust_hunger(*amount),
            Effect::Thirst { amount } => state.adjust_thirst(*amount),
            Effect::Karma { amount } => state.karma += amount,
            Effect::GiveItem { item, qty } => state.inventory.add(item, *qty),
            Effect::TakeItem { item, qty } => {
                state.inventory.remove(item, *qty);
            }
            Effect::Unequip { slot } => {
                state.equipment.remove(slot);
            }
        }
    }
}

/// Catalog entry for one item id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Equipment slot this item goes into, if it is equippable.
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    /// Effects applied when used; non-empty means consumable (one unit per
    /// use).
    #[serde(default)]
    pub on_use: Vec<Effect>,
    /// One-time journal hint appended the first time the item is found.
    #[serde(default)]
    pub hint: Option<String>,
}

impl ItemDef {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            slot: None,
            on_use: Vec::new(),
            hint: None,
        }
    }

    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_use(mut self, effect: Effect) -> Self {
        self.on_use.push(effect);
        self
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }
}

/// One row of the weighted exploration table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExploreEvent {
    pub id: String,
    pub weight: u32,
    pub text: String,
    pub outcome: ExploreOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExploreOutcome {
    FindItem { item: String, qty: u32 },
    /// Fills water bottles, bounded by the bottle capacity tunable.
    FindWater { qty: u32 },
    Injury { hp: u32 },
}

/// Gameplay numbers with the observed defaults. All overridable from the
/// `[game]` config section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameTunables {
    pub action_points_per_day: u32,
    pub explore_hunger_cost: u32,
    pub explore_thirst_cost: u32,
    pub drink_thirst_restore: u32,
    pub sleep_hunger_cost: u32,
    /// Some builds let sleep heal; off by default, not a contract.
    pub sleep_hp_restore: u32,
    pub sleep_thirst_restore: u32,
    pub water_bottle_cap: u32,
    pub escape_base_chance: u32,
    pub signal_step: u32,
}

impl Default for GameTunables {
    fn default() -> Self {
        Self {
            action_points_per_day: 5,
            explore_hunger_cost: 7,
            explore_thirst_cost: 8,
            drink_thirst_restore: 20,
            sleep_hunger_cost: 15,
            sleep_hp_restore: 0,
            sleep_thirst_restore: 0,
            water_bottle_cap: 3,
            escape_base_chance: 10,
            signal_step: 5,
        }
    }
}

/// All content tables the resolver reads. Loaded once at startup; the
/// resolver never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameData {
    pub items: Vec<ItemDef>,
    pub recipes: Vec<Recipe>,
    pub explore_events: Vec<ExploreEvent>,
    pub encounters: Vec<Encounter>,
}

impl GameData {
    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Display name for an item id, falling back to the id itself for
    /// anything outside the catalog (seeded content may grant such items).
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.item(id).map(|i| i.name.as_str()).unwrap_or(id)
    }

    /// The canonical content tables.
    pub fn builtin() -> Self {
        Self {
            items: builtin_items(),
            recipes: builtin_recipes(),
            explore_events: builtin_explore_events(),
            encounters: builtin_encounters(),
        }
    }

    /// Consistency checks applied to built-in and seeded tables alike:
    /// unique ids, positive weights, and story graph integrity.
    pub fn validate(&self) -> Result<(), GameError> {
        let mut item_ids = BTreeSet::new();
        for item in &self.items {
            if !item_ids.insert(item.id.as_str()) {
                return Err(GameError::InvalidSeed(format!("duplicate item id: {}", item.id)));
            }
        }
        let mut recipe_ids = BTreeSet::new();
        for recipe in &self.recipes {
            if !recipe_ids.insert(recipe.id.as_str()) {
                return Err(GameError::InvalidSeed(format!(
                    "duplicate recipe id: {}",
                    recipe.id
                )));
            }
            if recipe.ingredients.is_empty() {
                return Err(GameError::InvalidSeed(format!(
                    "recipe {} has no ingredients",
                    recipe.id
                )));
            }
        }
        if self.explore_events.is_empty() {
            return Err(GameError::InvalidSeed("empty explore table".to_string()));
        }
        for event in &self.explore_events {
            if event.weight == 0 {
                return Err(GameError::InvalidSeed(format!(
                    "explore event {} has zero weight",
                    event.id
                )));
            }
        }
        let mut node_ids = BTreeSet::new();
        for encounter in &self.encounters {
            for node in &encounter.nodes {
                if !node_ids.insert(node.id.clone()) {
                    return Err(GameError::InvalidSeed(format!(
                        "duplicate story node id: {}",
                        node.id
                    )));
                }
            }
        }
        for encounter in &self.encounters {
            if encounter.node(&encounter.entry).is_none() {
                return Err(GameError::InvalidSeed(format!(
                    "encounter {} entry node {} missing",
                    encounter.id, encounter.entry
                )));
            }
            for node in &encounter.nodes {
                for choice in &node.choices {
                    if let Some(next) = &choice.next {
                        if !node_ids.contains(next) {
                            return Err(GameError::InvalidSeed(format!(
                                "choice {} points at missing node {}",
                                choice.id, next
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn builtin_items() -> Vec<ItemDef> {
    vec![
        ItemDef::new("matches", "Matches", "A half-empty box. Keep them dry."),
        ItemDef::new("fork", "Fork", "Weapon or tool, depending on the day."),
        ItemDef::new("bark", "Strip of Bark", "Might be useful for crafting."),
        ItemDef::new("berries", "Berries", "A handful of dark forest berries.")
            .with_use(Effect::Hunger { amount: 20 }),
        ItemDef::new("stick", "Stick", "A dry, straight branch.")
            .with_hint("That branch looks about right for a torch."),
        ItemDef::new("stone", "Stone", "Fits the palm. Sharp on one edge."),
        ItemDef::new("mushrooms", "Mushrooms", "Probably the edible kind.")
            .with_use(Effect::Hp { amount: 5 }),
        ItemDef::new("torch", "Torch", "Burns long enough to search the dark.")
            .with_slot(EquipSlot::Hand),
        ItemDef::new("water_bottle", "Water Bottle", "A bottle of clean water."),
    ]
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![Recipe::new("torch", "Torch", "torch")
        .with_ingredient("stick", 1)
        .with_ingredient("matches", 1)
        .with_flavor("Now, does the forest get scarier in the dark, or do you?")]
}

fn builtin_explore_events() -> Vec<ExploreEvent> {
    vec![
        ExploreEvent {
            id: "find_berries".to_string(),
            weight: 25,
            text: "You push through the brush and find berries.".to_string(),
            outcome: ExploreOutcome::FindItem {
                item: "berries".to_string(),
                qty: 1,
            },
        },
        ExploreEvent {
            id: "find_stick".to_string(),
            weight: 25,
            text: "A dry stick, good and straight.".to_string(),
            outcome: ExploreOutcome::FindItem {
                item: "stick".to_string(),
                qty: 1,
            },
        },
        ExploreEvent {
            id: "find_stone".to_string(),
            weight: 15,
            text: "You pocket a sharp stone.".to_string(),
            outcome: ExploreOutcome::FindItem {
                item: "stone".to_string(),
                qty: 1,
            },
        },
        ExploreEvent {
            id: "find_mushrooms".to_string(),
            weight: 15,
            text: "Mushrooms ring the base of an old pine.".to_string(),
            outcome: ExploreOutcome::FindItem {
                item: "mushrooms".to_string(),
                qty: 1,
            },
        },
        ExploreEvent {
            id: "find_stream".to_string(),
            weight: 10,
            text: "A thin stream threads between the roots.".to_string(),
            outcome: ExploreOutcome::FindWater { qty: 1 },
        },
        ExploreEvent {
            id: "bad_fall".to_string(),
            weight: 10,
            text: "A root catches your foot and you go down hard.".to_string(),
            outcome: ExploreOutcome::Injury { hp: 5 },
        },
    ]
}

fn builtin_encounters() -> Vec<Encounter> {
    let wolf = Encounter {
        id: "wolf".to_string(),
        trigger: EncounterTrigger {
            equipped: Some(EquippedReq {
                slot: EquipSlot::Hand,
                item: "torch".to_string(),
            }),
            ..Default::default()
        },
        entry: "wolf".to_string(),
        nodes: vec![
            StoryNode {
                id: "wolf".to_string(),
                text: "A wolf steps onto the trail, eyes fixed on your torch.".to_string(),
                choices: vec![
                    StoryChoice {
                        id: "wolf_flee".to_string(),
                        label: "Run".to_string(),
                        effects: vec![
                            Effect::Hp { amount: -10 },
                            Effect::Karma { amount: -5 },
                        ],
                        outcome: "You run. Branches tear at you, but the wolf stays behind."
                            .to_string(),
                        next: None,
                    },
                    StoryChoice {
                        id: "wolf_fight".to_string(),
                        label: "Fight".to_string(),
                        effects: vec![
                            Effect::Hp { amount: -20 },
                            Effect::Karma { amount: 10 },
                            Effect::Unequip {
                                slot: EquipSlot::Hand,
                            },
                        ],
                        outcome: "You drive the wolf off. The torch is ruined.".to_string(),
                        next: Some("peek_den".to_string()),
                    },
                ],
                text_entry: None,
            },
            StoryNode {
                id: "peek_den".to_string(),
                text: "The wolf fled toward a den under the roots. Something moves inside."
                    .to_string(),
                choices: vec![
                    StoryChoice {
                        id: "den_peek".to_string(),
                        label: "Look inside".to_string(),
                        effects: vec![],
                        outcome: "You kneel and peer into the dark.".to_string(),
                        next: Some("cat".to_string()),
                    },
                    StoryChoice {
                        id: "den_leave".to_string(),
                        label: "Back away".to_string(),
                        effects: vec![],
                        outcome: "You back away from the den.".to_string(),
                        next: None,
                    },
                ],
                text_entry: None,
            },
            StoryNode {
                id: "cat".to_string(),
                text: "A scrawny cat is wedged inside, too weak to climb out.".to_string(),
                choices: vec![
                    StoryChoice {
                        id: "cat_take".to_string(),
                        label: "Pull it free".to_string(),
                        effects: vec![Effect::Karma { amount: 5 }],
                        outcome: "You pull the cat free. It clings to your shoulder.".to_string(),
                        next: Some("cat_name".to_string()),
                    },
                    StoryChoice {
                        id: "cat_leave".to_string(),
                        label: "Leave it".to_string(),
                        effects: vec![Effect::Karma { amount: -5 }],
                        outcome: "You leave the cat where it is.".to_string(),
                        next: None,
                    },
                ],
                text_entry: None,
            },
            StoryNode {
                id: "cat_name".to_string(),
                text: "The cat watches you expectantly. What will you call it?".to_string(),
                choices: vec![],
                text_entry: Some(TextEntry {
                    reject: "A name can't be empty. Try again.".to_string(),
                    accept: "{name} it is. The cat approves, probably.".to_string(),
                    max_len: 24,
                    slot: EquipSlot::Pet,
                    karma_bonus: 5,
                }),
            },
        ],
    };

    let hermit = Encounter {
        id: "hermit".to_string(),
        trigger: EncounterTrigger {
            min_day: Some(3),
            min_items: [("mushrooms".to_string(), 2)].into_iter().collect(),
            ..Default::default()
        },
        entry: "hermit".to_string(),
        nodes: vec![StoryNode {
            id: "hermit".to_string(),
            text: "An old hermit sits by a cold fire pit, eyeing your foraging bag.".to_string(),
            choices: vec![
                StoryChoice {
                    id: "hermit_share".to_string(),
                    label: "Share your mushrooms".to_string(),
                    effects: vec![
                        Effect::TakeItem {
                            item: "mushrooms".to_string(),
                            qty: 2,
                        },
                        Effect::Karma { amount: 10 },
                    ],
                    outcome: "The hermit nods slowly and points you toward higher ground."
                        .to_string(),
                    next: None,
                },
                StoryChoice {
                    id: "hermit_pass".to_string(),
                    label: "Walk on".to_string(),
                    effects: vec![Effect::Karma { amount: -2 }],
                    outcome: "You walk on. The hermit says nothing.".to_string(),
                    next: None,
                },
            ],
            text_entry: None,
        }],
    };

    vec![wolf, hermit]
}
