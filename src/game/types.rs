use chrono::{DateTime, Utc};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const PLAYER_SCHEMA_VERSION: u8 = 1;

/// Maximum journal lines retained per player; oldest entries are evicted.
pub const JOURNAL_CAP: usize = 20;

/// Action points granted at the start of each day.
pub const ACTION_POINTS_PER_DAY: u32 = 5;

/// Weather for the current in-game day. Resampled on sleep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Clear,
    Cloudy,
    Rain,
}

impl Weather {
    /// Sample a new day's weather with the fixed 70/20/10 weighting.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        const TABLE: [(Weather, u32); 3] = [
            (Weather::Clear, 70),
            (Weather::Cloudy, 20),
            (Weather::Rain, 10),
        ];
        let dist = WeightedIndex::new(TABLE.iter().map(|(_, w)| *w))
            .expect("static weather weights are valid");
        TABLE[dist.sample(rng)].0
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Cloudy => "cloudy",
            Weather::Rain => "rain",
        }
    }
}

/// Named attachment points; each holds at most one item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Head,
    Torso,
    Back,
    Hand,
    Legs,
    Feet,
    Trinket,
    Pet,
}

impl EquipSlot {
    pub fn label(&self) -> &'static str {
        match self {
            EquipSlot::Head => "head",
            EquipSlot::Torso => "torso",
            EquipSlot::Back => "back",
            EquipSlot::Hand => "hand",
            EquipSlot::Legs => "legs",
            EquipSlot::Feet => "feet",
            EquipSlot::Trinket => "trinket",
            EquipSlot::Pet => "pet",
        }
    }
}

/// Item counts keyed by item id. Absent keys read as zero; counts are never
/// materialized as negative or zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: &str) -> u32 {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: &str, qty: u32) -> bool {
        self.count(item) >= qty
    }

    pub fn add(&mut self, item: &str, qty: u32) {
        if qty == 0 {
            return;
        }
        *self.counts.entry(item.to_string()).or_insert(0) += qty;
    }

    /// Remove up to `qty` units, returning how many were actually removed.
    /// Keys never go negative; a drained key is dropped from the map.
    pub fn remove(&mut self, item: &str, qty: u32) -> u32 {
        let Some(current) = self.counts.get_mut(item) else {
            return 0;
        };
        let taken = qty.min(*current);
        *current -= taken;
        if *current == 0 {
            self.counts.remove(item);
        }
        taken
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Which scripted encounter (if any) is in progress, and how it expects the
/// next input. Transitions only through the story engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoryState {
    /// Free exploration; encounter triggers are evaluated.
    #[default]
    None,
    /// A node's choice menu is pending.
    Node { node_id: String },
    /// The node redirects the next free-text input (pet naming).
    TextEntry { node_id: String },
}

impl StoryState {
    pub fn is_none(&self) -> bool {
        matches!(self, StoryState::None)
    }
}

/// Screen identifiers for the presentation layer's "back" navigation.
/// No gameplay effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Main,
    Inventory,
    Character,
    Craft,
}

/// Full per-player game record. Stored as one document per player id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub hp: u32,
    pub hunger: u32,
    pub thirst: u32,
    pub action_points: u32,
    /// Unbounded, may go negative; feeds the escape chance.
    pub karma: i32,
    pub day: u32,
    pub weather: Weather,
    /// Bounded journal shown to the player; see [`JOURNAL_CAP`].
    pub log: Vec<String>,
    pub inventory: Inventory,
    pub equipment: BTreeMap<EquipSlot, String>,
    pub story: StoryState,
    #[serde(default)]
    pub nav_stack: Vec<Screen>,
    /// Accumulated by the catch-signal action; added to the escape chance.
    #[serde(default)]
    pub signal_progress: u32,
    /// Explores since the last sleep; gates one-time narrative hints.
    #[serde(default)]
    pub finds_today: u32,
    /// Item ids whose first-find hint has already fired.
    #[serde(default)]
    pub hinted_items: BTreeSet<String>,
    /// Encounters that already ran; a trigger never fires twice.
    #[serde(default)]
    pub completed_stories: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl PlayerState {
    /// Fresh state for first contact or an explicit new game. The starting
    /// kit mirrors the classic opener: matches, a fork, a strip of bark.
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut inventory = Inventory::new();
        inventory.add("matches", 1);
        inventory.add("fork", 1);
        inventory.add("bark", 1);
        Self {
            hp: 100,
            hunger: 20,
            thirst: 60,
            action_points: ACTION_POINTS_PER_DAY,
            karma: 0,
            day: 1,
            log: vec!["You wake up in the forest. What now?".to_string()],
            inventory,
            equipment: BTreeMap::new(),
            story: StoryState::None,
            nav_stack: Vec::new(),
            signal_progress: 0,
            finds_today: 0,
            hinted_items: BTreeSet::new(),
            completed_stories: BTreeSet::new(),
            weather: Weather::Clear,
            created_at: now,
            updated_at: now,
            schema_version: PLAYER_SCHEMA_VERSION,
        }
    }

    /// Append a journal line, evicting the oldest past [`JOURNAL_CAP`].
    pub fn add_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > JOURNAL_CAP {
            let excess = self.log.len() - JOURNAL_CAP;
            self.log.drain(..excess);
        }
    }

    /// Apply a signed delta to a 0..=100 stat without under/overflow.
    pub fn apply_stat(stat: u32, delta: i32) -> u32 {
        let raw = stat as i64 + delta as i64;
        raw.clamp(0, 100) as u32
    }

    pub fn adjust_hp(&mut self, delta: i32) {
        self.hp = Self::apply_stat(self.hp, delta);
    }

    pub fn adjust_hunger(&mut self, delta: i32) {
        self.hunger = Self::apply_stat(self.hunger, delta);
    }

    pub fn adjust_thirst(&mut self, delta: i32) {
        self.thirst = Self::apply_stat(self.thirst, delta);
    }

    /// Item currently occupying a slot, if any.
    pub fn equipped(&self, slot: EquipSlot) -> Option<&str> {
        self.equipment.get(&slot).map(String::as_str)
    }

    pub fn push_screen(&mut self, screen: Screen) {
        self.nav_stack.push(screen);
    }

    pub fn pop_screen(&mut self) -> Option<Screen> {
        self.nav_stack.pop()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn inventory_absent_keys_read_zero() {
        let inv = Inventory::new();
        assert_eq!(inv.count("stick"), 0);
        assert!(!inv.has("stick", 1));
        assert!(inv.has("stick", 0));
    }

    #[test]
    fn inventory_remove_saturates() {
        let mut inv = Inventory::new();
        inv.add("berries", 2);
        assert_eq!(inv.remove("berries", 5), 2);
        assert_eq!(inv.count("berries"), 0);
        assert_eq!(inv.remove("berries", 1), 0);
    }

    #[test]
    fn inventory_drops_drained_keys() {
        let mut inv = Inventory::new();
        inv.add("stone", 1);
        inv.remove("stone", 1);
        assert!(inv.is_empty());
    }

    #[test]
    fn journal_is_bounded() {
        let mut state = PlayerState::new(Utc::now());
        for i in 0..50 {
            state.add_log(format!("line {}", i));
        }
        assert_eq!(state.log.len(), JOURNAL_CAP);
        assert_eq!(state.log.last().unwrap(), "line 49");
        assert_eq!(state.log.first().unwrap(), "line 30");
    }

    #[test]
    fn stat_deltas_clamp() {
        assert_eq!(PlayerState::apply_stat(5, -10), 0);
        assert_eq!(PlayerState::apply_stat(95, 10), 100);
        assert_eq!(PlayerState::apply_stat(50, 0), 50);
    }

    #[test]
    fn weather_sampling_covers_all_variants() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Weather::sample(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
