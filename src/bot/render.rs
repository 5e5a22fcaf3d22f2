//! Text views handed back to the player: the status bar, the recent
//! journal, and the contextual choice menu. Pure functions over state.

use crate::game::story::find_node;
use crate::game::types::{PlayerState, Screen, StoryState};
use crate::game::GameData;

const RULE: &str = "-------------------";

/// How many journal lines the main view shows.
const JOURNAL_VIEW: usize = 5;

pub fn status_line(state: &PlayerState) -> String {
    format!(
        "HP:{} Food:{} Water:{} AP:{} Day:{} Weather:{} Karma:{}",
        state.hp,
        state.hunger,
        state.thirst,
        state.action_points,
        state.day,
        state.weather.label(),
        state.karma
    )
}

fn journal(state: &PlayerState) -> String {
    if state.log.is_empty() {
        return "Nothing has happened yet.".to_string();
    }
    let start = state.log.len().saturating_sub(JOURNAL_VIEW);
    state.log[start..]
        .iter()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Choice labels for the player's current situation: the pending story
/// menu, a naming prompt, or the free-roam command list.
pub fn choices(state: &PlayerState, data: &GameData) -> Vec<String> {
    match &state.story {
        StoryState::Node { node_id } => match find_node(&data.encounters, node_id) {
            Some(node) => node
                .choices
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}) {}", i + 1, c.label))
                .collect(),
            None => Vec::new(),
        },
        StoryState::TextEntry { .. } => vec!["(type a name)".to_string()],
        StoryState::None => vec![
            "explore | drink | sleep | water | signal | escape".to_string(),
            "inventory | character | craft | help | quit".to_string(),
        ],
    }
}

pub fn main_view(state: &PlayerState, data: &GameData) -> String {
    let mut out = String::new();
    out.push_str(&status_line(state));
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&journal(state));
    out.push('\n');
    out.push_str(RULE);
    for line in choices(state, data) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

pub fn inventory_view(state: &PlayerState, data: &GameData) -> String {
    if state.inventory.is_empty() {
        return "Your pack is empty.".to_string();
    }
    let mut lines = vec!["Pack:".to_string()];
    for (id, count) in state.inventory.iter() {
        let name = data.item_name(id);
        if count > 1 {
            lines.push(format!("- {} x{}", name, count));
        } else {
            lines.push(format!("- {}", name));
        }
    }
    lines.push("use <item> | drop <item> | look <item> | back".to_string());
    lines.join("\n")
}

pub fn character_view(state: &PlayerState, data: &GameData) -> String {
    let mut lines = vec![status_line(state), "Equipment:".to_string()];
    if state.equipment.is_empty() {
        lines.push("- nothing equipped".to_string());
    } else {
        for (slot, item) in &state.equipment {
            lines.push(format!("- {}: {}", slot.label(), data.item_name(item)));
        }
    }
    lines.push("back".to_string());
    lines.join("\n")
}

pub fn craft_view(state: &PlayerState, data: &GameData) -> String {
    let mut lines = vec!["Recipes:".to_string()];
    for recipe in &data.recipes {
        let parts: Vec<String> = recipe
            .ingredients
            .iter()
            .map(|(item, qty)| format!("{} x{}", data.item_name(item), qty))
            .collect();
        let marker = if recipe.is_satisfied_by(state) { "*" } else { " " };
        lines.push(format!("{} {} <- {}", marker, recipe.name, parts.join(" + ")));
    }
    lines.push("craft <recipe> | back".to_string());
    lines.join("\n")
}

pub fn help_view() -> String {
    [
        "explore   - search the woods (1 AP)",
        "drink     - drink from a water bottle (1 AP)",
        "sleep     - end the day, restore AP",
        "water     - set out bottles when it rains",
        "signal    - try to catch a phone signal (1 AP)",
        "escape    - attempt to leave the forest",
        "craft     - list recipes; craft <name> to make one",
        "inventory - show your pack",
        "character - show stats and equipment",
        "new       - start over",
        "quit      - leave the session",
    ]
    .join("\n")
}

/// Render whichever screen the navigation stack says is current.
pub fn screen_view(screen: Screen, state: &PlayerState, data: &GameData) -> String {
    match screen {
        Screen::Main => main_view(state, data),
        Screen::Inventory => inventory_view(state, data),
        Screen::Character => character_view(state, data),
        Screen::Craft => craft_view(state, data),
    }
}
