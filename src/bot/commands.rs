//! Parsing player input into game actions.
//!
//! The parser is context-sensitive: while a story node is pending the line
//! is matched against that node's choices (by number, id, or label), and
//! while a text-entry node is pending the raw line is forwarded verbatim.

use crate::game::resolver::Action;
use crate::game::story::find_node;
use crate::game::types::{PlayerState, StoryState};
use crate::game::GameData;

/// What the transport should do with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Hand an action to the game engine.
    Act(Action),
    NewGame,
    ShowInventory,
    ShowCharacter,
    ShowCraft,
    Back,
    Help,
    Quit,
    Unknown(String),
}

/// Case-insensitive, whitespace-normalized comparison used for item lookup.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a player-typed item reference to a catalog id: exact id first,
/// then exact display name, then unambiguous name prefix.
pub fn resolve_item_id(data: &GameData, query: &str) -> Option<String> {
    let q = normalize(query);
    if q.is_empty() {
        return None;
    }
    if let Some(item) = data.items.iter().find(|i| i.id == q) {
        return Some(item.id.clone());
    }
    if let Some(item) = data.items.iter().find(|i| normalize(&i.name) == q) {
        return Some(item.id.clone());
    }
    let mut prefix_matches = data
        .items
        .iter()
        .filter(|i| normalize(&i.name).starts_with(&q));
    match (prefix_matches.next(), prefix_matches.next()) {
        (Some(item), None) => Some(item.id.clone()),
        _ => None,
    }
}

fn item_action(
    data: &GameData,
    raw: &str,
    make: impl Fn(String) -> Action,
) -> BotCommand {
    match resolve_item_id(data, raw) {
        Some(id) => BotCommand::Act(make(id)),
        None => BotCommand::Unknown(raw.to_string()),
    }
}

/// Map one input line to a command, given the player's current state.
pub fn parse_command(input: &str, state: &PlayerState, data: &GameData) -> BotCommand {
    // A pending text-entry node captures the whole line as-is.
    if let StoryState::TextEntry { .. } = state.story {
        return BotCommand::Act(Action::TextInput {
            text: input.to_string(),
        });
    }

    let trimmed = input.trim();

    // A pending choice menu matches by number, choice id, or label.
    if let StoryState::Node { node_id } = &state.story {
        if let Some(node) = find_node(&data.encounters, node_id) {
            let lowered = trimmed.to_lowercase();
            if let Ok(index) = lowered.parse::<usize>() {
                if index >= 1 && index <= node.choices.len() {
                    return BotCommand::Act(Action::StoryChoice {
                        choice_id: node.choices[index - 1].id.clone(),
                    });
                }
            }
            if let Some(choice) = node
                .choices
                .iter()
                .find(|c| c.id == lowered || c.label.to_lowercase() == lowered)
            {
                return BotCommand::Act(Action::StoryChoice {
                    choice_id: choice.id.clone(),
                });
            }
        }
        // Not a choice; fall through so help/quit still work. Game actions
        // typed here are stale input and the resolver ignores them.
    }

    let lowered = trimmed.to_lowercase();
    let (verb, rest) = match lowered.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (lowered.as_str(), ""),
    };

    match (verb, rest) {
        ("explore", "") | ("e", "") => BotCommand::Act(Action::Explore),
        ("drink", "") => BotCommand::Act(Action::Drink),
        ("sleep", "") => BotCommand::Act(Action::Sleep),
        ("water", "") | ("collect", "") => BotCommand::Act(Action::CollectWater),
        ("signal", "") => BotCommand::Act(Action::CatchSignal),
        ("escape", "") => BotCommand::Act(Action::AttemptEscape),
        ("craft", "") => BotCommand::ShowCraft,
        ("craft", recipe) => {
            let id = recipe.to_string();
            match data.recipes.iter().find(|r| r.id == id || normalize(&r.name) == id) {
                Some(r) => BotCommand::Act(Action::Craft {
                    recipe_id: r.id.clone(),
                }),
                None => BotCommand::Act(Action::Craft { recipe_id: id }),
            }
        }
        ("use", item) if !item.is_empty() => {
            item_action(data, item, |item_id| Action::UseItem { item_id })
        }
        ("drop", item) if !item.is_empty() => {
            item_action(data, item, |item_id| Action::DropItem { item_id })
        }
        ("look", item) | ("inspect", item) if !item.is_empty() => {
            item_action(data, item, |item_id| Action::InspectItem { item_id })
        }
        ("inventory", "") | ("i", "") => BotCommand::ShowInventory,
        ("character", "") | ("c", "") => BotCommand::ShowCharacter,
        ("back", "") | ("b", "") => BotCommand::Back,
        ("help", "") | ("?", "") => BotCommand::Help,
        ("new", "") => BotCommand::NewGame,
        ("quit", "") | ("q", "") => BotCommand::Quit,
        _ => BotCommand::Unknown(trimmed.to_string()),
    }
}
