//! Seed-loading behavior: the shipped JSON matches the compiled-in tables,
//! and operator overrides replace whole tables with validation.

use forestbot::game::{load_game_data, GameData, GameError};
use std::path::Path;
use tempfile::TempDir;

fn shipped_seeds() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/seeds")
}

#[test]
fn shipped_seed_files_mirror_the_builtin_tables() {
    let from_seeds = load_game_data(Some(shipped_seeds())).expect("shipped seeds load");
    let builtin = GameData::builtin();
    assert_eq!(from_seeds.items, builtin.items);
    assert_eq!(from_seeds.recipes, builtin.recipes);
    assert_eq!(from_seeds.explore_events, builtin.explore_events);
    assert_eq!(from_seeds.encounters, builtin.encounters);
}

#[test]
fn absent_directory_falls_back_to_builtin() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("no-seeds-here");
    let data = load_game_data(Some(missing)).expect("load");
    assert_eq!(data, GameData::builtin());
}

#[test]
fn override_adds_a_recipe_without_code_changes() {
    let dir = TempDir::new().expect("tempdir");
    let json = r#"[
        {
            "id": "torch",
            "name": "Torch",
            "ingredients": { "stick": 1, "matches": 1 },
            "result": "torch"
        },
        {
            "id": "stone_knife",
            "name": "Stone Knife",
            "ingredients": { "stone": 1, "stick": 1, "bark": 1 },
            "result": "stone_knife",
            "flavor": "Sharp enough. Probably."
        }
    ]"#;
    std::fs::write(dir.path().join("recipes.json"), json).expect("write");

    let data = load_game_data(Some(dir.path())).expect("load");
    assert_eq!(data.recipes.len(), 2);
    let knife = data.recipes.iter().find(|r| r.id == "stone_knife").unwrap();
    assert_eq!(knife.ingredients.len(), 3);
    assert_eq!(knife.result_qty, 1);
}

#[test]
fn broken_story_graph_is_rejected_at_load() {
    let dir = TempDir::new().expect("tempdir");
    let json = r#"[
        {
            "id": "ghost",
            "entry": "ghost",
            "nodes": [
                {
                    "id": "ghost",
                    "text": "A pale shape drifts between the trees.",
                    "choices": [
                        {
                            "id": "ghost_follow",
                            "label": "Follow it",
                            "outcome": "It leads you nowhere.",
                            "next": "missing_node"
                        }
                    ]
                }
            ]
        }
    ]"#;
    std::fs::write(dir.path().join("encounters.json"), json).expect("write");

    let err = load_game_data(Some(dir.path())).unwrap_err();
    assert!(matches!(err, GameError::InvalidSeed(_)));
}
