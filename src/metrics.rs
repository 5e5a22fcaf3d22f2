//! Minimal process counters for the game service.
use std::sync::atomic::{AtomicU64, Ordering};

static ACTIONS_RESOLVED: AtomicU64 = AtomicU64::new(0);
static SAVES_FAILED: AtomicU64 = AtomicU64::new(0);
static GAMES_COMPLETED: AtomicU64 = AtomicU64::new(0);

pub fn inc_actions_resolved() {
    ACTIONS_RESOLVED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_saves_failed() {
    SAVES_FAILED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_games_completed() {
    GAMES_COMPLETED.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub actions_resolved: u64,
    pub saves_failed: u64,
    pub games_completed: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        actions_resolved: ACTIONS_RESOLVED.load(Ordering::Relaxed),
        saves_failed: SAVES_FAILED.load(Ordering::Relaxed),
        games_completed: GAMES_COMPLETED.load(Ordering::Relaxed),
    }
}
