use std::sync::{Arc, Mutex};

/// Persistent high-score collaborator.
///
/// Writes are idempotent. Persistence failures are the store's concern; the
/// simulation never retries.
pub trait ScoreStore: Send {
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32);
}

/// In-memory store. Clones share the same slot, so a host can keep the
/// value alive across rounds.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    slot: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    high_score: u32,
    writes: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(high_score: u32) -> Self {
        let store = Self::default();
        store.with_slot(|slot| slot.high_score = high_score);
        store
    }

    /// Number of `set_high_score` calls received.
    pub fn writes(&self) -> usize {
        self.with_slot(|slot| slot.writes)
    }

    fn with_slot<R>(&self, f: impl FnOnce(&mut MemorySlot) -> R) -> R {
        match self.slot.lock() {
            Ok(mut slot) => f(&mut slot),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn high_score(&self) -> u32 {
        self.with_slot(|slot| slot.high_score)
    }

    fn set_high_score(&mut self, score: u32) {
        self.with_slot(|slot| {
            slot.high_score = score;
            slot.writes += 1;
        });
        tracing::debug!(score, "high score stored");
    }
}
