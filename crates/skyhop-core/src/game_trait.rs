use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::PointerInput;

/// Core trait that every Skyhop round implementation must provide.
///
/// The host owns the frame clock, input sampling, rendering and navigation;
/// the game only advances its own simulation.
pub trait ArcadeGame: Send {
    /// Game metadata for the title screen.
    fn metadata(&self) -> GameMetadata;

    /// Called once before the first frame, and again to start a fresh round.
    fn init(&mut self, config: &GameConfig);

    /// Called each frame. Returns the events produced during this frame.
    fn update(&mut self, dt: f32, input: &PointerInput) -> Vec<GameEvent>;

    /// Serialize the round state for snapshots and replays.
    fn serialize_state(&self) -> Vec<u8>;

    /// Restore a state produced by `serialize_state`.
    fn apply_state(&mut self, state: &[u8]);

    /// Current phase of the round.
    fn phase(&self) -> RoundPhase;

    /// Whether the game honours `pause`.
    fn supports_pause(&self) -> bool {
        true
    }

    /// Suspend updates (app backgrounded, overlay shown).
    fn pause(&mut self);

    /// Resume updates after `pause`.
    fn resume(&mut self);

    /// Whether the round reached its terminal phase.
    fn is_round_complete(&self) -> bool;

    /// Final figures for the round.
    fn round_results(&self) -> RoundResult;
}

/// Top-level phase of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the first touch.
    #[default]
    Ready,
    Playing,
    /// Terminal. Leaving it is the host's job.
    GameOver,
}

impl RoundPhase {
    pub fn is_terminal(self) -> bool {
        self == RoundPhase::GameOver
    }
}

/// Game metadata for the title screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// Configuration for a single round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for every random draw the round makes.
    pub seed: u64,
    pub custom: HashMap<String, serde_json::Value>,
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            custom: HashMap::new(),
        }
    }
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    /// Dropped more than half a viewport below the best height.
    FellOffScreen,
    /// Vertical velocity hit exactly zero (a fatal enemy hit does this).
    Stalled,
    /// At or below the world origin.
    BelowOrigin,
    /// Touched the goal.
    ReachedGoal,
}

/// Events emitted by a game during update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    StarCollected { score: u32 },
    NewHighScore { high_score: u32 },
    EnemyEliminated,
    PlayerHit,
    RoundComplete { cause: RoundEnd },
}

/// Final figures for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub score: u32,
    pub high_score: u32,
    pub cause: Option<RoundEnd>,
}

/// Generates the `ArcadeGame` methods that are identical across games:
/// `serialize_state`, `apply_state`, `phase`, `pause`, `resume`, `is_round_complete`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool`
/// fields, and `$StateType` to have a `phase: RoundPhase` field.
#[macro_export]
macro_rules! arcade_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).unwrap_or_default()
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::warn!("Ignoring undecodable round state: {e}"),
            }
        }

        fn phase(&self) -> $crate::game_trait::RoundPhase {
            self.state.phase
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_round_complete(&self) -> bool {
            self.state.phase.is_terminal()
        }
    };
}
