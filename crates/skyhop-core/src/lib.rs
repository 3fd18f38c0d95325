pub mod audio;
pub mod game_trait;
pub mod input;
pub mod score_store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{ArcadeGame, GameConfig, GameEvent, RoundPhase};
    use crate::input::{GUI_HEIGHT, GUI_WIDTH, PointerInput};

    /// No pointer activity.
    pub fn idle() -> PointerInput {
        PointerInput::default()
    }

    /// Fresh tap in the middle of the left half.
    pub fn tap_left() -> PointerInput {
        PointerInput::tap_at(GUI_WIDTH / 4.0, GUI_HEIGHT / 2.0)
    }

    /// Pointer held in the middle of the left half.
    pub fn hold_left() -> PointerInput {
        PointerInput::held_at(GUI_WIDTH / 4.0, GUI_HEIGHT / 2.0)
    }

    /// Pointer held in the middle of the right half.
    pub fn hold_right() -> PointerInput {
        PointerInput::held_at(GUI_WIDTH * 0.75, GUI_HEIGHT / 2.0)
    }

    /// Run N frames with the same input, returning all accumulated events.
    pub fn run_game_ticks(
        game: &mut dyn ArcadeGame,
        n: usize,
        dt: f32,
        input: &PointerInput,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt, input));
        }
        all_events
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every ArcadeGame implementation must pass these. Game crates call
    // them from their own #[cfg(test)] modules with a concrete game.

    /// A fresh round waits in Ready until the first tap.
    pub fn contract_ready_until_tapped(game: &mut dyn ArcadeGame) {
        game.init(&GameConfig::with_seed(1));
        assert_eq!(game.phase(), RoundPhase::Ready);
        let before = game.serialize_state();
        game.update(1.0 / 60.0, &idle());
        assert_eq!(
            before,
            game.serialize_state(),
            "State must not change in Ready without a tap"
        );
        game.update(1.0 / 60.0, &tap_left());
        assert_eq!(game.phase(), RoundPhase::Playing, "A tap must start the round");
    }

    /// Frames in Playing must change the state.
    pub fn contract_update_advances_state(game: &mut dyn ArcadeGame) {
        game.init(&GameConfig::with_seed(2));
        game.update(1.0 / 60.0, &tap_left());
        let before = game.serialize_state();
        game.update(1.0 / 60.0, &idle());
        assert_ne!(
            before,
            game.serialize_state(),
            "update() while playing must advance state"
        );
    }

    /// Once complete, further frames are no-ops. The caller drives the game
    /// into GameOver first.
    pub fn contract_game_over_is_terminal(game: &mut dyn ArcadeGame) {
        assert!(
            game.is_round_complete(),
            "contract requires a completed round"
        );
        let before = game.serialize_state();
        let events = run_game_ticks(game, 10, 1.0 / 60.0, &tap_left());
        assert!(events.is_empty(), "No events may follow GameOver");
        assert_eq!(before, game.serialize_state(), "GameOver must be terminal");
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves(game: &mut dyn ArcadeGame) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(state_a, state_b, "State must survive a roundtrip unchanged");
    }

    /// pause() must freeze the round, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn ArcadeGame) {
        assert!(game.supports_pause(), "Game must declare pause support");
        game.init(&GameConfig::with_seed(4));
        game.update(1.0 / 60.0, &tap_left());
        game.pause();
        let before = game.serialize_state();
        game.update(1.0 / 60.0, &idle());
        assert_eq!(before, game.serialize_state(), "State must not change while paused");

        game.resume();
        game.update(1.0 / 60.0, &idle());
        assert_ne!(before, game.serialize_state(), "State must change after resume");
    }
}
