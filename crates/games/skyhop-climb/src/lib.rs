pub mod collision;
pub mod config;
pub mod entity;
pub mod physics;
pub mod scoring;
pub mod stage_gen;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use skyhop_core::arcade_game_boilerplate;
use skyhop_core::audio::{AudioNotifier, SilentNotifier};
use skyhop_core::game_trait::{
    ArcadeGame, GameConfig, GameEvent, GameMetadata, RoundEnd, RoundPhase, RoundResult,
};
use skyhop_core::input::PointerInput;
use skyhop_core::score_store::{MemoryScoreStore, ScoreStore};

use collision::{Collaborators, CollisionReport, resolve_collisions};
use config::ClimbConfig;
use entity::{Enemy, EntityView, Goal, Player, Star, Step, ViewKind};
use stage_gen::{Stage, generate_stage};

/// Serializable round state. Everything a renderer or replay needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimbState {
    pub phase: RoundPhase,
    pub seed: u64,
    pub score: u32,
    pub high_score: u32,
    /// Highest player y reached this round.
    pub height_so_far: f32,
    /// Seconds spent in Playing.
    pub elapsed: f32,
    pub frame: u64,
    pub player: Player,
    pub steps: Vec<Step>,
    pub enemies: Vec<Enemy>,
    pub stars: Vec<Star>,
    pub goal: Goal,
    pub end_cause: Option<RoundEnd>,
}

impl ClimbState {
    /// A state with no stage, used before `init`.
    pub(crate) fn empty(seed: u64) -> Self {
        Self {
            phase: RoundPhase::Ready,
            seed,
            score: 0,
            high_score: 0,
            height_so_far: 0.0,
            elapsed: 0.0,
            frame: 0,
            player: Player::new(0.0, 0.0, 0.0, 0.0),
            steps: Vec::new(),
            enemies: Vec::new(),
            stars: Vec::new(),
            goal: Goal::new(0.0, 0.0, 0.0, 0.0),
            end_cause: None,
        }
    }

    fn from_stage(stage: Stage, seed: u64, high_score: u32) -> Self {
        Self {
            player: stage.player,
            steps: stage.steps,
            enemies: stage.enemies,
            stars: stage.stars,
            goal: stage.goal,
            high_score,
            ..Self::empty(seed)
        }
    }

    /// Read-only snapshot of every entity in draw order: steps, enemies,
    /// stars, goal, player.
    pub fn entity_views(&self) -> Vec<EntityView> {
        let mut views =
            Vec::with_capacity(self.steps.len() + self.enemies.len() + self.stars.len() + 2);
        views.extend(
            self.steps
                .iter()
                .map(|s| EntityView::of(s, ViewKind::Step(s.kind))),
        );
        views.extend(
            self.enemies
                .iter()
                .map(|e| EntityView::of(e, ViewKind::Enemy(e.kind))),
        );
        views.extend(self.stars.iter().map(|s| EntityView::of(s, ViewKind::Star)));
        views.push(EntityView::of(&self.goal, ViewKind::Goal));
        views.push(EntityView::of(
            &self.player,
            ViewKind::Player(self.player.motion),
        ));
        views
    }
}

/// Termination checks, in priority order, for a playing frame.
pub fn check_game_over(state: &ClimbState, config: &ClimbConfig) -> Option<RoundEnd> {
    let y = state.player.body.y;
    if state.height_so_far - config.world.viewport_height / 2.0 > y {
        Some(RoundEnd::FellOffScreen)
    } else if state.player.vy == 0.0 {
        Some(RoundEnd::Stalled)
    } else if y <= 0.0 {
        Some(RoundEnd::BelowOrigin)
    } else {
        None
    }
}

/// The vertical climb: bounce up a generated stack of steps toward the UFO.
pub struct ClimbGame {
    /// Config as constructed; per-round overrides start from this.
    base_config: ClimbConfig,
    config: ClimbConfig,
    state: ClimbState,
    rng: StdRng,
    audio: Box<dyn AudioNotifier>,
    store: Box<dyn ScoreStore>,
    paused: bool,
}

impl ClimbGame {
    /// A config that fails [`ClimbConfig::validate`] is replaced by the defaults.
    pub fn new(
        config: ClimbConfig,
        audio: Box<dyn AudioNotifier>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let config = config.validated();
        let mut game = Self {
            base_config: config.clone(),
            config,
            state: ClimbState::empty(0),
            rng: StdRng::seed_from_u64(0),
            audio,
            store,
            paused: false,
        };
        game.init(&GameConfig::default());
        game
    }

    pub fn state(&self) -> &ClimbState {
        &self.state
    }

    pub fn config(&self) -> &ClimbConfig {
        &self.config
    }

    fn start_round(&mut self) -> Vec<GameEvent> {
        self.state.phase = RoundPhase::Playing;
        tracing::info!(
            seed = self.state.seed,
            steps = self.state.steps.len(),
            high_score = self.state.high_score,
            "round started"
        );
        vec![GameEvent::RoundStarted]
    }

    fn update_playing(&mut self, dt: f32, input: &PointerInput) -> Vec<GameEvent> {
        self.state.elapsed += dt;
        self.state.frame += 1;

        physics::integrate(&mut self.state, &self.config, input.accel(), dt);

        let report = resolve_collisions(
            &mut self.state,
            &self.config,
            Collaborators {
                rng: &mut self.rng,
                audio: self.audio.as_mut(),
                store: self.store.as_mut(),
            },
        );
        let mut events = report_events(&report);

        let cause = if report.reached_goal {
            Some(RoundEnd::ReachedGoal)
        } else {
            check_game_over(&self.state, &self.config)
        };
        if let Some(cause) = cause {
            self.end_round(cause);
            events.push(GameEvent::RoundComplete { cause });
        }
        events
    }

    fn end_round(&mut self, cause: RoundEnd) {
        self.state.phase = RoundPhase::GameOver;
        self.state.end_cause = Some(cause);
        tracing::info!(
            ?cause,
            score = self.state.score,
            height = self.state.height_so_far,
            frame = self.state.frame,
            "GAMEOVER"
        );
    }
}

impl Default for ClimbGame {
    fn default() -> Self {
        Self::new(
            ClimbConfig::load(),
            Box::new(SilentNotifier),
            Box::new(MemoryScoreStore::new()),
        )
    }
}

fn report_events(report: &CollisionReport) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if let Some((idx, award)) = report.star {
        tracing::debug!(star = idx, score = award.score, "star collected");
        events.push(GameEvent::StarCollected { score: award.score });
        if let Some(high_score) = award.new_high_score {
            events.push(GameEvent::NewHighScore { high_score });
        }
    }
    if let Some((idx, vanished)) = report.landed_step {
        tracing::trace!(step = idx, vanished, "landed");
    }
    if let Some(idx) = report.stomped_enemy {
        tracing::debug!(enemy = idx, "enemy eliminated");
        events.push(GameEvent::EnemyEliminated);
    }
    if let Some(idx) = report.hit_by_enemy {
        tracing::debug!(enemy = idx, "hit from below");
        events.push(GameEvent::PlayerHit);
    }
    events
}

impl ArcadeGame for ClimbGame {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Skyhop Climb".to_string(),
            description: "Bounce up the steps, grab stars, reach the UFO!".to_string(),
        }
    }

    fn init(&mut self, config: &GameConfig) {
        self.config = self.base_config.clone();
        if let Some(value) = config.custom.get("world_height") {
            match value
                .as_f64()
                .map(|h| h as f32)
                .filter(|h| h.is_finite() && *h > 0.0 && *h <= crate::config::MAX_WORLD_HEIGHT)
            {
                Some(height) => self.config.world.height = height,
                None => tracing::warn!(%value, "Ignoring out-of-range world_height override"),
            }
        }

        self.rng = StdRng::seed_from_u64(config.seed);
        let stage = generate_stage(&self.config, &mut self.rng);
        let high_score = scoring::initial_high_score(self.store.as_ref());
        self.state = ClimbState::from_stage(stage, config.seed, high_score);
        self.paused = false;
    }

    fn update(&mut self, dt: f32, input: &PointerInput) -> Vec<GameEvent> {
        if self.paused {
            return Vec::new();
        }
        match self.state.phase {
            RoundPhase::Ready if input.just_pressed => self.start_round(),
            RoundPhase::Playing if dt.is_finite() && dt > 0.0 => self.update_playing(dt, input),
            _ => Vec::new(),
        }
    }

    arcade_game_boilerplate!(state_type: ClimbState);

    fn round_results(&self) -> RoundResult {
        RoundResult {
            score: self.state.score,
            high_score: self.state.high_score,
            cause: self.state.end_cause,
        }
    }
}
