use rand::Rng;

use skyhop_core::audio::{AudioCue, AudioNotifier};
use skyhop_core::score_store::ScoreStore;

use crate::ClimbState;
use crate::config::ClimbConfig;
use crate::entity::{Entity, Player};
use crate::scoring::{StarAward, award_star};

/// What happened during one collision pass. Indices point into the state's
/// step, enemy and star vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub reached_goal: bool,
    pub star: Option<(usize, StarAward)>,
    /// Step landed on, and whether it vanished.
    pub landed_step: Option<(usize, bool)>,
    pub stomped_enemy: Option<usize>,
    /// Enemy the player jumped into from below.
    pub hit_by_enemy: Option<usize>,
}

/// Collaborators the resolver talks to.
pub struct Collaborators<'a, R: Rng> {
    pub rng: &'a mut R,
    pub audio: &'a mut dyn AudioNotifier,
    pub store: &'a mut dyn ScoreStore,
}

/// Resolve every player overlap for one frame.
///
/// Checks run in a fixed order and each category stops at its first hit, with
/// entities visited in insertion order:
/// 1. goal: ends the pass,
/// 2. stars: first available star overlapped is collected,
/// 3. descending (`vy <= 0`): first step below the player is landed on (and
///    vanishes on a coin flip), then first enemy below the player is stomped;
///    ascending: first enemy above the player is a fatal hit.
pub fn resolve_collisions<R: Rng>(
    state: &mut ClimbState,
    config: &ClimbConfig,
    mut ctx: Collaborators<'_, R>,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    if state.player.overlaps(&state.goal) {
        report.reached_goal = true;
        return report;
    }

    if let Some(idx) = first_hit(&state.player, &state.stars, |_| true) {
        state.stars[idx].collect();
        ctx.audio
            .play(AudioCue::StarCollected, config.audio.star_volume);
        let award = award_star(&mut state.score, &mut state.high_score, ctx.store);
        report.star = Some((idx, award));
    }

    let player_y = state.player.body.y;
    if state.player.is_descending() {
        if let Some(idx) = first_hit(&state.player, &state.steps, |s| player_y > s.body.y) {
            state.player.land(config.physics.jump_velocity);
            let vanished = ctx.rng.random::<f32>() > config.stage.vanish_threshold;
            if vanished {
                state.steps[idx].vanish();
            }
            report.landed_step = Some((idx, vanished));
        }

        if let Some(idx) = first_hit(&state.player, &state.enemies, |e| player_y > e.body.y) {
            state.player.land(config.physics.jump_velocity);
            state.enemies[idx].vanish();
            ctx.audio
                .play(AudioCue::EnemyEliminated, config.audio.eliminate_volume);
            report.stomped_enemy = Some(idx);
        }
    } else if let Some(idx) = first_hit(&state.player, &state.enemies, |e| player_y < e.body.y) {
        state.player.hit_enemy();
        ctx.audio
            .play(AudioCue::GameOver, config.audio.game_over_volume);
        report.hit_by_enemy = Some(idx);
    }

    report
}

/// Index of the first active entity accepted by `filter` that overlaps the player.
fn first_hit<E: Entity>(
    player: &Player,
    entities: &[E],
    filter: impl Fn(&E) -> bool,
) -> Option<usize> {
    entities
        .iter()
        .position(|e| e.is_active() && filter(e) && player.overlaps(e))
}
