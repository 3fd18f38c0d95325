use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ClimbConfig;
use crate::entity::{Enemy, Goal, MotionKind, Player, Star, Step};

/// Everything placed at the start of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Ordered bottom to top.
    pub steps: Vec<Step>,
    pub enemies: Vec<Enemy>,
    pub stars: Vec<Star>,
    pub goal: Goal,
    pub player: Player,
}

/// Generate a stage from the world origin up to the goal height.
///
/// Steps are stacked with a gap of `max_jump_height - 0.5` minus a random
/// amount below a third of `max_jump_height`, so every gap is reachable with a
/// single jump. Each iteration consumes its draws in a fixed order (x, step
/// kind, enemy kind, star roll, star offsets, enemy roll, enemy offsets, gap),
/// which makes a seeded generator reproduce the same stage.
///
/// A config that fails [`ClimbConfig::validate`] would never reach the goal
/// height; the stage is then generated from the defaults instead.
pub fn generate_stage<R: Rng>(config: &ClimbConfig, rng: &mut R) -> Stage {
    if let Err(e) = config.validate() {
        tracing::warn!("Cannot generate stage: {e}, using default config");
        return generate_stage(&ClimbConfig::default(), rng);
    }

    let world = &config.world;
    let stage = &config.stage;
    let physics = &config.physics;

    let max_jump_height = physics.max_jump_height();
    let top = world.height - world.goal_margin;

    let mut steps = Vec::new();
    let mut enemies = Vec::new();
    let mut stars = Vec::new();

    let mut y = 0.0f32;
    while y < top {
        let x = rng.random::<f32>() * (world.width - stage.step_width);

        // Two independent kind draws, even when no enemy is placed. The same
        // threshold makes steps mostly static and enemies mostly moving.
        let step_kind = if rng.random::<f32>() > stage.moving_step_threshold {
            MotionKind::Moving
        } else {
            MotionKind::Static
        };
        let enemy_kind = if rng.random::<f32>() > stage.static_enemy_threshold {
            MotionKind::Static
        } else {
            MotionKind::Moving
        };

        let step = Step::new(
            step_kind,
            x,
            y,
            stage.step_width,
            stage.step_height,
            stage.step_velocity,
        );

        if rng.random::<f32>() > stage.star_threshold {
            let sx = step.body.x + rng.random::<f32>();
            let sy = step.body.y + stage.star_height + rng.random::<f32>() * 3.0;
            stars.push(Star::new(sx, sy, stage.star_width, stage.star_height));
        }

        if rng.random::<f32>() > stage.enemy_threshold {
            let ex = step.body.x + rng.random::<f32>();
            let ey = step.body.y + stage.enemy_height + rng.random::<f32>() * 3.0;
            enemies.push(Enemy::new(
                enemy_kind,
                ex,
                ey,
                stage.enemy_width,
                stage.enemy_height,
                stage.enemy_velocity,
            ));
        }

        steps.push(step);

        y += max_jump_height - 0.5;
        y -= rng.random::<f32>() * (max_jump_height / 3.0);
    }

    let player = Player::new(
        world.width / 2.0 - physics.player_width / 2.0,
        stage.step_height,
        physics.player_width,
        physics.player_height,
    );
    let goal = Goal::new(
        world.width / 2.0 - stage.goal_width / 2.0,
        y,
        stage.goal_width,
        stage.goal_height,
    );

    tracing::debug!(
        steps = steps.len(),
        enemies = enemies.len(),
        stars = stars.len(),
        goal_y = y,
        "stage generated"
    );

    Stage {
        steps,
        enemies,
        stars,
        goal,
        player,
    }
}

/// Vertical distance between each pair of consecutive steps.
pub fn step_gaps(steps: &[Step]) -> impl Iterator<Item = f32> + '_ {
    steps.windows(2).map(|w| w[1].body.y - w[0].body.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stage(seed: u64) -> Stage {
        generate_stage(&ClimbConfig::default(), &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn deterministic_generation() {
        assert_eq!(stage(42), stage(42), "Same seed must produce same stage");
    }

    #[test]
    fn different_seeds_different_stages() {
        assert_ne!(
            stage(42).steps,
            stage(123).steps,
            "Different seeds should produce different stages"
        );
    }

    #[test]
    fn first_step_sits_on_the_origin() {
        let s = stage(7);
        assert_eq!(s.steps[0].body.y, 0.0);
    }

    #[test]
    fn steps_fit_inside_the_world() {
        let cfg = ClimbConfig::default();
        for step in &stage(9).steps {
            assert!(step.body.x >= 0.0);
            assert!(step.body.x + step.body.width <= cfg.world.width);
        }
    }

    #[test]
    fn goal_sits_at_or_above_the_last_step() {
        let cfg = ClimbConfig::default();
        let s = stage(11);
        let last = s.steps.last().unwrap();
        assert!(s.goal.body.y > last.body.y);
        assert!(s.goal.body.y >= cfg.world.height - cfg.world.goal_margin);
        assert_eq!(
            s.goal.body.x,
            cfg.world.width / 2.0 - cfg.stage.goal_width / 2.0
        );
    }

    #[test]
    fn player_starts_centred_on_the_ground_step() {
        let cfg = ClimbConfig::default();
        let s = stage(5);
        assert_eq!(s.player.body.y, cfg.stage.step_height);
        assert_eq!(
            s.player.body.x + s.player.body.width / 2.0,
            cfg.world.width / 2.0
        );
        assert_eq!(s.player.vy, 0.0);
    }

    #[test]
    fn collectibles_hover_above_their_step() {
        let cfg = ClimbConfig::default();
        let s = stage(21);
        for star in &s.stars {
            let on_step = s.steps.iter().any(|step| {
                let dy = star.body.y - (step.body.y + cfg.stage.star_height);
                let dx = star.body.x - step.body.x;
                (0.0..=3.0).contains(&dy) && (0.0..=1.0).contains(&dx)
            });
            assert!(on_step, "star at {:?} has no step below it", star.body);
        }
    }

    #[test]
    fn short_world_still_has_one_step() {
        let mut cfg = ClimbConfig::default();
        cfg.world.height = cfg.world.goal_margin + 0.1;
        let s = generate_stage(&cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(s.steps.len(), 1);
    }

    #[test]
    fn kind_mix_roughly_follows_thresholds() {
        let mut moving = 0usize;
        let mut total = 0usize;
        for seed in 0..50 {
            for step in &stage(seed).steps {
                total += 1;
                if step.kind == MotionKind::Moving {
                    moving += 1;
                }
            }
        }
        let ratio = moving as f32 / total as f32;
        assert!(
            (0.1..0.3).contains(&ratio),
            "moving step ratio {ratio} should be near 0.2"
        );
    }

    #[test]
    fn enemies_are_mostly_moving() {
        let mut moving = 0usize;
        let mut total = 0usize;
        for seed in 0..50 {
            for enemy in &stage(seed).enemies {
                total += 1;
                if enemy.kind == MotionKind::Moving {
                    moving += 1;
                }
            }
        }
        let ratio = moving as f32 / total as f32;
        assert!(
            (0.7..0.9).contains(&ratio),
            "moving enemy ratio {ratio} should be near 0.8"
        );
    }

    #[test]
    fn unfinishable_config_generates_the_default_stage() {
        let cfg = ClimbConfig::from_toml_str("[physics]\njump_velocity = 3.0").unwrap();
        let s = generate_stage(&cfg, &mut StdRng::seed_from_u64(3));
        assert_eq!(s, stage(3));
    }

    #[test]
    fn unbounded_world_height_generates_the_default_stage() {
        let mut cfg = ClimbConfig::default();
        cfg.world.height = f32::INFINITY;
        let s = generate_stage(&cfg, &mut StdRng::seed_from_u64(4));
        assert_eq!(s, stage(4));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_gap_is_reachable(seed in any::<u64>()) {
                let cfg = ClimbConfig::default();
                let max_jump = cfg.physics.max_jump_height();
                let s = generate_stage(&cfg, &mut StdRng::seed_from_u64(seed));
                for gap in step_gaps(&s.steps) {
                    prop_assert!(gap > 0.0, "gap {} must be positive", gap);
                    prop_assert!(
                        gap <= max_jump,
                        "gap {} exceeds max jump height {}",
                        gap,
                        max_jump
                    );
                }
            }

            #[test]
            fn gaps_hold_for_custom_physics(
                seed in 0u64..500,
                gravity in -30.0f32..-6.0,
                jump in 8.0f32..16.0,
            ) {
                let mut cfg = ClimbConfig::default();
                cfg.physics.gravity = gravity;
                cfg.physics.jump_velocity = jump;
                let max_jump = cfg.physics.max_jump_height();
                let s = generate_stage(&cfg, &mut StdRng::seed_from_u64(seed));
                prop_assert!(!s.steps.is_empty());
                for gap in step_gaps(&s.steps) {
                    prop_assert!(gap <= max_jump);
                }
            }
        }
    }
}
