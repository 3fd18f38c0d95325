use crate::ClimbState;
use crate::config::{ClimbConfig, ClimbPhysicsConfig};
use crate::entity::{Enemy, Player, PlayerMotion, Step};

/// Advance every moving step and enemy, steps first.
pub fn advance_hazards(steps: &mut [Step], enemies: &mut [Enemy], world_width: f32, dt: f32) {
    for step in steps.iter_mut() {
        step.advance(dt, world_width);
    }
    for enemy in enemies.iter_mut() {
        enemy.advance(dt, world_width);
    }
}

/// Re-arm the jump when the player stands on the ground line.
///
/// Only heights in `(0, ground_line]` count: a player at or below the origin
/// has fallen out of the world and is left for the round to end.
pub fn ground_rearm(player: &mut Player, physics: &ClimbPhysicsConfig) -> bool {
    let y = player.body.y;
    if y > 0.0 && y <= physics.ground_line {
        player.land(physics.jump_velocity);
        true
    } else {
        false
    }
}

/// Integrate the player for one frame.
///
/// `accel` comes from the pointer (`+5` left half, `-5` right half); the
/// horizontal velocity is `-accel / 10 * move_velocity`. Vertical velocity never
/// exceeds the jump velocity. Horizontal position wraps around the world.
pub fn tick_player(
    player: &mut Player,
    accel: f32,
    physics: &ClimbPhysicsConfig,
    world_width: f32,
    dt: f32,
) {
    let accel = if accel.is_finite() { accel } else { 0.0 };

    player.vy = (player.vy + physics.gravity * dt).min(physics.jump_velocity);
    player.vx = -accel / 10.0 * physics.move_velocity;

    player.body.x += player.vx * dt;
    player.body.y += player.vy * dt;

    player.motion = if player.vy > 0.0 {
        PlayerMotion::Jump
    } else {
        PlayerMotion::Fall
    };

    let half_w = player.body.width / 2.0;
    if player.body.x + half_w < 0.0 {
        player.body.x = world_width - half_w;
    } else if player.body.x + half_w > world_width {
        player.body.x = 0.0;
    }
}

/// Motion phase of a playing frame: hazards, ground check, player, water mark.
pub fn integrate(state: &mut ClimbState, config: &ClimbConfig, accel: f32, dt: f32) {
    let world_width = config.world.width;
    advance_hazards(&mut state.steps, &mut state.enemies, world_width, dt);

    ground_rearm(&mut state.player, &config.physics);
    tick_player(&mut state.player, accel, &config.physics, world_width, dt);

    state.height_so_far = state.height_so_far.max(state.player.body.y);
}
