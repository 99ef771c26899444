//! Fixed timestep simulation tick
//!
//! Per-tick order while playing: timers, player, camera, enemies, powerups,
//! then interactions. Interactions read post-move positions, so the order is
//! part of the game rules.

use super::body::Body;
use super::pickup::PowerupState;
use super::player::DamageOutcome;
use super::state::{GameEvent, GamePhase, GameState};
use crate::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump fires on the press, not while held
    pub jump: bool,
    /// Confirm: start from title, advance after victory, retry after death
    pub start: bool,
    /// Retry after death
    pub restart: bool,
}

/// How a player-enemy overlap resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player lands on the enemy and kills it
    Stomp,
    /// Enemy hurts the player
    Hit,
}

/// Classify an overlapping player/enemy pair. Exactly one outcome per pair.
pub fn classify_contact(player: &Body, enemy: &Body, tuning: &Tuning) -> Contact {
    let falling = player.vel.y > tuning.stomp_min_fall_speed;
    let above = player.bottom() < enemy.center_y() + tuning.stomp_tolerance;
    if falling && above {
        Contact::Stomp
    } else {
        Contact::Hit
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;
    advance_timers(state);

    match state.phase {
        GamePhase::Title => {
            if input.start {
                state.start_game();
            }
            return;
        }
        GamePhase::Victory => {
            if input.start {
                state.advance_level();
            }
            return;
        }
        GamePhase::GameOver => {
            // Refused while the lockout is running
            if input.start || input.restart {
                state.restart_level();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    let level_width = state.level.width();
    let step = state.level.player.update(
        input,
        &mut state.level.grid,
        level_width,
        &state.tuning,
    );
    if step.jumped {
        state.events.push(GameEvent::Jumped);
    }
    for (row, col) in step.struck {
        log::debug!("Question block struck at ({row}, {col})");
        state.award(state.tuning.question_block_reward);
        state.events.push(GameEvent::BlockStruck { row, col });
    }
    if step.fell_out {
        log::debug!("Player fell out of the world");
        state.kill_player();
        return;
    }

    state
        .camera
        .follow(state.level.player.body.pos.x, level_width, &state.tuning);

    for enemy in &mut state.level.enemies {
        enemy.update(&state.level.grid, &state.tuning);
    }
    for powerup in &mut state.level.powerups {
        powerup.update(&state.level.grid, &state.tuning);
    }

    resolve_interactions(state);
}

/// Count down every timer once per tick
fn advance_timers(state: &mut GameState) {
    state.retry_lockout = state.retry_lockout.saturating_sub(1);
    state.camera.tick_shake();

    if state.phase != GamePhase::Playing {
        return;
    }
    let player = &mut state.level.player;
    player.invulnerable_ticks = player.invulnerable_ticks.saturating_sub(1);

    for enemy in state.level.enemies.iter_mut().filter(|e| !e.alive) {
        enemy.dead_ticks += 1;
    }
    let tuning = &state.tuning;
    state.level.enemies.retain(|e| !e.faded(tuning));
}

fn in_play(state: &GameState) -> bool {
    state.phase == GamePhase::Playing && state.level.player.alive
}

/// Resolve player overlaps: enemies, coins, powerups, then the goal
pub fn resolve_interactions(state: &mut GameState) {
    resolve_enemies(state);
    resolve_coins(state);
    resolve_powerups(state);
    resolve_goal(state);
}

fn resolve_enemies(state: &mut GameState) {
    for i in 0..state.level.enemies.len() {
        if !in_play(state) {
            return;
        }
        let enemy = &state.level.enemies[i];
        let player = &state.level.player;
        if !enemy.alive || !player.body.aabb().overlaps(&enemy.body.aabb()) {
            continue;
        }

        match classify_contact(&player.body, &enemy.body, &state.tuning) {
            Contact::Stomp => {
                log::debug!("Enemy {i} stomped");
                state.level.enemies[i].kill();
                state.level.player.body.vel.y = state.tuning.stomp_bounce_velocity;
                state.award(state.tuning.stomp_reward);
                state.camera.shake(state.tuning.shake_stomp_ticks);
                state.events.push(GameEvent::EnemyStomped);
            }
            Contact::Hit => match state.level.player.take_damage(&state.tuning) {
                DamageOutcome::Ignored => {}
                DamageOutcome::Shrunk => {
                    log::debug!("Player hit by enemy {i}, shrinking");
                    state.camera.shake(state.tuning.shake_hurt_ticks);
                    state.events.push(GameEvent::PlayerHurt);
                }
                DamageOutcome::Died => {
                    log::debug!("Player killed by enemy {i}");
                    state.kill_player();
                }
            },
        }
    }
}

fn resolve_coins(state: &mut GameState) {
    if !in_play(state) {
        return;
    }
    let player_box = state.level.player.body.aabb();
    let mut collected = 0;
    for coin in &mut state.level.coins {
        if !coin.collected && player_box.overlaps(&coin.aabb()) {
            coin.collected = true;
            collected += 1;
        }
    }
    for _ in 0..collected {
        state.award(state.tuning.coin_reward);
        state.events.push(GameEvent::CoinCollected);
    }
}

fn resolve_powerups(state: &mut GameState) {
    if !in_play(state) {
        return;
    }
    let level = &mut state.level;
    for powerup in &mut level.powerups {
        if powerup.is_active() && level.player.body.aabb().overlaps(&powerup.body.aabb()) {
            powerup.state = PowerupState::Collected;
            level.player.grow(&level.grid);
            state.events.push(GameEvent::PowerupCollected);
        }
    }
}

/// Touching the goal wins the level. Only fires while playing, so repeated
/// checks after victory award nothing.
pub fn resolve_goal(state: &mut GameState) {
    if !in_play(state) {
        return;
    }
    let Some(goal) = state.level.goal_aabb() else {
        return;
    };
    if state.level.player.body.aabb().overlaps(&goal) {
        state.award(state.tuning.goal_reward);
        state.events.push(GameEvent::GoalReached);
        state.reach_goal();
    }
}
