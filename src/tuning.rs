//! Data-driven game balance
//!
//! Every speed is in world units per tick and every duration is in ticks.
//! Missing JSON fields fall back to the defaults below, so a tuning file only
//! needs to name what it changes.

use serde::{Deserialize, Serialize};

use crate::consts::VIEW_WIDTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player movement ===
    /// Downward acceleration applied every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Horizontal velocity multiplier per tick with no direction held
    pub horizontal_decay: f32,
    /// Decayed horizontal speed below this snaps to zero
    pub stop_threshold: f32,
    /// Maximum fall speed
    pub terminal_velocity: f32,
    /// Walk-cycle phase advance per tick while moving
    pub walk_cycle_rate: f32,
    /// Minimum horizontal speed that advances the walk cycle
    pub walk_cycle_min_speed: f32,
    /// Distance below the viewport at which the player is lost
    pub fall_out_margin: f32,

    // === Enemy patrol ===
    pub enemy_speed: f32,
    /// Enemies descend at `gravity * enemy_gravity_scale` per tick
    pub enemy_gravity_scale: f32,
    /// How far past the leading edge the wall sensor looks
    pub enemy_wall_probe: f32,
    /// How far below the feet the ledge sensor looks
    pub enemy_floor_probe: f32,
    /// Ticks a stomped enemy lingers before removal
    pub enemy_fade_ticks: u32,

    // === Powerups ===
    pub powerup_speed: f32,
    pub powerup_fall_out_margin: f32,

    // === Combat ===
    /// Player must be falling faster than this to stomp
    pub stomp_min_fall_speed: f32,
    /// Player feet may sit this far below an enemy's midpoint and still stomp
    pub stomp_tolerance: f32,
    /// Vertical velocity given to the player after a stomp
    pub stomp_bounce_velocity: f32,
    pub invulnerability_ticks: u32,
    /// Ticks after death before a retry is accepted
    pub retry_lockout_ticks: u32,

    // === Screen shake ===
    pub shake_hurt_ticks: u32,
    pub shake_death_ticks: u32,
    pub shake_stomp_ticks: u32,

    // === Camera ===
    /// Fraction of the remaining distance covered per tick
    pub camera_smoothing: f32,
    /// Camera keeps the player this far from the viewport's left edge
    pub camera_lead: f32,

    // === Scoring ===
    pub coin_reward: u64,
    pub question_block_reward: u64,
    pub stomp_reward: u64,
    pub goal_reward: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.55,
            jump_velocity: -12.0,
            move_speed: 4.5,
            horizontal_decay: 0.65,
            stop_threshold: 0.3,
            terminal_velocity: 14.0,
            walk_cycle_rate: 0.18,
            walk_cycle_min_speed: 0.5,
            fall_out_margin: 60.0,

            enemy_speed: 1.2,
            enemy_gravity_scale: 1.5,
            enemy_wall_probe: 2.0,
            enemy_floor_probe: 2.0,
            enemy_fade_ticks: 25,

            powerup_speed: 1.5,
            powerup_fall_out_margin: 40.0,

            stomp_min_fall_speed: 1.0,
            stomp_tolerance: 12.0,
            stomp_bounce_velocity: -9.0,
            invulnerability_ticks: 90,
            retry_lockout_ticks: 60,

            shake_hurt_ticks: 8,
            shake_death_ticks: 20,
            shake_stomp_ticks: 5,

            camera_smoothing: 0.12,
            camera_lead: VIEW_WIDTH / 3.0,

            coin_reward: 10,
            question_block_reward: 50,
            stomp_reward: 100,
            goal_reward: 500,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning file
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "stomp_reward": 250 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.stomp_reward, 250);
        assert_eq!(tuning.jump_velocity, Tuning::default().jump_velocity);
        assert_eq!(tuning.retry_lockout_ticks, 60);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }
}
