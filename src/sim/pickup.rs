//! Collectibles: static coins and wandering powerups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body};
use super::collision::{snap_to_floor, wall_ahead};
use super::tile::TileGrid;
use crate::Tuning;
use crate::consts::{COIN_SIZE, POWERUP_SIZE, VIEW_HEIGHT};

/// A coin hanging in place; no physics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(COIN_SIZE))
    }
}

/// Powerup lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerupState {
    #[default]
    Active,
    Collected,
    /// Left the world without being collected
    Expired,
}

/// A powerup that slides along floors and bounces off walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub body: Body,
    pub state: PowerupState,
}

impl Powerup {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(pos, Vec2::splat(POWERUP_SIZE));
        body.vel.x = tuning.powerup_speed;
        Self {
            body,
            state: PowerupState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == PowerupState::Active
    }

    pub fn update(&mut self, grid: &TileGrid, tuning: &Tuning) {
        if !self.is_active() {
            return;
        }
        let body = &mut self.body;

        body.apply_gravity(tuning.gravity, tuning.terminal_velocity);
        body.pos.y += body.vel.y;
        body.grounded = snap_to_floor(body, grid);
        if body.grounded {
            body.vel.y = 0.0;
        }

        body.pos.x += body.vel.x;
        if wall_ahead(body, grid, 0.0) {
            body.vel.x = -body.vel.x;
        }

        if body.pos.x < 0.0 || body.pos.y > VIEW_HEIGHT + tuning.powerup_fall_out_margin {
            self.state = PowerupState::Expired;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::parse_grid;

    #[test]
    fn test_slides_right_along_floor() {
        let tuning = Tuning::default();
        let grid = parse_grid(&["      ", "      ", "######"]);
        let mut powerup = Powerup::new(Vec2::new(40.0, 40.0), &tuning);
        for _ in 0..30 {
            powerup.update(&grid, &tuning);
        }
        assert!(powerup.is_active());
        assert!(powerup.body.grounded);
        assert_eq!(powerup.body.pos.y, 80.0 - POWERUP_SIZE);
        assert!(powerup.body.pos.x > 40.0);
    }

    #[test]
    fn test_bounces_off_wall() {
        let tuning = Tuning::default();
        let grid = parse_grid(&["  #", "###"]);
        let mut powerup = Powerup::new(Vec2::new(52.0, 12.0), &tuning);
        powerup.update(&grid, &tuning);
        assert!(powerup.body.vel.x < 0.0);
    }

    #[test]
    fn test_expires_off_left_edge() {
        let tuning = Tuning::default();
        let grid = parse_grid(&["   ", "###"]);
        let mut powerup = Powerup::new(Vec2::new(0.5, 12.0), &tuning);
        powerup.body.vel.x = -tuning.powerup_speed;
        powerup.update(&grid, &tuning);
        assert_eq!(powerup.state, PowerupState::Expired);

        // Expired powerups stop simulating
        let pos = powerup.body.pos;
        powerup.update(&grid, &tuning);
        assert_eq!(powerup.body.pos, pos);
    }

    #[test]
    fn test_expires_when_falling_out() {
        let tuning = Tuning::default();
        let grid = parse_grid(&["   "]);
        let mut powerup = Powerup::new(Vec2::new(40.0, 0.0), &tuning);
        let mut ticks = 0;
        while powerup.is_active() && ticks < 500 {
            powerup.update(&grid, &tuning);
            ticks += 1;
        }
        assert_eq!(powerup.state, PowerupState::Expired);
        assert!(powerup.body.pos.y > VIEW_HEIGHT);
    }

    #[test]
    fn test_coin_box() {
        let coin = Coin::new(Vec2::new(80.0, 40.0));
        assert_eq!(coin.aabb().right(), 100.0);
        assert_eq!(coin.aabb().bottom(), 60.0);
    }
}
