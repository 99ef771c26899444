//! Patrolling enemies
//!
//! Enemies walk left and right at constant speed, turning around when a wall
//! is directly ahead or when the tile under their leading foot is not solid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{floor_ahead, snap_to_floor, wall_ahead};
use super::tile::TileGrid;
use crate::Tuning;
use crate::consts::{ENEMY_HEIGHT, ENEMY_WIDTH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub alive: bool,
    /// Ticks since death, drives the fade-out
    pub dead_ticks: u32,
}

impl Enemy {
    /// Spawn at a marker cell, initially walking left
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));
        body.vel.x = -tuning.enemy_speed;
        Self {
            body,
            alive: true,
            dead_ticks: 0,
        }
    }

    /// One tick of fall, floor snap and patrol. Dead enemies do not move.
    pub fn update(&mut self, grid: &TileGrid, tuning: &Tuning) {
        if !self.alive {
            return;
        }
        let body = &mut self.body;

        // Constant descent rather than accumulated velocity
        body.vel.y = tuning.gravity * tuning.enemy_gravity_scale;
        body.pos.y += body.vel.y;
        if snap_to_floor(body, grid) {
            body.vel.y = 0.0;
            body.grounded = true;
        } else {
            body.grounded = false;
        }

        body.pos.x += body.vel.x;

        if wall_ahead(body, grid, tuning.enemy_wall_probe) {
            body.vel.x = -body.vel.x;
        }
        if !floor_ahead(body, grid, tuning.enemy_floor_probe) {
            body.vel.x = -body.vel.x;
        }
    }

    /// Killed by a stomp
    pub fn kill(&mut self) {
        self.alive = false;
        self.body.vel = Vec2::ZERO;
    }

    /// Whether a dead enemy has finished fading and can be dropped
    pub fn faded(&self, tuning: &Tuning) -> bool {
        !self.alive && self.dead_ticks > tuning.enemy_fade_ticks
    }
}
