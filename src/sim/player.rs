//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body};
use super::collision::{QuestionBlocks, box_is_clear, move_and_collide};
use super::tick::TickInput;
use super::tile::TileGrid;
use crate::Tuning;
use crate::consts::*;

/// Player size; big players survive one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeState {
    #[default]
    Small,
    Big,
}

impl SizeState {
    pub fn height(self) -> f32 {
        match self {
            SizeState::Small => PLAYER_HEIGHT_SMALL,
            SizeState::Big => PLAYER_HEIGHT_BIG,
        }
    }
}

/// What a hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable or already dead
    Ignored,
    /// Big player dropped to small and became invulnerable
    Shrunk,
    Died,
}

/// Side effects of one player update, applied by the orchestrator
#[derive(Debug, Clone, Default)]
pub struct PlayerStep {
    pub jumped: bool,
    /// Question blocks struck from below, as `(row, col)`
    pub struck: Vec<(usize, usize)>,
    /// Player dropped below the bottom of the world
    pub fell_out: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// +1 facing right, -1 facing left
    pub facing: i8,
    pub size: SizeState,
    /// Hits are ignored while this is non-zero
    pub invulnerable_ticks: u32,
    pub alive: bool,
    /// Walk animation phase (radians-ish, grows with distance walked)
    pub walk_phase: f32,
    /// Jump input on the previous tick, for edge detection
    jump_held: bool,
    /// Powerup collected with no headroom; grows once the big box fits
    grow_pending: bool,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT_SMALL)),
            facing: 1,
            size: SizeState::Small,
            invulnerable_ticks: 0,
            alive: true,
            walk_phase: 0.0,
            jump_held: false,
            grow_pending: false,
        }
    }

    /// Current hitbox height (depends on size)
    pub fn height(&self) -> f32 {
        self.body.size.y
    }

    /// Change size, keeping the feet where they are
    fn set_size(&mut self, size: SizeState) {
        let old_height = self.body.size.y;
        self.size = size;
        self.body.size.y = size.height();
        self.body.pos.y += old_height - self.body.size.y;
    }

    /// Whether the big hitbox fits with the feet where they are
    fn room_to_grow(&self, grid: &TileGrid) -> bool {
        let height = SizeState::Big.height();
        let head = Vec2::new(self.body.pos.x, self.body.bottom() - height);
        box_is_clear(&Aabb::new(head, Vec2::new(self.body.size.x, height)), grid)
    }

    pub fn grow_pending(&self) -> bool {
        self.grow_pending
    }

    /// Advance one tick: input, gravity, tile collision, world bounds
    pub fn update(
        &mut self,
        input: &TickInput,
        grid: &mut TileGrid,
        level_width: f32,
        tuning: &Tuning,
    ) -> PlayerStep {
        let mut step = PlayerStep::default();
        let body = &mut self.body;

        if input.left {
            body.vel.x = -tuning.move_speed;
            self.facing = -1;
        } else if input.right {
            body.vel.x = tuning.move_speed;
            self.facing = 1;
        } else {
            body.vel.x *= tuning.horizontal_decay;
            if body.vel.x.abs() < tuning.stop_threshold {
                body.vel.x = 0.0;
            }
        }

        let jump_pressed = input.jump && !self.jump_held;
        self.jump_held = input.jump;
        if jump_pressed && body.grounded {
            body.vel.y = tuning.jump_velocity;
            body.grounded = false;
            step.jumped = true;
        }

        body.apply_gravity(tuning.gravity, tuning.terminal_velocity);
        if body.vel.x.abs() > tuning.walk_cycle_min_speed {
            self.walk_phase += tuning.walk_cycle_rate;
        }

        let collision = move_and_collide(body, grid, QuestionBlocks::Strike);
        step.struck = collision.struck;

        if body.pos.x < 0.0 {
            body.pos.x = 0.0;
            body.vel.x = 0.0;
        }
        let max_x = level_width - body.size.x;
        if body.pos.x > max_x {
            body.pos.x = max_x;
            body.vel.x = 0.0;
        }

        if self.grow_pending && self.room_to_grow(grid) {
            self.grow_pending = false;
            self.set_size(SizeState::Big);
        }

        let body = &self.body;
        step.fell_out = body.pos.y > VIEW_HEIGHT + tuning.fall_out_margin;
        step
    }

    /// Apply a hit from an enemy
    pub fn take_damage(&mut self, tuning: &Tuning) -> DamageOutcome {
        if !self.alive || self.invulnerable_ticks > 0 {
            return DamageOutcome::Ignored;
        }
        match self.size {
            SizeState::Big => {
                self.set_size(SizeState::Small);
                self.invulnerable_ticks = tuning.invulnerability_ticks;
                DamageOutcome::Shrunk
            }
            SizeState::Small => {
                self.die();
                DamageOutcome::Died
            }
        }
    }

    /// Powerup effect. Under a low ceiling the growth waits until there is room.
    pub fn grow(&mut self, grid: &TileGrid) {
        if self.size == SizeState::Big {
            return;
        }
        if self.room_to_grow(grid) {
            self.grow_pending = false;
            self.set_size(SizeState::Big);
        } else {
            self.grow_pending = true;
        }
    }

    pub fn die(&mut self) {
        self.alive = false;
        self.grow_pending = false;
    }
}
