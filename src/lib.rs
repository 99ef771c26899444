//! Reef Runner - A tile-based side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, entities, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio and input devices are host concerns. The host polls input
//! into a [`sim::TickInput`], calls [`sim::tick`] once per frame, then draws the
//! [`sim::GameState`] and plays sounds for the drained [`sim::GameEvent`]s.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Every tunable speed is expressed per tick.
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Tile edge length in world units
    pub const TILE: f32 = 40.0;

    /// Viewport dimensions (world units)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 480.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT_SMALL: f32 = 34.0;
    pub const PLAYER_HEIGHT_BIG: f32 = 52.0;

    /// Enemy hitbox
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 28.0;

    /// Powerup hitbox
    pub const POWERUP_SIZE: f32 = 28.0;

    /// Coin hitbox (diameter of a radius-10 pearl)
    pub const COIN_SIZE: f32 = 20.0;

    /// Goal hitbox is a single tile
    pub const GOAL_SIZE: f32 = TILE;

    /// Spawn used when a level has no `@` marker (row 9, standing above ground)
    pub const DEFAULT_SPAWN_X: f32 = 60.0;
    pub const DEFAULT_SPAWN_Y: f32 = 9.0 * TILE - PLAYER_HEIGHT_SMALL;

    /// Trailing box edges are sampled this far inside the box so a box that
    /// exactly touches a cell boundary does not include the next cell.
    pub const EDGE_EPSILON: f32 = 0.001;
}

/// Grid cell index containing a world coordinate (floor division)
#[inline]
pub fn cell_of(coord: f32) -> i32 {
    (coord / consts::TILE).floor() as i32
}

/// World position of a cell's top-left corner
#[inline]
pub fn cell_origin(row: usize, col: usize) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE, row as f32 * consts::TILE)
}
