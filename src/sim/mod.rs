//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (storage order of entities)
//! - No rendering or platform dependencies

pub mod body;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod pickup;
pub mod player;
pub mod state;
pub mod tick;
pub mod tile;

pub use body::{Aabb, Body};
pub use camera::Camera;
pub use collision::{
    CollisionResult, QuestionBlocks, box_is_clear, floor_ahead, move_and_collide, snap_to_floor,
    wall_ahead,
};
pub use enemy::Enemy;
pub use level::{Level, LevelData, LevelPack, LevelPackError, parse_grid};
pub use pickup::{Coin, Powerup, PowerupState};
pub use player::{DamageOutcome, Player, SizeState};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Contact, TickInput, classify_contact, resolve_interactions, tick};
pub use tile::{Marker, Symbol, Tile, TileGrid};
