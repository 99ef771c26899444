//! Level data and the level loader
//!
//! Levels are authored as rows of single-character symbols:
//!
//! | symbol | meaning        |
//! |--------|----------------|
//! | `#`    | solid block    |
//! | `?`    | question block |
//! | `P`    | pipe           |
//! | `C`    | coin           |
//! | `E`    | enemy          |
//! | `S`    | powerup        |
//! | `G`    | goal           |
//! | `@`    | player spawn   |
//! | space  | empty          |
//!
//! Loading turns every marker into an entity positioned at its cell's top-left
//! corner and leaves an empty tile behind.

use std::error::Error;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::enemy::Enemy;
use super::pickup::{Coin, Powerup};
use super::player::Player;
use super::tile::{Marker, Symbol, Tile, TileGrid};
use crate::consts::{DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y, GOAL_SIZE, TILE};
use crate::{Tuning, cell_origin};

/// Symbolic level map as authored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub rows: Vec<String>,
}

impl LevelData {
    pub fn from_rows(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// An ordered set of levels played in sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPack {
    pub name: String,
    pub levels: Vec<LevelData>,
}

/// Errors from loading a level pack file
#[derive(Debug)]
pub enum LevelPackError {
    /// The file is not a valid level pack document
    Parse(serde_json::Error),
    /// The pack contains no levels
    Empty,
}

impl fmt::Display for LevelPackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid level pack: {err}"),
            Self::Empty => write!(f, "level pack contains no levels"),
        }
    }
}

impl Error for LevelPackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<serde_json::Error> for LevelPackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl LevelPack {
    /// The two hand-authored reef levels
    pub fn builtin() -> Self {
        Self {
            name: "Reef".to_string(),
            levels: vec![
                LevelData::from_rows(&LEVEL_1),
                LevelData::from_rows(&LEVEL_2),
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LevelPackError> {
        let pack: LevelPack = serde_json::from_str(json)?;
        if pack.levels.is_empty() {
            return Err(LevelPackError::Empty);
        }
        log::info!("Loaded level pack '{}' ({} levels)", pack.name, pack.levels.len());
        Ok(pack)
    }

    /// Level for a zero-based index; indices past the end wrap around
    pub fn level(&self, index: u32) -> Option<&LevelData> {
        if self.levels.is_empty() {
            return None;
        }
        self.levels.get(index as usize % self.levels.len())
    }
}

/// A live level: tile grid plus every entity spawned from its markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub grid: TileGrid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<Powerup>,
    /// Goal cell's top-left corner; a level without one cannot be won
    pub goal: Option<Vec2>,
    pub spawn: Vec2,
}

struct ParsedRows {
    tiles: Vec<Vec<Tile>>,
    markers: Vec<(Marker, usize, usize)>,
    unknown: usize,
}

fn parse_rows<S: AsRef<str>>(rows: &[S]) -> ParsedRows {
    let mut parsed = ParsedRows {
        tiles: Vec::with_capacity(rows.len()),
        markers: Vec::new(),
        unknown: 0,
    };
    for (r, row) in rows.iter().enumerate() {
        let mut tiles = Vec::with_capacity(row.as_ref().len());
        for (c, ch) in row.as_ref().chars().enumerate() {
            let tile = match Symbol::from_char(ch) {
                Symbol::Tile(tile) => tile,
                Symbol::Marker(marker) => {
                    parsed.markers.push((marker, r, c));
                    Tile::Empty
                }
                Symbol::Unknown(_) => {
                    parsed.unknown += 1;
                    Tile::Empty
                }
            };
            tiles.push(tile);
        }
        parsed.tiles.push(tiles);
    }
    parsed
}

/// Parse rows into a grid, discarding markers
pub fn parse_grid<S: AsRef<str>>(rows: &[S]) -> TileGrid {
    TileGrid::from_rows(parse_rows(rows).tiles)
}

impl Level {
    /// Build a fresh level. Never fails: odd input falls back to defaults.
    pub fn load(data: &LevelData, tuning: &Tuning) -> Self {
        let parsed = parse_rows(&data.rows);
        if parsed.unknown > 0 {
            log::warn!("{} unknown level symbols loaded as empty", parsed.unknown);
        }

        let mut enemies = Vec::new();
        let mut coins = Vec::new();
        let mut powerups = Vec::new();
        let mut goal = None;
        let mut spawn = None;

        for &(marker, row, col) in &parsed.markers {
            let pos = cell_origin(row, col);
            match marker {
                Marker::Coin => coins.push(Coin::new(pos)),
                Marker::Enemy => enemies.push(Enemy::new(pos, tuning)),
                Marker::Powerup => powerups.push(Powerup::new(pos, tuning)),
                Marker::Goal => goal = Some(pos),
                Marker::Spawn => spawn = Some(pos),
            }
        }

        let spawn = spawn.unwrap_or_else(|| {
            log::warn!("Level has no spawn marker, using default spawn");
            Vec2::new(DEFAULT_SPAWN_X, DEFAULT_SPAWN_Y)
        });

        let grid = TileGrid::from_rows(parsed.tiles);
        log::info!(
            "Level loaded: {}x{} tiles, {} enemies, {} coins, {} powerups, goal {:?}",
            grid.width(),
            grid.height(),
            enemies.len(),
            coins.len(),
            powerups.len(),
            goal
        );

        Self {
            grid,
            player: Player::new(spawn),
            enemies,
            coins,
            powerups,
            goal,
            spawn,
        }
    }

    /// Level width in world units
    pub fn width(&self) -> f32 {
        self.grid.width() as f32 * TILE
    }

    pub fn goal_aabb(&self) -> Option<Aabb> {
        self.goal
            .map(|pos| Aabb::new(pos, Vec2::splat(GOAL_SIZE)))
    }
}

const LEVEL_1: [&str; 12] = [
    "                                        ",
    "                                        ",
    "      C C C                   C C C     ",
    "      ?????           C C C   ?????     ",
    "                      ?????             ",
    "  ###        E   ###           ###      ",
    "        ##                 ##       PPG ",
    "             ###      E            PP  ",
    "  @  C          C S        C           ",
    "  E           E      E        E     E  ",
    "########################################",
    "########################################",
];

const LEVEL_2: [&str; 12] = [
    "                                        ",
    "         C C C               C C C      ",
    "         ?????               ?????      ",
    "                 C C C               G ",
    "    ###          ?????         ###   P ",
    "          ###                        P ",
    "  ##                 ###       ##    PP",
    "        E   ##  S        E              ",
    "  @  C          C         C      C E   ",
    "  E         E        E        E        ",
    "########################################",
    "########################################",
];
