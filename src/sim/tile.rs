//! Tile kinds and the per-level tile grid
//!
//! Level text is parsed into [`Symbol`]s: persistent [`Tile`]s that stay in the
//! grid, and [`Marker`]s that the level loader turns into entities and clears.

use serde::{Deserialize, Serialize};

/// A tile that lives in the grid for the level's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    /// `#`
    Block,
    /// `?` - turns into a `Block` the first time the player strikes it from below
    Question,
    /// `P`
    Pipe,
}

impl Tile {
    /// Whether kinematic bodies collide with this tile
    pub fn is_solid(self) -> bool {
        match self {
            Tile::Empty => false,
            Tile::Block | Tile::Question | Tile::Pipe => true,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Block => '#',
            Tile::Question => '?',
            Tile::Pipe => 'P',
        }
    }
}

/// A spawn point consumed at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    /// `C`
    Coin,
    /// `E`
    Enemy,
    /// `S`
    Powerup,
    /// `G`
    Goal,
    /// `@`
    Spawn,
}

/// One character of level text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Tile(Tile),
    Marker(Marker),
    /// Anything outside the legend; loads as empty
    Unknown(char),
}

impl Symbol {
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Symbol::Tile(Tile::Empty),
            '#' => Symbol::Tile(Tile::Block),
            '?' => Symbol::Tile(Tile::Question),
            'P' => Symbol::Tile(Tile::Pipe),
            'C' => Symbol::Marker(Marker::Coin),
            'E' => Symbol::Marker(Marker::Enemy),
            'S' => Symbol::Marker(Marker::Powerup),
            'G' => Symbol::Marker(Marker::Goal),
            '@' => Symbol::Marker(Marker::Spawn),
            other => Symbol::Unknown(other),
        }
    }
}

/// Rectangular grid of tiles, indexed `[row][col]` with row 0 at the top.
///
/// Dimensions are fixed at construction. Queries outside the grid (including
/// negative indices) see `Tile::Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from possibly ragged rows; short rows are padded with empty tiles
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, Tile::Empty);
            tiles.extend(row);
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// Whether `(row, col)` lies inside the grid
    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    pub fn get(&self, row: i32, col: i32) -> Tile {
        self.index(row, col)
            .map(|i| self.tiles[i])
            .unwrap_or(Tile::Empty)
    }

    pub fn solid_at(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_solid()
    }

    /// Overwrite a tile in place. Returns false (and changes nothing) outside the grid.
    pub fn set(&mut self, row: i32, col: i32, tile: Tile) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        // chunks() panics on a zero chunk size
        self.tiles.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(rows: &[&str]) -> TileGrid {
        TileGrid::from_rows(
            rows.iter()
                .map(|r| {
                    r.chars()
                        .map(|c| match Symbol::from_char(c) {
                            Symbol::Tile(t) => t,
                            _ => Tile::Empty,
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let g = grid(&["#", "###", ""]);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert!(g.solid_at(0, 0));
        assert!(!g.solid_at(0, 2));
        assert!(g.solid_at(1, 2));
        assert!(!g.solid_at(2, 1));
    }

    #[test]
    fn test_solid_kinds() {
        assert!(!Tile::Empty.is_solid());
        assert!(Tile::Block.is_solid());
        assert!(Tile::Question.is_solid());
        assert!(Tile::Pipe.is_solid());
    }

    #[test]
    fn test_set_outside_grid_is_ignored() {
        let mut g = grid(&["##", "##"]);
        assert!(!g.set(5, 0, Tile::Empty));
        assert!(!g.set(-1, 0, Tile::Empty));
        assert!(g.set(1, 1, Tile::Empty));
        assert!(!g.solid_at(1, 1));
        assert_eq!(g.width(), 2);
        assert_eq!(g.height(), 2);
    }

    #[test]
    fn test_symbol_legend() {
        assert_eq!(Symbol::from_char('?'), Symbol::Tile(Tile::Question));
        assert_eq!(Symbol::from_char('@'), Symbol::Marker(Marker::Spawn));
        assert_eq!(Symbol::from_char('x'), Symbol::Unknown('x'));
    }

    #[test]
    fn test_contains_and_legend_chars() {
        let g = grid(&["#?P "]);
        assert!(g.contains(0, 3));
        assert!(!g.contains(0, 4));
        assert!(!g.contains(-1, 0));
        let text: String = g.rows().flatten().map(|t| t.as_char()).collect();
        assert_eq!(text, "#?P ");
        for c in text.chars() {
            assert_eq!(Symbol::from_char(c), Symbol::Tile(g.get(0, text.find(c).unwrap() as i32)));
        }
    }

    #[test]
    fn test_empty_grid() {
        let g = TileGrid::from_rows(Vec::new());
        assert_eq!(g.width(), 0);
        assert!(!g.solid_at(0, 0));
        assert_eq!(g.rows().count(), 0);
    }

    fn tile_strategy() -> impl Strategy<Value = Tile> {
        prop_oneof![
            Just(Tile::Empty),
            Just(Tile::Block),
            Just(Tile::Question),
            Just(Tile::Pipe),
        ]
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_is_never_solid(
            rows in prop::collection::vec(prop::collection::vec(tile_strategy(), 0..12), 0..12),
            row in -50i32..50,
            col in -50i32..50,
        ) {
            let g = TileGrid::from_rows(rows);
            if !g.contains(row, col) {
                prop_assert!(!g.solid_at(row, col));
                prop_assert_eq!(g.get(row, col), Tile::Empty);
            }
            let inside = row >= 0
                && col >= 0
                && (row as usize) < g.height()
                && (col as usize) < g.width();
            prop_assert_eq!(g.contains(row, col), inside);
        }
    }
}
