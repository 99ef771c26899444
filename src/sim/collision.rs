//! Tile-grid collision for axis-aligned bodies
//!
//! Moving bodies resolve horizontal displacement completely before vertical
//! displacement. Resolving both axes at once catches boxes on tile corners, so
//! [`move_and_collide`] is the only entry point the player uses.

use std::ops::RangeInclusive;

use super::body::{Aabb, Body};
use super::tile::{Tile, TileGrid};
use crate::cell_of;
use crate::consts::{EDGE_EPSILON, TILE};

/// How upward contact treats question blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionBlocks {
    /// Convert to a plain block and report the strike (player only)
    Strike,
    /// Treat as an ordinary solid
    Solid,
}

/// Result of resolving one axis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Whether a solid tile stopped the body
    pub hit: bool,
    /// Question blocks converted by this resolution, as `(row, col)`
    pub struck: Vec<(usize, usize)>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }

    fn merge(mut self, other: CollisionResult) -> Self {
        self.hit |= other.hit;
        self.struck.extend(other.struck);
        self
    }
}

/// Grid rows and columns overlapped by a box.
///
/// Trailing edges are pulled in by `EDGE_EPSILON` so a box that exactly touches
/// a cell boundary does not claim the neighbouring cell.
pub fn overlapped_cells(aabb: &Aabb) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
    let rows = cell_of(aabb.top())..=cell_of(aabb.bottom() - EDGE_EPSILON);
    let cols = cell_of(aabb.left())..=cell_of(aabb.right() - EDGE_EPSILON);
    (rows, cols)
}

/// Whether a box overlaps no solid tile
pub fn box_is_clear(aabb: &Aabb, grid: &TileGrid) -> bool {
    let (rows, cols) = overlapped_cells(aabb);
    rows.into_iter()
        .all(|row| cols.clone().all(|col| !grid.solid_at(row, col)))
}

/// Push a body out of solid tiles along x, based on its horizontal velocity
pub fn resolve_horizontal(body: &mut Body, grid: &TileGrid) -> CollisionResult {
    let (rows, cols) = overlapped_cells(&body.aabb());
    let mut result = CollisionResult::miss();

    for row in rows {
        for col in cols.clone() {
            if !grid.solid_at(row, col) {
                continue;
            }
            let tile_x = col as f32 * TILE;
            // Velocity is zeroed on contact, so only the first solid cell applies
            if body.vel.x > 0.0 {
                body.pos.x = tile_x - body.size.x;
                body.vel.x = 0.0;
                result.hit = true;
            } else if body.vel.x < 0.0 {
                body.pos.x = tile_x + TILE;
                body.vel.x = 0.0;
                result.hit = true;
            }
        }
    }

    result
}

/// Push a body out of solid tiles along y, based on its vertical velocity.
///
/// Landing sets `grounded`; the caller clears it before moving.
pub fn resolve_vertical(
    body: &mut Body,
    grid: &mut TileGrid,
    question_blocks: QuestionBlocks,
) -> CollisionResult {
    let (rows, cols) = overlapped_cells(&body.aabb());
    let mut result = CollisionResult::miss();

    for row in rows {
        for col in cols.clone() {
            let tile = grid.get(row, col);
            if !tile.is_solid() {
                continue;
            }
            let tile_y = row as f32 * TILE;
            if body.vel.y > 0.0 {
                body.pos.y = tile_y - body.size.y;
                body.vel.y = 0.0;
                body.grounded = true;
                result.hit = true;
            } else if body.vel.y < 0.0 {
                body.pos.y = tile_y + TILE;
                body.vel.y = 0.0;
                result.hit = true;
                // Spent blocks are plain blocks, so a second strike finds nothing to convert
                if tile == Tile::Question && question_blocks == QuestionBlocks::Strike {
                    grid.set(row, col, Tile::Block);
                    result.struck.push((row as usize, col as usize));
                }
            }
        }
    }

    result
}

/// Apply one tick of velocity: move and resolve x, then move and resolve y
pub fn move_and_collide(
    body: &mut Body,
    grid: &mut TileGrid,
    question_blocks: QuestionBlocks,
) -> CollisionResult {
    body.pos.x += body.vel.x;
    let horizontal = resolve_horizontal(body, grid);

    body.pos.y += body.vel.y;
    body.grounded = false;
    let vertical = resolve_vertical(body, grid, question_blocks);

    horizontal.merge(vertical)
}

/// Rest a body on the solid tile containing its bottom edge, sampled under its
/// horizontal center. Returns true if the body was snapped.
pub fn snap_to_floor(body: &mut Body, grid: &TileGrid) -> bool {
    let row = cell_of(body.bottom());
    let col = cell_of(body.center_x());
    if grid.solid_at(row, col) {
        body.pos.y = row as f32 * TILE - body.size.y;
        true
    } else {
        false
    }
}

/// Whether a solid tile sits `probe` units beyond the leading edge, level with
/// the body's vertical midpoint
pub fn wall_ahead(body: &Body, grid: &TileGrid, probe: f32) -> bool {
    let x = if body.vel.x > 0.0 {
        body.pos.x + body.size.x + probe
    } else {
        body.pos.x - probe
    };
    grid.solid_at(cell_of(body.center_y()), cell_of(x))
}

/// Whether there is floor `probe` units below the leading foot
pub fn floor_ahead(body: &Body, grid: &TileGrid, probe: f32) -> bool {
    grid.solid_at(cell_of(body.bottom() + probe), cell_of(body.leading_edge()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::parse_grid;
    use glam::Vec2;
    use proptest::prelude::*;

    fn player_box(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(28.0, 34.0))
    }

    #[test]
    fn test_overlapped_cells_exclude_touching_neighbour() {
        let aabb = Aabb::new(Vec2::new(12.0, 6.0), Vec2::new(28.0, 34.0));
        let (rows, cols) = overlapped_cells(&aabb);
        assert_eq!(rows, 0..=0);
        assert_eq!(cols, 0..=0);

        let aabb = Aabb::new(Vec2::new(-5.0, 30.0), Vec2::new(28.0, 34.0));
        let (rows, cols) = overlapped_cells(&aabb);
        assert_eq!(rows, 0..=1);
        assert_eq!(cols, -1..=0);
    }

    #[test]
    fn test_box_is_clear() {
        let grid = parse_grid(&["   ", "## ", "   "]);
        assert!(box_is_clear(&Aabb::new(Vec2::new(86.0, 40.0), Vec2::new(28.0, 34.0)), &grid));
        assert!(!box_is_clear(&Aabb::new(Vec2::new(46.0, 68.0), Vec2::new(28.0, 52.0)), &grid));
        // Touching the block's bottom face is not an overlap
        assert!(box_is_clear(&Aabb::new(Vec2::new(46.0, 80.0), Vec2::new(28.0, 34.0)), &grid));
    }

    #[test]
    fn test_moving_right_into_wall() {
        let grid = parse_grid(&["  #"]);
        let mut body = player_box(50.0, 0.0);
        body.vel.x = 4.5;
        body.pos.x += body.vel.x;
        let result = resolve_horizontal(&mut body, &grid);
        assert!(result.hit);
        assert_eq!(body.pos.x + body.size.x, 80.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_moving_left_into_wall() {
        let grid = parse_grid(&["#  "]);
        let mut body = player_box(42.0, 0.0);
        body.vel.x = -4.5;
        body.pos.x += body.vel.x;
        let result = resolve_horizontal(&mut body, &grid);
        assert!(result.hit);
        assert_eq!(body.pos.x, 40.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_landing_sets_grounded() {
        let mut grid = parse_grid(&["   ", "###"]);
        let mut body = player_box(10.0, 4.0);
        body.vel.y = 5.0;
        let result = move_and_collide(&mut body, &mut grid, QuestionBlocks::Strike);
        assert!(result.hit);
        assert!(body.grounded);
        assert_eq!(body.bottom(), 40.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_standing_still_stays_grounded() {
        let mut grid = parse_grid(&["   ", "###"]);
        let mut body = player_box(10.0, 6.0);
        for _ in 0..10 {
            body.apply_gravity(0.55, 14.0);
            move_and_collide(&mut body, &mut grid, QuestionBlocks::Strike);
            assert!(body.grounded);
            assert_eq!(body.pos.y, 6.0);
        }
    }

    #[test]
    fn test_question_block_strikes_once() {
        let mut grid = parse_grid(&["?", " ", " "]);
        let mut body = player_box(6.0, 42.0);
        body.vel.y = -12.0;
        let first = move_and_collide(&mut body, &mut grid, QuestionBlocks::Strike);
        assert_eq!(first.struck, vec![(0, 0)]);
        assert_eq!(body.pos.y, 40.0);
        assert_eq!(grid.get(0, 0), Tile::Block);

        body.pos.y = 42.0;
        body.vel.y = -12.0;
        let second = move_and_collide(&mut body, &mut grid, QuestionBlocks::Strike);
        assert!(second.hit);
        assert!(second.struck.is_empty());
    }

    #[test]
    fn test_question_block_is_plain_solid_for_non_players() {
        let mut grid = parse_grid(&["?", " "]);
        let mut body = Body::new(Vec2::new(6.0, 42.0), Vec2::new(28.0, 28.0));
        body.vel.y = -6.0;
        let result = move_and_collide(&mut body, &mut grid, QuestionBlocks::Solid);
        assert!(result.hit);
        assert!(result.struck.is_empty());
        assert_eq!(grid.get(0, 0), Tile::Question);
    }

    #[test]
    fn test_corner_resolves_horizontal_first() {
        // Diagonal approach onto the top-left corner of a lone block lands on it
        let mut grid = parse_grid(&["  ", " #"]);
        let mut body = player_box(10.0, 0.0);
        body.vel = Vec2::new(8.0, 10.0);
        move_and_collide(&mut body, &mut grid, QuestionBlocks::Strike);
        assert_eq!(body.pos.x, 18.0);
        assert_eq!(body.bottom(), 40.0);
        assert!(body.grounded);
        assert_eq!(body.vel.x, 8.0);
    }

    #[test]
    fn test_edges_of_grid_are_open() {
        let mut grid = parse_grid(&["##"]);
        let mut body = player_box(-10.0, 50.0);
        body.vel = Vec2::new(-5.0, 5.0);
        let result = move_and_collide(&mut body, &mut grid, QuestionBlocks::Strike);
        assert!(!result.hit);
        assert_eq!(body.pos, Vec2::new(-15.0, 55.0));
    }

    #[test]
    fn test_snap_to_floor() {
        let grid = parse_grid(&["   ", "###"]);
        let mut body = Body::new(Vec2::new(4.0, 13.0), Vec2::new(32.0, 28.0));
        assert!(snap_to_floor(&mut body, &grid));
        assert_eq!(body.bottom(), 40.0);
        // Resting exactly on the floor stays put
        assert!(snap_to_floor(&mut body, &grid));
        assert_eq!(body.bottom(), 40.0);

        let mut airborne = Body::new(Vec2::new(4.0, 0.0), Vec2::new(32.0, 28.0));
        assert!(!snap_to_floor(&mut airborne, &grid));
    }

    #[test]
    fn test_sensors() {
        let grid = parse_grid(&["   #", "## #"]);
        let mut body = Body::new(Vec2::new(4.0, 12.0), Vec2::new(32.0, 28.0));
        body.vel.x = 1.2;
        assert!(!wall_ahead(&body, &grid, 2.0));
        assert!(floor_ahead(&body, &grid, 2.0));

        body.pos.x = 48.0;
        assert!(!floor_ahead(&body, &grid, 2.0));
        assert!(!wall_ahead(&body, &grid, 2.0));

        body.pos.x = 86.0;
        assert!(wall_ahead(&body, &grid, 2.0));

        body.pos.x = 48.0;
        body.vel.x = -1.2;
        assert!(floor_ahead(&body, &grid, 2.0));
        assert!(!wall_ahead(&body, &grid, 2.0));
    }

    proptest! {
        #[test]
        fn prop_horizontal_contact_is_exact(
            start in 0.0f32..11.0,
            speed in 0.1f32..14.0,
            y in 0.0f32..6.0,
        ) {
            // Wall occupies column 2 (x = 80..120) in both rows the box spans
            let grid = parse_grid(&["  #", "  #"]);
            let mut body = player_box(40.0 + start, y);
            body.vel.x = speed;
            body.pos.x += speed;
            let right = body.pos.x + body.size.x;
            prop_assume!((right - 80.0).abs() > EDGE_EPSILON * 2.0);
            let crossed = right > 80.0;
            let result = resolve_horizontal(&mut body, &grid);
            prop_assert_eq!(result.hit, crossed);
            if crossed {
                prop_assert_eq!(body.pos.x + body.size.x, 80.0);
                prop_assert_eq!(body.vel.x, 0.0);
            }
        }
    }
}
