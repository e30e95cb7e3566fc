//! The tile grid underlying the simulation
//!
//! A fixed-size row-major grid of tiles that answers bounds and passability
//! queries. Placement rules live in the episode controller; this only mutates
//! what it is asked to mutate.

use anyhow::{bail, Result};

use super::types::{Position, TileType};

/// Grid width in cells
pub const GRID_WIDTH: i32 = 20;
/// Grid height in cells
pub const GRID_HEIGHT: i32 = 20;

/// The fixed-size tile grid
#[derive(Debug, Clone)]
pub struct GridWorld {
    tiles: Vec<TileType>,
    width: i32,
    height: i32,
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GridWorld {
    pub fn new() -> Self {
        Self {
            tiles: vec![TileType::Empty; (GRID_WIDTH * GRID_HEIGHT) as usize],
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a position lies on the grid
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Read the tile at a position
    ///
    /// Callers are expected to bounds-check externally supplied coordinates
    /// before reading; an out-of-bounds read is an error here.
    pub fn tile(&self, pos: Position) -> Result<TileType> {
        if !self.in_bounds(pos) {
            bail!("position ({}, {}) is out of bounds", pos.x, pos.y);
        }
        Ok(self.tiles[self.index(pos)])
    }

    /// Overwrite the tile at a position
    pub fn set_tile(&mut self, pos: Position, tile: TileType) -> Result<()> {
        if !self.in_bounds(pos) {
            bail!("position ({}, {}) is out of bounds", pos.x, pos.y);
        }
        let index = self.index(pos);
        self.tiles[index] = tile;
        Ok(())
    }

    /// The movement query: can a car enter this cell?
    ///
    /// Out-of-bounds cells are simply not passable, so movement code can ask
    /// about any neighbor without bounds-checking first.
    pub fn is_passable_at(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.tiles[self.index(pos)].is_passable()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.tiles.fill(TileType::Empty);
    }

    /// Row-major view of all tiles, for observation encoding and rendering
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = GridWorld::new();
        assert_eq!(grid.tiles().len(), 400);
        assert!(grid.tiles().iter().all(|&t| t == TileType::Empty));
    }

    #[test]
    fn out_of_bounds_reads_fail() {
        let grid = GridWorld::new();
        assert!(grid.tile(Position::new(-1, 0)).is_err());
        assert!(grid.tile(Position::new(0, 20)).is_err());
        assert!(grid.tile(Position::new(19, 19)).is_ok());
    }

    #[test]
    fn set_tile_round_trips() {
        let mut grid = GridWorld::new();
        let pos = Position::new(4, 7);
        grid.set_tile(pos, TileType::Road).unwrap();
        assert_eq!(grid.tile(pos).unwrap(), TileType::Road);
        assert!(grid.is_passable_at(pos));
        grid.clear();
        assert_eq!(grid.tile(pos).unwrap(), TileType::Empty);
    }

    #[test]
    fn out_of_bounds_is_not_passable() {
        let grid = GridWorld::new();
        assert!(!grid.is_passable_at(Position::new(20, 0)));
        assert!(!grid.is_passable_at(Position::new(0, -1)));
    }
}
