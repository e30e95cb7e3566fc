//! Core value types for the motorway simulation
//!
//! These are standalone types that don't depend on any rendering layer.

/// A unique identifier for a car
///
/// Monotonically increasing within an episode; ids are never reused, so a
/// completed car's id cannot reappear in the active set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarId(pub u64);

/// The kind of tile occupying one grid cell
///
/// The discriminant values are part of the observation contract: the grid
/// layer encodes each cell as `ordinal / 7.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TileType {
    Empty = 0,
    House = 1,
    Business = 2,
    Road = 3,
    Motorway = 4,
    Bridge = 5,
    Roundabout = 6,
    TrafficLight = 7,
}

impl TileType {
    /// Discriminant as used by the observation encoding
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Whether a car may occupy or traverse this tile
    ///
    /// Buildings count as passable so cars can depart houses and enter
    /// businesses; only empty ground blocks movement.
    pub fn is_passable(self) -> bool {
        !matches!(self, TileType::Empty)
    }
}

/// Color tag shared by buildings and the cars they exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

/// A cell coordinate on the grid
///
/// A pure value type; `Eq + Hash + Ord` so it can key maps and sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// L1 distance between two cells
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The cell offset by `(dx, dy)`
    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// The four orthogonal movement directions
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(2, 3);
        let b = Position::new(7, 1);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
    }

    #[test]
    fn only_empty_tiles_block_movement() {
        assert!(!TileType::Empty.is_passable());
        for tile in [
            TileType::House,
            TileType::Business,
            TileType::Road,
            TileType::Motorway,
            TileType::Bridge,
            TileType::Roundabout,
            TileType::TrafficLight,
        ] {
            assert!(tile.is_passable(), "{tile:?} should be passable");
        }
    }

    #[test]
    fn tile_ordinals_match_observation_contract() {
        assert_eq!(TileType::Empty.ordinal(), 0);
        assert_eq!(TileType::Road.ordinal(), 3);
        assert_eq!(TileType::TrafficLight.ordinal(), 7);
    }
}
