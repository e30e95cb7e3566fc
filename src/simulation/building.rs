//! Building types for the motorway simulation
//!
//! Houses spawn cars toward businesses of the same color. Buildings are
//! created only during episode reset and never move or change color; the
//! spawn counter is the only mutable field.

use super::types::{CarColor, Position, TileType};

/// Maximum number of cars a single house may spawn per episode
pub const MAX_CARS_PER_HOUSE: u32 = 5;

/// Whether a building emits cars or receives them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingKind {
    House,
    Business,
}

impl BuildingKind {
    /// The tile this building occupies on the grid
    pub fn tile(self) -> TileType {
        match self {
            BuildingKind::House => TileType::House,
            BuildingKind::Business => TileType::Business,
        }
    }
}

/// A house or business placed on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub position: Position,
    pub color: CarColor,
    pub kind: BuildingKind,
    /// Cars spawned so far (houses only; stays 0 for businesses)
    pub cars_spawned: u32,
    pub max_cars: u32,
}

impl Building {
    pub fn new(position: Position, color: CarColor, kind: BuildingKind) -> Self {
        Self {
            position,
            color,
            kind,
            cars_spawned: 0,
            max_cars: MAX_CARS_PER_HOUSE,
        }
    }

    /// Whether this house still has room under its spawn cap
    pub fn has_spawn_capacity(&self) -> bool {
        self.kind == BuildingKind::House && self.cars_spawned < self.max_cars
    }

    pub fn record_spawn(&mut self) {
        self.cars_spawned += 1;
    }
}
