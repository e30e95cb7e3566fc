//! Standalone motorway simulation core
//!
//! All of the grid, economy, pathfinding, and traffic logic lives here with
//! no rendering dependencies, so episodes can be driven headless from the
//! console or an external training loop.

mod building;
mod car;
mod grid;
mod pathfinder;
mod resources;
mod traffic;
mod types;
mod world;

// Re-export public types for external use
#[allow(unused_imports)]
pub use building::{Building, BuildingKind, MAX_CARS_PER_HOUSE};
#[allow(unused_imports)]
pub use car::{CarUpdateResult, SimCar, VISUAL_SMOOTHING};
#[allow(unused_imports)]
pub use grid::{GridWorld, GRID_HEIGHT, GRID_WIDTH};
#[allow(unused_imports)]
pub use pathfinder::Pathfinder;
#[allow(unused_imports)]
pub use resources::{
    ResourceKind, ResourceLedger, STARTING_BRIDGES, STARTING_MOTORWAYS, STARTING_ROADS,
    STARTING_ROUNDABOUTS, STARTING_TRAFFIC_LIGHTS, STARTING_UPGRADES,
};
#[allow(unused_imports)]
pub use traffic::{
    TrafficSimulator, CONGESTION_STUCK_THRESHOLD, GRIDLOCK_STUCK_THRESHOLD, SPAWN_INTERVAL,
    SPAWN_PROBABILITY,
};
#[allow(unused_imports)]
pub use types::{CarColor, CarId, Position, TileType, DIRECTIONS};
pub use world::{
    ActionKind, SimWorld, GRIDLOCK_CAR_LIMIT, INITIAL_BUSINESSES, INITIAL_HOUSES, MAX_STEPS,
    OBSERVATION_LEN, PLACEMENT_ATTEMPTS, RESOURCE_CRUNCH_CAR_LIMIT,
};
