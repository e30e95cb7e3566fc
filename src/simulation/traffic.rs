//! Per-tick traffic advancement and car spawning
//!
//! Owns the arena of active cars. Cars are keyed by a monotonically
//! increasing id in a `BTreeMap`, so a tick visits them in a deterministic
//! order and completed entries are removed by explicit erase.

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;

use super::building::{Building, BuildingKind};
use super::car::{CarUpdateResult, SimCar};
use super::grid::GridWorld;
use super::pathfinder::Pathfinder;
use super::types::{CarColor, CarId, Position};

/// Spawn checks run once every this many ticks
pub const SPAWN_INTERVAL: u32 = 5;
/// Per-house spawn probability on an eligible tick
pub const SPAWN_PROBABILITY: f32 = 0.3;
/// Stuck ticks beyond which a car contributes to the congestion penalty
pub const CONGESTION_STUCK_THRESHOLD: u32 = 10;
/// Stuck ticks beyond which a car counts as gridlocked for termination
pub const GRIDLOCK_STUCK_THRESHOLD: u32 = 20;

/// Advances active cars and spawns new ones from houses
pub struct TrafficSimulator {
    pathfinder: Pathfinder,
    cars: BTreeMap<CarId, SimCar>,
    next_car_id: u64,
    congestion_penalty: u32,
    total_spawned: u32,
    total_completed: u32,
}

impl Default for TrafficSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficSimulator {
    pub fn new() -> Self {
        Self {
            pathfinder: Pathfinder::new(),
            cars: BTreeMap::new(),
            next_car_id: 0,
            congestion_penalty: 0,
            total_spawned: 0,
            total_completed: 0,
        }
    }

    /// Clear all cars and accumulated accounting for a fresh episode
    pub fn reset(&mut self) {
        self.cars.clear();
        self.next_car_id = 0;
        self.congestion_penalty = 0;
        self.total_spawned = 0;
        self.total_completed = 0;
    }

    /// Create a car at `origin` bound for `destination`
    pub fn spawn_car(&mut self, origin: Position, destination: Position, color: CarColor) -> CarId {
        let id = CarId(self.next_car_id);
        self.next_car_id += 1;
        self.cars.insert(id, SimCar::new(id, origin, destination, color));
        self.total_spawned += 1;
        debug!(
            "spawned car {:?} at ({}, {}) bound for ({}, {})",
            id, origin.x, origin.y, destination.x, destination.y
        );
        id
    }

    /// Advance every active car by one tick
    ///
    /// Completed cars are erased at the end of the same tick, so they are
    /// never observed as completed in the next tick's input. Returns the
    /// number of completed trips, each worth one point of score.
    pub fn tick(&mut self, grid: &GridWorld) -> u32 {
        let car_ids: Vec<CarId> = self.cars.keys().copied().collect();
        let mut arrived = Vec::new();

        for car_id in car_ids {
            let Some(car) = self.cars.get_mut(&car_id) else {
                continue;
            };

            match car.advance(grid, &self.pathfinder) {
                CarUpdateResult::Arrived => arrived.push(car_id),
                CarUpdateResult::Blocked | CarUpdateResult::NoRoute => {
                    // At most one penalty per car per tick, no matter how far
                    // past the threshold it is.
                    if car.stuck_ticks > CONGESTION_STUCK_THRESHOLD {
                        self.congestion_penalty += 1;
                    }
                }
                CarUpdateResult::Moved => {}
            }
        }

        let completed = arrived.len() as u32;
        for car_id in arrived {
            self.cars.remove(&car_id);
        }
        self.total_completed += completed;
        completed
    }

    /// Run the periodic spawn check
    ///
    /// Every `SPAWN_INTERVAL` ticks, each house with spare capacity gets one
    /// spawn attempt; on success the first business of matching color (in
    /// building order) becomes the destination. Returns the number of cars
    /// spawned.
    pub fn run_spawns(&mut self, step: u32, buildings: &mut [Building], rng: &mut StdRng) -> u32 {
        if step % SPAWN_INTERVAL != 0 {
            return 0;
        }

        let mut spawned = 0;
        for house_index in 0..buildings.len() {
            if !buildings[house_index].has_spawn_capacity() {
                continue;
            }
            if rng.random::<f32>() >= SPAWN_PROBABILITY {
                continue;
            }

            let color = buildings[house_index].color;
            let origin = buildings[house_index].position;
            let destination = buildings
                .iter()
                .find(|b| b.kind == BuildingKind::Business && b.color == color)
                .map(|b| b.position);

            if let Some(destination) = destination {
                self.spawn_car(origin, destination, color);
                buildings[house_index].record_spawn();
                spawned += 1;
            }
        }
        spawned
    }

    /// The active car set, keyed by stable id
    pub fn cars(&self) -> &BTreeMap<CarId, SimCar> {
        &self.cars
    }

    pub fn active_count(&self) -> usize {
        self.cars.len()
    }

    /// Cars stuck long enough to count toward the gridlock termination rule
    pub fn gridlocked_count(&self) -> usize {
        self.cars
            .values()
            .filter(|car| car.stuck_ticks > GRIDLOCK_STUCK_THRESHOLD)
            .count()
    }

    pub fn congestion_penalty(&self) -> u32 {
        self.congestion_penalty
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    pub fn total_completed(&self) -> u32 {
        self.total_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::TileType;
    use rand::SeedableRng;

    fn corridor_grid() -> GridWorld {
        let mut grid = GridWorld::new();
        grid.set_tile(Position::new(0, 0), TileType::House).unwrap();
        for x in 1..=4 {
            grid.set_tile(Position::new(x, 0), TileType::Road).unwrap();
        }
        grid.set_tile(Position::new(5, 0), TileType::Business)
            .unwrap();
        grid
    }

    #[test]
    fn completed_cars_leave_the_arena_the_same_tick() {
        let grid = corridor_grid();
        let mut traffic = TrafficSimulator::new();
        let id = traffic.spawn_car(Position::new(0, 0), Position::new(5, 0), CarColor::Red);

        let mut completions = 0;
        for _ in 0..10 {
            completions += traffic.tick(&grid);
        }
        assert_eq!(completions, 1);
        assert!(!traffic.cars().contains_key(&id));
        assert_eq!(traffic.total_completed(), 1);
    }

    #[test]
    fn congestion_penalty_is_at_most_one_per_car_per_tick() {
        let mut grid = corridor_grid();
        let mut traffic = TrafficSimulator::new();
        traffic.spawn_car(Position::new(0, 0), Position::new(5, 0), CarColor::Red);

        // One tick to plan and move, then close the corridor ahead of the car.
        traffic.tick(&grid);
        grid.set_tile(Position::new(2, 0), TileType::Empty).unwrap();

        let blocked_ticks = CONGESTION_STUCK_THRESHOLD + 7;
        for _ in 0..blocked_ticks {
            traffic.tick(&grid);
        }
        assert_eq!(
            traffic.congestion_penalty(),
            blocked_ticks - CONGESTION_STUCK_THRESHOLD
        );
    }

    #[test]
    fn spawns_only_fire_on_interval_ticks() {
        let mut traffic = TrafficSimulator::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut buildings = vec![
            Building::new(Position::new(0, 0), CarColor::Red, BuildingKind::House),
            Building::new(Position::new(5, 0), CarColor::Red, BuildingKind::Business),
        ];

        for step in [1, 2, 3, 4, 6, 7, 99] {
            assert_eq!(traffic.run_spawns(step, &mut buildings, &mut rng), 0);
        }

        // Interval ticks may spawn; drive enough of them that at least one
        // attempt succeeds for this seed, then check the bookkeeping.
        let mut spawned = 0;
        for step in (5..=200).step_by(5) {
            spawned += traffic.run_spawns(step, &mut buildings, &mut rng);
        }
        assert!(spawned >= 1, "no spawn in 40 attempts at p=0.3");
        assert_eq!(buildings[0].cars_spawned, spawned);
        assert!(spawned <= buildings[0].max_cars);
    }

    #[test]
    fn houses_without_matching_business_spawn_nothing() {
        let mut traffic = TrafficSimulator::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut buildings = vec![
            Building::new(Position::new(0, 0), CarColor::Green, BuildingKind::House),
            Building::new(Position::new(5, 0), CarColor::Red, BuildingKind::Business),
        ];

        for step in (5..=500).step_by(5) {
            assert_eq!(traffic.run_spawns(step, &mut buildings, &mut rng), 0);
        }
        assert_eq!(buildings[0].cars_spawned, 0);
        assert_eq!(traffic.active_count(), 0);
    }
}
