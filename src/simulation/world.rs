//! Main simulation world that ties everything together
//!
//! `SimWorld` is the episode controller and the only type an external driver
//! talks to: it validates and applies actions, advances traffic, evaluates
//! termination, and encodes observations.

use anyhow::Result;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use super::building::{Building, BuildingKind};
use super::car::SimCar;
use super::grid::{GridWorld, GRID_HEIGHT, GRID_WIDTH};
use super::resources::{ResourceKind, ResourceLedger};
use super::traffic::TrafficSimulator;
use super::types::{CarColor, CarId, Position, TileType};

/// Step budget per episode
pub const MAX_STEPS: u32 = 1000;
/// Number of houses seeded at reset
pub const INITIAL_HOUSES: usize = 3;
/// Number of businesses seeded at reset
pub const INITIAL_BUSINESSES: usize = 2;
/// Random placement attempts before giving up on a building
pub const PLACEMENT_ATTEMPTS: u32 = 100;
/// Gridlocked cars beyond this count end the episode
pub const GRIDLOCK_CAR_LIMIT: usize = 10;
/// Active cars beyond this count end the episode once resources are exhausted
pub const RESOURCE_CRUNCH_CAR_LIMIT: usize = 15;
/// Fixed length of the observation vector
pub const OBSERVATION_LEN: usize = 810;

/// Colors used when seeding initial buildings
const INITIAL_COLORS: [CarColor; 3] = [CarColor::Red, CarColor::Blue, CarColor::Green];

// Observation divisors; part of the layout contract.
const TILE_DIVISOR: f32 = 7.0;
const DENSITY_DIVISOR: f32 = 5.0;
const SCORE_DIVISOR: f32 = 100.0;
const CAR_COUNT_DIVISOR: f32 = 50.0;
const CONGESTION_DIVISOR: f32 = 100.0;

/// The placement/removal half of an action triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    PlaceRoad,
    PlaceMotorway,
    PlaceBridge,
    PlaceRoundabout,
    PlaceTrafficLight,
    Remove,
}

impl ActionKind {
    /// Map an action index to its kind; 6 (and anything else) is a pass
    pub fn from_index(index: i32) -> Option<ActionKind> {
        match index {
            0 => Some(ActionKind::PlaceRoad),
            1 => Some(ActionKind::PlaceMotorway),
            2 => Some(ActionKind::PlaceBridge),
            3 => Some(ActionKind::PlaceRoundabout),
            4 => Some(ActionKind::PlaceTrafficLight),
            5 => Some(ActionKind::Remove),
            _ => None,
        }
    }
}

/// The main simulation world
///
/// Exclusively owns all episode state; single-threaded and synchronous. The
/// only sources of change are `reset` and `step`, and determinism across runs
/// depends only on the seed.
pub struct SimWorld {
    grid: GridWorld,
    resources: ResourceLedger,
    traffic: TrafficSimulator,
    buildings: Vec<Building>,
    score: u32,
    current_step: u32,
    game_over: bool,
    rng: StdRng,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    /// Create a world seeded from OS entropy
    pub fn new() -> Self {
        let seed: u64 = rand::rng().random();
        debug!("seeding world with entropy seed {seed}");
        Self::new_with_seed(seed)
    }

    /// Create a world with a seeded RNG for reproducible episodes
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            grid: GridWorld::new(),
            resources: ResourceLedger::new(),
            traffic: TrafficSimulator::new(),
            buildings: Vec::new(),
            score: 0,
            current_step: 0,
            game_over: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Begin a fresh episode and return the initial observation
    pub fn reset(&mut self) -> Vec<f32> {
        self.grid.clear();
        self.resources.reset();
        self.traffic.reset();
        self.buildings.clear();
        self.score = 0;
        self.current_step = 0;
        self.game_over = false;

        self.spawn_initial_buildings();
        info!("episode reset: {} buildings seeded", self.buildings.len());

        self.observation()
    }

    /// Apply one action triple `(action_type, x, y)` and advance one tick
    ///
    /// A terminal episode, a malformed arity, or out-of-bounds coordinates
    /// all leave the state untouched and return the current observation.
    pub fn step(&mut self, action: &[i32]) -> Vec<f32> {
        if self.game_over || action.len() != 3 {
            return self.observation();
        }

        let pos = Position::new(action[1], action[2]);
        if !self.grid.in_bounds(pos) {
            return self.observation();
        }

        self.current_step += 1;

        if let Some(kind) = ActionKind::from_index(action[0]) {
            match self.execute_action(kind, pos) {
                Ok(applied) => debug!(
                    "step {}: {:?} at ({}, {}) {}",
                    self.current_step,
                    kind,
                    pos.x,
                    pos.y,
                    if applied { "applied" } else { "ignored" }
                ),
                Err(err) => warn!("step {}: action failed: {err:#}", self.current_step),
            }
        }

        self.score += self.traffic.tick(&self.grid);
        self.traffic
            .run_spawns(self.current_step, &mut self.buildings, &mut self.rng);

        self.game_over = self.check_game_over();
        if self.game_over {
            info!(
                "episode terminated at step {}: score {}, {} active cars, congestion {}",
                self.current_step,
                self.score,
                self.traffic.active_count(),
                self.traffic.congestion_penalty()
            );
        }

        self.observation()
    }

    /// Apply a placement or removal; false means an infeasible no-op
    fn execute_action(&mut self, kind: ActionKind, pos: Position) -> Result<bool> {
        let tile = self.grid.tile(pos)?;
        let applied = match kind {
            ActionKind::PlaceRoad => {
                self.place_on_empty(pos, tile, TileType::Road, ResourceKind::Roads)?
            }
            ActionKind::PlaceMotorway => {
                self.place_on_empty(pos, tile, TileType::Motorway, ResourceKind::Motorways)?
            }
            ActionKind::PlaceBridge => {
                self.place_on_empty(pos, tile, TileType::Bridge, ResourceKind::Bridges)?
            }
            ActionKind::PlaceRoundabout => {
                self.place_on_empty(pos, tile, TileType::Roundabout, ResourceKind::Roundabouts)?
            }
            ActionKind::PlaceTrafficLight => {
                // Converts an existing road tile in place rather than
                // consuming empty ground.
                if tile == TileType::Road && self.resources.try_place(ResourceKind::TrafficLights) {
                    self.grid.set_tile(pos, TileType::TrafficLight)?;
                    true
                } else {
                    false
                }
            }
            ActionKind::Remove => match tile {
                TileType::Road => {
                    self.grid.set_tile(pos, TileType::Empty)?;
                    self.resources.refund(ResourceKind::Roads);
                    true
                }
                TileType::Motorway => {
                    self.grid.set_tile(pos, TileType::Empty)?;
                    self.resources.refund(ResourceKind::Motorways);
                    true
                }
                // Everything else is outside the removal economy.
                _ => false,
            },
        };
        Ok(applied)
    }

    fn place_on_empty(
        &mut self,
        pos: Position,
        current: TileType,
        tile: TileType,
        kind: ResourceKind,
    ) -> Result<bool> {
        if current != TileType::Empty || !self.resources.try_place(kind) {
            return Ok(false);
        }
        self.grid.set_tile(pos, tile)?;
        Ok(true)
    }

    fn check_game_over(&self) -> bool {
        if self.traffic.gridlocked_count() > GRIDLOCK_CAR_LIMIT {
            return true;
        }
        if self.resources.total() == 0
            && self.traffic.active_count() > RESOURCE_CRUNCH_CAR_LIMIT
        {
            return true;
        }
        self.current_step >= MAX_STEPS
    }

    fn spawn_initial_buildings(&mut self) {
        for i in 0..INITIAL_HOUSES {
            self.seed_building(INITIAL_COLORS[i], BuildingKind::House);
        }
        for i in 0..INITIAL_BUSINESSES {
            self.seed_building(INITIAL_COLORS[i], BuildingKind::Business);
        }
    }

    fn seed_building(&mut self, color: CarColor, kind: BuildingKind) {
        let Some(pos) = self.find_empty_position() else {
            warn!(
                "no empty cell for {color:?} {kind:?} after {PLACEMENT_ATTEMPTS} attempts, skipping"
            );
            return;
        };
        if let Err(err) = self.grid.set_tile(pos, kind.tile()) {
            warn!("failed to seed {color:?} {kind:?}: {err:#}");
            return;
        }
        self.buildings.push(Building::new(pos, color, kind));
    }

    /// Draw a random empty cell, retrying up to a bounded attempt count
    fn find_empty_position(&mut self) -> Option<Position> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let pos = Position::new(
                self.rng.random_range(0..GRID_WIDTH),
                self.rng.random_range(0..GRID_HEIGHT),
            );
            if matches!(self.grid.tile(pos), Ok(TileType::Empty)) {
                return Some(pos);
            }
        }
        None
    }

    /// Place a building directly; intended for scripted scenarios and tests
    pub fn add_building(
        &mut self,
        pos: Position,
        color: CarColor,
        kind: BuildingKind,
    ) -> Result<()> {
        self.grid.set_tile(pos, kind.tile())?;
        self.buildings.push(Building::new(pos, color, kind));
        Ok(())
    }

    /// Spawn a car directly; intended for scripted scenarios and tests
    pub fn spawn_car(&mut self, origin: Position, destination: Position, color: CarColor) -> CarId {
        self.traffic.spawn_car(origin, destination, color)
    }

    /// Encode the current state as a fixed-layout observation vector
    ///
    /// Layout: 400 grid ordinals / 7, 400 capped car densities / 5, 6
    /// resource fractions, then score/100, cars/50, congestion/100 and
    /// step/1000. Total length 810; element order and divisors are a
    /// compatibility contract with existing consumers.
    pub fn observation(&self) -> Vec<f32> {
        let mut observation = Vec::with_capacity(OBSERVATION_LEN);

        for tile in self.grid.tiles() {
            observation.push(tile.ordinal() as f32 / TILE_DIVISOR);
        }

        let mut density = vec![0u32; self.grid.tiles().len()];
        for car in self.traffic.cars().values() {
            if self.grid.in_bounds(car.position) {
                density[(car.position.y * self.grid.width() + car.position.x) as usize] += 1;
            }
        }
        for count in density {
            observation.push((count as f32 / DENSITY_DIVISOR).min(1.0));
        }

        for kind in ResourceKind::ALL {
            observation.push(self.resources.normalized(kind));
        }

        observation.push(self.score as f32 / SCORE_DIVISOR);
        observation.push(self.traffic.active_count() as f32 / CAR_COUNT_DIVISOR);
        observation.push(self.traffic.congestion_penalty() as f32 / CONGESTION_DIVISOR);
        observation.push(self.current_step as f32 / MAX_STEPS as f32);

        observation
    }

    // Read-only surface for an external renderer.

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn cars(&self) -> &BTreeMap<CarId, SimCar> {
        self.traffic.cars()
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn traffic(&self) -> &TrafficSimulator {
        &self.traffic
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn congestion_penalty(&self) -> u32 {
        self.traffic.congestion_penalty()
    }

    pub fn is_done(&self) -> bool {
        self.game_over
    }

    /// One-line status string for the headless driver
    pub fn summary(&self) -> String {
        format!(
            "step {} | score {} | active cars {} | congestion {} | resources left {}",
            self.current_step,
            self.score,
            self.traffic.active_count(),
            self.traffic.congestion_penalty(),
            self.resources.total()
        )
    }

    /// Draw a character map of the world for terminal output
    pub fn ascii_map(&self) -> String {
        let width = self.grid.width();
        let height = self.grid.height();
        let mut rows: Vec<Vec<char>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        match self.grid.tile(Position::new(x, y)) {
                            Ok(TileType::Empty) => '.',
                            Ok(TileType::House) => 'H',
                            Ok(TileType::Business) => 'B',
                            Ok(TileType::Road) => '#',
                            Ok(TileType::Motorway) => 'M',
                            Ok(TileType::Bridge) => '=',
                            Ok(TileType::Roundabout) => 'O',
                            Ok(TileType::TrafficLight) => 'T',
                            Err(_) => '?',
                        }
                    })
                    .collect()
            })
            .collect();

        for car in self.traffic.cars().values() {
            if self.grid.in_bounds(car.position) {
                rows[car.position.y as usize][car.position.x as usize] = 'c';
            }
        }

        let mut map = String::from(
            "Legend: H=House B=Business #=Road M=Motorway ==Bridge O=Roundabout T=Light c=Car\n",
        );
        for row in rows {
            map.extend(row);
            map.push('\n');
        }
        map
    }
}
