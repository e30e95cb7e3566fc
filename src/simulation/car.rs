//! Car movement logic
//!
//! Each car advances at most one cell per tick along a lazily computed route.
//! Routes are only recomputed when empty; a blocked car keeps waiting on its
//! existing route rather than replanning around the obstruction.

use super::grid::GridWorld;
use super::pathfinder::Pathfinder;
use super::types::{CarColor, CarId, Position};

/// Smoothing factor for the render-only interpolated coordinates
///
/// Exponential smoothing toward the current cell, not physical movement.
pub const VISUAL_SMOOTHING: f32 = 0.1;

/// Result of a car's tick indicating what happened to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarUpdateResult {
    /// Advanced one cell along its route
    Moved,
    /// The next cell on the route is not currently passable
    Blocked,
    /// Route computation found no way to the destination
    NoRoute,
    /// Reached its destination this tick
    Arrived,
}

/// A car traveling from a house to a matching business
#[derive(Debug, Clone, PartialEq)]
pub struct SimCar {
    pub id: CarId,
    pub position: Position,
    pub destination: Position,
    pub color: CarColor,
    /// Planned route, head = current cell; empty means "needs planning"
    pub route: Vec<Position>,
    /// Consecutive ticks without forward progress
    pub stuck_ticks: u32,
    pub completed: bool,
    /// Interpolated coordinates for rendering only
    pub visual_x: f32,
    pub visual_y: f32,
}

impl SimCar {
    pub fn new(id: CarId, position: Position, destination: Position, color: CarColor) -> Self {
        Self {
            id,
            position,
            destination,
            color,
            route: Vec::new(),
            stuck_ticks: 0,
            completed: false,
            visual_x: position.x as f32,
            visual_y: position.y as f32,
        }
    }

    /// Advance the car by one tick
    pub fn advance(&mut self, grid: &GridWorld, pathfinder: &Pathfinder) -> CarUpdateResult {
        if self.route.is_empty() {
            self.route = pathfinder.find_path(self.position, self.destination, grid);
            if self.route.is_empty() {
                // Unreachable destinations age the car exactly like a blocked
                // route so gridlock detection still sees it.
                self.stuck_ticks += 1;
                return CarUpdateResult::NoRoute;
            }
        }

        if self.position == self.destination {
            self.completed = true;
            return CarUpdateResult::Arrived;
        }

        if self.route.len() < 2 {
            // Stale single-cell route that no longer reaches the destination;
            // drop it and replan next tick.
            self.route.clear();
            self.stuck_ticks += 1;
            return CarUpdateResult::NoRoute;
        }

        let next = self.route[1];
        if !grid.is_passable_at(next) {
            self.stuck_ticks += 1;
            return CarUpdateResult::Blocked;
        }

        self.route.remove(0);
        self.position = next;
        self.stuck_ticks = 0;
        self.visual_x += (next.x as f32 - self.visual_x) * VISUAL_SMOOTHING;
        self.visual_y += (next.y as f32 - self.visual_y) * VISUAL_SMOOTHING;

        if self.position == self.destination {
            self.completed = true;
            CarUpdateResult::Arrived
        } else {
            CarUpdateResult::Moved
        }
    }
}
