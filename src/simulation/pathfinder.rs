//! Grid pathfinding for car navigation
//!
//! A* over four-directional neighbors with a Manhattan-distance heuristic and
//! a uniform move cost of 1 per passable tile. Tile kind does not affect the
//! cost: a motorway is traversed no faster than a plain road.

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::grid::GridWorld;
use super::types::{Position, DIRECTIONS};

/// Stateless grid-search service
///
/// `find_path` takes a grid snapshot and produces a route without mutating
/// anything, so it is safe to call from any site that holds the world.
#[derive(Debug, Default)]
pub struct Pathfinder;

impl Pathfinder {
    pub fn new() -> Self {
        Self
    }

    /// Shortest walkable route from `start` to `goal`, inclusive of both ends
    ///
    /// Returns an empty route when no path exists. The degenerate case
    /// `start == goal` yields the single-element route `[start]`. The start
    /// cell itself is expanded even when its tile is not passable (a car can
    /// be standing on removed infrastructure), but only passable cells may be
    /// entered.
    pub fn find_path(&self, start: Position, goal: Position, grid: &GridWorld) -> Vec<Position> {
        if !grid.in_bounds(start) || !grid.in_bounds(goal) {
            return Vec::new();
        }
        if !grid.is_passable_at(goal) && goal != start {
            return Vec::new();
        }

        let (graph, nodes) = Self::build_graph(start, grid);

        let start_node = match nodes.get(&start) {
            Some(node) => *node,
            None => return Vec::new(),
        };
        let goal_node = match nodes.get(&goal) {
            Some(node) => *node,
            None => return Vec::new(),
        };

        let result = astar(
            &graph,
            start_node,
            |node| node == goal_node,
            |edge| *edge.weight(),
            |node| graph[node].manhattan(&goal) as u32,
        );

        match result {
            Some((_, node_path)) => node_path.iter().map(|&node| graph[node]).collect(),
            None => Vec::new(),
        }
    }

    /// Build the walkability graph for one search
    ///
    /// Cells are visited row-major so the graph layout, and therefore A*'s
    /// tie-breaking among equal-cost routes, is stable for a given grid.
    fn build_graph(
        start: Position,
        grid: &GridWorld,
    ) -> (DiGraph<Position, u32>, HashMap<Position, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Position::new(x, y);
                if grid.is_passable_at(pos) || pos == start {
                    nodes.insert(pos, graph.add_node(pos));
                }
            }
        }

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Position::new(x, y);
                let Some(&from) = nodes.get(&pos) else {
                    continue;
                };
                for (dx, dy) in DIRECTIONS {
                    let neighbor = pos.offset(dx, dy);
                    if !grid.is_passable_at(neighbor) {
                        continue;
                    }
                    if let Some(&to) = nodes.get(&neighbor) {
                        graph.add_edge(from, to, 1);
                    }
                }
            }
        }

        (graph, nodes)
    }
}
