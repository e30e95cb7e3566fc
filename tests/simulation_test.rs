//! Component-level behavior tests
//!
//! Exercises the pathfinder, the grid, and the placement economy through the
//! public library API.

use motorway_sim::simulation::{
    GridWorld, Pathfinder, Position, ResourceKind, SimWorld, TileType, STARTING_ROADS,
    STARTING_TRAFFIC_LIGHTS,
};

fn all_roads_grid() -> GridWorld {
    let mut grid = GridWorld::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            grid.set_tile(Position::new(x, y), TileType::Road).unwrap();
        }
    }
    grid
}

#[test]
fn shortest_route_length_matches_manhattan_distance() {
    let grid = all_roads_grid();
    let finder = Pathfinder::new();

    let pairs = [
        (Position::new(0, 0), Position::new(19, 19)),
        (Position::new(3, 7), Position::new(3, 7)),
        (Position::new(5, 5), Position::new(5, 12)),
        (Position::new(18, 1), Position::new(2, 16)),
        (Position::new(0, 19), Position::new(19, 0)),
    ];

    for (start, goal) in pairs {
        let route = finder.find_path(start, goal, &grid);
        assert_eq!(
            route.len() as i32,
            start.manhattan(&goal) + 1,
            "route {start:?} -> {goal:?}"
        );
        assert_eq!(route.first(), Some(&start));
        assert_eq!(route.last(), Some(&goal));
    }
}

#[test]
fn degenerate_route_is_a_single_cell() {
    let mut grid = GridWorld::new();
    let p = Position::new(9, 4);
    grid.set_tile(p, TileType::Road).unwrap();

    let finder = Pathfinder::new();
    assert_eq!(finder.find_path(p, p, &grid), vec![p]);
}

#[test]
fn walled_off_goal_yields_empty_route() {
    let mut grid = GridWorld::new();
    let start = Position::new(0, 0);
    let goal = Position::new(10, 10);
    grid.set_tile(start, TileType::House).unwrap();
    grid.set_tile(goal, TileType::Business).unwrap();
    // All four neighbors of the goal stay empty ground.

    let finder = Pathfinder::new();
    assert!(finder.find_path(start, goal, &grid).is_empty());
}

#[test]
fn placing_a_road_consumes_exactly_one_unit() {
    let mut world = SimWorld::new_with_seed(1);
    let pos = Position::new(3, 3);

    world.step(&[0, pos.x, pos.y]);
    assert_eq!(world.grid().tile(pos).unwrap(), TileType::Road);
    assert_eq!(
        world.resources().count(ResourceKind::Roads),
        STARTING_ROADS - 1
    );

    // Same cell again: occupied, so no further decrement.
    world.step(&[0, pos.x, pos.y]);
    assert_eq!(
        world.resources().count(ResourceKind::Roads),
        STARTING_ROADS - 1
    );
}

#[test]
fn place_remove_round_trips_restore_the_ledger() {
    let mut world = SimWorld::new_with_seed(1);
    let pos = Position::new(8, 8);

    for _ in 0..4 {
        world.step(&[0, pos.x, pos.y]);
        world.step(&[5, pos.x, pos.y]);
    }
    assert_eq!(world.grid().tile(pos).unwrap(), TileType::Empty);
    assert_eq!(world.resources().count(ResourceKind::Roads), STARTING_ROADS);
}

#[test]
fn traffic_light_converts_a_road_in_place() {
    let mut world = SimWorld::new_with_seed(1);
    let pos = Position::new(4, 9);

    // On empty ground the light is refused.
    world.step(&[4, pos.x, pos.y]);
    assert_eq!(world.grid().tile(pos).unwrap(), TileType::Empty);
    assert_eq!(
        world.resources().count(ResourceKind::TrafficLights),
        STARTING_TRAFFIC_LIGHTS
    );

    world.step(&[0, pos.x, pos.y]);
    world.step(&[4, pos.x, pos.y]);
    assert_eq!(world.grid().tile(pos).unwrap(), TileType::TrafficLight);
    assert_eq!(
        world.resources().count(ResourceKind::TrafficLights),
        STARTING_TRAFFIC_LIGHTS - 1
    );
    // The road unit stays spent; conversion does not refund it.
    assert_eq!(
        world.resources().count(ResourceKind::Roads),
        STARTING_ROADS - 1
    );
}

#[test]
fn removal_only_applies_to_roads_and_motorways() {
    use motorway_sim::simulation::{BuildingKind, CarColor};

    let mut world = SimWorld::new_with_seed(1);
    let house = Position::new(6, 6);
    world
        .add_building(house, CarColor::Red, BuildingKind::House)
        .unwrap();

    let total_before = world.resources().total();
    world.step(&[5, house.x, house.y]);
    assert_eq!(world.grid().tile(house).unwrap(), TileType::House);
    assert_eq!(world.resources().total(), total_before);
}

#[test]
fn exhausted_resource_refuses_placement() {
    let mut world = SimWorld::new_with_seed(1);

    // Only one roundabout is allocated.
    world.step(&[3, 0, 0]);
    assert_eq!(world.grid().tile(Position::new(0, 0)).unwrap(), TileType::Roundabout);
    world.step(&[3, 1, 0]);
    assert_eq!(world.grid().tile(Position::new(1, 0)).unwrap(), TileType::Empty);
    assert_eq!(world.resources().count(ResourceKind::Roundabouts), 0);
}
