use maze_rl::action_selection::{EnumActionSelection, UniformEpsilonGreed, UniformRandom};
use maze_rl::env::GridWorld;
use maze_rl::policy::QTable;
use maze_rl::{Simulation, SimulationConfig};

fn simulation(selection: EnumActionSelection, seed: u64) -> Simulation {
    let grid = GridWorld::new(&GridWorld::MAP_8X12).unwrap();
    Simulation::new(
        grid,
        QTable::new(0.4, 1.0),
        selection,
        SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        },
    )
}

#[test]
fn random_walk_learning_solves_the_maze() {
    let mut sim = simulation(EnumActionSelection::from(UniformRandom::new()), 42);
    // 625 ticks of 32 updates each: 20_000 random-walk steps
    for _ in 0..625 {
        sim.tick().unwrap();
    }

    let path = sim.replay_path(30);
    assert_eq!(path.first(), Some(&sim.grid().start()));
    assert_eq!(path.last(), Some(&sim.grid().goal()));
    assert!(path.len() <= 31);
    for pos in &path {
        assert!(
            !sim.grid().is_wall(*pos).unwrap(),
            "greedy step landed on a wall at {:?}",
            pos
        );
    }
}

#[test]
fn epsilon_greedy_variant_also_solves_the_maze() {
    let mut sim = simulation(
        EnumActionSelection::from(UniformEpsilonGreed::new(0.5)),
        7,
    );
    for _ in 0..625 {
        sim.tick().unwrap();
    }

    let path = sim.replay_path(30);
    assert_eq!(path.last(), Some(&sim.grid().goal()));
    for pos in &path {
        assert!(!sim.grid().is_wall(*pos).unwrap());
    }
}
