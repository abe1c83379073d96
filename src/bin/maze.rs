use plotters::style::BLUE;
use structopt::StructOpt;

use maze_rl::action_selection::{EnumActionSelection, UniformEpsilonGreed, UniformRandom};
use maze_rl::env::{Direction, EnvError, GridWorld};
use maze_rl::policy::QTable;
use maze_rl::utils::{argmax, moving_average, plot_moving_average};
use maze_rl::{Simulation, SimulationConfig};

/// Train a tabular Q-learning agent on a fixed maze, then replay the learned route
#[derive(StructOpt, Debug)]
#[structopt(name = "maze_rl")]
struct Cli {
    /// Number of learning ticks (each tick runs a burst of update steps)
    #[structopt(long = "learn_ticks", short = "n", default_value = "1000")]
    learn_ticks: usize,

    /// Q-learning update steps per learning tick
    #[structopt(long = "steps_per_tick", default_value = "32")]
    steps_per_tick: usize,

    /// Learning rate of the update rule
    #[structopt(long = "learning_rate", default_value = "0.4")]
    learning_rate: f64,

    /// Discount factor for the temporal difference target
    #[structopt(long = "discount_factor", default_value = "1.0")]
    discount_factor: f64,

    /// Ticks to wait between two greedy replay moves
    #[structopt(long = "replay_cadence", default_value = "40")]
    replay_cadence: u32,

    /// Exploration ratio; when omitted the learner explores uniformly at random
    #[structopt(long = "epsilon")]
    epsilon: Option<f64>,

    /// Seed for reproducible runs
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Maximum number of greedy steps during the replay
    #[structopt(long = "max_replay_steps", default_value = "100")]
    max_replay_steps: usize,

    /// Print the maze after each greedy replay step
    #[structopt(long = "show_route")]
    show_route: bool,

    /// Print the learned values for every free cell and direction
    #[structopt(long = "show_values")]
    show_values: bool,

    /// Moving average window for the training error plot
    #[structopt(long = "moving_average_window", default_value = "100")]
    moving_average_window: usize,

    /// Plot the moving average of the training error to a PNG file
    #[structopt(long = "plot_error")]
    plot_error: bool,
}

fn main() -> Result<(), EnvError> {
    let cli: Cli = Cli::from_args();

    let grid = GridWorld::new(&GridWorld::MAP_8X12)?;
    let q_table = QTable::new(cli.learning_rate, cli.discount_factor);
    let selection = match cli.epsilon {
        Some(epsilon) => EnumActionSelection::from(UniformEpsilonGreed::new(epsilon)),
        None => EnumActionSelection::from(UniformRandom::new()),
    };
    let config = SimulationConfig {
        steps_per_tick: cli.steps_per_tick,
        play_cadence: cli.replay_cadence,
        seed: cli.seed,
    };
    let mut sim = Simulation::new(grid, q_table, selection, config);

    sim.train(cli.learn_ticks)?;
    println!(
        "trained {} update steps over {} visited cells",
        sim.training_error().len(),
        sim.q_table().len()
    );

    let path = sim.replay_path(cli.max_replay_steps);
    if cli.show_route {
        for pos in &path {
            println!("{}\n", sim.grid().render(*pos));
        }
    }
    if path.last() == Some(&sim.grid().goal()) {
        println!("greedy replay reached the goal in {} steps", path.len() - 1);
    } else {
        println!(
            "greedy replay did not reach the goal within {} steps",
            cli.max_replay_steps
        );
    }

    if cli.show_values {
        for pos in sim.grid().positions() {
            if sim.grid().is_wall(pos)? {
                continue;
            }
            let row: Vec<f64> = Direction::ALL
                .iter()
                .map(|&d| sim.q_table().peek(pos, d))
                .collect();
            let best = Direction::from(argmax(row.iter()));
            let values: Vec<String> = Direction::ALL
                .iter()
                .zip(&row)
                .map(|(d, v)| format!("{:?}: {:.2}", d, v))
                .collect();
            println!("({}, {}) {} -> best {:?}", pos.x, pos.y, values.join(", "), best);
        }
    }

    if cli.plot_error {
        let ma = moving_average(
            sim.training_error().len() / cli.moving_average_window,
            sim.training_error(),
        );
        plot_moving_average(&[ma], &[&BLUE], &["training error"], "Training Error");
    }

    Ok(())
}
