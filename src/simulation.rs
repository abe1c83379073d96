use kdam::{tqdm, BarExt};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::action_selection::{ActionSelection, EnumActionSelection};
use crate::env::{Direction, EnvError, GridWorld, Position};
use crate::policy::QTable;
use crate::utils::shuffled_argmax;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Learn,
    Play,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Q-learning update steps performed per learning tick.
    pub steps_per_tick: usize,
    /// Ticks to wait between two greedy replay moves.
    pub play_cadence: u32,
    /// RNG seed; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_tick: 32,
            play_cadence: 40,
            seed: None,
        }
    }
}

/// The driver for the two simulation phases. The engine itself stays
/// stateless aside from the value table; the tracked cell, mode, and tick
/// counter all live here.
pub struct Simulation {
    grid: GridWorld,
    q_table: QTable,
    selection: EnumActionSelection,
    current: Position,
    mode: Mode,
    play_frame: u32,
    steps_per_tick: usize,
    play_cadence: u32,
    rng: StdRng,
    training_error: Vec<f64>,
}

impl Simulation {
    pub fn new(
        grid: GridWorld,
        q_table: QTable,
        selection: EnumActionSelection,
        config: SimulationConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let current = grid.start();
        Self {
            grid,
            q_table,
            selection,
            current,
            mode: Mode::Learn,
            play_frame: 0,
            steps_per_tick: config.steps_per_tick,
            play_cadence: config.play_cadence,
            rng,
            training_error: vec![],
        }
    }

    /// One driver tick: a burst of learning steps in LEARN, a cadence-gated
    /// greedy move in PLAY.
    pub fn tick(&mut self) -> Result<(), EnvError> {
        match self.mode {
            Mode::Learn => self.learn_tick(),
            Mode::Play => {
                self.play_tick();
                Ok(())
            }
        }
    }

    fn learn_tick(&mut self) -> Result<(), EnvError> {
        for _ in 0..self.steps_per_tick {
            let values = self.q_table.values(self.current);
            let direction = self.selection.get_action(&values, &mut self.rng);
            let td = self.q_table.update(&self.grid, self.current, direction)?;
            self.training_error.push(td);
            // an attempted move into a wall still updates the pair above,
            // but the tracked cell stays put
            let next = self.current.step(direction);
            if !self.grid.is_wall(next)? {
                self.current = next;
            }
        }
        Ok(())
    }

    fn play_tick(&mut self) {
        if self.play_frame < self.play_cadence {
            self.play_frame += 1;
            return;
        }
        self.play_frame = 0;
        if self.current == self.grid.goal() {
            return;
        }
        self.play_step();
    }

    // One greedy move, ties broken by a uniform shuffle. The move is
    // unconditional: the learned values are what keeps the route off walls.
    fn play_step(&mut self) {
        let values = self.q_table.values(self.current);
        let direction = Direction::from(shuffled_argmax(&values, &mut self.rng));
        self.current = self.current.step(direction);
    }

    /// The LEARN -> PLAY transition. Resets the tracked cell to the start;
    /// there is no transition back.
    pub fn start_replay(&mut self) {
        self.mode = Mode::Play;
        self.current = self.grid.start();
        self.play_frame = 0;
    }

    /// Runs `n_ticks` learning ticks behind a progress bar.
    pub fn train(&mut self, n_ticks: usize) -> Result<(), EnvError> {
        let mut pb = tqdm!(total = n_ticks);
        for _ in 0..n_ticks {
            self.learn_tick()?;
            match pb.update(1) {
                Ok(_) => (),
                Err(e) => panic!("{}", e.to_string()),
            }
        }
        Ok(())
    }

    /// Starts a replay and follows the greedy policy until the goal or the
    /// step bound, returning every visited cell including the start.
    pub fn replay_path(&mut self, max_steps: usize) -> Vec<Position> {
        self.start_replay();
        let mut path = vec![self.current];
        for _ in 0..max_steps {
            if self.current == self.grid.goal() {
                break;
            }
            self.play_step();
            path.push(self.current);
        }
        path
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn training_error(&self) -> &[f64] {
        &self.training_error
    }
}

#[cfg(test)]
mod tests {
    use crate::action_selection::UniformRandom;

    use super::*;

    fn simulation(map: &[&str], seed: u64) -> Simulation {
        let grid = GridWorld::new(map).unwrap();
        Simulation::new(
            grid,
            QTable::new(0.4, 1.0),
            EnumActionSelection::from(UniformRandom::new()),
            SimulationConfig {
                seed: Some(seed),
                ..SimulationConfig::default()
            },
        )
    }

    #[test]
    fn learn_tick_runs_a_full_burst() {
        let mut sim = simulation(&GridWorld::MAP_8X12, 1);
        sim.tick().unwrap();
        assert_eq!(sim.mode(), Mode::Learn);
        assert_eq!(sim.training_error().len(), 32);
        sim.tick().unwrap();
        assert_eq!(sim.training_error().len(), 64);
    }

    #[test]
    fn tracked_cell_never_parks_on_a_wall() {
        let mut sim = simulation(&GridWorld::MAP_8X12, 2);
        for _ in 0..50 {
            sim.tick().unwrap();
            let current = sim.current();
            assert!(!sim.grid().is_wall(current).unwrap());
        }
    }

    #[test]
    fn start_replay_resets_to_the_start() {
        let mut sim = simulation(&GridWorld::MAP_8X12, 3);
        for _ in 0..5 {
            sim.tick().unwrap();
        }
        sim.start_replay();
        assert_eq!(sim.mode(), Mode::Play);
        assert_eq!(sim.current(), sim.grid().start());
    }

    #[test]
    fn replay_moves_only_on_the_cadence_boundary() {
        let mut sim = simulation(&GridWorld::MAP_8X12, 4);
        sim.start_replay();
        let start = sim.grid().start();
        for _ in 0..40 {
            sim.tick().unwrap();
            assert_eq!(sim.current(), start);
        }
        sim.tick().unwrap();
        assert_ne!(sim.current(), start);
    }

    #[test]
    fn replay_stops_at_the_goal() {
        let mut sim = simulation(&["####", "#SG#", "####"], 5);
        for _ in 0..20 {
            sim.tick().unwrap();
        }
        let path = sim.replay_path(10);
        assert_eq!(path, vec![Position::new(1, 1), Position::new(2, 1)]);
        // once at the goal, further ticks no longer move
        for _ in 0..100 {
            sim.tick().unwrap();
        }
        assert_eq!(sim.current(), sim.grid().goal());
    }
}
