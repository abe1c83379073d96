use fxhash::FxHashMap;

use crate::env::{Direction, EnvError, GridWorld, Position};
use crate::utils::max;

pub const GOAL_REWARD: f64 = 10.0;
pub const WALL_PENALTY: f64 = -10.0;

/// Action-value table for the maze: one dense `[f64; 4]` row per visited
/// cell, indexed by the direction's ordinal. Rows are materialized with
/// default 0.0 on first read, so "max over all directions" behaves the same
/// before and after any direction has been explicitly updated.
#[derive(Debug, Clone)]
pub struct QTable {
    alpha: f64,
    discount: f64,
    table: FxHashMap<Position, [f64; Direction::COUNT]>,
}

impl QTable {
    pub fn new(alpha: f64, discount: f64) -> Self {
        Self {
            alpha,
            discount,
            table: FxHashMap::default(),
        }
    }

    /// Current estimate for a (cell, direction) pair. Reading a pair that
    /// was never written durably records the 0.0 default into the table.
    pub fn q_value(&mut self, pos: Position, direction: Direction) -> f64 {
        self.table.entry(pos).or_insert([0.0; Direction::COUNT])[direction]
    }

    /// All four estimates at a cell, materializing the row.
    pub fn values(&mut self, pos: Position) -> [f64; Direction::COUNT] {
        *self.table.entry(pos).or_insert([0.0; Direction::COUNT])
    }

    /// Read-only lookup for display purposes, never materializes.
    pub fn peek(&self, pos: Position, direction: Direction) -> f64 {
        self.table
            .get(&pos)
            .map(|row| row[direction])
            .unwrap_or(0.0)
    }

    /// One-step tabular Q-learning update:
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_d Q(s',d) - Q(s,a)]
    ///
    /// where s' = s + a, and r is +10 when s' is the goal (checked first),
    /// -10 when s' is a wall, 0 otherwise. Returns the temporal-difference
    /// error. The only failure mode is a boundary violation from the wall
    /// probe.
    pub fn update(
        &mut self,
        grid: &GridWorld,
        pos: Position,
        direction: Direction,
    ) -> Result<f64, EnvError> {
        let q_old = self.q_value(pos, direction);
        let next = pos.step(direction);
        let reward = if next == grid.goal() {
            GOAL_REWARD
        } else if grid.is_wall(next)? {
            WALL_PENALTY
        } else {
            0.0
        };
        let max_next = max(&self.values(next));
        let temporal_difference = reward + self.discount * max_next - q_old;
        self.table.entry(pos).or_insert([0.0; Direction::COUNT])[direction] +=
            self.alpha * temporal_difference;
        Ok(temporal_difference)
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
