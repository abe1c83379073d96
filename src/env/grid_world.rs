use std::ops::{Index, IndexMut};

use ndarray::Array2;

use crate::env::EnvError;

const FREE: u8 = 0;
const WALL: u8 = 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const COUNT: usize = 4;

    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (Δrow, Δcolumn) of a single move in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl From<usize> for Direction {
    fn from(value: usize) -> Self {
        match value {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            3 => Self::Right,
            _ => panic!(),
        }
    }
}

impl Index<Direction> for [f64] {
    type Output = f64;

    fn index(&self, index: Direction) -> &Self::Output {
        &self[index as usize]
    }
}

impl IndexMut<Direction> for [f64] {
    fn index_mut(&mut self, index: Direction) -> &mut Self::Output {
        &mut self[index as usize]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Arithmetic move, no bounds clamping. Callers combine this with a
    /// wall check before committing the move.
    pub fn step(self, direction: Direction) -> Position {
        let (dy, dx) = direction.offset();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    cells: Array2<u8>,
    start: Position,
    goal: Position,
}

impl GridWorld {
    pub const MAP_8X12: [&'static str; 8] = [
        "############",
        "#S...#.#..G#",
        "#.##.#.#.###",
        "#.##.#.#...#",
        "#.##.#.###.#",
        "#.####...#.#",
        "#......#...#",
        "############",
    ];

    /// Parses a text map: `#` wall, `.` free, `S` start, `G` goal.
    /// The map must be rectangular, fully walled on its border, and declare
    /// exactly one start and one goal cell.
    pub fn new(map: &[&str]) -> Result<Self, EnvError> {
        if map.is_empty() || map[0].is_empty() {
            return Err(EnvError::EmptyMap);
        }
        let height = map.len();
        let width = map[0].chars().count();

        let mut cells = Array2::<u8>::zeros((height, width));
        let mut start: Option<Position> = None;
        let mut goal: Option<Position> = None;
        for (y, row) in map.iter().enumerate() {
            let got = row.chars().count();
            if got != width {
                return Err(EnvError::RaggedMap {
                    row: y,
                    got,
                    expected: width,
                });
            }
            for (x, character) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                match character {
                    '#' => cells[[y, x]] = WALL,
                    '.' => cells[[y, x]] = FREE,
                    'S' => {
                        if start.replace(pos).is_some() {
                            return Err(EnvError::DuplicateStart);
                        }
                        cells[[y, x]] = FREE;
                    }
                    'G' => {
                        if goal.replace(pos).is_some() {
                            return Err(EnvError::DuplicateGoal);
                        }
                        cells[[y, x]] = FREE;
                    }
                    _ => {
                        return Err(EnvError::InvalidCell {
                            character,
                            x: pos.x,
                            y: pos.y,
                        })
                    }
                }
            }
        }
        let start = start.ok_or(EnvError::MissingStart)?;
        let goal = goal.ok_or(EnvError::MissingGoal)?;

        for y in 0..height {
            for x in 0..width {
                let on_border = y == 0 || y == height - 1 || x == 0 || x == width - 1;
                if on_border && cells[[y, x]] != WALL {
                    return Err(EnvError::OpenBorder {
                        x: x as i32,
                        y: y as i32,
                    });
                }
            }
        }

        Ok(Self { cells, start, goal })
    }

    pub fn width(&self) -> usize {
        self.cells.dim().1
    }

    pub fn height(&self) -> usize {
        self.cells.dim().0
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Whether the cell kind at `pos` is a wall. Coordinates outside the
    /// maze are a boundary violation, surfaced to the caller instead of
    /// being clamped or wrapped.
    pub fn is_wall(&self, pos: Position) -> Result<bool, EnvError> {
        let (height, width) = self.cells.dim();
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= width || pos.y as usize >= height {
            return Err(EnvError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width,
                height,
            });
        }
        Ok(self.cells[[pos.y as usize, pos.x as usize]] == WALL)
    }

    /// Row-major iteration over every cell of the maze.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (height, width) = self.cells.dim();
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
    }

    pub fn render(&self, current: Position) -> String {
        let (height, width) = self.cells.dim();
        let mut out = String::with_capacity(height * (width + 1));
        for y in 0..height {
            for x in 0..width {
                let pos = Position::new(x as i32, y as i32);
                let glyph = if pos == current {
                    '@'
                } else if pos == self.goal {
                    'G'
                } else if self.cells[[y, x]] == WALL {
                    '#'
                } else {
                    '.'
                };
                out.push(glyph);
            }
            if y < height - 1 {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_geometry() {
        let grid = GridWorld::new(&GridWorld::MAP_8X12).unwrap();
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.start(), Position::new(1, 1));
        assert_eq!(grid.goal(), Position::new(10, 1));
    }

    #[test]
    fn default_map_border_is_walled() {
        let grid = GridWorld::new(&GridWorld::MAP_8X12).unwrap();
        for pos in grid.positions() {
            let on_border = pos.x == 0
                || pos.y == 0
                || pos.x == grid.width() as i32 - 1
                || pos.y == grid.height() as i32 - 1;
            if on_border {
                assert!(grid.is_wall(pos).unwrap(), "border cell {:?} is open", pos);
            }
        }
        assert!(!grid.is_wall(grid.start()).unwrap());
        assert!(!grid.is_wall(grid.goal()).unwrap());
    }

    #[test]
    fn step_applies_offsets() {
        let pos = Position::new(3, 5);
        assert_eq!(pos.step(Direction::Up), Position::new(3, 4));
        assert_eq!(pos.step(Direction::Down), Position::new(3, 6));
        assert_eq!(pos.step(Direction::Left), Position::new(2, 5));
        assert_eq!(pos.step(Direction::Right), Position::new(4, 5));
    }

    #[test]
    fn step_is_pure() {
        let pos = Position::new(0, 0);
        let first = pos.step(Direction::Up);
        let second = pos.step(Direction::Up);
        assert_eq!(first, second);
        assert_eq!(pos, Position::new(0, 0));
        // no clamping, an out-of-bounds result is well defined
        assert_eq!(first, Position::new(0, -1));
    }

    #[test]
    fn out_of_bounds_is_a_checked_error() {
        let grid = GridWorld::new(&GridWorld::MAP_8X12).unwrap();
        let err = grid.is_wall(Position::new(-1, 0)).unwrap_err();
        assert_eq!(
            err,
            EnvError::OutOfBounds {
                x: -1,
                y: 0,
                width: 12,
                height: 8
            }
        );
        assert!(grid.is_wall(Position::new(12, 0)).is_err());
        assert!(grid.is_wall(Position::new(0, 8)).is_err());
    }

    #[test]
    fn rejects_ragged_map() {
        let err = GridWorld::new(&["####", "#SG#", "###"]).unwrap_err();
        assert_eq!(
            err,
            EnvError::RaggedMap {
                row: 2,
                got: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn rejects_missing_markers() {
        assert_eq!(
            GridWorld::new(&["####", "#.G#", "####"]).unwrap_err(),
            EnvError::MissingStart
        );
        assert_eq!(
            GridWorld::new(&["####", "#S.#", "####"]).unwrap_err(),
            EnvError::MissingGoal
        );
        assert_eq!(
            GridWorld::new(&["#####", "#SSG#", "#####"]).unwrap_err(),
            EnvError::DuplicateStart
        );
    }

    #[test]
    fn rejects_open_border() {
        assert_eq!(
            GridWorld::new(&["###.", "#SG#", "####"]).unwrap_err(),
            EnvError::OpenBorder { x: 3, y: 0 }
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            GridWorld::new(&["####", "#SxG"]).unwrap_err(),
            EnvError::InvalidCell {
                character: 'x',
                x: 2,
                y: 1
            }
        );
    }

    #[test]
    fn render_marks_the_current_cell() {
        let grid = GridWorld::new(&["####", "#SG#", "####"]).unwrap();
        let text = grid.render(Position::new(1, 1));
        assert_eq!(text, "####\n#@G#\n####");
        let at_goal = grid.render(Position::new(2, 1));
        assert_eq!(at_goal, "####\n#.@#\n####");
    }
}
