use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::VariantArray;

use crate::env::{ActionsFunction, Environment, Percept};

/// A cell of the grid as `(x, y)`, with `(1, 1)` in the bottom left corner
pub type Cell = (u8, u8);

const WIDTH: u8 = 4;
const HEIGHT: u8 = 3;
const WALL: Cell = (2, 2);
const START: Cell = (1, 1);
const GOAL: Cell = (4, 3);
const PIT: Cell = (4, 2);

#[derive(VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CellWorldAction {
    Up,
    Down,
    Left,
    Right,
    /// Stay in place
    None,
}

impl CellWorldAction {
    /// The direction 90° counter-clockwise
    fn left(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
            Self::None => Self::None,
        }
    }

    /// The direction 90° clockwise
    fn right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::None => Self::None,
        }
    }
}

/// The legal actions of the [`CellWorld`]: every direction, except in the two terminal cells
#[derive(Debug, Clone, Copy, Default)]
pub struct CellWorldActions;

impl ActionsFunction<Cell, CellWorldAction> for CellWorldActions {
    fn actions(&self, state: &Cell) -> Vec<CellWorldAction> {
        if CellWorld::is_terminal(*state) {
            vec![]
        } else {
            use CellWorldAction::*;
            vec![Up, Down, Left, Right]
        }
    }
}

/// The 4x3 stochastic grid world
///
/// ```text
///   3 |   |   |   | +1 |
///   2 |   | # |   | -1 |
///   1 | S |   |   |    |
///       1   2   3   4
/// ```
///
/// Every non-terminal cell pays `-0.04`. An action moves in the intended direction with
/// probability `0.8` and at right angles to it with probability `0.1` each. Moving into
/// the wall or off the grid leaves the position unchanged, as does [`CellWorldAction::None`].
///
/// Intended for use with a [`QLearningAgent`](crate::algo::QLearningAgent), which needs
/// [`CellWorldActions`] to detect the terminal cells.
pub struct CellWorld {
    pos: Cell,
    rng: StdRng,
}

impl CellWorld {
    pub fn new() -> Self {
        Self {
            pos: START,
            rng: StdRng::from_entropy(),
        }
    }

    /// A cell world with reproducible transitions
    pub fn with_seed(seed: u64) -> Self {
        Self {
            pos: START,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn position(&self) -> Cell {
        self.pos
    }

    pub fn cells() -> impl Iterator<Item = Cell> {
        (1..=HEIGHT)
            .flat_map(|y| (1..=WIDTH).map(move |x| (x, y)))
            .filter(|&cell| cell != WALL)
    }

    pub fn is_terminal(cell: Cell) -> bool {
        cell == GOAL || cell == PIT
    }

    pub fn reward(cell: Cell) -> f64 {
        match cell {
            GOAL => 1.0,
            PIT => -1.0,
            _ => -0.04,
        }
    }

    /// The cell reached by moving from `from` in `direction`, without noise
    fn destination(from: Cell, direction: CellWorldAction) -> Cell {
        let (x, y) = from;
        let to = match direction {
            CellWorldAction::Up => (x, y + 1),
            CellWorldAction::Down => (x, y - 1),
            CellWorldAction::Left => (x - 1, y),
            CellWorldAction::Right => (x + 1, y),
            CellWorldAction::None => from,
        };

        if to.0 < 1 || to.0 > WIDTH || to.1 < 1 || to.1 > HEIGHT || to == WALL {
            from
        } else {
            to
        }
    }

    fn percept(&self) -> Percept<Cell> {
        Percept::new(self.pos, Self::reward(self.pos))
    }
}

impl Default for CellWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for CellWorld {
    type State = Cell;
    type Action = CellWorldAction;

    fn reset(&mut self) -> Percept<Cell> {
        self.pos = START;
        self.percept()
    }

    fn step(&mut self, action: CellWorldAction) -> Percept<Cell> {
        let p: f64 = self.rng.gen();
        let direction = if p < 0.8 {
            action
        } else if p < 0.9 {
            action.left()
        } else {
            action.right()
        };

        self.pos = Self::destination(self.pos, direction);
        self.percept()
    }
}
