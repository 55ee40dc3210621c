pub mod cell_world;

pub use cell_world::{CellWorld, CellWorldAction, CellWorldActions};
