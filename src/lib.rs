//! Shared Conway's Game of Life core for the console and window front-ends.
//!
//! The library owns the simulation proper: the grid, neighbor counting under
//! a boundary policy, the generation transition, and the `Simulation` wrapper
//! the front-ends drive. Rendering and input live in the binaries.

pub mod grid;
pub mod rules;
pub mod sim;

pub use grid::Grid;
pub use rules::{advance, advance_n, count_live_neighbors, BoundaryPolicy};
pub use sim::Simulation;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("coordinate ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },
    #[error("generation count must be non-negative, got {0}")]
    NegativeGenerations(i32),
}

pub type Result<T> = std::result::Result<T, Error>;
