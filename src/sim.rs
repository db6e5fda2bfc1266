use crate::rules::{advance_n, BoundaryPolicy};
use crate::{Grid, Result};

/// One simulation instance: a grid plus the boundary policy it evolves under.
///
/// The front-ends seed and toggle cells through this type, advance it with
/// [`step`](Simulation::step), and read the grid back through
/// [`snapshot`](Simulation::snapshot); the grid is never handed out mutably.
pub struct Simulation {
    grid: Grid,
    policy: BoundaryPolicy,
    generation: u64,
}

impl Simulation {
    /// A simulation over an all-dead `width x height` grid.
    pub fn new(width: u32, height: u32, policy: BoundaryPolicy) -> Self {
        Self {
            grid: Grid::new(width, height),
            policy,
            generation: 0,
        }
    }

    /// Flip the cell at `(row, col)` and return its new state.
    pub fn toggle(&mut self, row: u32, col: u32) -> Result<bool> {
        let alive = !self.grid.get(row, col)?;
        self.grid.set(row, col, alive)?;
        Ok(alive)
    }

    /// Mark every given coordinate alive.
    ///
    /// Out-of-bounds entries are rejected individually with a warning and
    /// seeding continues with the rest. Returns how many cells were applied.
    /// Re-seeding a live cell is a no-op, unlike [`toggle`](Simulation::toggle).
    pub fn seed<I>(&mut self, coords: I) -> usize
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut applied = 0;
        for (row, col) in coords {
            match self.grid.set(row, col, true) {
                Ok(()) => applied += 1,
                Err(err) => log::warn!("seed coordinate rejected: {err}"),
            }
        }
        applied
    }

    /// Advance the simulation by `n` generations.
    ///
    /// All-or-nothing: a negative `n` fails before any state changes, and the
    /// owned grid is only replaced once all `n` generations are computed.
    pub fn step(&mut self, n: i32) -> Result<()> {
        self.grid = advance_n(&self.grid, self.policy, n)?;
        self.generation += n as u64;
        Ok(())
    }

    /// Read-only view of the current generation.
    pub fn snapshot(&self) -> &Grid {
        &self.grid
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// How many generations have been applied since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }
}
