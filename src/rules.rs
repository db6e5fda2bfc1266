//! The generation transition for Conway's Game of Life (B3/S23):
//!
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overpopulation)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
//!
//! The rule itself is fixed; what varies per simulation is how neighbor
//! lookups behave at the grid edges, selected by [`BoundaryPolicy`].

use crate::{Error, Grid, Result};

/// How neighbor lookups resolve at the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Neighbors past an edge do not exist and are never counted.
    Bounded,
    /// Neighbor indices wrap modulo the grid dimension (torus).
    Wraparound,
}

/// Count the live cells among the 8 neighbors of `(row, col)`.
///
/// The grid is only read; the result is in `[0, 8]`. Under
/// [`BoundaryPolicy::Bounded`] edge cells simply have fewer neighbors.
pub fn count_live_neighbors(grid: &Grid, row: u32, col: u32, policy: BoundaryPolicy) -> u32 {
    let (width, height) = grid.dimensions();
    let mut count = 0;

    for dr in 0..3 {
        for dc in 0..3 {
            // Skip the cell itself
            if dr == 1 && dc == 1 {
                continue;
            }

            // Offset the coordinate by (dr - 1, dc - 1), biased to stay in
            // unsigned arithmetic.
            let (nr, nc) = match policy {
                BoundaryPolicy::Wraparound => {
                    ((row + height + dr - 1) % height, (col + width + dc - 1) % width)
                }
                BoundaryPolicy::Bounded => {
                    let nr = row + dr;
                    let nc = col + dc;
                    if nr < 1 || nc < 1 || nr > height || nc > width {
                        continue;
                    }
                    (nr - 1, nc - 1)
                }
            };

            if grid.get_unchecked(nr, nc) {
                count += 1;
            }
        }
    }

    count
}

/// Compute the next generation of `grid`.
///
/// The input grid is never mutated: every cell's next state is derived from
/// the same frozen generation, so iteration order cannot leak freshly
/// written states into neighbor counts.
pub fn advance(grid: &Grid, policy: BoundaryPolicy) -> Grid {
    let (width, height) = grid.dimensions();
    let mut next = Grid::new(width, height);

    for row in 0..height {
        for col in 0..width {
            let neighbors = count_live_neighbors(grid, row, col, policy);
            let alive = grid.get_unchecked(row, col);

            let next_alive = match (alive, neighbors) {
                (true, 2) | (true, 3) => true, // survival
                (false, 3) => true,            // reproduction
                _ => false,                    // under-/overpopulation, or stays dead
            };
            if next_alive {
                next.set_unchecked(row, col, true);
            }
        }
    }

    next
}

/// Apply [`advance`] `n` times.
///
/// `n = 0` yields a grid equal to the input but distinct from it, so callers
/// never end up aliasing their own state. A negative `n` fails before any
/// work is done.
pub fn advance_n(grid: &Grid, policy: BoundaryPolicy, n: i32) -> Result<Grid> {
    if n < 0 {
        return Err(Error::NegativeGenerations(n));
    }

    let mut current = grid.clone();
    for _ in 0..n {
        current = advance(&current, policy);
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::{advance, advance_n, count_live_neighbors, BoundaryPolicy};
    use crate::{Error, Grid};

    /// 3x3 grid whose cell `(row, col)` is alive iff bit `row * 3 + col` of
    /// `bits` is set.
    fn grid_from_bits(bits: u16) -> Grid {
        let mut grid = Grid::new(3, 3);
        for row in 0..3u32 {
            for col in 0..3u32 {
                if bits >> (row * 3 + col) & 1 == 1 {
                    grid.set(row, col, true).unwrap();
                }
            }
        }
        grid
    }

    #[test]
    fn center_cell_follows_rule_for_every_neighborhood() {
        // All 2^9 liveness combinations of a 3x3 neighborhood. The center
        // cell (bit 4) sees all eight others as neighbors, so this covers
        // the full rule table.
        for bits in 0u16..512 {
            let grid = grid_from_bits(bits);
            let alive = grid.get(1, 1).unwrap();
            let neighbors = (bits & !(1 << 4)).count_ones();

            let expected = if alive {
                neighbors == 2 || neighbors == 3
            } else {
                neighbors == 3
            };

            let next = advance(&grid, BoundaryPolicy::Bounded);
            assert_eq!(
                next.get(1, 1).unwrap(),
                expected,
                "pattern {bits:#011b}: alive={alive} neighbors={neighbors}"
            );
        }
    }

    #[test]
    fn bounded_corner_sees_three_neighbors() {
        let grid = grid_from_bits(0x1FF); // all nine cells alive
        assert_eq!(count_live_neighbors(&grid, 0, 0, BoundaryPolicy::Bounded), 3);
        assert_eq!(count_live_neighbors(&grid, 1, 1, BoundaryPolicy::Bounded), 8);
    }

    #[test]
    fn wraparound_corner_sees_all_eight_neighbors() {
        let grid = grid_from_bits(0x1FF);
        assert_eq!(
            count_live_neighbors(&grid, 0, 0, BoundaryPolicy::Wraparound),
            8
        );
    }

    #[test]
    fn wraparound_counts_cells_across_the_seam() {
        let mut grid = Grid::new(5, 5);
        grid.set(4, 4, true).unwrap();
        // (0, 0)'s upper-left neighbor wraps to the far corner.
        assert_eq!(
            count_live_neighbors(&grid, 0, 0, BoundaryPolicy::Wraparound),
            1
        );
        assert_eq!(count_live_neighbors(&grid, 0, 0, BoundaryPolicy::Bounded), 0);
    }

    #[test]
    fn advance_does_not_mutate_its_input() {
        let grid = grid_from_bits(0b000_111_000); // horizontal blinker
        let before = grid.clone();
        let _ = advance(&grid, BoundaryPolicy::Bounded);
        assert_eq!(grid, before);
    }

    #[test]
    fn advance_n_rejects_negative_counts() {
        let grid = Grid::new(4, 4);
        assert_eq!(
            advance_n(&grid, BoundaryPolicy::Bounded, -1),
            Err(Error::NegativeGenerations(-1))
        );
    }
}
