use grid_life::{advance, advance_n, BoundaryPolicy, Grid, Simulation};

fn grid_with(width: u32, height: u32, cells: &[(u32, u32)]) -> Grid {
    let mut grid = Grid::new(width, height);
    for &(row, col) in cells {
        grid.set(row, col, true).unwrap();
    }
    grid
}

fn live_cells(grid: &Grid) -> Vec<(u32, u32)> {
    let (width, height) = grid.dimensions();
    let mut out = Vec::new();
    for row in 0..height {
        for col in 0..width {
            if grid.get(row, col).unwrap() {
                out.push((row, col));
            }
        }
    }
    out
}

#[test]
fn all_dead_grid_is_a_fixed_point() {
    for (width, height) in [(1, 1), (3, 8), (10, 10)] {
        for policy in [BoundaryPolicy::Bounded, BoundaryPolicy::Wraparound] {
            let grid = Grid::new(width, height);
            let next = advance(&grid, policy);
            assert_eq!(next, grid, "{width}x{height} under {policy:?}");
        }
    }
}

#[test]
fn block_still_life_is_stable() {
    // Each block cell has exactly three live neighbors.
    let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
    for policy in [BoundaryPolicy::Bounded, BoundaryPolicy::Wraparound] {
        for (width, height) in [(4, 4), (9, 6)] {
            let grid = grid_with(width, height, &block);
            assert_eq!(advance(&grid, policy), grid, "{width}x{height} under {policy:?}");
        }
    }
}

#[test]
fn block_fills_a_bounded_two_by_two_grid() {
    let grid = grid_with(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert_eq!(advance(&grid, BoundaryPolicy::Bounded), grid);
}

#[test]
fn blinker_oscillates_with_period_two_on_a_torus() {
    // Horizontal line at the center of a grid big enough that the pattern
    // never reaches itself across the seam.
    let horizontal = grid_with(9, 9, &[(4, 3), (4, 4), (4, 5)]);

    let next = advance(&horizontal, BoundaryPolicy::Wraparound);
    assert_eq!(live_cells(&next), vec![(3, 4), (4, 4), (5, 4)]);

    let back = advance(&next, BoundaryPolicy::Wraparound);
    assert_eq!(back, horizontal);
}

#[test]
fn vertical_blinker_scenario_on_a_bounded_five_by_five() {
    let mut sim = Simulation::new(5, 5, BoundaryPolicy::Bounded);
    assert_eq!(sim.seed([(1, 2), (2, 2), (3, 2)]), 3);

    sim.step(1).unwrap();
    assert_eq!(live_cells(sim.snapshot()), vec![(2, 1), (2, 2), (2, 3)]);

    sim.step(1).unwrap();
    assert_eq!(live_cells(sim.snapshot()), vec![(1, 2), (2, 2), (3, 2)]);
}

#[test]
fn advance_n_matches_repeated_advance() {
    // R-pentomino, the busiest small seed, on both topologies.
    let seed = [(2, 3), (2, 4), (3, 2), (3, 3), (4, 3)];
    for policy in [BoundaryPolicy::Bounded, BoundaryPolicy::Wraparound] {
        let grid = grid_with(8, 8, &seed);

        let mut expected = grid.clone();
        for _ in 0..5 {
            expected = advance(&expected, policy);
        }

        assert_eq!(advance_n(&grid, policy, 5).unwrap(), expected, "{policy:?}");
    }
}

#[test]
fn advance_n_zero_copies_instead_of_aliasing() {
    let grid = grid_with(4, 4, &[(1, 1), (2, 2)]);
    let mut copy = advance_n(&grid, BoundaryPolicy::Bounded, 0).unwrap();
    assert_eq!(copy, grid);

    // Mutating the copy must not reach back into the original.
    copy.set(0, 0, true).unwrap();
    assert_eq!(grid.get(0, 0), Ok(false));
}

#[test]
fn step_matches_advance_on_the_same_seed() {
    let seed = [(1, 2), (2, 2), (3, 2), (3, 3)];
    let mut sim = Simulation::new(6, 6, BoundaryPolicy::Wraparound);
    sim.seed(seed);

    let mut expected = grid_with(6, 6, &seed);
    sim.step(3).unwrap();
    for _ in 0..3 {
        expected = advance(&expected, BoundaryPolicy::Wraparound);
    }

    assert_eq!(sim.snapshot(), &expected);
}
