//! Text front-end: seed live cells from stdin, then advance one generation
//! per `i` command until `x` quits.

use std::io::{self, BufRead, Write};

use grid_life::{BoundaryPolicy, Grid, Simulation};

// Constants
const GRID_WIDTH: u32 = 20;
const GRID_HEIGHT: u32 = 20;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut sim = Simulation::new(GRID_WIDTH, GRID_HEIGHT, BoundaryPolicy::Bounded);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Enter the coordinates of live cells (x y). Enter -1 to end.");
    loop {
        print!("Enter coordinates (x y): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF ends seeding like the sentinel does
        };
        match parse_coords(&line?) {
            Some((x, y)) if x == -1 || y == -1 => break,
            Some((x, y)) => {
                if x < 0 || x >= GRID_HEIGHT as i64 || y < 0 || y >= GRID_WIDTH as i64 {
                    println!(
                        "Invalid coordinates. Please enter coordinates within the grid range (0-{} x 0-{}).",
                        GRID_HEIGHT - 1,
                        GRID_WIDTH - 1
                    );
                    continue;
                }
                sim.seed([(x as u32, y as u32)]);
            }
            None => println!("Invalid input. Enter two integers separated by a space."),
        }
    }

    print_grid(sim.snapshot());

    loop {
        print!("Press 'i' to iterate, 'x' to exit: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match line?.trim() {
            "i" => {
                if let Err(err) = sim.step(1) {
                    log::error!("step failed: {err}");
                    break;
                }
                print_grid(sim.snapshot());
            }
            "x" => break,
            _ => println!("Invalid input. Try again."),
        }
    }

    Ok(())
}

/// Parse a line of two whitespace-separated integers.
fn parse_coords(line: &str) -> Option<(i64, i64)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// Repaint the grid in place, one character per cell.
fn print_grid(grid: &Grid) {
    print!("\x1b[2J\x1b[H"); // clear the terminal screen
    let (width, _) = grid.dimensions();
    for row in grid.cells().chunks(width as usize) {
        for &alive in row {
            print!("{} ", if alive { '*' } else { '.' });
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::parse_coords;

    #[test]
    fn parses_two_integers() {
        assert_eq!(parse_coords("3 7"), Some((3, 7)));
        assert_eq!(parse_coords("  12   0 "), Some((12, 0)));
        assert_eq!(parse_coords("-1 -1"), Some((-1, -1)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_coords(""), None);
        assert_eq!(parse_coords("5"), None);
        assert_eq!(parse_coords("a b"), None);
        assert_eq!(parse_coords("1 2 3"), None);
    }
}
