//! Randomized depth-first maze generation.
//!
//! The generator carves a perfect maze: starting from a uniformly random
//! cell, it walks the grid depth-first, visiting neighbors in a freshly
//! shuffled order and opening the wall to each neighbor the moment it is
//! claimed. The visited flag alone prevents cycles, so the open-wall graph
//! of the result is a spanning tree over all cells.

use crate::grid::{CellLocation, Direction, Maze};
use rand::Rng;

/// Uniformly shuffle a slice in place with Fisher-Yates.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A cell whose shuffled neighbor list is still being expanded.
struct Frame {
    cell: CellLocation,
    directions: [Direction; 4],
    cursor: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(cell: CellLocation, rng: &mut R) -> Self {
        let mut directions = Direction::ALL;
        shuffle(rng, &mut directions);
        Frame {
            cell,
            directions,
            cursor: 0,
        }
    }
}

/// Generate a maze from a uniformly random start cell.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use marble_maze::generator;
///
/// let maze = generator::generate(4, 5, &mut StdRng::seed_from_u64(7));
/// assert_eq!(maze.open_passage_count(), 4 * 5 - 1);
/// ```
pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Maze {
    assert!(rows >= 1 && cols >= 1, "maze dimensions must be positive");
    let start = CellLocation::new(
        rng.gen_range(0..rows) as i16,
        rng.gen_range(0..cols) as i16,
    );
    generate_from(rows, cols, start, rng)
}

/// Generate a maze depth-first from a fixed start cell.
///
/// The traversal uses an explicit frame stack rather than recursion, so
/// grids of any size stay within constant call-stack depth. Each frame
/// shuffles its neighbor order once, on first visit, which keeps the
/// traversal identical to the recursive formulation under the same
/// sequence of random draws.
pub fn generate_from<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    start: CellLocation,
    rng: &mut R,
) -> Maze {
    let mut maze = Maze::closed(rows, cols);
    assert!(maze.in_bounds(start), "start cell out of bounds");

    let mut visited = vec![false; rows * cols];
    let index = |cell: CellLocation| cell.row as usize * cols + cell.col as usize;

    let mut stack = Vec::with_capacity(rows * cols);
    visited[index(start)] = true;
    stack.push(Frame::enter(start, rng));

    while let Some(frame) = stack.last_mut() {
        let current = frame.cell;
        let mut next = None;
        while frame.cursor < frame.directions.len() {
            let candidate = current.neighbor(frame.directions[frame.cursor]);
            frame.cursor += 1;
            if maze.in_bounds(candidate) && !visited[index(candidate)] {
                next = Some(candidate);
                break;
            }
        }
        match next {
            Some(next) => {
                maze.open_between(current, next);
                visited[index(next)] = true;
                stack.push(Frame::enter(next, rng));
            }
            None => {
                stack.pop();
            }
        }
    }

    maze
}
