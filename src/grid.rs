//! The maze grid model: cell locations, directions, and the wall-open matrices.

use rapier2d::na::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// An integer location on the maze grid.
///
/// Coordinates are signed so that neighbor candidates one step outside the
/// grid can be represented and rejected by [`Maze::in_bounds`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellLocation {
    /// Row - increases downwards
    pub row: i16,
    /// Column - increases to the right
    pub col: i16,
}

impl CellLocation {
    /// Create a new CellLocation
    pub fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// The adjacent location one step in `direction`; may be out of bounds.
    pub fn neighbor(&self, direction: Direction) -> CellLocation {
        let (dr, dc) = direction.offset();
        CellLocation::new(self.row + dr, self.col + dc)
    }
}

/// Enum for direction values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    /// Up, or -row
    Up,
    /// Right, or +col
    Right,
    /// Down, or +row
    Down,
    /// Left, or -col
    Left,
}

impl Direction {
    /// All directions, in the canonical neighbor-expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The `(row, col)` offset of one step in this direction.
    pub fn offset(&self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// A thin axis-aligned rectangle to be materialized as a physics collider.
///
/// Dimensions are in world units, where one maze cell is 1.0 x 1.0, `x` runs
/// along columns and `y` runs along rows (downwards on screen).
#[derive(Clone, Debug, PartialEq)]
pub struct WallSegment {
    /// Midpoint of the wall segment.
    pub center: Point2<f32>,
    /// Half width and half height of the segment.
    pub half_extents: Vector2<f32>,
}

/// A maze as two wall-open matrices over a `rows` x `cols` cell grid.
///
/// A vertical wall indexed `(row, col)` separates cells `(row, col)` and
/// `(row, col+1)`; a horizontal wall indexed `(row, col)` separates cells
/// `(row, col)` and `(row+1, col)`. `true` means the wall is open (a
/// passage); closed walls become physical colliders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    /// `rows` x `cols - 1`
    vertical_open: Vec<Vec<bool>>,
    /// `rows - 1` x `cols`
    horizontal_open: Vec<Vec<bool>>,
}

impl Maze {
    /// Create a maze with every wall closed.
    ///
    /// Panics if either dimension is zero; callers must validate their
    /// configuration first.
    pub fn closed(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "maze dimensions must be positive");
        Self {
            rows,
            cols,
            vertical_open: vec![vec![false; cols - 1]; rows],
            horizontal_open: vec![vec![false; cols]; rows - 1],
        }
    }

    /// Number of cell rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `cell` lies on the grid.
    pub fn in_bounds(&self, cell: CellLocation) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Open the wall between two orthogonally adjacent in-bounds cells.
    ///
    /// Panics if the cells are out of bounds or not adjacent.
    pub fn open_between(&mut self, a: CellLocation, b: CellLocation) {
        assert!(self.in_bounds(a) && self.in_bounds(b), "cell out of bounds");
        let (row, col) = (a.row as usize, a.col as usize);
        match (b.row - a.row, b.col - a.col) {
            (0, 1) => self.vertical_open[row][col] = true,
            (0, -1) => self.vertical_open[row][col - 1] = true,
            (1, 0) => self.horizontal_open[row][col] = true,
            (-1, 0) => self.horizontal_open[row - 1][col] = true,
            _ => panic!("cells {a:?} and {b:?} are not orthogonally adjacent"),
        }
    }

    /// Whether the wall between two orthogonally adjacent cells is open.
    pub fn is_open_between(&self, a: CellLocation, b: CellLocation) -> bool {
        if !self.in_bounds(a) || !self.in_bounds(b) {
            return false;
        }
        let (row, col) = (a.row as usize, a.col as usize);
        match (b.row - a.row, b.col - a.col) {
            (0, 1) => self.vertical_open[row][col],
            (0, -1) => self.vertical_open[row][col - 1],
            (1, 0) => self.horizontal_open[row][col],
            (-1, 0) => self.horizontal_open[row - 1][col],
            _ => false,
        }
    }

    /// Total number of open walls across both matrices.
    ///
    /// A fully generated maze has exactly `rows * cols - 1` open walls.
    pub fn open_passage_count(&self) -> usize {
        let vertical = self
            .vertical_open
            .iter()
            .flatten()
            .filter(|open| **open)
            .count();
        let horizontal = self
            .horizontal_open
            .iter()
            .flatten()
            .filter(|open| **open)
            .count();
        vertical + horizontal
    }

    /// The world-space center of a cell.
    pub fn cell_center(&self, cell: CellLocation) -> Point2<f32> {
        Point2::new(cell.col as f32 + 0.5, cell.row as f32 + 0.5)
    }

    /// The cell the ball spawns in.
    pub fn start_cell(&self) -> CellLocation {
        CellLocation::new(0, 0)
    }

    /// The cell holding the goal zone, at the far corner.
    pub fn goal_cell(&self) -> CellLocation {
        CellLocation::new(self.rows as i16 - 1, self.cols as i16 - 1)
    }

    /// One thin rectangle per closed interior wall.
    pub fn wall_segments(&self, half_thickness: f32) -> Vec<WallSegment> {
        let mut segments = Vec::new();
        for (row, walls) in self.vertical_open.iter().enumerate() {
            for (col, open) in walls.iter().enumerate() {
                if !open {
                    segments.push(WallSegment {
                        center: Point2::new(col as f32 + 1.0, row as f32 + 0.5),
                        half_extents: Vector2::new(half_thickness, 0.5),
                    });
                }
            }
        }
        for (row, walls) in self.horizontal_open.iter().enumerate() {
            for (col, open) in walls.iter().enumerate() {
                if !open {
                    segments.push(WallSegment {
                        center: Point2::new(col as f32 + 0.5, row as f32 + 1.0),
                        half_extents: Vector2::new(0.5, half_thickness),
                    });
                }
            }
        }
        segments
    }

    /// Four rectangles framing the play area `[0, cols] x [0, rows]`.
    pub fn boundary_segments(&self, half_thickness: f32) -> Vec<WallSegment> {
        let (w, h) = (self.cols as f32, self.rows as f32);
        vec![
            WallSegment {
                center: Point2::new(w / 2.0, 0.0),
                half_extents: Vector2::new(w / 2.0, half_thickness),
            },
            WallSegment {
                center: Point2::new(w / 2.0, h),
                half_extents: Vector2::new(w / 2.0, half_thickness),
            },
            WallSegment {
                center: Point2::new(0.0, h / 2.0),
                half_extents: Vector2::new(half_thickness, h / 2.0),
            },
            WallSegment {
                center: Point2::new(w, h / 2.0),
                half_extents: Vector2::new(half_thickness, h / 2.0),
            },
        ]
    }

    /// Whether the vertical wall at `(row, col)` is open. Used by tests.
    pub fn vertical_open(&self, row: usize, col: usize) -> bool {
        self.vertical_open[row][col]
    }

    /// Whether the horizontal wall at `(row, col)` is open. Used by tests.
    pub fn horizontal_open(&self, row: usize, col: usize) -> bool {
        self.horizontal_open[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_maze_has_no_passages() {
        let maze = Maze::closed(3, 4);
        assert_eq!(maze.open_passage_count(), 0);
        // 3 rows of 3 vertical walls, 2 rows of 4 horizontal walls
        assert_eq!(maze.wall_segments(0.05).len(), 9 + 8);
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn zero_dimension_rejected() {
        Maze::closed(0, 5);
    }

    #[test]
    fn open_between_is_symmetric() {
        let mut maze = Maze::closed(2, 2);
        let a = CellLocation::new(0, 0);
        let b = CellLocation::new(0, 1);
        assert!(!maze.is_open_between(a, b));
        maze.open_between(b, a);
        assert!(maze.is_open_between(a, b));
        assert!(maze.is_open_between(b, a));
        assert!(maze.vertical_open(0, 0));
    }

    #[test]
    fn open_between_all_directions() {
        let mut maze = Maze::closed(3, 3);
        let center = CellLocation::new(1, 1);
        for direction in Direction::ALL {
            maze.open_between(center, center.neighbor(direction));
        }
        assert!(maze.horizontal_open(0, 1)); // up
        assert!(maze.vertical_open(1, 1)); // right
        assert!(maze.horizontal_open(1, 1)); // down
        assert!(maze.vertical_open(1, 0)); // left
        assert_eq!(maze.open_passage_count(), 4);
    }

    #[test]
    fn wall_segment_geometry() {
        let mut maze = Maze::closed(2, 2);
        maze.open_between(CellLocation::new(0, 0), CellLocation::new(0, 1));
        let segments = maze.wall_segments(0.05);
        // one vertical (row 1) and two horizontal walls remain closed
        assert_eq!(segments.len(), 3);
        assert!(segments.contains(&WallSegment {
            center: Point2::new(1.0, 1.5),
            half_extents: Vector2::new(0.05, 0.5),
        }));
        assert!(segments.contains(&WallSegment {
            center: Point2::new(0.5, 1.0),
            half_extents: Vector2::new(0.5, 0.05),
        }));
    }

    #[test]
    fn boundary_frames_play_area() {
        let maze = Maze::closed(4, 6);
        let boundary = maze.boundary_segments(0.05);
        assert_eq!(boundary.len(), 4);
        assert!(boundary.contains(&WallSegment {
            center: Point2::new(3.0, 0.0),
            half_extents: Vector2::new(3.0, 0.05),
        }));
        assert!(boundary.contains(&WallSegment {
            center: Point2::new(6.0, 2.0),
            half_extents: Vector2::new(0.05, 2.0),
        }));
    }

    #[test]
    fn start_and_goal_cells() {
        let maze = Maze::closed(20, 20);
        assert_eq!(maze.start_cell(), CellLocation::new(0, 0));
        assert_eq!(maze.goal_cell(), CellLocation::new(19, 19));
        assert_eq!(maze.cell_center(maze.goal_cell()), Point2::new(19.5, 19.5));
    }

    #[test]
    fn out_of_bounds_neighbors_rejected() {
        let maze = Maze::closed(1, 1);
        let origin = CellLocation::new(0, 0);
        for direction in Direction::ALL {
            assert!(!maze.in_bounds(origin.neighbor(direction)));
        }
    }
}
