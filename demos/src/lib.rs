//! Maze solving demo built on the paparazzo engine.
//!
//! Demonstrates: ASCII map parsing, 8-way grid search with an octile
//! heuristic, neighbour memoization and search statistics.

use std::fmt;

use paparazzo::{AStar, CachedNeighbours, Outcome, Path, SearchStats};
use paparazzo_grid::{Connectivity, Grid, GridError, GridNeighbours, Metric, Point, Tile};

pub const SAMPLE_MAP: &str = "\
##############################
#S.......#...................#
#.######.#.#######.#########.#
#.#......#.#.....#.#.......#.#
#.#.######.#.###.#.#.#####.#.#
#.#........#.#...#...#...#.#.#
#.##########.#.#######.#.#.#.#
#............#.........#...#G#
##############################";

/// Read a map file into a string.
pub fn load_map(path: &str) -> Result<String, DemoError> {
    std::fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.to_string(),
        source,
    })
}

/// Outcome of solving one map.
#[derive(Debug)]
pub struct Report {
    pub grid: Grid,
    pub path: Option<Path<Point>>,
    pub cost: f64,
    pub opened: usize,
    pub closed: usize,
}

/// Parse `text`, search from its `S` to its `G`, and collect statistics.
pub fn solve(text: &str) -> Result<Report, DemoError> {
    let grid = Grid::parse(text)?;
    let start = grid.start().ok_or(DemoError::MissingMarker('S'))?;
    let goal = grid.goal().ok_or(DemoError::MissingMarker('G'))?;

    let stats = SearchStats::new();
    let outcome = {
        let astar = AStar::new(
            Metric::Octile,
            CachedNeighbours::new(GridNeighbours::new(&grid, Connectivity::Eight)),
            Metric::Octile,
        )
        .with_observer(&stats);
        astar.search(start, goal)
    };
    let path = match outcome {
        Outcome::Found(path) => Some(path),
        Outcome::NotFound => None,
    };
    let cost = path
        .as_ref()
        .map_or(0.0, |p| p.total_cost(&Metric::Octile));

    Ok(Report {
        opened: stats.opened(),
        closed: stats.closed(),
        path,
        cost,
        grid,
    })
}

/// Draw `grid` as text with `*` on the path cells. `S` and `G` are kept.
pub fn render(grid: &Grid, path: Option<&Path<Point>>) -> String {
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let ch = if Some(p) == grid.start() {
                'S'
            } else if Some(p) == grid.goal() {
                'G'
            } else if path.is_some_and(|path| path.contains(&p)) {
                '*'
            } else if grid.at(p) == Some(Tile::Wall) {
                '#'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.grid, self.path.as_ref()))?;
        match &self.path {
            Some(path) => writeln!(f, "cost {:.3}, length {}", self.cost, path.len())?,
            None => writeln!(f, "no path")?,
        }
        writeln!(f, "opened {}, closed {}", self.opened, self.closed)
    }
}

/// Errors reported by the demo.
#[derive(Debug)]
pub enum DemoError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Grid(GridError),
    /// The map has no `S` or no `G`.
    MissingMarker(char),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {path}: {source}"),
            Self::Grid(e) => write!(f, "{e}"),
            Self::MissingMarker(ch) => write!(f, "map has no \u{201c}{ch}\u{201d} marker"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            Self::MissingMarker(_) => None,
        }
    }
}

impl From<GridError> for DemoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
