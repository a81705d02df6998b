//! 2D grid maps for the [`paparazzo`] A* engine.
//!
//! [`Grid`] parses ASCII maps, [`GridNeighbours`] turns a grid into a
//! neighbour lookup, and [`Metric`] serves as both heuristic and edge cost.
//!
//! ```
//! use paparazzo::AStar;
//! use paparazzo_grid::{Connectivity, Grid, GridNeighbours, Metric};
//!
//! let grid = Grid::parse("S.#\n..#\n..G").unwrap();
//! let astar = AStar::new(
//!     Metric::Manhattan,
//!     GridNeighbours::new(&grid, Connectivity::Four),
//!     Metric::Manhattan,
//! );
//! let path = astar
//!     .search(grid.start().unwrap(), grid.goal().unwrap())
//!     .into_path()
//!     .unwrap();
//! assert_eq!(path.len(), 5);
//! ```

mod geom;
mod grid;
mod metric;
mod neighbors;

pub use geom::Point;
pub use grid::{Grid, GridError, Tile};
pub use metric::{Metric, chebyshev, euclidean, manhattan, octile};
pub use neighbors::{Connectivity, GridNeighbours};
