use paparazzo::NeighbourLookup;

use crate::geom::Point;
use crate::grid::Grid;

/// Which moves count as adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Up, right, down, left.
    #[default]
    Four,
    /// Cardinal moves plus diagonals. Diagonals may cut wall corners.
    Eight,
}

/// Neighbour lookup over the passable cells of a [`Grid`].
#[derive(Debug, Clone, Copy)]
pub struct GridNeighbours<'a> {
    grid: &'a Grid,
    connectivity: Connectivity,
}

impl<'a> GridNeighbours<'a> {
    /// Neighbours of a cell are its passable adjacent cells under `connectivity`.
    pub fn new(grid: &'a Grid, connectivity: Connectivity) -> Self {
        Self { grid, connectivity }
    }

    /// The grid being searched.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The move set in use.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
}

impl NeighbourLookup<Point> for GridNeighbours<'_> {
    fn neighbours(&self, p: &Point, buf: &mut Vec<Point>) {
        match self.connectivity {
            Connectivity::Four => {
                buf.extend(p.neighbors_4().into_iter().filter(|&n| self.grid.is_passable(n)))
            }
            Connectivity::Eight => {
                buf.extend(p.neighbors_8().into_iter().filter(|&n| self.grid.is_passable(n)))
            }
        }
    }
}
