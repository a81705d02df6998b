//! Walkable/blocked tile maps built from text.
//!
//! A [`Grid`] parses an ASCII map where `#` is a wall and `.` or space is
//! floor. `S` and `G` mark the start and goal cells (both floor).

use std::fmt;

use crate::geom::Point;

/// Terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Floor,
    Wall,
}

/// A rectangular map of [`Tile`]s with optional start and goal markers.
///
/// Deserialization goes through [`Grid::from_tiles`], so a decoded grid is
/// as consistent as a parsed one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
    start: Option<Point>,
    goal: Option<Point>,
}

impl Grid {
    /// Create a grid of the given size with every cell set to floor.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            tiles: vec![Tile::Floor; area(width, height)],
            width,
            height,
            start: None,
            goal: None,
        }
    }

    /// Build a grid from row-major `tiles` and optional markers.
    ///
    /// Fails when the tile count does not match `width * height` or a marker
    /// lies outside the grid.
    pub fn from_tiles(
        tiles: Vec<Tile>,
        width: i32,
        height: i32,
        start: Option<Point>,
        goal: Option<Point>,
    ) -> Result<Self, GridError> {
        if width < 0 || height < 0 {
            return Err(GridError::NegativeSize { width, height });
        }
        let expected = area(width, height);
        if tiles.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                found: tiles.len(),
            });
        }
        let grid = Self {
            tiles,
            width,
            height,
            start,
            goal,
        };
        for (ch, marker) in [('S', start), ('G', goal)] {
            if let Some(pos) = marker.filter(|&p| !grid.contains(p)) {
                return Err(GridError::MarkerOutOfBounds { ch, pos });
            }
        }
        Ok(grid)
    }

    /// Parse an ASCII map.
    ///
    /// Blank lines before and after the map are ignored. Every other line
    /// must have the same width. Recognized characters: `#` wall, `.` and
    /// space floor, `S` start, `G` goal.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let Some(first) = lines.first() else {
            return Err(GridError::Empty);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut grid = Self::new(width as i32, lines.len() as i32);
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Floor,
                    'S' => {
                        if grid.start.replace(pos).is_some() {
                            return Err(GridError::DuplicateMarker { ch, pos });
                        }
                        Tile::Floor
                    }
                    'G' => {
                        if grid.goal.replace(pos).is_some() {
                            return Err(GridError::DuplicateMarker { ch, pos });
                        }
                        Tile::Floor
                    }
                    _ => return Err(GridError::InvalidTile { ch, pos }),
                };
                grid.set(pos, tile);
            }
        }
        log::debug!(
            "parsed {}x{} grid with {} walls",
            grid.width,
            grid.height,
            grid.wall_count()
        );
        Ok(grid)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width, height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Position of the `S` marker, if the map had one.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Position of the `G` marker, if the map had one.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Tile at `p`, or `None` when out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        if self.contains(p) {
            Some(self.tiles[self.index(p)])
        } else {
            None
        }
    }

    /// Set the tile at `p`. Out-of-bounds positions are ignored.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if self.contains(p) {
            let i = self.index(p);
            self.tiles[i] = tile;
        }
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p) == Some(Tile::Floor)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Wall).count()
    }

    /// Iterate over all positions in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}

/// Cell count of a `width` x `height` grid, computed without `i32` overflow.
fn area(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            tiles: Vec<Tile>,
            width: i32,
            height: i32,
            start: Option<Point>,
            goal: Option<Point>,
        }
        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        Grid::from_tiles(raw.tiles, raw.width, raw.height, raw.start, raw.goal)
            .map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when building or parsing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input holds no map lines.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the map alphabet was found.
    InvalidTile { ch: char, pos: Point },
    /// `S` or `G` appears more than once.
    DuplicateMarker { ch: char, pos: Point },
    /// A dimension is negative.
    NegativeSize { width: i32, height: i32 },
    /// The tile count does not match the dimensions.
    SizeMismatch { expected: usize, found: usize },
    /// `S` or `G` lies outside the grid.
    MarkerOutOfBounds { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: empty map"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidTile { ch, pos } => {
                write!(f, "grid contains invalid tile \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "grid: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
            Self::NegativeSize { width, height } => {
                write!(f, "grid: negative size {width}x{height}")
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "grid: {found} tiles, expected {expected}")
            }
            Self::MarkerOutOfBounds { ch, pos } => {
                write!(f, "grid: \u{201c}{ch}\u{201d} marker at {pos} is outside the grid")
            }
        }
    }
}

impl std::error::Error for GridError {}
