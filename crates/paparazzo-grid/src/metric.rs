use paparazzo::{DistanceCalculator, HeuristicEstimator};

use crate::geom::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    f64::from(a.x - b.x).hypot(f64::from(a.y - b.y))
}

/// Octile distance: diagonal steps cost √2, straight steps cost 1.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = f64::from((a.x - b.x).abs());
    let dy = f64::from((a.y - b.y).abs());
    dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy)
}

/// A distance function usable both as heuristic and as edge cost.
///
/// Pick the metric that matches the grid's moves: `Manhattan` for
/// [`Connectivity::Four`](crate::Connectivity::Four), `Octile` or `Chebyshev`
/// for [`Connectivity::Eight`](crate::Connectivity::Eight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    #[default]
    Manhattan,
    Chebyshev,
    Euclidean,
    Octile,
}

impl Metric {
    /// Distance from `a` to `b` under this metric.
    pub fn between(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Manhattan => f64::from(manhattan(a, b)),
            Self::Chebyshev => f64::from(chebyshev(a, b)),
            Self::Euclidean => euclidean(a, b),
            Self::Octile => octile(a, b),
        }
    }
}

impl HeuristicEstimator<Point> for Metric {
    #[inline]
    fn estimate(&self, node: &Point, goal: &Point) -> f64 {
        self.between(*node, *goal)
    }
}

impl DistanceCalculator<Point> for Metric {
    #[inline]
    fn distance(&self, from: &Point, to: &Point) -> f64 {
        self.between(*from, *to)
    }
}
