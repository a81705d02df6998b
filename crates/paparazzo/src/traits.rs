/// Heuristic estimate of the remaining cost from a node to the goal.
pub trait HeuristicEstimator<T> {
    /// Estimated cost of reaching `goal` from `node`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, node: &T, goal: &T) -> f64;
}

/// Adjacency of the search graph.
pub trait NeighbourLookup<T> {
    /// Append the neighbours of `node` into `buf`. The caller clears `buf` before calling.
    fn neighbours(&self, node: &T, buf: &mut Vec<T>);
}

/// Cost of an edge between two adjacent nodes.
pub trait DistanceCalculator<T> {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 0.
    fn distance(&self, from: &T, to: &T) -> f64;
}

impl<T, F> HeuristicEstimator<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    #[inline]
    fn estimate(&self, node: &T, goal: &T) -> f64 {
        self(node, goal)
    }
}

impl<T, F> NeighbourLookup<T> for F
where
    F: Fn(&T, &mut Vec<T>),
{
    #[inline]
    fn neighbours(&self, node: &T, buf: &mut Vec<T>) {
        self(node, buf)
    }
}

impl<T, F> DistanceCalculator<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    #[inline]
    fn distance(&self, from: &T, to: &T) -> f64 {
        self(from, to)
    }
}
