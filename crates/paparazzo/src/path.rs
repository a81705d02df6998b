use std::fmt;

use crate::traits::DistanceCalculator;

/// An ordered, non-empty sequence of nodes from a start node to a goal node.
///
/// A path from a node to itself holds that single node. There is no empty
/// path: failure to reach the goal is reported as [`Outcome::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path<T> {
    nodes: Vec<T>,
}

impl<T> Path<T> {
    /// Create a path holding only `node`.
    pub fn new(node: T) -> Self {
        Self { nodes: vec![node] }
    }

    /// Build from nodes already in start-to-goal order. `nodes` must not be empty.
    pub(crate) fn from_vec(nodes: Vec<T>) -> Self {
        debug_assert!(!nodes.is_empty(), "a path holds at least one node");
        Self { nodes }
    }

    /// Append `node` at the goal end.
    pub fn push(&mut self, node: T) {
        self.nodes.push(node);
    }

    /// Number of nodes, endpoints included. Always at least 1.
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The start node.
    #[inline]
    pub fn first(&self) -> &T {
        &self.nodes[0]
    }

    /// The goal node.
    #[inline]
    pub fn last(&self) -> &T {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Iterate from start to goal. Each call starts over.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// The nodes as a slice, start first.
    #[inline]
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Unwrap into the node vector, start first.
    pub fn into_vec(self) -> Vec<T> {
        self.nodes
    }

    /// Whether `node` lies on the path.
    pub fn contains(&self, node: &T) -> bool
    where
        T: PartialEq,
    {
        self.nodes.contains(node)
    }

    /// Sum of the edge costs along the path under `distance`.
    pub fn total_cost<D: DistanceCalculator<T>>(&self, distance: &D) -> f64 {
        self.nodes
            .windows(2)
            .map(|w| distance.distance(&w[0], &w[1]))
            .sum()
    }
}

/// Error returned when building a [`Path`] from no nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPathError;

impl fmt::Display for EmptyPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("path: a path holds at least one node")
    }
}

impl std::error::Error for EmptyPathError {}

impl<T> TryFrom<Vec<T>> for Path<T> {
    type Error = EmptyPathError;

    /// Build from nodes in start-to-goal order, rejecting an empty vector.
    fn try_from(nodes: Vec<T>) -> Result<Self, Self::Error> {
        if nodes.is_empty() {
            return Err(EmptyPathError);
        }
        Ok(Self { nodes })
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Path<T> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        #[derive(serde::Deserialize)]
        struct Raw<U> {
            nodes: Vec<U>,
        }
        let raw = <Raw<T> as serde::Deserialize>::deserialize(deserializer)?;
        Path::try_from(raw.nodes).map_err(serde::de::Error::custom)
    }
}

impl<T> IntoIterator for Path<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Path<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a search: a path, or the [`Outcome::NotFound`] marker.
///
/// `NotFound` is a successful answer ("the goal is unreachable"), not an
/// error. Test for it with `==` or [`Outcome::is_not_found`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome<T> {
    Found(Path<T>),
    NotFound,
}

impl<T> Outcome<T> {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether this is the [`Outcome::NotFound`] marker.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Borrow the path, if one was found.
    pub fn path(&self) -> Option<&Path<T>> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Take the path, if one was found.
    pub fn into_path(self) -> Option<Path<T>> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

impl<T> From<Path<T>> for Outcome<T> {
    fn from(p: Path<T>) -> Self {
        Self::Found(p)
    }
}
