//! Generic A* graph search.
//!
//! The engine knows nothing about the graph it searches. Callers supply three
//! strategies and the engine does the rest:
//!
//! | Trait | Supplies |
//! |---|---|
//! | [`HeuristicEstimator`] | admissible estimate of remaining cost |
//! | [`NeighbourLookup`] | adjacency |
//! | [`DistanceCalculator`] | edge cost between adjacent nodes |
//!
//! Closures with the right signature implement each trait directly. Nodes can
//! be any `Eq + Hash + Clone` type.
//!
//! ```
//! use paparazzo::{AStar, Outcome};
//!
//! let astar = AStar::new(
//!     |n: &i32, goal: &i32| f64::from((goal - n).abs()),
//!     |n: &i32, buf: &mut Vec<i32>| buf.extend([n - 1, n + 1]),
//!     |_: &i32, _: &i32| 1.0,
//! );
//! let path = astar.search(2, 5).into_path().unwrap();
//! assert_eq!(path.nodes(), &[2, 3, 4, 5]);
//! assert!(matches!(astar.search(0, 0), Outcome::Found(p) if p.len() == 1));
//! ```
//!
//! Progress can be watched through a [`SearchObserver`]; see
//! [`SearchStats`], [`RecordingObserver`] and [`LoggingObserver`].

mod astar;
mod frontier;
mod memo;
mod observer;
mod path;
mod traits;

pub use astar::AStar;
pub use memo::CachedNeighbours;
pub use observer::{
    LoggingObserver, NoopObserver, RecordingObserver, SearchEvent, SearchObserver, SearchStats,
};
pub use path::{EmptyPathError, Outcome, Path};
pub use traits::{DistanceCalculator, HeuristicEstimator, NeighbourLookup};
