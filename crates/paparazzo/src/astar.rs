use std::hash::Hash;

use crate::frontier::SearchState;
use crate::observer::{NoopObserver, SearchObserver};
use crate::path::{Outcome, Path};
use crate::traits::{DistanceCalculator, HeuristicEstimator, NeighbourLookup};

/// A* search engine over caller-defined nodes.
///
/// The engine holds only its strategies and keeps no state between calls:
/// every [`search`](Self::search) allocates its own open set and node records
/// and drops them on return. With `Sync` strategies one engine can serve
/// searches from several threads at once.
///
/// Among open nodes with equal `f = g + h`, the node with the lower `h` is
/// expanded first, and among equal `h` the one discovered first. The order is
/// fully deterministic, so repeated searches return the same path.
///
/// Optimality requires non-negative edge costs and a consistent heuristic:
/// a closed node is never reopened, even if a cheaper route to it appears
/// later.
#[derive(Debug, Clone)]
pub struct AStar<H, N, D, O = NoopObserver> {
    estimator: H,
    neighbours: N,
    distance: D,
    observer: O,
}

impl<H, N, D> AStar<H, N, D> {
    /// Create an engine from its three strategies, with no observer.
    pub fn new(estimator: H, neighbours: N, distance: D) -> Self {
        Self {
            estimator,
            neighbours,
            distance,
            observer: NoopObserver,
        }
    }
}

impl<H, N, D, O> AStar<H, N, D, O> {
    /// Replace the observer. Pass `&observer` to keep ownership of it.
    pub fn with_observer<O2>(self, observer: O2) -> AStar<H, N, D, O2> {
        AStar {
            estimator: self.estimator,
            neighbours: self.neighbours,
            distance: self.distance,
            observer,
        }
    }

    /// The heuristic strategy.
    pub fn estimator(&self) -> &H {
        &self.estimator
    }

    /// The neighbour lookup, e.g. to inspect a [`CachedNeighbours`](crate::CachedNeighbours).
    pub fn neighbours(&self) -> &N {
        &self.neighbours
    }

    /// The edge cost strategy.
    pub fn distance(&self) -> &D {
        &self.distance
    }

    /// The observer notified during searches.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Find a minimum-cost path from `start` to `goal`.
    ///
    /// Returns [`Outcome::NotFound`] when the open set runs dry before the
    /// goal is expanded. A panicking strategy aborts the search.
    pub fn search<T>(&self, start: T, goal: T) -> Outcome<T>
    where
        T: Eq + Hash + Clone,
        H: HeuristicEstimator<T>,
        N: NeighbourLookup<T>,
        D: DistanceCalculator<T>,
        O: SearchObserver<T>,
    {
        let mut state = SearchState::new();

        let h = self.estimator.estimate(&start, &goal);
        log::debug!("A* search started, h(start) = {h}");
        self.observer.added_to_open_set(&start);
        state.discover(start, 0.0, h, None);

        let mut nbuf: Vec<T> = Vec::with_capacity(8);
        let mut expanded = 0usize;

        while let Some(ci) = state.pop_min() {
            let current = state.record(ci);
            if current.node == goal {
                let path = Path::from_vec(state.trace_back(ci));
                log::debug!(
                    "A* reached goal: cost {}, {} nodes, {expanded} expanded, {} discovered, {} left open",
                    current.g,
                    path.len(),
                    state.discovered(),
                    state.open_len(),
                );
                return Outcome::Found(path);
            }

            let current_g = current.g;
            log::trace!("expanding slot {ci} with g = {current_g}, f = {}", current.f());
            state.close(ci);
            expanded += 1;

            // Clone the node out so the state can be mutated while it is in use.
            let x = state.record(ci).node.clone();
            self.observer.added_to_closed_set(&x);

            nbuf.clear();
            self.neighbours.neighbours(&x, &mut nbuf);

            for y in nbuf.drain(..) {
                let existing = state.slot_of(&y);
                if existing.is_some_and(|yi| state.record(yi).closed) {
                    continue;
                }

                let tentative_g = current_g + self.distance.distance(&x, &y);

                match existing {
                    Some(yi) if state.record(yi).open => {
                        if tentative_g < state.record(yi).g {
                            log::trace!(
                                "relaxing slot {yi}: {} -> {tentative_g}",
                                state.record(yi).g
                            );
                            let h = self.estimator.estimate(&y, &goal);
                            state.reopen(yi, tentative_g, h, ci);
                            self.observer.updated_g_cost(&y, tentative_g);
                        }
                    }
                    Some(yi) => {
                        // Known but neither open nor closed: treat as new.
                        let h = self.estimator.estimate(&y, &goal);
                        state.reopen(yi, tentative_g, h, ci);
                        self.observer.added_to_open_set(&y);
                        self.observer.updated_g_cost(&y, tentative_g);
                    }
                    None => {
                        let h = self.estimator.estimate(&y, &goal);
                        self.observer.added_to_open_set(&y);
                        self.observer.updated_g_cost(&y, tentative_g);
                        state.discover(y, tentative_g, h, Some(ci));
                    }
                }
            }
        }

        log::debug!(
            "A* exhausted the open set: {expanded} expanded, {} discovered",
            state.discovered()
        );
        Outcome::NotFound
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;
    use crate::observer::{RecordingObserver, SearchEvent, SearchStats};

    /// Undirected weighted graph backed by hash maps, with a lookup-table heuristic.
    #[derive(Default)]
    struct TableGraph {
        adj: HashMap<&'static str, Vec<&'static str>>,
        cost: HashMap<(&'static str, &'static str), f64>,
        h: HashMap<&'static str, f64>,
    }

    impl TableGraph {
        fn edge(&mut self, a: &'static str, b: &'static str, c: f64) -> &mut Self {
            self.adj.entry(a).or_default().push(b);
            self.adj.entry(b).or_default().push(a);
            self.cost.insert((a, b), c);
            self.cost.insert((b, a), c);
            self
        }

        fn heuristic(&mut self, n: &'static str, v: f64) -> &mut Self {
            self.h.insert(n, v);
            self
        }
    }

    /// Borrowed view used as all three strategies.
    #[derive(Clone, Copy)]
    struct Graph<'a>(&'a TableGraph);

    impl HeuristicEstimator<&'static str> for Graph<'_> {
        fn estimate(&self, node: &&'static str, _goal: &&'static str) -> f64 {
            self.0.h.get(node).copied().unwrap_or(0.0)
        }
    }

    impl NeighbourLookup<&'static str> for Graph<'_> {
        fn neighbours(&self, node: &&'static str, buf: &mut Vec<&'static str>) {
            if let Some(ns) = self.0.adj.get(node) {
                buf.extend(ns.iter().copied());
            }
        }
    }

    impl DistanceCalculator<&'static str> for Graph<'_> {
        fn distance(&self, from: &&'static str, to: &&'static str) -> f64 {
            match self.0.cost.get(&(*from, *to)) {
                Some(&c) => c,
                None => panic!("no edge between {from} and {to}"),
            }
        }
    }

    fn fixture() -> TableGraph {
        let mut g = TableGraph::default();
        g.edge("start", "a", 1.5)
            .edge("a", "b", 2.0)
            .edge("c", "b", 3.0)
            .edge("c", "goal", 4.0)
            .edge("start", "d", 2.0)
            .edge("e", "d", 3.0)
            .edge("e", "goal", 2.0);
        g.heuristic("a", 4.0)
            .heuristic("b", 2.0)
            .heuristic("c", 4.0)
            .heuristic("d", 4.5)
            .heuristic("e", 2.0);
        g
    }

    #[test]
    fn finds_cheaper_of_two_routes() {
        let g = fixture();
        let g = Graph(&g);
        let astar = AStar::new(g, g, g);
        let outcome = astar.search("start", "goal");
        assert_ne!(outcome, Outcome::NotFound);
        let path = outcome.into_path().unwrap();
        assert_eq!(path.nodes(), &["start", "d", "e", "goal"]);
        assert_eq!(path.total_cost(&g), 7.0);
    }

    #[test]
    fn start_equals_goal() {
        let g = fixture();
        let g = Graph(&g);
        let astar = AStar::new(g, g, g);
        let path = astar.search("c", "c").into_path().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.first(), &"c");
    }

    #[test]
    fn unreachable_goal_is_not_found() {
        let mut g = fixture();
        g.edge("island", "reef", 1.0);
        let g = Graph(&g);
        let astar = AStar::new(g, g, g);
        assert_eq!(astar.search("start", "island"), Outcome::NotFound);
        assert!(astar.search("reef", "goal").is_not_found());
    }

    #[test]
    fn repeated_search_is_identical() {
        let g = fixture();
        let g = Graph(&g);
        let astar = AStar::new(g, g, g);
        assert_eq!(astar.search("start", "goal"), astar.search("start", "goal"));
    }

    #[test]
    fn relaxes_first_discovered_route() {
        // "m" is first reached through the expensive direct edge from "s",
        // then improved via the cheap detour s -> p -> m.
        let mut g = TableGraph::default();
        g.edge("s", "m", 10.0)
            .edge("s", "p", 1.0)
            .edge("p", "m", 1.0)
            .edge("m", "t", 1.0);
        let g = Graph(&g);
        let rec = RecordingObserver::new();
        let astar = AStar::new(g, g, g).with_observer(&rec);
        let path = astar.search("s", "t").into_path().unwrap();
        assert_eq!(path.nodes(), &["s", "p", "m", "t"]);
        assert_eq!(path.total_cost(&g), 3.0);

        let events = rec.take_events();
        let m_costs: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::GCost("m", c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(m_costs, vec![10.0, 2.0]);
        let m_opened = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Opened("m")))
            .count();
        assert_eq!(m_opened, 1);
    }

    #[test]
    fn observer_sees_open_before_gcost_and_closes_each_node_once() {
        let g = fixture();
        let g = Graph(&g);
        let rec = RecordingObserver::new();
        let astar = AStar::new(g, g, g).with_observer(&rec);
        assert!(astar.search("start", "goal").is_found());
        let events = rec.events();
        assert_eq!(events[0], SearchEvent::Opened("start"));
        assert_eq!(events[1], SearchEvent::Closed("start"));
        assert_eq!(events[2], SearchEvent::Opened("a"));
        assert_eq!(events[3], SearchEvent::GCost("a", 1.5));

        let mut closed = HashSet::new();
        for e in &events {
            if let SearchEvent::Closed(n) = e {
                assert!(closed.insert(*n), "{n} closed twice");
            }
        }
        assert!(!closed.contains("goal"));
    }

    #[test]
    fn neighbours_requested_once_per_expansion() {
        let g = fixture();
        let g = Graph(&g);
        let calls = std::cell::RefCell::new(HashMap::<&str, usize>::new());
        let lookup = |n: &&'static str, buf: &mut Vec<&'static str>| {
            *calls.borrow_mut().entry(*n).or_default() += 1;
            g.neighbours(n, buf);
        };
        let astar = AStar::new(g, lookup, g);
        assert!(astar.search("start", "goal").is_found());
        assert!(calls.borrow().values().all(|&c| c == 1));
        assert!(!calls.borrow().contains_key("goal"));
    }

    #[test]
    fn stats_observer_counts_expansions() {
        let g = fixture();
        let g = Graph(&g);
        let stats = SearchStats::new();
        let astar = AStar::new(g, g, g).with_observer(&stats);
        astar.search("start", "goal");
        // start, a, b, d, e expanded; c is left open
        assert_eq!(stats.closed(), 5);
        assert!(stats.opened() >= stats.closed());
    }

    #[test]
    fn concurrent_searches_share_one_engine() {
        let g = fixture();
        let g = Graph(&g);
        let stats = SearchStats::new();
        let astar = AStar::new(g, g, g).with_observer(&stats);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| astar.search("start", "goal")))
                .collect();
            for h in handles {
                let path = h.join().unwrap().into_path().unwrap();
                assert_eq!(path.nodes(), &["start", "d", "e", "goal"]);
            }
        });
        assert_eq!(stats.closed(), 4 * 5);
    }

    #[test]
    fn exhausted_lookup_budget_ends_in_not_found() {
        // A lookup that stops answering after a fixed number of expansions
        // bounds the search from the outside.
        let budget = std::cell::Cell::new(3);
        let astar = AStar::new(
            |_: &u64, _: &u64| 0.0,
            |n: &u64, buf: &mut Vec<u64>| {
                if budget.get() > 0 {
                    budget.set(budget.get() - 1);
                    buf.push(n + 1);
                }
            },
            |_: &u64, _: &u64| 1.0,
        );
        assert_eq!(astar.search(0, 100), Outcome::NotFound);
        assert_eq!(budget.get(), 0);
    }

    #[test]
    #[should_panic(expected = "no edge")]
    fn strategy_panic_aborts_search() {
        let g = fixture();
        let g = Graph(&g);
        let nowhere = |_: &&'static str, buf: &mut Vec<&'static str>| buf.push("nowhere");
        let astar = AStar::new(g, nowhere, g);
        astar.search("start", "goal");
    }

    #[test]
    fn closures_as_strategies() {
        // Integers on a line; each step costs 1.
        let astar = AStar::new(
            |n: &i32, g: &i32| f64::from((g - n).abs()),
            |n: &i32, buf: &mut Vec<i32>| buf.extend([n - 1, n + 1]),
            |_: &i32, _: &i32| 1.0,
        );
        let path = astar.search(0, 5).into_path().unwrap();
        assert_eq!(path.nodes(), &[0, 1, 2, 3, 4, 5]);
    }

    // -----------------------------------------------------------------------
    // Random graphs against brute-force Dijkstra
    // -----------------------------------------------------------------------

    /// Nodes scattered on a plane; every edge costs at least the straight-line
    /// distance between its ends, so that distance is a consistent heuristic.
    struct RandomGraph {
        pos: Vec<(f64, f64)>,
        adj: Vec<Vec<(usize, f64)>>,
    }

    impl RandomGraph {
        fn generate(n: usize, edges: usize, rng: &mut StdRng) -> Self {
            let pos: Vec<(f64, f64)> = (0..n)
                .map(|_| {
                    (
                        f64::from(rng.random_range(0..20u32)),
                        f64::from(rng.random_range(0..20u32)),
                    )
                })
                .collect();
            let mut adj = vec![Vec::new(); n];
            for _ in 0..edges {
                let a = rng.random_range(0..n);
                let b = rng.random_range(0..n);
                if a == b {
                    continue;
                }
                let (dx, dy) = (pos[a].0 - pos[b].0, pos[a].1 - pos[b].1);
                let c = dx.hypot(dy).ceil() + f64::from(rng.random_range(0..5u32)) + 1.0;
                adj[a].push((b, c));
                adj[b].push((a, c));
            }
            Self { pos, adj }
        }

        fn straight_line(&self, a: usize, b: usize) -> f64 {
            let (dx, dy) = (self.pos[a].0 - self.pos[b].0, self.pos[a].1 - self.pos[b].1);
            dx.hypot(dy)
        }

        fn edge_cost(&self, a: usize, b: usize) -> f64 {
            self.adj[a]
                .iter()
                .filter(|&&(n, _)| n == b)
                .map(|&(_, c)| c)
                .fold(f64::INFINITY, f64::min)
        }

        fn dijkstra(&self, from: usize, to: usize) -> Option<f64> {
            let mut dist = vec![f64::INFINITY; self.adj.len()];
            let mut done = vec![false; self.adj.len()];
            dist[from] = 0.0;
            loop {
                let next = (0..self.adj.len())
                    .filter(|&i| !done[i] && dist[i].is_finite())
                    .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
                let Some(u) = next else { break };
                done[u] = true;
                for &(v, c) in &self.adj[u] {
                    if dist[u] + c < dist[v] {
                        dist[v] = dist[u] + c;
                    }
                }
            }
            dist[to].is_finite().then_some(dist[to])
        }
    }

    fn check_against_dijkstra<H>(graph: &RandomGraph, estimator: H, from: usize, to: usize)
    where
        H: HeuristicEstimator<usize>,
    {
        let astar = AStar::new(
            estimator,
            |n: &usize, buf: &mut Vec<usize>| buf.extend(graph.adj[*n].iter().map(|&(m, _)| m)),
            |a: &usize, b: &usize| graph.edge_cost(*a, *b),
        );
        match (astar.search(from, to), graph.dijkstra(from, to)) {
            (Outcome::Found(p), Some(best)) => {
                let cost = p.total_cost(astar.distance());
                assert!((cost - best).abs() < 1e-9, "{cost} != {best}");
                assert_eq!(p.first(), &from);
                assert_eq!(p.last(), &to);
            }
            (Outcome::NotFound, None) => {}
            (got, want) => panic!("A* gave {got:?}, Dijkstra gave {want:?}"),
        }
    }

    #[test]
    fn matches_dijkstra_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let graph = RandomGraph::generate(30, 60, &mut rng);
            let from = rng.random_range(0..30);
            let to = rng.random_range(0..30);
            // Zero heuristic is consistent; A* degenerates to Dijkstra.
            check_against_dijkstra(&graph, |_: &usize, _: &usize| 0.0, from, to);
        }
    }

    #[test]
    fn straight_line_heuristic_stays_optimal_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let graph = RandomGraph::generate(40, 90, &mut rng);
            let from = rng.random_range(0..40);
            let to = rng.random_range(0..40);
            check_against_dijkstra(
                &graph,
                |n: &usize, g: &usize| graph.straight_line(*n, *g),
                from,
                to,
            );
        }
    }
}
