use std::collections::BTreeMap;

use log::{debug, trace};
use rand::Rng;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Working multigraph for one contraction run.
///
/// Nodes live in an arena indexed by their original id; a contracted node
/// leaves an empty slot behind. `edges` counts edge instances, each
/// undirected instance once.
struct Contraction {
    adjacency: Vec<Option<BTreeMap<usize, usize>>>,
    degree: Vec<usize>,
    alive: usize,
    edges: usize,
}

impl Contraction {
    fn new(graph: &Graph) -> Self {
        let adjacency: Vec<_> = graph.adjacency().iter().cloned().map(Some).collect();
        let degree = (0..graph.node_count()).map(|u| graph.degree(u)).collect();
        Self {
            adjacency,
            degree,
            alive: graph.node_count(),
            edges: graph.edge_count(),
        }
    }

    /// Picks an edge instance uniformly at random.
    ///
    /// Every instance owns two half-edges, so drawing a half-edge index in
    /// `0..2 * edges` and locating it through the per-node degrees weights
    /// each node pair by its multiplicity.
    fn random_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(usize, usize)> {
        if self.edges == 0 {
            return None;
        }
        let mut r = rng.gen_range(0..2 * self.edges);
        for (u, &d) in self.degree.iter().enumerate() {
            if r >= d {
                r -= d;
                continue;
            }
            for (&v, &m) in self.adjacency[u].as_ref()? {
                if r < m {
                    return Some((u, v));
                }
                r -= m;
            }
        }
        None
    }

    /// Merges `v` into `u`. Edges between `u` and `v` disappear, every
    /// other edge of `v` is re-attached to `u` with its multiplicity.
    fn merge(&mut self, u: usize, v: usize) {
        let Some(v_neighbors) = self.adjacency[v].take() else {
            return;
        };
        for (w, m) in v_neighbors {
            if w == u {
                if let Some(u_neighbors) = self.adjacency[u].as_mut() {
                    u_neighbors.remove(&v);
                }
                self.degree[u] -= m;
                self.edges -= m;
                continue;
            }
            if let Some(w_neighbors) = self.adjacency[w].as_mut() {
                w_neighbors.remove(&v);
                *w_neighbors.entry(u).or_insert(0) += m;
            }
            if let Some(u_neighbors) = self.adjacency[u].as_mut() {
                *u_neighbors.entry(w).or_insert(0) += m;
            }
            self.degree[u] += m;
        }
        self.degree[v] = 0;
        self.alive -= 1;
    }
}

/// Runs Karger's contraction algorithm once.
///
/// A private multigraph copy of `graph` is contracted along uniformly
/// chosen edge instances until two supernodes remain; the number of edges
/// between them is the cut estimate. For a graph with `n` nodes and min-cut
/// `c`, one run returns `c` with probability at least `2 / (n (n - 1))` and
/// never returns less than `c`.
///
/// # Examples
/// ```
/// use karger::graph::{contract_once, Graph, GraphKind};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let graph = Graph::from_edges(GraphKind::Multigraph, 2, &[(0, 1), (0, 1), (0, 1)]).unwrap();
/// let mut rng = ChaCha20Rng::seed_from_u64(0);
/// assert_eq!(contract_once(&graph, &mut rng).unwrap(), 3);
/// ```
///
/// # Errors
/// * `InvalidInput` if the graph has fewer than 2 nodes
///
/// A disconnected input eventually runs out of edges with more than two
/// supernodes left; its min-cut is 0 and that is what is returned.
pub fn contract_once<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<usize> {
    if graph.node_count() < 2 {
        return Err(GraphError::invalid_input(format!(
            "contraction needs at least 2 nodes, got {}",
            graph.node_count()
        )));
    }

    let mut state = Contraction::new(graph);
    while state.alive > 2 {
        match state.random_edge(rng) {
            Some((u, v)) => state.merge(u, v),
            None => return Ok(0),
        }
    }
    Ok(state.edges)
}

/// Repeats [`contract_once`] `trials` times and keeps the smallest cut.
///
/// The result is never below the true min-cut, and more trials can only
/// lower it. With [`recommended_trials`] runs the true min-cut is missed
/// with probability at most `1 / n`.
///
/// # Errors
/// * `InvalidParameter` if `trials == 0`
/// * `InvalidInput` if the graph has fewer than 2 nodes
pub fn estimate_min_cut<R: Rng + ?Sized>(graph: &Graph, trials: usize, rng: &mut R) -> Result<usize> {
    check_trials(trials)?;

    let mut best_cut = usize::MAX;
    for trial in 0..trials {
        let cut = contract_once(graph, rng)?;
        trace!("trial {}: cut {}", trial + 1, cut);
        if cut < best_cut {
            best_cut = cut;
        }
        if best_cut == 0 {
            break;
        }
    }
    debug!(
        "estimated min-cut {} over {} trials ({} nodes, {} edges)",
        best_cut,
        trials,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(best_cut)
}

/// Parallel version of [`estimate_min_cut`].
///
/// Trial `i` runs on its own graph copy with a ChaCha generator seeded from
/// `seed` on stream `i`, so the result for a given seed does not depend on
/// the number of worker threads.
#[cfg(feature = "parallel")]
pub fn estimate_min_cut_parallel(graph: &Graph, trials: usize, seed: u64) -> Result<usize> {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use rayon::prelude::*;

    check_trials(trials)?;

    let best_cut = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            rng.set_stream(trial as u64);
            contract_once(graph, &mut rng)
        })
        .try_reduce(|| usize::MAX, |a, b| Ok(a.min(b)))?;
    debug!(
        "estimated min-cut {} over {} parallel trials",
        best_cut, trials
    );
    Ok(best_cut)
}

/// Number of trials after which the probability of missing the min-cut of
/// an `n`-node graph drops to `1 / n`: `ceil(C(n, 2) * ln n)`.
pub fn recommended_trials(num_nodes: usize) -> usize {
    if num_nodes < 2 {
        return 1;
    }
    let n = num_nodes as f64;
    let trials = (n * (n - 1.0) / 2.0 * n.ln()).ceil() as usize;
    trials.max(1)
}

fn check_trials(trials: usize) -> Result<()> {
    if trials == 0 {
        return Err(GraphError::invalid_parameter("trials must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{generator, GraphKind, MinCutOracle, StoerWagner};
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_two_nodes_returns_multiplicity() {
        let graph =
            Graph::from_edges(GraphKind::Multigraph, 2, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(contract_once(&graph, &mut rng(0)).unwrap(), 3);
    }

    #[test]
    fn test_karger_min_cut_triangle() {
        // Triangle graph: every contraction leaves a double edge.
        let graph = Graph::from_edges(GraphKind::Simple, 3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let mut rng = rng(1);
        for _ in 0..20 {
            assert_eq!(contract_once(&graph, &mut rng).unwrap(), 2);
        }
        assert_eq!(estimate_min_cut(&graph, 100, &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_karger_min_cut_square() {
        // Square with a diagonal: the two degree-2 corners give a cut of 2.
        let graph = Graph::from_edges(
            GraphKind::Simple,
            4,
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
        )
        .unwrap();
        assert_eq!(estimate_min_cut(&graph, 200, &mut rng(2)).unwrap(), 2);
    }

    #[test]
    fn test_too_few_nodes() {
        let graph = Graph::new_multigraph(1);
        assert!(matches!(
            contract_once(&graph, &mut rng(3)),
            Err(GraphError::InvalidInput(_))
        ));
        assert!(matches!(
            estimate_min_cut(&graph, 10, &mut rng(3)),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_trials() {
        let graph = Graph::from_edges(GraphKind::Simple, 2, &[(0, 1)]).unwrap();
        assert!(matches!(
            estimate_min_cut(&graph, 0, &mut rng(4)),
            Err(GraphError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_disconnected_graph_has_zero_cut() {
        let graph = Graph::from_edges(GraphKind::Simple, 4, &[(0, 1), (2, 3)]).unwrap();
        assert_eq!(estimate_min_cut(&graph, 5, &mut rng(5)).unwrap(), 0);
    }

    #[test]
    fn test_edge_selection_weighted_by_multiplicity() {
        // 0 =3= 1 -1- 2: contracting one of the three parallel edges leaves
        // a cut of 1, contracting the single edge leaves a cut of 3.
        let graph =
            Graph::from_edges(GraphKind::Multigraph, 3, &[(0, 1), (0, 1), (0, 1), (1, 2)]).unwrap();
        let mut rng = rng(6);
        let runs = 4000;
        let mut ones = 0;
        for _ in 0..runs {
            match contract_once(&graph, &mut rng).unwrap() {
                1 => ones += 1,
                3 => {}
                other => panic!("unexpected cut {}", other),
            }
        }
        assert_abs_diff_eq!(ones as f64 / runs as f64, 0.75, epsilon = 0.05);
    }

    #[test]
    fn test_never_below_true_min_cut() {
        let mut rng = rng(7);
        for n in 3..10 {
            let simple = generator::generate_connected_simple(n, None, &mut rng).unwrap();
            let multi = generator::generate_connected_multigraph(n, None, &mut rng).unwrap();
            for graph in [simple, multi] {
                let exact = StoerWagner.min_cut(&graph).unwrap().value;
                for _ in 0..30 {
                    assert!(contract_once(&graph, &mut rng).unwrap() >= exact);
                }
            }
        }
    }

    #[test]
    fn test_enough_trials_find_true_min_cut() {
        let mut rng = rng(8);
        for n in [5, 8, 10] {
            let graph = generator::generate_connected_simple(n, None, &mut rng).unwrap();
            let exact = StoerWagner.min_cut(&graph).unwrap().value;
            let trials = recommended_trials(n) * 5;
            assert_eq!(estimate_min_cut(&graph, trials, &mut rng).unwrap(), exact);
        }
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let graph = generator::generate_connected_multigraph(15, Some(30), &mut rng(9)).unwrap();
        let a = estimate_min_cut(&graph, 5, &mut rng(10)).unwrap();
        let b = estimate_min_cut(&graph, 5, &mut rng(10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recommended_trials() {
        assert_eq!(recommended_trials(0), 1);
        assert_eq!(recommended_trials(2), 1);
        // C(10, 2) * ln 10 = 45 * 2.302585... = 103.6
        assert_eq!(recommended_trials(10), 104);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_estimate() {
        let graph = generator::generate_barbell(10, 2, &mut rng(11)).unwrap();
        let a = estimate_min_cut_parallel(&graph, 300, 99).unwrap();
        let b = estimate_min_cut_parallel(&graph, 300, 99).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, 2);
        assert!(matches!(
            estimate_min_cut_parallel(&graph, 0, 99),
            Err(GraphError::InvalidParameter(_))
        ));
    }
}
