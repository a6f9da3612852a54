//! Exact global min-cut used as ground truth for the randomized estimator.
//!
//! Complexity: O(V^3) with the dense capacity matrix used here, which is
//! plenty for the graph sizes calibration runs on.

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// An exact minimum cut: its value and the two sides of the partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactCut {
    pub value: usize,
    pub partition: (Vec<usize>, Vec<usize>),
}

/// Source of exact min-cut values. Calibration only reads `value`.
pub trait MinCutOracle {
    fn min_cut(&self, graph: &Graph) -> Result<ExactCut>;
}

/// Stoer-Wagner minimum cut on unit-weight multigraphs, parallel edges
/// counting as capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoerWagner;

impl MinCutOracle for StoerWagner {
    fn min_cut(&self, graph: &Graph) -> Result<ExactCut> {
        let n = graph.node_count();
        if n < 2 {
            return Err(GraphError::invalid_input(format!(
                "a cut needs at least 2 nodes, got {}",
                n
            )));
        }

        let mut capacity = vec![vec![0usize; n]; n];
        for (u, v, m) in graph.edges() {
            capacity[u][v] = m;
            capacity[v][u] = m;
        }

        let mut active: Vec<usize> = (0..n).collect();
        let mut merged: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        let mut best_cut = usize::MAX;
        let mut best_side = Vec::new();

        while active.len() > 1 {
            let (s, t, cut_of_phase) = minimum_cut_phase(&active, &capacity);
            if cut_of_phase < best_cut {
                best_cut = cut_of_phase;
                best_side = merged[t].clone();
            }

            for &w in &active {
                if w != s && w != t {
                    capacity[s][w] += capacity[t][w];
                    capacity[w][s] += capacity[w][t];
                }
            }
            let t_merged = std::mem::take(&mut merged[t]);
            merged[s].extend(t_merged);
            active.retain(|&x| x != t);
        }

        best_side.sort_unstable();
        let mut in_side = vec![false; n];
        for &u in &best_side {
            in_side[u] = true;
        }
        let other_side = (0..n).filter(|&u| !in_side[u]).collect();

        Ok(ExactCut {
            value: best_cut,
            partition: (best_side, other_side),
        })
    }
}

/// Maximum adjacency ordering over the active vertices. Returns the last
/// two vertices added and the cut of the phase (the weight connecting the
/// last vertex to all the others).
fn minimum_cut_phase(active: &[usize], capacity: &[Vec<usize>]) -> (usize, usize, usize) {
    let n = capacity.len();
    let mut in_a = vec![false; n];
    let mut weight = vec![0usize; n];
    let mut previous = active[0];
    let mut last = active[0];

    for _ in 0..active.len() {
        let next = active
            .iter()
            .copied()
            .filter(|&v| !in_a[v])
            .fold(None, |best: Option<usize>, v| match best {
                Some(b) if weight[b] >= weight[v] => Some(b),
                _ => Some(v),
            });
        let Some(next) = next else {
            break;
        };
        in_a[next] = true;
        previous = last;
        last = next;
        for &w in active {
            if !in_a[w] {
                weight[w] += capacity[next][w];
            }
        }
    }

    (previous, last, weight[last])
}
