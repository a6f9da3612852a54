//! Random connected graph generators.
//!
//! All generators draw from a caller-owned random source, so seeding the
//! source (see [`crate::config::ExperimentConfig::rng`]) makes the produced
//! graphs reproducible. Parameters are validated before any randomness is
//! consumed and before any graph is built.

use log::debug;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// The graph families available to experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFamily {
    /// Connected simple graph, see [`generate_connected_simple`]
    Simple,
    /// Connected multigraph, see [`generate_connected_multigraph`]
    Multigraph,
    /// Two cliques joined by `bridge_edges` edges, see [`generate_barbell`]
    Barbell { bridge_edges: usize },
}

impl GraphFamily {
    /// Generates a graph of this family. `num_edges` is ignored for barbells,
    /// whose edge count follows from the clique sizes.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        num_nodes: usize,
        num_edges: Option<usize>,
        rng: &mut R,
    ) -> Result<Graph> {
        match *self {
            GraphFamily::Simple => generate_connected_simple(num_nodes, num_edges, rng),
            GraphFamily::Multigraph => generate_connected_multigraph(num_nodes, num_edges, rng),
            GraphFamily::Barbell { bridge_edges } => {
                if let Some(m) = num_edges {
                    debug!("barbell ignores num_edges {}; edge count follows from the cliques", m);
                }
                generate_barbell(num_nodes, bridge_edges, rng)
            }
        }
    }
}

/// Generates a connected simple graph with `num_nodes` nodes.
///
/// A random spanning tree is built first: nodes are visited in random order
/// and each one attaches to a uniformly chosen, already visited node. The
/// remaining `num_edges - (num_nodes - 1)` edges are sampled without
/// replacement from the node pairs that are not yet adjacent.
///
/// # Arguments
/// * `num_nodes` - Number of nodes, at least 2
/// * `num_edges` - Edge count in `[num_nodes - 1, num_nodes * (num_nodes - 1) / 2]`;
///   drawn uniformly from that range when `None`
///
/// # Errors
/// * `InvalidParameter` if `num_nodes < 2` or `num_edges` is out of range
pub fn generate_connected_simple<R: Rng + ?Sized>(
    num_nodes: usize,
    num_edges: Option<usize>,
    rng: &mut R,
) -> Result<Graph> {
    check_min_nodes(num_nodes)?;
    let min_edges = num_nodes - 1;
    let max_edges = num_nodes * (num_nodes - 1) / 2;

    let num_edges = match num_edges {
        Some(m) if m < min_edges => {
            return Err(GraphError::invalid_parameter(format!(
                "num_edges {} is below {} needed to keep {} nodes connected",
                m, min_edges, num_nodes
            )))
        }
        Some(m) if m > max_edges => {
            return Err(GraphError::invalid_parameter(format!(
                "num_edges {} exceeds the simple graph maximum {} for {} nodes",
                m, max_edges, num_nodes
            )))
        }
        Some(m) => m,
        None => rng.gen_range(min_edges..=max_edges),
    };
    debug!(
        "generating simple graph: {} nodes, {} edges",
        num_nodes, num_edges
    );

    let mut graph = Graph::new_simple(num_nodes);
    add_spanning_tree(&mut graph, rng);

    let candidates: Vec<(usize, usize)> = (0..num_nodes)
        .flat_map(|u| (u + 1..num_nodes).map(move |v| (u, v)))
        .filter(|&(u, v)| !graph.has_edge(u, v))
        .collect();
    for &(u, v) in candidates.choose_multiple(rng, num_edges - min_edges) {
        graph.add_edges_unchecked(u, v, 1);
    }

    Ok(graph)
}

/// Generates a connected multigraph with `num_nodes` nodes.
///
/// Connectivity comes from the same random spanning tree as
/// [`generate_connected_simple`]. Every extra edge joins two distinct,
/// uniformly chosen nodes, so parallel edges accumulate.
///
/// # Arguments
/// * `num_nodes` - Number of nodes, at least 2
/// * `num_edges` - Total edge instances, at least `num_nodes - 1`; when
///   `None`, `num_nodes - 1` plus a random offset in `[1, num_nodes]`
///
/// # Errors
/// * `InvalidParameter` if `num_nodes < 2` or `num_edges < num_nodes - 1`
pub fn generate_connected_multigraph<R: Rng + ?Sized>(
    num_nodes: usize,
    num_edges: Option<usize>,
    rng: &mut R,
) -> Result<Graph> {
    check_min_nodes(num_nodes)?;
    let min_edges = num_nodes - 1;

    let num_edges = match num_edges {
        Some(m) if m < min_edges => {
            return Err(GraphError::invalid_parameter(format!(
                "num_edges {} is below {} needed to keep {} nodes connected",
                m, min_edges, num_nodes
            )))
        }
        Some(m) => m,
        None => min_edges + rng.gen_range(1..=num_nodes),
    };
    debug!(
        "generating multigraph: {} nodes, {} edges",
        num_nodes, num_edges
    );

    let mut graph = Graph::new_multigraph(num_nodes);
    add_spanning_tree(&mut graph, rng);

    for _ in min_edges..num_edges {
        let pair = index::sample(rng, num_nodes, 2);
        graph.add_edges_unchecked(pair.index(0), pair.index(1), 1);
    }

    Ok(graph)
}

/// Generates a barbell graph: two cliques joined by `bridge_edges` edges.
///
/// Nodes `0..num_nodes / 2` form the first clique and the rest form the
/// second. The bridge edges are distinct cross-clique pairs sampled without
/// replacement, so as long as `bridge_edges` is smaller than the smaller
/// clique's internal degree the minimum cut is exactly `bridge_edges`.
///
/// # Errors
/// * `InvalidParameter` if `num_nodes < 4`, `bridge_edges == 0`, or
///   `bridge_edges` exceeds the number of cross-clique pairs
pub fn generate_barbell<R: Rng + ?Sized>(
    num_nodes: usize,
    bridge_edges: usize,
    rng: &mut R,
) -> Result<Graph> {
    if num_nodes < 4 {
        return Err(GraphError::invalid_parameter(format!(
            "a barbell graph needs at least 4 nodes, got {}",
            num_nodes
        )));
    }
    let half = num_nodes / 2;
    let cross_pairs = half * (num_nodes - half);
    if bridge_edges == 0 {
        return Err(GraphError::invalid_parameter(
            "bridge_edges must be at least 1 to keep the barbell connected",
        ));
    }
    if bridge_edges > cross_pairs {
        return Err(GraphError::invalid_parameter(format!(
            "bridge_edges {} exceeds the {} available cross-clique pairs",
            bridge_edges, cross_pairs
        )));
    }
    debug!(
        "generating barbell: {} nodes ({} + {}), {} bridge edges",
        num_nodes,
        half,
        num_nodes - half,
        bridge_edges
    );

    let mut graph = Graph::new_simple(num_nodes);
    for clique in [0..half, half..num_nodes] {
        for u in clique.clone() {
            for v in u + 1..clique.end {
                graph.add_edges_unchecked(u, v, 1);
            }
        }
    }

    let bridges: Vec<(usize, usize)> = (0..half)
        .flat_map(|u| (half..num_nodes).map(move |v| (u, v)))
        .collect();
    for &(u, v) in bridges.choose_multiple(rng, bridge_edges) {
        graph.add_edges_unchecked(u, v, 1);
    }

    Ok(graph)
}

fn check_min_nodes(num_nodes: usize) -> Result<()> {
    if num_nodes < 2 {
        return Err(GraphError::invalid_parameter(format!(
            "need at least 2 nodes for a meaningful graph, got {}",
            num_nodes
        )));
    }
    Ok(())
}

/// Random spanning tree: each node in a shuffled order attaches to a
/// uniformly chosen node earlier in that order.
fn add_spanning_tree<R: Rng + ?Sized>(graph: &mut Graph, rng: &mut R) {
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    order.shuffle(rng);
    for i in 1..order.len() {
        let parent = order[rng.gen_range(0..i)];
        graph.add_edges_unchecked(order[i], parent, 1);
    }
}
