use std::collections::{BTreeMap, VecDeque};

use crate::error::{GraphError, Result};

/// Whether parallel edges are allowed between the same pair of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Simple,
    Multigraph,
}

/// An undirected, unweighted graph over the nodes `0..node_count`.
///
/// Adjacency is stored per node as an ordered map from neighbor to edge
/// multiplicity, so neighbor lookup and multiplicity queries are
/// `O(log d)` and iteration order never depends on hashing.
///
/// # Examples
/// ```
/// use karger::cs::graph::Graph;
///
/// let mut graph = Graph::new_multigraph(3);
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(1, 2).unwrap();
///
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.multiplicity(0, 1), 2);
/// assert!(graph.is_connected());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    kind: GraphKind,
    adjacency: Vec<BTreeMap<usize, usize>>,
    edge_count: usize,
}

impl Graph {
    pub fn new(kind: GraphKind, node_count: usize) -> Self {
        Self {
            kind,
            adjacency: vec![BTreeMap::new(); node_count],
            edge_count: 0,
        }
    }

    pub fn new_simple(node_count: usize) -> Self {
        Self::new(GraphKind::Simple, node_count)
    }

    pub fn new_multigraph(node_count: usize) -> Self {
        Self::new(GraphKind::Multigraph, node_count)
    }

    /// Builds a graph from a list of undirected edges.
    ///
    /// # Errors
    /// * `VertexNotFound` if an endpoint is `>= node_count`
    /// * `InvalidInput` for self-loops, or repeated pairs in a simple graph
    pub fn from_edges(kind: GraphKind, node_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::new(kind, node_count);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds one edge instance between `u` and `v`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(GraphError::invalid_input(format!(
                "self-loop on node {} is not allowed",
                u
            )));
        }
        if self.kind == GraphKind::Simple && self.has_edge(u, v) {
            return Err(GraphError::invalid_input(format!(
                "edge ({}, {}) already exists in a simple graph",
                u, v
            )));
        }
        *self.adjacency[u].entry(v).or_insert(0) += 1;
        *self.adjacency[v].entry(u).or_insert(0) += 1;
        self.edge_count += 1;
        Ok(())
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_simple(&self) -> bool {
        self.kind == GraphKind::Simple
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edge instances, parallel edges counted separately.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of parallel edges between `u` and `v` (0 if not adjacent or unknown).
    pub fn multiplicity(&self, u: usize, v: usize) -> usize {
        self.adjacency
            .get(u)
            .and_then(|neighbors| neighbors.get(&v))
            .copied()
            .unwrap_or(0)
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.multiplicity(u, v) > 0
    }

    /// Neighbors of `u` with the multiplicity of the connecting edges.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .get(u)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(&v, &m)| (v, m)))
    }

    /// Number of edge instances incident to `u`.
    pub fn degree(&self, u: usize) -> usize {
        self.neighbors(u).map(|(_, m)| m).sum()
    }

    /// Unordered node pairs `(u, v)` with `u < v`, each with its multiplicity.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .range(u + 1..)
                .map(move |(&v, &m)| (u, v, m))
        })
    }

    /// Breadth-first reachability check from node 0. Graphs with fewer than
    /// two nodes are trivially connected.
    pub fn is_connected(&self) -> bool {
        let n = self.node_count();
        if n < 2 {
            return true;
        }
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(0);
        let mut reached = 1;

        while let Some(u) = queue.pop_front() {
            for &v in self.adjacency[u].keys() {
                if !visited[v] {
                    visited[v] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }
        reached == n
    }

    /// Returns the same edges viewed as a multigraph (multiplicity 1 per simple edge).
    pub fn to_multigraph(&self) -> Graph {
        Graph {
            kind: GraphKind::Multigraph,
            adjacency: self.adjacency.clone(),
            edge_count: self.edge_count,
        }
    }

    pub(crate) fn adjacency(&self) -> &[BTreeMap<usize, usize>] {
        &self.adjacency
    }

    /// Adds `count` parallel edges between two nodes already known to be
    /// valid and distinct. Only used by generators that guarantee both.
    pub(crate) fn add_edges_unchecked(&mut self, u: usize, v: usize, count: usize) {
        debug_assert!(u != v && u < self.node_count() && v < self.node_count());
        *self.adjacency[u].entry(v).or_insert(0) += count;
        *self.adjacency[v].entry(u).or_insert(0) += count;
        self.edge_count += count;
    }

    fn check_node(&self, u: usize) -> Result<()> {
        if u >= self.node_count() {
            return Err(GraphError::VertexNotFound(u));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_graph_rejects_parallel_edges() {
        let mut graph = Graph::new_simple(3);
        graph.add_edge(0, 1).unwrap();
        assert!(matches!(
            graph.add_edge(1, 0),
            Err(GraphError::InvalidInput(_))
        ));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = Graph::new_multigraph(2);
        assert!(matches!(
            graph.add_edge(1, 1),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_vertex() {
        let mut graph = Graph::new_multigraph(2);
        assert_eq!(graph.add_edge(0, 5), Err(GraphError::VertexNotFound(5)));
    }

    #[test]
    fn test_multigraph_multiplicity_and_degree() {
        let graph =
            Graph::from_edges(GraphKind::Multigraph, 3, &[(0, 1), (1, 0), (0, 1), (1, 2)]).unwrap();
        assert_eq!(graph.multiplicity(0, 1), 3);
        assert_eq!(graph.multiplicity(1, 0), 3);
        assert_eq!(graph.multiplicity(0, 2), 0);
        assert_eq!(graph.degree(1), 4);
        assert_eq!(graph.edge_count(), 4);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1, 3), (1, 2, 1)]);
    }

    #[test]
    fn test_connectivity() {
        let path = Graph::from_edges(GraphKind::Simple, 4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert!(path.is_connected());

        let split = Graph::from_edges(GraphKind::Simple, 4, &[(0, 1), (2, 3)]).unwrap();
        assert!(!split.is_connected());

        assert!(Graph::new_simple(1).is_connected());
    }

    #[test]
    fn test_lift_to_multigraph() {
        let simple = Graph::from_edges(GraphKind::Simple, 3, &[(0, 1), (1, 2)]).unwrap();
        let mut multi = simple.to_multigraph();
        assert_eq!(multi.kind(), GraphKind::Multigraph);
        assert_eq!(multi.edge_count(), 2);
        multi.add_edge(0, 1).unwrap();
        assert_eq!(multi.multiplicity(0, 1), 2);
    }
}
