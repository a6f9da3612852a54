//! Experiment configuration shared by generation, estimation and calibration.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, GraphFamily};

/// Parameters of a min-cut experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Nodes per generated graph
    pub num_nodes: usize,
    /// Edge count for simple graphs and multigraphs; random when `None`
    pub num_edges: Option<usize>,
    /// Which generator to use (barbells carry their bridge edge count)
    pub family: GraphFamily,
    /// Contraction runs per min-cut estimate
    pub trials: usize,
    /// Graphs sampled per calibration point
    pub num_graphs: usize,
    /// Seed for reproducible runs; entropy-seeded when `None`
    pub seed: Option<u64>,
    /// Ceiling on trials while searching for the true cut; unbounded when `None`
    pub trial_limit: Option<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            num_edges: None,
            family: GraphFamily::Simple,
            trials: 100,
            num_graphs: 20,
            seed: None,
            trial_limit: None,
        }
    }
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    pub fn with_num_edges(mut self, num_edges: usize) -> Self {
        self.num_edges = Some(num_edges);
        self
    }

    pub fn with_family(mut self, family: GraphFamily) -> Self {
        self.family = family;
        self
    }

    /// Switches to barbell graphs joined by `bridge_edges` edges.
    pub fn with_bridge_edges(mut self, bridge_edges: usize) -> Self {
        self.family = GraphFamily::Barbell { bridge_edges };
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_num_graphs(mut self, num_graphs: usize) -> Self {
        self.num_graphs = num_graphs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trial_limit(mut self, trial_limit: usize) -> Self {
        self.trial_limit = Some(trial_limit);
        self
    }

    /// Checks every count in the configuration. Family specific node and
    /// edge bounds are enforced by the generators themselves.
    pub fn validate(&self) -> Result<()> {
        self.validate_graph()?;
        if self.trials == 0 {
            return Err(GraphError::invalid_parameter("trials must be at least 1"));
        }
        if self.num_graphs == 0 {
            return Err(GraphError::invalid_parameter(
                "num_graphs must be at least 1",
            ));
        }
        if self.trial_limit == Some(0) {
            return Err(GraphError::invalid_parameter(
                "trial_limit must be at least 1",
            ));
        }
        Ok(())
    }

    /// Checks only the settings that shape a generated graph.
    ///
    /// A barbell's edge count follows from its clique sizes, so an explicit
    /// `num_edges` together with a barbell family is rejected.
    pub fn validate_graph(&self) -> Result<()> {
        if self.num_nodes < 2 {
            return Err(GraphError::invalid_parameter(format!(
                "num_nodes must be at least 2, got {}",
                self.num_nodes
            )));
        }
        if let (GraphFamily::Barbell { .. }, Some(m)) = (self.family, self.num_edges) {
            return Err(GraphError::invalid_parameter(format!(
                "num_edges {} cannot be set for barbell graphs",
                m
            )));
        }
        Ok(())
    }

    /// Random source for the experiment: seeded when `seed` is set.
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_entropy(),
        }
    }

    /// Generates one graph of the configured family and size.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        self.validate_graph()?;
        self.family.generate(self.num_nodes, self.num_edges, rng)
    }
}
