//! Empirical accuracy of the contraction algorithm against exact min-cuts.
//!
//! The numbers produced here are what a reporting layer plots: node counts
//! against the average number of trials needed, or trial counts against
//! the rate at which the estimator finds the exact cut.

use std::collections::BTreeMap;

use log::{debug, warn};
use rand::Rng;

use crate::config::ExperimentConfig;
use crate::error::{GraphError, Result};
use crate::graph::karger::{contract_once, estimate_min_cut};
use crate::graph::{Graph, MinCutOracle};

/// Counts independent contraction runs until one returns `true_min_cut`.
///
/// The count starts at 1 for the first run. With `limit == None` the loop
/// is unbounded and never returns if `true_min_cut` is unreachable, e.g.
/// smaller than the graph's actual min-cut.
///
/// # Errors
/// * `InvalidParameter` if `limit == Some(0)`
/// * `InvalidInput` if the graph has fewer than 2 nodes
/// * `TrialLimitExceeded` after `limit` runs without a match
pub fn trials_to_find_true_cut<R: Rng + ?Sized>(
    graph: &Graph,
    true_min_cut: usize,
    limit: Option<usize>,
    rng: &mut R,
) -> Result<usize> {
    if limit == Some(0) {
        return Err(GraphError::invalid_parameter("trial limit must be at least 1"));
    }

    let mut trials = 1;
    loop {
        if contract_once(graph, rng)? == true_min_cut {
            return Ok(trials);
        }
        if let Some(limit) = limit {
            if trials >= limit {
                warn!(
                    "min-cut {} not reached after {} trials on {} nodes",
                    true_min_cut,
                    limit,
                    graph.node_count()
                );
                return Err(GraphError::TrialLimitExceeded(limit));
            }
        }
        trials += 1;
    }
}

/// Mean of [`trials_to_find_true_cut`] over `num_graphs` freshly generated
/// graphs of `num_nodes` nodes, using `oracle` for the true cut values.
///
/// # Examples
/// ```
/// use karger::cs::graph::{calibration, generator, StoerWagner};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(3);
/// let mean = calibration::average_trials_needed(
///     5,
///     6,
///     |n, rng: &mut ChaCha20Rng| generator::generate_connected_simple(n, None, rng),
///     &StoerWagner,
///     Some(10_000),
///     &mut rng,
/// )
/// .unwrap();
/// assert!(mean >= 1.0);
/// ```
///
/// # Errors
/// * `InvalidParameter` if `num_graphs == 0`, plus anything the generator,
///   the oracle or [`trials_to_find_true_cut`] reports
pub fn average_trials_needed<R, G, O>(
    num_graphs: usize,
    num_nodes: usize,
    mut generator: G,
    oracle: &O,
    limit: Option<usize>,
    rng: &mut R,
) -> Result<f64>
where
    R: Rng + ?Sized,
    G: FnMut(usize, &mut R) -> Result<Graph>,
    O: MinCutOracle + ?Sized,
{
    if num_graphs == 0 {
        return Err(GraphError::invalid_parameter("num_graphs must be at least 1"));
    }

    let mut total = 0usize;
    for _ in 0..num_graphs {
        let graph = generator(num_nodes, rng)?;
        let exact = oracle.min_cut(&graph)?.value;
        total += trials_to_find_true_cut(&graph, exact, limit, rng)?;
    }
    let mean = total as f64 / num_graphs as f64;
    debug!(
        "{} nodes: {:.2} trials on average over {} graphs",
        num_nodes, mean, num_graphs
    );
    Ok(mean)
}

/// Line style hint for a plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Matplotlib-style line specifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::Dotted => ":",
            LineStyle::DashDot => "-.",
        }
    }
}

/// A labelled `(x, y)` series for the reporting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line_style: LineStyle,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            x: Vec::new(),
            y: Vec::new(),
            line_style: LineStyle::default(),
        }
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Series keyed by label, in label order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceSet {
    traces: BTreeMap<String, Series>,
}

impl TraceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series, replacing any previous one with the same label.
    pub fn insert(&mut self, series: Series) -> Option<Series> {
        self.traces.insert(series.label.clone(), series)
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.traces.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.traces.values()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Average trials needed (y) for each node count (x).
///
/// Graphs come from `config.family` (with `config.num_edges`, if set); each
/// entry of `node_counts` stands in for `config.num_nodes`. `num_graphs`
/// and `trial_limit` are read from `config` as well.
///
/// # Errors
/// * `InvalidParameter` if `node_counts` is empty, plus anything
///   [`average_trials_needed`] reports for a node count
pub fn calibration_series<R, O>(
    label: impl Into<String>,
    node_counts: &[usize],
    config: &ExperimentConfig,
    oracle: &O,
    rng: &mut R,
) -> Result<Series>
where
    R: Rng + ?Sized,
    O: MinCutOracle + ?Sized,
{
    if node_counts.is_empty() {
        return Err(GraphError::invalid_parameter("node_counts must not be empty"));
    }

    let mut series = Series::new(label);
    for &num_nodes in node_counts {
        let point = config.clone().with_num_nodes(num_nodes);
        let mean = average_trials_needed(
            point.num_graphs,
            num_nodes,
            |_, rng: &mut R| point.generate(rng),
            oracle,
            point.trial_limit,
            rng,
        )?;
        series.push(num_nodes as f64, mean);
    }
    Ok(series)
}

/// Fraction of `repetitions` estimates that hit the exact min-cut (y) for
/// each trial budget (x) on one fixed graph.
pub fn accuracy_series<R, O>(
    label: impl Into<String>,
    graph: &Graph,
    trial_counts: &[usize],
    repetitions: usize,
    oracle: &O,
    rng: &mut R,
) -> Result<Series>
where
    R: Rng + ?Sized,
    O: MinCutOracle + ?Sized,
{
    if trial_counts.is_empty() {
        return Err(GraphError::invalid_parameter("trial_counts must not be empty"));
    }
    if repetitions == 0 {
        return Err(GraphError::invalid_parameter("repetitions must be at least 1"));
    }

    let exact = oracle.min_cut(graph)?.value;
    let mut series = Series::new(label);
    for &trials in trial_counts {
        let mut hits = 0usize;
        for _ in 0..repetitions {
            if estimate_min_cut(graph, trials, rng)? == exact {
                hits += 1;
            }
        }
        series.push(trials as f64, hits as f64 / repetitions as f64);
    }
    Ok(series)
}
