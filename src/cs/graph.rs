pub mod calibration;
pub mod generator;
pub mod karger;
pub mod multigraph;
pub mod stoer_wagner;

pub use calibration::{
    accuracy_series, average_trials_needed, calibration_series, trials_to_find_true_cut,
    LineStyle, Series, TraceSet,
};
pub use generator::{
    generate_barbell, generate_connected_multigraph, generate_connected_simple, GraphFamily,
};
#[cfg(feature = "parallel")]
pub use karger::estimate_min_cut_parallel;
pub use karger::{contract_once, estimate_min_cut, recommended_trials};
pub use multigraph::{Graph, GraphKind};
pub use stoer_wagner::{ExactCut, MinCutOracle, StoerWagner};
