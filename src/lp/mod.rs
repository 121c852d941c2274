//! LP oracle contract and backends.

mod model;
mod oracle;

pub use model::{LpConstraint, LpModel, LpOutcome, LpSense, LpSolution, LpVariable};
pub use oracle::{ClarabelOracle, LpOracle};
