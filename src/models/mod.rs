//! Domain model types for the pairing problem.

mod cost;
mod flight;
mod solution;
mod trip;

pub use cost::CostModel;
pub use flight::{Flight, DEADHEAD_SUFFIX, UNCOVERED_DEADHEAD_SUFFIX};
pub use solution::PairingSolution;
pub use trip::Trip;
