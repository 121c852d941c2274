//! Restricted master problem.

mod rmp;

pub(crate) use rmp::distinct_departure_cities;
pub use rmp::{RestrictedMasterProblem, RmpStatus};
