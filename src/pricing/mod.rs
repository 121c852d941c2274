//! Pricing subproblems: search the flight graph for negative-reduced-cost trips.

mod deadhead;
mod regular;

use std::collections::HashMap;

pub use deadhead::DeadheadPricing;
pub use regular::PricingProblem;

use crate::models::{Flight, Trip};

/// A pricing search over the flight graph for one base city.
///
/// Implementations return the completed candidate with the minimum reduced
/// cost, regardless of sign; deciding whether that candidate is worth
/// adding is the orchestrator's responsibility.
pub trait PricingStrategy {
    /// Runs the search and returns the best completed candidate, if any.
    fn solve(&self) -> Option<Trip>;

    /// Reduced cost of `legs` with a caller-supplied total cost substituted
    /// for the trip's own cost.
    fn reduced_cost_external(&self, legs: &[Flight], external_trip_cost: f64) -> f64;
}

/// Sum of dual prices credited to a leg sequence.
///
/// One credit per leg departure: a trip departing the same city twice is
/// credited twice. Cities without a dual price credit nothing.
pub(crate) fn dual_credit(duals: &HashMap<String, f64>, legs: &[Flight]) -> f64 {
    legs.iter()
        .map(|leg| duals.get(leg.departure_city()).copied().unwrap_or(0.0))
        .sum()
}
