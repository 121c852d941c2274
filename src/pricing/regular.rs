//! Regular pricing search (no deadhead synthesis).

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use super::{dual_credit, PricingStrategy};
use crate::legality;
use crate::models::{Flight, Trip};

/// Default maximum number of legs explored per candidate trip.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Searches the uncovered flight universe for the trip with the most
/// negative reduced cost for one base city.
///
/// The search is a depth-bounded exhaustive enumeration over an explicit
/// stack: every chronologically valid extension is explored up to the depth
/// cap, a candidate completes when it returns to the base within the span
/// cap, and the completed candidate with the minimum reduced cost wins
/// (ties go to the first one encountered in enumeration order).
///
/// # Examples
///
/// ```
/// use crew_pairing::pricing::{PricingProblem, PricingStrategy};
/// use std::collections::HashMap;
///
/// let duals = HashMap::from([("A".to_string(), 310.0)]);
/// let pricing = PricingProblem::new(&[], &duals, "A");
/// assert!(pricing.solve().is_none());
/// ```
pub struct PricingProblem<'a> {
    flights: &'a [Flight],
    duals: &'a HashMap<String, f64>,
    base: &'a str,
    max_depth: usize,
    max_span: Duration,
}

impl<'a> PricingProblem<'a> {
    /// Creates a search over `flights` with the default limits (10 legs,
    /// 6-day span).
    pub fn new(flights: &'a [Flight], duals: &'a HashMap<String, f64>, base: &'a str) -> Self {
        Self {
            flights,
            duals,
            base,
            max_depth: DEFAULT_MAX_DEPTH,
            max_span: legality::default_max_trip_duration(),
        }
    }

    /// Overrides the depth and span caps.
    pub fn with_limits(mut self, max_depth: usize, max_span: Duration) -> Self {
        self.max_depth = max_depth;
        self.max_span = max_span;
        self
    }

    /// Reduced cost of a leg sequence: the legs' own costs minus one dual
    /// credit per leg departure.
    pub fn reduced_cost(&self, legs: &[Flight]) -> f64 {
        legs.iter().map(Flight::cost).sum::<f64>() - dual_credit(self.duals, legs)
    }

    fn is_valid_extension(&self, trip: &Trip, next: &Flight) -> bool {
        !trip.legs().contains(next) && trip.can_add_flight(next)
    }

    fn enumerate_completed(&self) -> Vec<Trip> {
        let mut completed = Vec::new();
        let mut stack: Vec<Trip> = Vec::new();

        // Seed with every flight departing from the base; reverse pushes
        // keep the pop order equal to enumeration order.
        for seed in self
            .flights
            .iter()
            .filter(|f| f.departure_city() == self.base)
            .rev()
        {
            stack.push(Trip::new(vec![seed.clone()], seed.cost(), self.base));
        }

        while let Some(trip) = stack.pop() {
            let Some(last) = trip.legs().last() else {
                continue;
            };

            // Completed candidates are terminal: never extended past base.
            if last.arrival_city() == self.base {
                if trip.total_duration() <= self.max_span {
                    completed.push(trip);
                }
                continue;
            }

            if trip.legs().len() >= self.max_depth {
                continue;
            }

            let from = last.arrival_city().to_string();
            for next in self.flights.iter().rev() {
                if next.departure_city() == from && self.is_valid_extension(&trip, next) {
                    stack.push(trip.extended(next.clone(), next.cost()));
                }
            }
        }

        completed
    }
}

impl PricingStrategy for PricingProblem<'_> {
    fn solve(&self) -> Option<Trip> {
        let mut best: Option<(Trip, f64)> = None;
        for trip in self.enumerate_completed() {
            let reduced = self.reduced_cost(trip.legs());
            let better = match &best {
                Some((_, incumbent)) => reduced < *incumbent,
                None => true,
            };
            if better {
                best = Some((trip, reduced));
            }
        }
        if let Some((trip, reduced)) = &best {
            debug!(
                base = self.base,
                reduced_cost = reduced,
                legs = trip.legs().len(),
                "pricing search finished"
            );
        }
        best.map(|(trip, _)| trip)
    }

    fn reduced_cost_external(&self, legs: &[Flight], external_trip_cost: f64) -> f64 {
        external_trip_cost - dual_credit(self.duals, legs)
    }
}
