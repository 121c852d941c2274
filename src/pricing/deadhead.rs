//! Deadhead-aware pricing search.

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use super::{dual_credit, PricingStrategy};
use crate::legality::LegalityChecker;
use crate::models::{CostModel, Flight, Trip};

/// Span cap of the deadhead-aware search, one day looser than the regular
/// variant to leave room for repositioning legs.
fn default_deadhead_span() -> Duration {
    Duration::days(7)
}

/// Pricing search that may insert synthetic deadhead legs.
///
/// Works over two universes: `uncovered` supplies revenue legs still to be
/// covered, `all_flights` supplies candidates for deadhead synthesis (the
/// crew rides an already-covered leg as passengers). A deadhead leg is
/// never inserted directly after another deadhead leg, every insertion must
/// keep the whole sequence chronologically valid, and legs are priced at
/// the unit costs of the [`CostModel`].
///
/// The reduced cost additionally subtracts a bulk penalty for every
/// uncovered flight the candidate leaves uncovered.
pub struct DeadheadPricing<'a> {
    uncovered: &'a [Flight],
    all_flights: &'a [Flight],
    duals: &'a HashMap<String, f64>,
    base: &'a str,
    costs: &'a CostModel,
    legality: &'a LegalityChecker,
    max_depth: usize,
    max_span: Duration,
}

impl<'a> DeadheadPricing<'a> {
    /// Creates a search with the default limits (10 legs, 7-day span).
    pub fn new(
        uncovered: &'a [Flight],
        all_flights: &'a [Flight],
        duals: &'a HashMap<String, f64>,
        base: &'a str,
        costs: &'a CostModel,
        legality: &'a LegalityChecker,
    ) -> Self {
        Self {
            uncovered,
            all_flights,
            duals,
            base,
            costs,
            legality,
            max_depth: super::regular::DEFAULT_MAX_DEPTH,
            max_span: default_deadhead_span(),
        }
    }

    /// Overrides the depth and span caps.
    pub fn with_limits(mut self, max_depth: usize, max_span: Duration) -> Self {
        self.max_depth = max_depth;
        self.max_span = max_span;
        self
    }

    /// Reduced cost of a leg sequence under unit costs: regular legs at the
    /// flight unit cost, deadhead legs at the deadhead unit cost, minus the
    /// bulk uncovered penalty and one dual credit per leg departure.
    pub fn reduced_cost(&self, legs: &[Flight]) -> f64 {
        let total_cost: f64 = legs
            .iter()
            .map(|leg| {
                if leg.is_deadhead() {
                    self.costs.deadhead_cost()
                } else {
                    self.costs.flight_cost()
                }
            })
            .sum();
        let uncovered_cost: f64 = self
            .uncovered
            .iter()
            .filter(|f| !legs.contains(f))
            .map(|_| self.costs.uncovered_deadhead_cost())
            .sum();
        total_cost - uncovered_cost - dual_credit(self.duals, legs)
    }

    fn enumerate_completed(&self) -> Vec<Trip> {
        let mut completed = Vec::new();
        let mut stack: Vec<Trip> = Vec::new();

        for seed in self
            .uncovered
            .iter()
            .filter(|f| f.departure_city() == self.base)
            .rev()
        {
            stack.push(Trip::new(
                vec![seed.clone()],
                self.costs.flight_cost(),
                self.base,
            ));
        }

        while let Some(trip) = stack.pop() {
            let Some(last) = trip.legs().last() else {
                continue;
            };

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
            let last_is_deadhead = last.is_deadhead();

            // Deadhead extensions pop after the regular ones: pushed first,
            // in reverse.
            if !last_is_deadhead {
                for candidate in self.all_flights.iter().rev() {
                    if candidate.departure_city() == from
                        && !trip.legs().contains(candidate)
                        && self.sequence_valid_with(&trip, candidate)
                    {
                        let deadhead = candidate.as_deadhead(self.costs.deadhead_cost());
                        stack.push(trip.extended(deadhead, self.costs.deadhead_cost()));
                    }
                }
            }

            for next in self.uncovered.iter().rev() {
                if next.departure_city() == from
                    && !trip.legs().contains(next)
                    && trip.can_add_flight(next)
                {
                    stack.push(trip.extended(next.clone(), self.costs.flight_cost()));
                }
            }
        }

        completed
    }

    fn sequence_valid_with(&self, trip: &Trip, candidate: &Flight) -> bool {
        let mut legs = trip.legs().to_vec();
        legs.push(candidate.clone());
        self.legality.is_flight_sequence_valid(&legs)
    }
}

impl PricingStrategy for DeadheadPricing<'_> {
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
                "deadhead pricing search finished"
            );
        }
        best.map(|(trip, _)| trip)
    }

    fn reduced_cost_external(&self, legs: &[Flight], external_trip_cost: f64) -> f64 {
        external_trip_cost - dual_credit(self.duals, legs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%d-%m-%Y %H:%M:%S").expect("valid timestamp")
    }

    fn leg(id: &str, from: &str, to: &str, dep: &str, arr: &str) -> Flight {
        Flight::new(from, to, 100.0, id, dt(dep), dt(arr))
    }

    fn costs() -> CostModel {
        CostModel::new(100.0, 500.0, 10_000.0)
    }

    #[test]
    fn test_closes_trip_with_deadhead() {
        let uncovered =
            vec![leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00")];
        // The covered return leg is available to ride as a deadhead.
        let all = vec![
            uncovered[0].clone(),
            leg("F2", "B", "A", "01-01-2023 12:00:00", "01-01-2023 14:00:00"),
        ];
        let duals = HashMap::new();
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);

        let trip = pricing.solve().expect("deadhead-closed trip");
        assert_eq!(trip.flight_ids(), vec!["F1", "F2_DH"]);
        assert!(trip.legs()[1].is_deadhead());
        assert_eq!(trip.legs()[1].cost(), 500.0);
        // Seed at the flight unit cost, extension at the deadhead unit cost.
        assert!((trip.cost() - 600.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_deadhead_after_deadhead() {
        let uncovered =
            vec![leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00")];
        // Returning to A needs two consecutive deadheads (B->C, C->A).
        let all = vec![
            uncovered[0].clone(),
            leg("F2", "B", "C", "01-01-2023 12:00:00", "01-01-2023 14:00:00"),
            leg("F3", "C", "A", "01-01-2023 16:00:00", "01-01-2023 18:00:00"),
        ];
        let duals = HashMap::new();
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);
        assert!(pricing.solve().is_none());
    }

    #[test]
    fn test_deadhead_respects_chronology() {
        let uncovered =
            vec![leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00")];
        // The only return leg departs before F1 arrives.
        let all = vec![
            uncovered[0].clone(),
            leg("F2", "B", "A", "01-01-2023 06:00:00", "01-01-2023 08:00:00"),
        ];
        let duals = HashMap::new();
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);
        assert!(pricing.solve().is_none());
    }

    #[test]
    fn test_reduced_cost_includes_uncovered_penalty() {
        let uncovered = vec![
            leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00"),
            leg("F9", "D", "E", "01-01-2023 08:00:00", "01-01-2023 10:00:00"),
        ];
        let all = uncovered.clone();
        let duals = HashMap::from([("A".to_string(), 40.0)]);
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);

        // One regular leg covered, F9 left uncovered.
        let legs = vec![uncovered[0].clone()];
        let expected = 100.0 - 10_000.0 - 40.0;
        assert!((pricing.reduced_cost(&legs) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_deadhead_leg_priced_at_unit_cost_in_reduced_cost() {
        let uncovered =
            vec![leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00")];
        let all = uncovered.clone();
        let duals = HashMap::new();
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);

        let dh = leg("F2", "B", "A", "01-01-2023 12:00:00", "01-01-2023 14:00:00")
            .as_deadhead(500.0);
        let legs = vec![uncovered[0].clone(), dh];
        // 100 (flight unit) + 500 (deadhead unit), nothing uncovered.
        assert!((pricing.reduced_cost(&legs) - 600.0).abs() < 1e-10);
    }

    #[test]
    fn test_seven_day_span_allowed() {
        let uncovered = vec![
            leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00"),
            leg("F2", "B", "A", "07-01-2023 08:00:00", "07-01-2023 10:00:00"),
        ];
        let all = uncovered.clone();
        let duals = HashMap::new();
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        // 6 days 2 hours: over the regular 6-day cap, fine here.
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);
        assert!(pricing.solve().is_some());
    }

    #[test]
    fn test_uncovered_penalty_dominates_ranking() {
        let uncovered = vec![
            leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00"),
            leg("F2", "B", "A", "01-01-2023 12:00:00", "01-01-2023 14:00:00"),
        ];
        let all = uncovered.clone();
        let duals = HashMap::new();
        let cost_model = costs();
        let checker = LegalityChecker::new("A");
        let pricing = DeadheadPricing::new(&uncovered, &all, &duals, "A", &cost_model, &checker);

        // Covering both legs leaves nothing uncovered: two flight units.
        let covered = vec![uncovered[0].clone(), uncovered[1].clone()];
        assert!((pricing.reduced_cost(&covered) - 200.0).abs() < 1e-10);

        // Riding F2 as a deadhead leaves F2 uncovered; its penalty is
        // subtracted, pushing this candidate far below the covered one.
        let patched = vec![uncovered[0].clone(), uncovered[1].as_deadhead(500.0)];
        assert!((pricing.reduced_cost(&patched) - (600.0 - 10_000.0)).abs() < 1e-10);

        // The search ranks by reduced cost, so the patched candidate wins.
        let trip = pricing.solve().expect("candidate found");
        assert_eq!(trip.flight_ids(), vec!["F1", "F2_DH"]);
    }
}
