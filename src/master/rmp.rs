//! Restricted master problem: trip pool plus set-covering LP.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::legality;
use crate::lp::{LpModel, LpOracle, LpOutcome, LpSense};
use crate::models::{Flight, Trip};

/// Outcome of one master solve.
///
/// An infeasible relaxation is an expected signal, not an error: it tells
/// the orchestrator to stop iterating with whatever solution it has.
#[derive(Debug, Clone, PartialEq)]
pub enum RmpStatus {
    /// Optimal relaxation; dual prices are available.
    Optimal {
        /// Objective value of the relaxation.
        objective: f64,
    },
    /// The current pool cannot cover the constraint set.
    Infeasible,
    /// The relaxation is unbounded (should not happen with bounded columns).
    Unbounded,
    /// Backend failure.
    Error(String),
}

/// The restricted master problem of the column-generation loop.
///
/// Owns the pool of candidate trips and, after each [`solve`](Self::solve),
/// the dual price per departure city. The pool is mutated only through
/// [`add_trip`](Self::add_trip) and [`remove_trip`](Self::remove_trip);
/// duplicates and non-base-closed trips are rejected silently.
///
/// Dual prices are refreshed by each solve and stale after any pool
/// mutation; reading them in time is the caller's responsibility.
#[derive(Debug, Default)]
pub struct RestrictedMasterProblem {
    trips: Vec<Trip>,
    dual_values: HashMap<String, f64>,
}

impl RestrictedMasterProblem {
    /// Creates an empty master problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trip to the pool.
    ///
    /// No-op (returning `false`) if the trip does not close its loop at its
    /// first departure city or if a structurally equal trip is already
    /// pooled.
    pub fn add_trip(&mut self, trip: Trip) -> bool {
        if !trip.is_base_closed() {
            debug!(base = trip.base(), "rejecting trip that is not base-closed");
            return false;
        }
        if self.trips.contains(&trip) {
            debug!(base = trip.base(), "rejecting duplicate trip");
            return false;
        }
        self.trips.push(trip);
        true
    }

    /// Removes the first trip structurally equal to `trip`.
    ///
    /// No-op (returning `false`) if absent.
    pub fn remove_trip(&mut self, trip: &Trip) -> bool {
        match self.trips.iter().position(|t| t == trip) {
            Some(index) => {
                self.trips.remove(index);
                true
            }
            None => false,
        }
    }

    /// The current trip pool.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Dual prices per departure city from the last optimal solve.
    ///
    /// Empty if the last solve was not optimal (or no solve has happened).
    pub fn dual_values(&self) -> &HashMap<String, f64> {
        &self.dual_values
    }

    /// Builds and solves the set-covering relaxation over the current pool.
    ///
    /// One `[0,1]` variable per pooled trip with the trip's cost as
    /// objective coefficient; a covering row per distinct departure city in
    /// `flights`; zero-fix rows pinning structurally invalid pool trips to
    /// zero; and an aggregate row requiring at least one base-closed trip.
    ///
    /// On an optimal outcome the dual map is refreshed with the shadow
    /// price of each city's covering row. On any other outcome the dual map
    /// is cleared and the status returned.
    pub fn solve(&mut self, flights: &[Flight], oracle: &dyn LpOracle) -> RmpStatus {
        self.dual_values.clear();
        if self.trips.is_empty() {
            warn!("master solve requested with an empty trip pool");
            return RmpStatus::Infeasible;
        }

        let model = self.build_model(flights);
        match oracle.solve(&model) {
            LpOutcome::Optimal(solution) => {
                for city in distinct_departure_cities(flights) {
                    let name = covering_constraint_name(city);
                    if let Some(&price) = solution.duals.get(&name) {
                        self.dual_values.insert(city.to_string(), price);
                    }
                }
                debug!(
                    objective = solution.objective,
                    cities = self.dual_values.len(),
                    "master solve optimal"
                );
                RmpStatus::Optimal {
                    objective: solution.objective,
                }
            }
            LpOutcome::Infeasible => {
                warn!("master relaxation infeasible");
                RmpStatus::Infeasible
            }
            LpOutcome::Unbounded => {
                warn!("master relaxation unbounded");
                RmpStatus::Unbounded
            }
            LpOutcome::Error(message) => {
                warn!(%message, "master solve failed");
                RmpStatus::Error(message)
            }
        }
    }

    fn build_model(&self, flights: &[Flight]) -> LpModel {
        let mut model = LpModel::new();
        let variables: Vec<usize> = self
            .trips
            .iter()
            .map(|trip| model.add_variable(trip.cost(), 0.0, 1.0))
            .collect();

        // At least one base-closed trip must be selected. Redundant while
        // the pool guard holds, but defends against stale entries.
        let closed: Vec<(usize, f64)> = self
            .trips
            .iter()
            .zip(&variables)
            .filter(|(trip, _)| trip.is_base_closed())
            .map(|(_, &var)| (var, 1.0))
            .collect();
        model.add_constraint("base_trip", closed, LpSense::GreaterOrEqual, 1.0);

        // Structurally invalid trips may stay pooled but never enter the
        // solution: pin their variables to zero.
        for (index, (trip, &var)) in self.trips.iter().zip(&variables).enumerate() {
            let legs = trip.legs();
            let invalid = !legality::is_flight_sequence_valid(
                legs,
                legality::default_min_connection(),
            ) || !legality::is_trip_duration_valid(legs, legality::default_max_trip_duration())
                || !legality::are_flights_unique(legs);
            if invalid {
                model.add_constraint(
                    format!("fix_{index}"),
                    vec![(var, 1.0)],
                    LpSense::Equal,
                    0.0,
                );
            }
        }

        // Covering row per distinct departure city of the flight universe.
        for city in distinct_departure_cities(flights) {
            let touching: Vec<(usize, f64)> = self
                .trips
                .iter()
                .zip(&variables)
                .filter(|(trip, _)| trip.legs().iter().any(|leg| leg.departure_city() == city))
                .map(|(_, &var)| (var, 1.0))
                .collect();
            model.add_constraint(
                covering_constraint_name(city),
                touching,
                LpSense::GreaterOrEqual,
                1.0,
            );
        }

        model
    }
}

fn covering_constraint_name(city: &str) -> String {
    format!("constraint_{city}")
}

/// Distinct departure cities in first-occurrence order.
pub(crate) fn distinct_departure_cities(flights: &[Flight]) -> Vec<&str> {
    let mut cities: Vec<&str> = Vec::new();
    for flight in flights {
        if !cities.contains(&flight.departure_city()) {
            cities.push(flight.departure_city());
        }
    }
    cities
}
