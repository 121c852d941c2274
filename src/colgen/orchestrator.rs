//! Column-generation driver.

use tracing::{debug, info};

use crate::legality::LegalityChecker;
use crate::lp::LpOracle;
use crate::master::{distinct_departure_cities, RestrictedMasterProblem};
use crate::models::{CostModel, Flight, PairingSolution, Trip};
use crate::pricing::{DeadheadPricing, PricingProblem, PricingStrategy};

/// Convergence limits of the column-generation loop.
#[derive(Debug, Clone, Copy)]
pub struct ColGenConfig {
    /// Pricing iterations per phase.
    pub max_iterations: usize,
    /// Acceptance tolerance: a column is taken iff its reduced cost is
    /// strictly below the negated tolerance.
    pub tolerance: f64,
    /// Retry rounds attempting to dissolve deadhead-patched trips.
    pub max_outer_rounds: usize,
}

impl Default for ColGenConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            tolerance: 1e-6,
            max_outer_rounds: 10,
        }
    }
}

/// Drives the master/pricing loop to a pairing solution.
///
/// Every flight starts out covered by a singleton trip patched closed with
/// a return deadhead. Each iteration re-solves the master relaxation,
/// prices one candidate per departure city against the fresh duals, and
/// accepts the candidate only if the full exchange (the new trip, minus
/// the pool trips it displaces, plus one uncovered-deadhead patch per
/// flight those trips no longer cover) carries a negative reduced cost.
///
/// After the loop settles, trips still containing a deadhead leg are
/// re-optimized on their own restricted flight universe with the
/// deadhead-aware pricing variant, for up to
/// [`max_outer_rounds`](ColGenConfig::max_outer_rounds) rounds.
pub struct ColumnGeneration<'a> {
    costs: CostModel,
    oracle: &'a dyn LpOracle,
    config: ColGenConfig,
    base_filter: Option<Box<dyn Fn(&str) -> bool + 'a>>,
}

impl<'a> ColumnGeneration<'a> {
    /// Creates a driver with the default limits.
    pub fn new(costs: CostModel, oracle: &'a dyn LpOracle) -> Self {
        Self {
            costs,
            oracle,
            config: ColGenConfig::default(),
            base_filter: None,
        }
    }

    /// Overrides the convergence limits.
    pub fn with_config(mut self, config: ColGenConfig) -> Self {
        self.config = config;
        self
    }

    /// Restricts pricing to base cities accepted by `filter`.
    pub fn with_base_filter(mut self, filter: impl Fn(&str) -> bool + 'a) -> Self {
        self.base_filter = Some(Box::new(filter));
        self
    }

    /// One singleton trip per flight, patched closed with a return
    /// deadhead at the deadhead unit cost.
    pub fn initial_solution(&self, flights: &[Flight]) -> Vec<Trip> {
        flights
            .iter()
            .map(|flight| {
                let patch = flight.return_deadhead(self.costs.deadhead_cost(), false);
                Trip::new(
                    vec![flight.clone(), patch],
                    flight.cost() + self.costs.deadhead_cost(),
                    flight.departure_city(),
                )
            })
            .collect()
    }

    /// Runs both phases and returns the final solution.
    pub fn solve(&self, flights: &[Flight]) -> PairingSolution {
        let mut solution = self.initial_solution(flights);
        let mut rmp = RestrictedMasterProblem::new();
        for trip in &solution {
            rmp.add_trip(trip.clone());
        }
        info!(
            flights = flights.len(),
            initial_trips = solution.len(),
            "starting column generation"
        );

        self.run_phase(flights, None, &mut rmp, &mut solution);

        let mut round = 0;
        while round < self.config.max_outer_rounds {
            let (mut patched, mut settled): (Vec<Trip>, Vec<Trip>) =
                solution.drain(..).partition(Trip::has_deadhead);
            if patched.is_empty() {
                solution = settled;
                break;
            }
            info!(round, patched_trips = patched.len(), "retrying deadhead-patched trips");

            // Restrict the universe to the flights those trips still cover;
            // the full universe keeps supplying deadhead candidates.
            let restricted: Vec<Flight> = patched
                .iter()
                .flat_map(Trip::legs)
                .filter(|leg| !leg.is_deadhead())
                .cloned()
                .collect();
            let mut retry_rmp = RestrictedMasterProblem::new();
            for trip in &patched {
                retry_rmp.add_trip(trip.clone());
            }
            self.run_phase(&restricted, Some(flights), &mut retry_rmp, &mut patched);

            settled.append(&mut patched);
            solution = settled;
            round += 1;
        }

        let result = PairingSolution::new(solution);
        info!(
            trips = result.num_trips(),
            total_cost = result.total_cost(),
            deadhead_trips = result.num_deadhead_trips(),
            "column generation finished"
        );
        result
    }

    fn run_phase(
        &self,
        flights: &[Flight],
        deadhead_universe: Option<&[Flight]>,
        rmp: &mut RestrictedMasterProblem,
        solution: &mut Vec<Trip>,
    ) {
        for iteration in 0..self.config.max_iterations {
            let status = rmp.solve(flights, self.oracle);
            if rmp.dual_values().is_empty() {
                info!(iteration, ?status, "no dual prices available; stopping phase");
                break;
            }
            // Freeze the duals for every base of this iteration, even
            // though acceptances mutate the pool in between.
            let duals = rmp.dual_values().clone();

            for base in distinct_departure_cities(flights) {
                if let Some(filter) = &self.base_filter {
                    if !filter(base) {
                        continue;
                    }
                }

                let checker = LegalityChecker::new(base);
                let strategy: Box<dyn PricingStrategy + '_> = match deadhead_universe {
                    Some(all) => Box::new(DeadheadPricing::new(
                        flights,
                        all,
                        &duals,
                        base,
                        &self.costs,
                        &checker,
                    )),
                    None => Box::new(PricingProblem::new(flights, &duals, base)),
                };
                let Some(new_trip) = strategy.solve() else {
                    continue;
                };
                // Single-leg candidates are not actionable columns.
                if new_trip.legs().len() <= 1 {
                    continue;
                }

                let new_ids = new_trip.flight_ids();
                let affected: Vec<Trip> = solution
                    .iter()
                    .filter(|trip| trip.shares_flight_with(&new_ids))
                    .cloned()
                    .collect();
                let replacements = self.replacement_trips(&affected, &new_ids);

                let external_cost = replacements.iter().map(Trip::cost).sum::<f64>()
                    + new_trip.cost()
                    - affected.iter().map(Trip::cost).sum::<f64>();
                let reduced = strategy.reduced_cost_external(new_trip.legs(), external_cost);

                if reduced < -self.config.tolerance {
                    debug!(
                        iteration,
                        base,
                        reduced_cost = reduced,
                        displaced = affected.len(),
                        patches = replacements.len(),
                        "accepting column"
                    );
                    solution.retain(|trip| !affected.contains(trip));
                    for trip in &affected {
                        rmp.remove_trip(trip);
                    }
                    rmp.add_trip(new_trip.clone());
                    solution.push(new_trip);
                    for patch in replacements {
                        rmp.add_trip(patch.clone());
                        solution.push(patch);
                    }
                }
            }
        }
    }

    /// One uncovered-deadhead patch trip per flight the displaced trips
    /// covered but the new column does not.
    fn replacement_trips(&self, affected: &[Trip], new_ids: &[&str]) -> Vec<Trip> {
        let mut displaced: Vec<Flight> = Vec::new();
        for trip in affected {
            for leg in trip.legs() {
                if !new_ids.contains(&leg.flight_id())
                    && !leg.is_deadhead()
                    && !displaced.contains(leg)
                {
                    displaced.push(leg.clone());
                }
            }
        }
        displaced
            .into_iter()
            .map(|flight| {
                let patch =
                    flight.return_deadhead(self.costs.uncovered_deadhead_cost(), true);
                let cost = flight.cost() + self.costs.uncovered_deadhead_cost();
                let base = flight.departure_city().to_string();
                Trip::new(vec![flight, patch], cost, base)
            })
            .collect()
    }
}
