//! Per-unit cost model.

use serde::Serialize;

use crate::{Error, Result};

/// The three per-unit costs of the pairing problem.
///
/// `flight_cost` is the nominal cost of flying a scheduled leg,
/// `deadhead_cost` prices a repositioning leg inserted to close a trip, and
/// `uncovered_deadhead_cost` prices a deadhead patching a flight displaced
/// by column replacement. Loaded once, read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostModel {
    flight_cost: f64,
    deadhead_cost: f64,
    uncovered_deadhead_cost: f64,
}

impl CostModel {
    /// Creates a cost model from explicit values.
    pub fn new(flight_cost: f64, deadhead_cost: f64, uncovered_deadhead_cost: f64) -> Self {
        Self {
            flight_cost,
            deadhead_cost,
            uncovered_deadhead_cost,
        }
    }

    /// Assembles a cost model from optionally-present configuration values.
    ///
    /// Any missing value is an [`Error::MissingCost`]: the model fails fast
    /// at construction instead of silently defaulting a cost to zero.
    pub fn from_parts(
        flight_cost: Option<f64>,
        deadhead_cost: Option<f64>,
        uncovered_deadhead_cost: Option<f64>,
    ) -> Result<Self> {
        Ok(Self {
            flight_cost: flight_cost.ok_or(Error::MissingCost("FlightCost"))?,
            deadhead_cost: deadhead_cost.ok_or(Error::MissingCost("Deadhead"))?,
            uncovered_deadhead_cost: uncovered_deadhead_cost
                .ok_or(Error::MissingCost("UncoveredDeadhead"))?,
        })
    }

    /// Nominal cost of a scheduled leg.
    pub fn flight_cost(&self) -> f64 {
        self.flight_cost
    }

    /// Cost of a repositioning leg.
    pub fn deadhead_cost(&self) -> f64 {
        self.deadhead_cost
    }

    /// Cost of a deadhead patching a displaced flight.
    pub fn uncovered_deadhead_cost(&self) -> f64 {
        self.uncovered_deadhead_cost
    }
}
