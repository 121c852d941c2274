//! Final pairing solution.

use serde::Serialize;

use super::Trip;

/// The trip set produced by the column-generation orchestrator.
///
/// # Examples
///
/// ```
/// use crew_pairing::models::PairingSolution;
///
/// let sol = PairingSolution::new(vec![]);
/// assert_eq!(sol.num_trips(), 0);
/// assert_eq!(sol.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairingSolution {
    trips: Vec<Trip>,
}

impl PairingSolution {
    /// Wraps a trip set as a solution.
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    /// The trips in this solution.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of trips.
    pub fn num_trips(&self) -> usize {
        self.trips.len()
    }

    /// Sum of trip costs.
    pub fn total_cost(&self) -> f64 {
        self.trips.iter().map(Trip::cost).sum()
    }

    /// Number of trips still carrying a deadhead leg.
    pub fn num_deadhead_trips(&self) -> usize {
        self.trips.iter().filter(|t| t.has_deadhead()).count()
    }

    /// Ids of all non-deadhead flights covered by this solution.
    pub fn covered_flight_ids(&self) -> Vec<&str> {
        self.trips
            .iter()
            .flat_map(|t| t.legs())
            .filter(|leg| !leg.is_deadhead())
            .map(|leg| leg.flight_id())
            .collect()
    }
}
