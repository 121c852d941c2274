//! Trip type: an ordered sequence of flight legs through a base city.

use chrono::Duration;
use serde::Serialize;

use super::Flight;
use crate::legality;

/// An ordered sequence of flight legs forming one duty period.
///
/// A trip owns its total cost (which may differ from the plain sum of leg
/// costs when the caller prices legs at unit rates) and the base city it is
/// anchored to. Two trips are equal iff their leg sequences are equal, in
/// order; cost and base do not participate in equality.
///
/// # Examples
///
/// ```
/// use crew_pairing::models::{Flight, Trip};
/// use chrono::NaiveDateTime;
///
/// let fmt = "%d-%m-%Y %H:%M:%S";
/// let f1 = Flight::new(
///     "A", "B", 100.0, "F1",
///     NaiveDateTime::parse_from_str("01-01-2023 08:00:00", fmt).unwrap(),
///     NaiveDateTime::parse_from_str("01-01-2023 10:00:00", fmt).unwrap(),
/// );
/// let trip = Trip::new(vec![f1], 100.0, "A");
/// assert_eq!(trip.legs().len(), 1);
/// assert_eq!(trip.cost(), 100.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    legs: Vec<Flight>,
    cost: f64,
    base: String,
}

impl Trip {
    /// Creates a trip from its legs, total cost, and base city.
    pub fn new(legs: Vec<Flight>, cost: f64, base: impl Into<String>) -> Self {
        Self {
            legs,
            cost,
            base: base.into(),
        }
    }

    /// The ordered legs of this trip.
    pub fn legs(&self) -> &[Flight] {
        &self.legs
    }

    /// Total cost of this trip.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The base city this trip is anchored to.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns `true` if `next` may legally follow the current last leg:
    /// it departs no earlier than the last arrival and the connection gap
    /// is at least the minimum connection time. Vacuously true for an
    /// empty trip.
    pub fn can_add_flight(&self, next: &Flight) -> bool {
        let Some(last) = self.legs.last() else {
            return true;
        };
        next.departure_time() >= last.arrival_time()
            && next.departure_time() - last.arrival_time() >= legality::default_min_connection()
    }

    /// Elapsed time from the first departure to the last arrival.
    ///
    /// Zero for an empty trip.
    pub fn total_duration(&self) -> Duration {
        match (self.legs.first(), self.legs.last()) {
            (Some(first), Some(last)) => last.arrival_time() - first.departure_time(),
            _ => Duration::zero(),
        }
    }

    /// Returns a new trip with `leg` appended and `added_cost` added to the
    /// total cost.
    pub fn extended(&self, leg: Flight, added_cost: f64) -> Trip {
        let mut legs = self.legs.clone();
        legs.push(leg);
        Trip::new(legs, self.cost + added_cost, self.base.clone())
    }

    /// Returns `true` if the first departure city equals the last arrival
    /// city, i.e. the trip closes its loop.
    pub fn is_base_closed(&self) -> bool {
        match (self.legs.first(), self.legs.last()) {
            (Some(first), Some(last)) => first.departure_city() == last.arrival_city(),
            _ => false,
        }
    }

    /// Returns `true` if any leg is a deadhead (`_DH` or `_UDH`).
    pub fn has_deadhead(&self) -> bool {
        self.legs.iter().any(Flight::is_deadhead)
    }

    /// Returns `true` if any leg of this trip carries one of the given ids.
    pub fn shares_flight_with(&self, flight_ids: &[&str]) -> bool {
        self.legs
            .iter()
            .any(|leg| flight_ids.contains(&leg.flight_id()))
    }

    /// Ids of all legs, in order.
    pub fn flight_ids(&self) -> Vec<&str> {
        self.legs.iter().map(Flight::flight_id).collect()
    }
}

impl PartialEq for Trip {
    fn eq(&self, other: &Self) -> bool {
        self.legs == other.legs
    }
}

impl Eq for Trip {}

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

    #[test]
    fn test_structural_equality() {
        let f1 = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let f2 = leg("F2", "B", "A", "01-01-2023 12:00:00", "01-01-2023 14:00:00");

        let a = Trip::new(vec![f1.clone(), f2.clone()], 200.0, "A");
        let b = Trip::new(vec![f1.clone(), f2.clone()], 999.0, "B");
        assert_eq!(a, b); // cost and base do not participate

        let reversed = Trip::new(vec![f2, f1], 200.0, "A");
        assert_ne!(a, reversed); // order matters
    }

    #[test]
    fn test_can_add_flight_boundary() {
        let first = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let trip = Trip::new(vec![first], 100.0, "A");

        // Gap of exactly 2.0 hours is allowed.
        let ok = leg("F2", "B", "C", "01-01-2023 12:00:00", "01-01-2023 14:00:00");
        assert!(trip.can_add_flight(&ok));

        // Gap of 1.9 hours (1h54m) is not.
        let short = leg("F3", "B", "C", "01-01-2023 11:54:00", "01-01-2023 14:00:00");
        assert!(!trip.can_add_flight(&short));

        // Departing before the last arrival is never allowed.
        let early = leg("F4", "B", "C", "01-01-2023 09:00:00", "01-01-2023 11:00:00");
        assert!(!trip.can_add_flight(&early));
    }

    #[test]
    fn test_can_add_flight_empty_trip() {
        let trip = Trip::new(vec![], 0.0, "A");
        let f = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        assert!(trip.can_add_flight(&f));
    }

    #[test]
    fn test_total_duration() {
        let f1 = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let f2 = leg("F2", "B", "A", "02-01-2023 08:00:00", "02-01-2023 10:00:00");
        let trip = Trip::new(vec![f1, f2], 200.0, "A");
        assert_eq!(trip.total_duration(), Duration::hours(26));

        assert_eq!(Trip::new(vec![], 0.0, "A").total_duration(), Duration::zero());
    }

    #[test]
    fn test_extended_appends_and_prices() {
        let f1 = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let f2 = leg("F2", "B", "A", "01-01-2023 12:00:00", "01-01-2023 14:00:00");
        let trip = Trip::new(vec![f1], 100.0, "A");
        let extended = trip.extended(f2, 120.0);
        assert_eq!(extended.legs().len(), 2);
        assert_eq!(extended.cost(), 220.0);
        // Original trip untouched.
        assert_eq!(trip.legs().len(), 1);
    }

    #[test]
    fn test_base_closure() {
        let f1 = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let f2 = leg("F2", "B", "A", "01-01-2023 12:00:00", "01-01-2023 14:00:00");
        assert!(Trip::new(vec![f1.clone(), f2], 200.0, "A").is_base_closed());
        assert!(!Trip::new(vec![f1], 100.0, "A").is_base_closed());
        assert!(!Trip::new(vec![], 0.0, "A").is_base_closed());
    }

    #[test]
    fn test_has_deadhead() {
        let f1 = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let dh = f1.return_deadhead(500.0, false);
        assert!(Trip::new(vec![f1.clone(), dh], 600.0, "A").has_deadhead());
        assert!(!Trip::new(vec![f1], 100.0, "A").has_deadhead());
    }

    #[test]
    fn test_shares_flight_with() {
        let f1 = leg("F1", "A", "B", "01-01-2023 08:00:00", "01-01-2023 10:00:00");
        let trip = Trip::new(vec![f1], 100.0, "A");
        assert!(trip.shares_flight_with(&["F1", "F9"]));
        assert!(!trip.shares_flight_with(&["F2"]));
    }
}
