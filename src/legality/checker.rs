//! Pure trip-legality predicates.

use chrono::Duration;

use crate::models::{Flight, Trip};

/// Default minimum connection time between consecutive legs.
pub fn default_min_connection() -> Duration {
    Duration::hours(2)
}

/// Default maximum span of a trip.
pub fn default_max_trip_duration() -> Duration {
    Duration::days(6)
}

/// Returns `true` if every adjacent pair of legs is chronologically valid:
/// the next leg departs no earlier than the current arrival and the gap is
/// at least `min_connection`. Vacuously true for one leg or none.
pub fn is_flight_sequence_valid(legs: &[Flight], min_connection: Duration) -> bool {
    legs.windows(2).all(|pair| {
        let gap = pair[1].departure_time() - pair[0].arrival_time();
        pair[1].departure_time() >= pair[0].arrival_time() && gap >= min_connection
    })
}

/// Returns `true` if the span from first departure to last arrival does not
/// exceed `max_duration`. False for an empty sequence.
pub fn is_trip_duration_valid(legs: &[Flight], max_duration: Duration) -> bool {
    match (legs.first(), legs.last()) {
        (Some(first), Some(last)) => last.arrival_time() - first.departure_time() <= max_duration,
        _ => false,
    }
}

/// Returns `true` if the sequence starts and ends at `base`.
pub fn is_trip_base_valid(legs: &[Flight], base: &str) -> bool {
    match (legs.first(), legs.last()) {
        (Some(first), Some(last)) => {
            first.departure_city() == base && last.arrival_city() == base
        }
        _ => false,
    }
}

/// Returns `true` if no two legs share a flight id.
pub fn are_flights_unique(legs: &[Flight]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(legs.len());
    legs.iter().all(|leg| seen.insert(leg.flight_id()))
}

/// Validates trips against the connection-time, duty-duration, base-closure,
/// and uniqueness rules.
///
/// Stateless apart from its configuration; intended to be created once per
/// base and shared by reference.
///
/// # Examples
///
/// ```
/// use crew_pairing::legality::LegalityChecker;
/// use crew_pairing::models::{Flight, Trip};
/// use chrono::NaiveDateTime;
///
/// let fmt = "%d-%m-%Y %H:%M:%S";
/// let dt = |s: &str| NaiveDateTime::parse_from_str(s, fmt).unwrap();
/// let out = Flight::new("A", "B", 100.0, "F1", dt("01-01-2023 08:00:00"), dt("01-01-2023 10:00:00"));
/// let back = Flight::new("B", "A", 120.0, "F2", dt("01-01-2023 12:00:00"), dt("01-01-2023 14:00:00"));
///
/// let checker = LegalityChecker::new("A");
/// assert!(checker.is_trip_legal(&Trip::new(vec![out, back], 220.0, "A")));
/// ```
#[derive(Debug, Clone)]
pub struct LegalityChecker {
    base: String,
    min_connection: Duration,
    max_trip_duration: Duration,
}

impl LegalityChecker {
    /// Creates a checker for `base` with the default limits (2 hours
    /// minimum connection, 6 days maximum span).
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_limits(base, default_min_connection(), default_max_trip_duration())
    }

    /// Creates a checker with explicit limits.
    pub fn with_limits(
        base: impl Into<String>,
        min_connection: Duration,
        max_trip_duration: Duration,
    ) -> Self {
        Self {
            base: base.into(),
            min_connection,
            max_trip_duration,
        }
    }

    /// The base city trips must start and end at.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Minimum connection time between consecutive legs.
    pub fn min_connection(&self) -> Duration {
        self.min_connection
    }

    /// Maximum trip span.
    pub fn max_trip_duration(&self) -> Duration {
        self.max_trip_duration
    }

    /// Chronological validity of a leg sequence under this checker's
    /// minimum connection time.
    pub fn is_flight_sequence_valid(&self, legs: &[Flight]) -> bool {
        is_flight_sequence_valid(legs, self.min_connection)
    }

    /// Span validity under this checker's maximum trip duration.
    pub fn is_trip_duration_valid(&self, legs: &[Flight]) -> bool {
        is_trip_duration_valid(legs, self.max_trip_duration)
    }

    /// Base closure at this checker's base.
    pub fn is_trip_base_valid(&self, legs: &[Flight]) -> bool {
        is_trip_base_valid(legs, &self.base)
    }

    /// Flight-id uniqueness.
    pub fn are_flights_unique(&self, legs: &[Flight]) -> bool {
        are_flights_unique(legs)
    }

    /// Conjunction of all four legality rules.
    pub fn is_trip_legal(&self, trip: &Trip) -> bool {
        let legs = trip.legs();
        self.is_flight_sequence_valid(legs)
            && self.is_trip_duration_valid(legs)
            && self.is_trip_base_valid(legs)
            && self.are_flights_unique(legs)
    }
}
