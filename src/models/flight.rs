//! Flight leg type and synthetic deadhead construction.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Id suffix marking a repositioning (deadhead) leg.
pub const DEADHEAD_SUFFIX: &str = "_DH";
/// Id suffix marking an uncovered deadhead, i.e. a deadhead inserted to
/// patch a flight displaced by column replacement.
pub const UNCOVERED_DEADHEAD_SUFFIX: &str = "_UDH";

/// Hours between a flight's arrival and the departure of its return deadhead.
const RETURN_DEADHEAD_GAP_HOURS: i64 = 5;

/// One flight leg in the schedule.
///
/// Immutable once created. Two flights are equal iff their ids match;
/// synthetic deadhead legs derive their id from a covered flight
/// (`<id>_DH` or `<id>_UDH`) and therefore never collide with it.
///
/// # Examples
///
/// ```
/// use crew_pairing::models::Flight;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%d-%m-%Y %H:%M:%S";
/// let f = Flight::new(
///     "A", "B", 100.0, "F1",
///     NaiveDateTime::parse_from_str("01-01-2023 08:00:00", fmt).unwrap(),
///     NaiveDateTime::parse_from_str("01-01-2023 10:00:00", fmt).unwrap(),
/// );
/// assert_eq!(f.departure_city(), "A");
/// assert!(!f.is_deadhead());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    departure_city: String,
    arrival_city: String,
    cost: f64,
    flight_id: String,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
}

impl Flight {
    /// Creates a new flight leg.
    pub fn new(
        departure_city: impl Into<String>,
        arrival_city: impl Into<String>,
        cost: f64,
        flight_id: impl Into<String>,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
    ) -> Self {
        Self {
            departure_city: departure_city.into(),
            arrival_city: arrival_city.into(),
            cost,
            flight_id: flight_id.into(),
            departure_time,
            arrival_time,
        }
    }

    /// City this flight departs from.
    pub fn departure_city(&self) -> &str {
        &self.departure_city
    }

    /// City this flight arrives at.
    pub fn arrival_city(&self) -> &str {
        &self.arrival_city
    }

    /// Cost of flying this leg.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Unique flight id.
    pub fn flight_id(&self) -> &str {
        &self.flight_id
    }

    /// Scheduled departure time.
    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    /// Scheduled arrival time.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    /// Scheduled block time of this leg.
    pub fn duration(&self) -> Duration {
        self.arrival_time - self.departure_time
    }

    /// Returns `true` for any synthetic repositioning leg (`_DH` or `_UDH`).
    pub fn is_deadhead(&self) -> bool {
        self.flight_id.ends_with(DEADHEAD_SUFFIX)
            || self.flight_id.ends_with(UNCOVERED_DEADHEAD_SUFFIX)
    }

    /// Returns `true` for an uncovered-deadhead patch leg (`_UDH`).
    pub fn is_uncovered_deadhead(&self) -> bool {
        self.flight_id.ends_with(UNCOVERED_DEADHEAD_SUFFIX)
    }

    /// Re-tags this flight as a deadhead flown on its own schedule.
    ///
    /// Used by the deadhead-aware pricing search: the crew rides the same
    /// leg as passengers, so cities and times are unchanged. The id gains
    /// the `_DH` suffix and the leg is priced at the deadhead unit cost.
    pub fn as_deadhead(&self, cost: f64) -> Flight {
        Flight::new(
            self.departure_city.clone(),
            self.arrival_city.clone(),
            cost,
            format!("{}{}", self.flight_id, DEADHEAD_SUFFIX),
            self.departure_time,
            self.arrival_time,
        )
    }

    /// Synthesizes the repositioning leg that brings crew back after flying
    /// this leg: reversed city pair, departing five hours after this
    /// flight's arrival, lasting the same duration.
    ///
    /// `uncovered` selects the `_UDH` suffix used for patches of displaced
    /// flights; otherwise the plain `_DH` suffix is used.
    pub fn return_deadhead(&self, cost: f64, uncovered: bool) -> Flight {
        let suffix = if uncovered {
            UNCOVERED_DEADHEAD_SUFFIX
        } else {
            DEADHEAD_SUFFIX
        };
        let departure = self.arrival_time + Duration::hours(RETURN_DEADHEAD_GAP_HOURS);
        Flight::new(
            self.arrival_city.clone(),
            self.departure_city.clone(),
            cost,
            format!("{}{}", self.flight_id, suffix),
            departure,
            departure + self.duration(),
        )
    }
}

impl PartialEq for Flight {
    fn eq(&self, other: &Self) -> bool {
        self.flight_id == other.flight_id
    }
}

impl Eq for Flight {}
