//! Trip legality rules.

mod checker;

pub use checker::{
    are_flights_unique, default_max_trip_duration, default_min_connection,
    is_flight_sequence_valid, is_trip_base_valid, is_trip_duration_valid, LegalityChecker,
};
