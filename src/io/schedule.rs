//! Flight-schedule reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::models::Flight;
use crate::Result;

/// Timestamp layout of schedule files.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Reads a flight schedule from a file.
///
/// Each line is
/// `departure_city,arrival_city,cost,flight_id,departure_time,arrival_time`
/// with timestamps in [`TIMESTAMP_FORMAT`]. Malformed lines are skipped
/// with a warning; only failing to read the file itself is an error.
pub fn read_flights(path: impl AsRef<Path>) -> Result<Vec<Flight>> {
    parse_flights(BufReader::new(File::open(path)?))
}

/// Parses a flight schedule from any buffered reader.
pub fn parse_flights<R: BufRead>(reader: R) -> Result<Vec<Flight>> {
    let mut flights = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_flight_line(line) {
            Some(flight) => flights.push(flight),
            None => warn!(line = index + 1, "skipping malformed schedule line"),
        }
    }
    Ok(flights)
}

fn parse_flight_line(line: &str) -> Option<Flight> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [departure_city, arrival_city, cost, flight_id, departure, arrival] = fields[..] else {
        return None;
    };
    let cost: f64 = cost.parse().ok()?;
    let departure_time = NaiveDateTime::parse_from_str(departure, TIMESTAMP_FORMAT).ok()?;
    let arrival_time = NaiveDateTime::parse_from_str(arrival, TIMESTAMP_FORMAT).ok()?;
    Some(Flight::new(
        departure_city,
        arrival_city,
        cost,
        flight_id,
        departure_time,
        arrival_time,
    ))
}
