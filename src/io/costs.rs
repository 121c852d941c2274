//! Cost-configuration reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::models::CostModel;
use crate::Result;

/// Reads the cost configuration from a file.
///
/// Each line is `key,value` with keys `FlightCost`, `Deadhead`, and
/// `UncoveredDeadhead`. Malformed lines and unknown keys are skipped with
/// a warning; a required key missing from the whole file fails the
/// construction, so the model can never silently default to zero.
pub fn read_cost_model(path: impl AsRef<Path>) -> Result<CostModel> {
    parse_cost_model(BufReader::new(File::open(path)?))
}

/// Parses the cost configuration from any buffered reader.
pub fn parse_cost_model<R: BufRead>(reader: R) -> Result<CostModel> {
    let mut flight_cost = None;
    let mut deadhead_cost = None;
    let mut uncovered_deadhead_cost = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(',') else {
            warn!(line = index + 1, "skipping malformed cost line");
            continue;
        };
        let Ok(value) = value.trim().parse::<f64>() else {
            warn!(line = index + 1, "skipping cost line with non-numeric value");
            continue;
        };
        match key.trim() {
            "FlightCost" => flight_cost = Some(value),
            "Deadhead" => deadhead_cost = Some(value),
            "UncoveredDeadhead" => uncovered_deadhead_cost = Some(value),
            other => warn!(key = other, "ignoring unknown cost key"),
        }
    }

    CostModel::from_parts(flight_cost, deadhead_cost, uncovered_deadhead_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parses_all_keys() {
        let input = "FlightCost,100\nDeadhead,500\nUncoveredDeadhead,10000\n";
        let model = parse_cost_model(input.as_bytes()).expect("parses");
        assert_eq!(model.flight_cost(), 100.0);
        assert_eq!(model.deadhead_cost(), 500.0);
        assert_eq!(model.uncovered_deadhead_cost(), 10_000.0);
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let input = "FlightCost,100\nDeadhead,500\n";
        let err = parse_cost_model(input.as_bytes()).expect_err("missing key");
        assert!(matches!(err, Error::MissingCost("UncoveredDeadhead")));
    }

    #[test]
    fn test_skips_malformed_and_unknown_lines() {
        let input = "\
FlightCost,100
no separator here
Deadhead,five hundred
Deadhead,500
SpecificFlightCost,42
UncoveredDeadhead,10000
";
        let model = parse_cost_model(input.as_bytes()).expect("parses");
        assert_eq!(model.deadhead_cost(), 500.0);
    }

    #[test]
    fn test_last_value_wins() {
        let input = "FlightCost,1\nFlightCost,2\nDeadhead,500\nUncoveredDeadhead,10000\n";
        let model = parse_cost_model(input.as_bytes()).expect("parses");
        assert_eq!(model.flight_cost(), 2.0);
    }
}
