//! Solution report rendering.

use std::io::Write;

use crate::models::PairingSolution;
use crate::Result;

/// Renders a human-readable itinerary.
///
/// One block per trip, one line per leg:
///
/// ```text
/// Trip cost: 370.00
///   A -> B (F1)
///   B -> C (F2)
///   C -> A (F3)
/// ```
pub fn write_text_report<W: Write>(writer: &mut W, solution: &PairingSolution) -> Result<()> {
    for trip in solution.trips() {
        writeln!(writer, "Trip cost: {:.2}", trip.cost())?;
        for leg in trip.legs() {
            writeln!(
                writer,
                "  {} -> {} ({})",
                leg.departure_city(),
                leg.arrival_city(),
                leg.flight_id()
            )?;
        }
    }
    writeln!(
        writer,
        "Total cost: {:.2} over {} trips",
        solution.total_cost(),
        solution.num_trips()
    )?;
    Ok(())
}

/// Renders the solution as pretty-printed JSON.
pub fn write_json_report<W: Write>(writer: W, solution: &PairingSolution) -> Result<()> {
    serde_json::to_writer_pretty(writer, solution)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flight, Trip};
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%d-%m-%Y %H:%M:%S").expect("valid timestamp")
    }

    fn solution() -> PairingSolution {
        let f1 = Flight::new(
            "A",
            "B",
            100.0,
            "F1",
            dt("01-01-2023 08:00:00"),
            dt("01-01-2023 10:00:00"),
        );
        let f2 = Flight::new(
            "B",
            "A",
            120.0,
            "F2",
            dt("01-01-2023 12:00:00"),
            dt("01-01-2023 14:00:00"),
        );
        PairingSolution::new(vec![Trip::new(vec![f1, f2], 220.0, "A")])
    }

    #[test]
    fn test_text_report_layout() {
        let mut out = Vec::new();
        write_text_report(&mut out, &solution()).expect("writes");
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("Trip cost: 220.00"));
        assert!(text.contains("  A -> B (F1)"));
        assert!(text.contains("  B -> A (F2)"));
        assert!(text.contains("Total cost: 220.00 over 1 trips"));
    }

    #[test]
    fn test_json_report_is_valid() {
        let mut out = Vec::new();
        write_json_report(&mut out, &solution()).expect("writes");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["trips"][0]["legs"][0]["flight_id"], "F1");
    }
}
