//! Flat-file inputs and report rendering.

mod costs;
mod report;
mod schedule;

pub use costs::{parse_cost_model, read_cost_model};
pub use report::{write_json_report, write_text_report};
pub use schedule::{parse_flights, read_flights, TIMESTAMP_FORMAT};
