//! Two-phase column-generation orchestration.

mod orchestrator;

pub use orchestrator::{ColGenConfig, ColumnGeneration};
