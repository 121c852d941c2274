//! # crew-pairing
//!
//! Airline crew pairing optimization via column generation: a set-covering
//! Restricted Master Problem selects among known round trips, while a pricing
//! search over the flight-connectivity graph proposes new trips with negative
//! reduced cost.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Flight, Trip, CostModel, PairingSolution)
//! - [`legality`] — Pure trip-legality predicates and the LegalityChecker
//! - [`lp`] — LP oracle contract and the Clarabel-backed implementation
//! - [`master`] — Restricted master problem (trip pool + set-covering LP)
//! - [`pricing`] — Reduced-cost pricing searches (regular and deadhead-aware)
//! - [`colgen`] — Column-generation orchestrator and configuration
//! - [`io`] — Flight schedule / cost configuration readers and report rendering

pub mod colgen;
mod error;
pub mod io;
pub mod legality;
pub mod lp;
pub mod master;
pub mod models;
pub mod pricing;

pub use error::{Error, Result};
