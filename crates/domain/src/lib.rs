//! # hubflow-domain
//!
//! Pure domain model for the hubflow telemetry core.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **sensor events** (readings reported by hub sensors) and the
//!   six payload kinds they carry
//! - Define **snapshots** (the consolidated per-hub sensor state)
//! - Define **hub events** (device and scenario registration records)
//! - Define **scenarios** (condition conjunctions that emit device actions)
//! - Contain all invariant enforcement and comparison logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod hub;
pub mod scenario;
pub mod sensor;
pub mod snapshot;
