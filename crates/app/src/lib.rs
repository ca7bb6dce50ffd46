//! # hubflow-app
//!
//! Application layer — stream-processing services and **port definitions**
//! (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `ScenarioRepository` / `DeviceRepository` — registry storage
//!   - `SnapshotSink` / `ActionSink` — outbound stream publishers
//! - Provide the three processing services wired into the stream workers:
//!   - `SnapshotAggregator` — fold sensor events into per-hub snapshots
//!   - `HubRegistry` — apply device and scenario registration events
//!   - `ScenarioEngine` — evaluate scenarios against emitted snapshots
//! - Orchestrate domain objects without knowing *how* persistence or
//!   transport works
//!
//! ## Dependency rule
//! Depends on `hubflow-domain` only (plus `tracing` for diagnostics).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod aggregator;
pub mod engine;
pub mod ports;
pub mod registry;
