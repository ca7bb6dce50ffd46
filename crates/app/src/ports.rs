//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the service layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod sink;
pub mod storage;

pub use sink::{ActionSink, SnapshotSink};
pub use storage::{DeviceRepository, ScenarioRepository};
