// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

//! Root library for debugcc, a user-space clock frequency probe built on the
//! SoC debug mux and its reference-gated pulse counter.

/// Error taxonomy shared by every layer.
pub mod error;

/// Register windows over physical memory and the hardware provider trait.
pub mod hal;

/// In-process register simulator used in place of real hardware.
pub mod sim;

/// Debug mux descriptions and the selection protocol.
pub mod mux;

/// Root counter protocol and the leaf routing strategy.
pub mod measure;

/// Validated clock catalog and mux forest.
pub mod catalog;

/// Built-in per-SoC register tables.
pub mod platforms;

/// Measurement session orchestrating window lifecycle.
pub mod session;

/// Runtime configuration.
pub mod config;

/// Text and JSON result formatting.
pub mod report;

/// Library wrappers for the debugcc binary.
pub mod binlib;

pub use catalog::{Catalog, CatalogBuilder, ClockEntry, MuxId};
pub use error::{CatalogError, DebugccError};
pub use hal::{DevMem, Hardware, RegisterWindow};
pub use session::{Reading, Session};
