// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::io;

use thiserror::Error;

/// Errors surfaced while building a clock catalog.
///
/// These are configuration mistakes in a platform table; they are reported
/// before any register is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("clock {0:?} is defined more than once")]
    DuplicateClock(String),
    #[error("mux id {0} is not registered in this catalog")]
    UnknownMux(usize),
    #[error("mux {block:?} is nested deeper than {max} levels")]
    DepthExceeded { block: String, max: usize },
    #[error("mux {block:?} register {offset:#x} lies outside its {size:#x} byte window")]
    RegisterOutsideWindow {
        block: String,
        offset: usize,
        size: usize,
    },
    #[error("mux {block:?} divider (shift {shift}, mask {mask:#x}) cannot encode /{divisor}")]
    InvalidDivider {
        block: String,
        shift: u32,
        mask: u32,
        divisor: u32,
    },
    #[error("window {phys:#x} declared with sizes {first:#x} and {second:#x}")]
    WindowSizeMismatch {
        phys: u64,
        first: usize,
        second: usize,
    },
}

/// Errors returned by the measurement engine.
#[derive(Debug, Error)]
pub enum DebugccError {
    #[error("failed to map {size:#x} bytes at {phys:#x}: {source}")]
    MapFailed {
        phys: u64,
        size: usize,
        #[source]
        source: io::Error,
    },
    #[error("permission denied mapping {phys:#x}; physical memory access requires root")]
    PermissionDenied { phys: u64 },
    #[error("register offset {offset:#x} outside window {phys:#x} (size {size:#x})")]
    OutOfRange {
        phys: u64,
        offset: usize,
        size: usize,
    },
    #[error("register window {phys:#x} used after close")]
    WindowClosed { phys: u64 },
    #[error("unknown clock {0:?}")]
    UnknownClock(String),
    #[error("unknown platform {0:?}")]
    UnknownPlatform(String),
    #[error("{block} debug counter did not settle after {polls} polls")]
    MeasurementTimeout { block: String, polls: u32 },
    #[error("invalid clock catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl DebugccError {
    /// True for errors caused by the process lacking access to physical memory.
    ///
    /// Batch callers use this to stop early instead of repeating the same
    /// failure for every clock.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

pub type Result<T> = std::result::Result<T, DebugccError>;
