// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::path::PathBuf;

use log::warn;

use crate::hal::mmio::DEV_MEM;
use crate::measure::{CounterConfig, DEFAULT_MAX_POLLS};
use crate::platforms::msm8994;

pub const ENV_PLATFORM: &str = "DEBUGCC_PLATFORM";
pub const ENV_DEVMEM: &str = "DEBUGCC_DEVMEM";
pub const ENV_MAX_POLLS: &str = "DEBUGCC_MAX_POLLS";

/// Runtime configuration. Defaults come from the environment; command-line
/// flags override individual fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugccConfig {
    pub platform: String,
    pub dev_mem: PathBuf,
    pub max_polls: u32,
}

impl Default for DebugccConfig {
    fn default() -> Self {
        Self {
            platform: std::env::var(ENV_PLATFORM).unwrap_or_else(|_| msm8994::NAME.to_string()),
            dev_mem: std::env::var(ENV_DEVMEM)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEV_MEM)),
            max_polls: max_polls_from_env(),
        }
    }
}

fn max_polls_from_env() -> u32 {
    match std::env::var(ENV_MAX_POLLS) {
        Ok(raw) => match raw.trim().parse::<u32>() {
            Ok(polls) if polls > 0 => polls,
            _ => {
                warn!("ignoring {ENV_MAX_POLLS}={raw:?}; using {DEFAULT_MAX_POLLS}");
                DEFAULT_MAX_POLLS
            }
        },
        Err(_) => DEFAULT_MAX_POLLS,
    }
}

impl DebugccConfig {
    /// Counter protocol parameters derived from this configuration.
    pub fn counter(&self) -> CounterConfig {
        CounterConfig {
            max_polls: self.max_polls.max(1),
            ..CounterConfig::default()
        }
    }
}
