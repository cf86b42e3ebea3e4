// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Built-in platform tables.

use crate::catalog::Catalog;
use crate::error::{DebugccError, Result};

pub mod msm8994;

type CatalogFn = fn() -> std::result::Result<Catalog, crate::error::CatalogError>;

const PLATFORMS: &[(&str, CatalogFn)] = &[(msm8994::NAME, msm8994::catalog)];

/// Names of the supported platforms.
pub fn names() -> Vec<&'static str> {
    PLATFORMS.iter().map(|(name, _)| *name).collect()
}

/// Builds the catalog for `name`.
pub fn lookup(name: &str) -> Result<Catalog> {
    let (_, build) = PLATFORMS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .ok_or_else(|| DebugccError::UnknownPlatform(name.to_string()))?;
    Ok(build()?)
}
