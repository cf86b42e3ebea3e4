// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.2
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Library wrappers for debugcc binaries.

pub mod debugcc_main;
