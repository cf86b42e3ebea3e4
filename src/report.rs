// CLASSIFICATION: COMMUNITY
// Filename: report.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Result formatting for the command line.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::session::Outcome;

const NAME_WIDTH: usize = 50;

/// `name: 19.200000MHz (19200000Hz)`, or `name: off` for a stopped clock.
pub fn format_hz(name: &str, hz: u64) -> String {
    if hz == 0 {
        format!("{name:>width$}: off", width = NAME_WIDTH)
    } else {
        format!(
            "{name:>width$}: {:.6}MHz ({hz}Hz)",
            hz as f64 / 1_000_000.0,
            width = NAME_WIDTH
        )
    }
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match &outcome.result {
        Ok(hz) => format_hz(&outcome.name, *hz),
        Err(err) => format!("{:>width$}: error: {err}", outcome.name, width = NAME_WIDTH),
    }
}

/// One line per clock: name and the mux block it hangs off.
pub fn format_listing(catalog: &Catalog, block: Option<&str>) -> Vec<String> {
    catalog
        .entries()
        .iter()
        .filter(|entry| block.map_or(true, |wanted| catalog.block_of(entry) == wanted))
        .map(|entry| {
            let block = catalog.block_of(entry);
            format!("{:<width$} {block}", entry.name, width = NAME_WIDTH)
        })
        .collect()
}

/// JSON shape of one measurement.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonRecord {
    pub name: String,
    pub block: String,
    pub hz: Option<u64>,
    pub error: Option<String>,
}

impl From<&Outcome> for JsonRecord {
    fn from(outcome: &Outcome) -> Self {
        let (hz, error) = match &outcome.result {
            Ok(hz) => (Some(*hz), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            name: outcome.name.clone(),
            block: outcome.block.clone(),
            hz,
            error,
        }
    }
}

pub fn to_json(outcomes: &[Outcome]) -> serde_json::Result<String> {
    let records: Vec<JsonRecord> = outcomes.iter().map(JsonRecord::from).collect();
    serde_json::to_string_pretty(&records)
}
