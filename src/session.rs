// CLASSIFICATION: COMMUNITY
// Filename: session.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Measurement sessions.
//!
//! A session ties a catalog to a hardware provider. Each measurement maps the
//! windows its mux chain needs, routes and counts, then releases every window
//! it opened before returning, whether or not the measurement succeeded.
//! Nothing about the previous selection is cached between calls.

use log::{debug, info, warn};
use serde::Serialize;

use crate::catalog::{Catalog, ClockEntry};
use crate::error::Result;
use crate::hal::{Hardware, WindowSet};
use crate::measure::{self, CounterConfig, Pacer, Spin};

/// Frequency of one clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub name: String,
    pub block: String,
    pub hz: u64,
}

impl Reading {
    /// A zero reading means the clock is gated off.
    pub fn is_off(&self) -> bool {
        self.hz == 0
    }
}

/// Per-clock result of a batch run.
#[derive(Debug)]
pub struct Outcome {
    pub name: String,
    pub block: String,
    pub result: Result<u64>,
}

pub struct Session<'c, H: Hardware, P: Pacer = Spin> {
    catalog: &'c Catalog,
    hw: H,
    config: CounterConfig,
    pacer: P,
}

impl<'c, H: Hardware> Session<'c, H, Spin> {
    pub fn new(catalog: &'c Catalog, hw: H) -> Self {
        Self {
            catalog,
            hw,
            config: CounterConfig::default(),
            pacer: Spin,
        }
    }
}

impl<'c, H: Hardware, P: Pacer> Session<'c, H, P> {
    pub fn with_config(mut self, config: CounterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the poll pacing, e.g. to count or sleep between polls.
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> Session<'c, H, Q> {
        Session {
            catalog: self.catalog,
            hw: self.hw,
            config: self.config,
            pacer,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn lookup(&self, name: &str) -> Result<&'c ClockEntry> {
        self.catalog.lookup(name)
    }

    /// Measures the clock called `name`.
    pub fn measure(&mut self, name: &str) -> Result<Reading> {
        let entry = self.catalog.lookup(name)?;
        self.measure_entry(entry)
    }

    /// Measures one entry of this session's catalog.
    pub fn measure_entry(&mut self, entry: &ClockEntry) -> Result<Reading> {
        let catalog = self.catalog;
        let ranges = catalog.windows_for(entry.mux);

        let mut windows = WindowSet::new();
        windows.open_all(&mut self.hw, &ranges)?;
        debug!("{}: {} window(s) open", entry.name, windows.len());

        let hz = measure::measure_entry(
            catalog,
            &mut windows,
            entry,
            &self.config,
            &mut self.pacer,
        )?;
        windows.close_all();

        info!("{}: {} Hz", entry.name, hz);
        Ok(Reading {
            name: entry.name.clone(),
            block: catalog.block_of(entry).to_string(),
            hz,
        })
    }

    /// Measures every clock, optionally only those on mux block `block`.
    ///
    /// A failing clock does not stop the run. Missing privilege does, since
    /// every remaining clock would fail the same way.
    pub fn measure_all(&mut self, block: Option<&str>) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        self.measure_each(block, |outcome| outcomes.push(outcome))?;
        Ok(outcomes)
    }

    /// Like [`measure_all`](Self::measure_all), handing each outcome to `sink`
    /// as soon as it is known. Outcomes delivered before a permission error
    /// stay with the caller.
    pub fn measure_each<F>(&mut self, block: Option<&str>, mut sink: F) -> Result<()>
    where
        F: FnMut(Outcome),
    {
        let catalog = self.catalog;
        for entry in catalog.entries() {
            let entry_block = catalog.block_of(entry);
            if block.is_some_and(|wanted| wanted != entry_block) {
                continue;
            }
            let result = match self.measure_entry(entry) {
                Err(err) if err.is_permission() => return Err(err),
                other => other.map(|reading| reading.hz),
            };
            if let Err(err) = &result {
                warn!("{}: {}", entry.name, err);
            }
            sink(Outcome {
                name: entry.name.clone(),
                block: entry_block.to_string(),
                result,
            });
        }
        Ok(())
    }
}
