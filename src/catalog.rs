// CLASSIFICATION: COMMUNITY
// Filename: catalog.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Clock catalog and the mux forest it refers to.
//!
//! Catalogs are assembled once per platform through [`CatalogBuilder`] and
//! are immutable afterwards. A leaf mux may only name a parent registered
//! before it, so the forest cannot contain cycles; depth is bounded on top
//! of that so routing recursion stays shallow.

use std::collections::HashMap;

use log::debug;

use crate::error::{CatalogError, DebugccError, Result};
use crate::hal::check_offset;
pub use crate::mux::MuxId;
use crate::mux::{DebugMux, MuxKind, MuxLayout, RootCounter};

/// Longest permitted leaf-to-root chain, counting the root.
pub const MAX_MUX_DEPTH: usize = 4;

/// One measurable clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockEntry {
    pub name: String,
    pub mux: MuxId,
    /// Input index of this clock on `mux`.
    pub code: u32,
}

/// Validated, read-only clock table for one platform.
#[derive(Debug)]
pub struct Catalog {
    platform: String,
    muxes: Vec<DebugMux>,
    clocks: Vec<ClockEntry>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Resolves a clock by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Result<&ClockEntry> {
        self.by_name
            .get(name)
            .map(|&idx| &self.clocks[idx])
            .ok_or_else(|| DebugccError::UnknownClock(name.to_string()))
    }

    /// Clocks in table order.
    pub fn entries(&self) -> &[ClockEntry] {
        &self.clocks
    }

    pub fn muxes(&self) -> &[DebugMux] {
        &self.muxes
    }

    pub fn mux(&self, id: MuxId) -> Option<&DebugMux> {
        self.muxes.get(id.0)
    }

    /// Block name of the mux a clock is wired to.
    pub fn block_of(&self, entry: &ClockEntry) -> &str {
        self.mux(entry.mux).map_or("", DebugMux::block)
    }

    /// Muxes from `id` up to its root, `id` first.
    pub fn chain(&self, id: MuxId) -> Vec<MuxId> {
        let mut chain = Vec::with_capacity(MAX_MUX_DEPTH);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(mux) = self.mux(current) else {
                break;
            };
            chain.push(current);
            cursor = mux.parent().map(|(parent, _)| parent);
        }
        chain
    }

    /// Physical windows needed to measure through `id`, one per base address.
    pub fn windows_for(&self, id: MuxId) -> Vec<(u64, usize)> {
        let mut windows: Vec<(u64, usize)> = Vec::new();
        for mux in self.chain(id).into_iter().filter_map(|m| self.mux(m)) {
            let layout = &mux.layout;
            if !windows.iter().any(|(phys, _)| *phys == layout.phys) {
                windows.push((layout.phys, layout.size));
            }
        }
        windows
    }

    /// Distinct block names in registration order.
    pub fn blocks(&self) -> Vec<&str> {
        let mut blocks: Vec<&str> = Vec::with_capacity(self.muxes.len());
        for block in self.muxes.iter().map(DebugMux::block) {
            if !blocks.contains(&block) {
                blocks.push(block);
            }
        }
        blocks
    }
}

/// Incremental catalog construction with validation in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    platform: String,
    muxes: Vec<DebugMux>,
    clocks: Vec<ClockEntry>,
}

impl CatalogBuilder {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..Self::default()
        }
    }

    /// Registers a mux that owns the pulse counter.
    pub fn add_root(&mut self, layout: MuxLayout, counter: RootCounter) -> MuxId {
        self.push(DebugMux {
            layout,
            kind: MuxKind::Root(counter),
        })
    }

    /// Registers a mux whose output feeds input `parent_sel` of `parent`.
    pub fn add_leaf(&mut self, layout: MuxLayout, parent: MuxId, parent_sel: u32) -> MuxId {
        self.push(DebugMux {
            layout,
            kind: MuxKind::Leaf { parent, parent_sel },
        })
    }

    pub fn add_clock(&mut self, name: impl Into<String>, mux: MuxId, code: u32) -> &mut Self {
        self.clocks.push(ClockEntry {
            name: name.into(),
            mux,
            code,
        });
        self
    }

    /// Adds a table of `(name, code)` pairs all wired to `mux`.
    pub fn add_clocks(&mut self, mux: MuxId, table: &[(&str, u32)]) -> &mut Self {
        for &(name, code) in table {
            self.add_clock(name, mux, code);
        }
        self
    }

    fn push(&mut self, mux: DebugMux) -> MuxId {
        let id = MuxId(self.muxes.len());
        self.muxes.push(mux);
        id
    }

    pub fn build(self) -> std::result::Result<Catalog, CatalogError> {
        let mut sizes: HashMap<u64, usize> = HashMap::new();

        for (idx, mux) in self.muxes.iter().enumerate() {
            let layout = &mux.layout;

            let mut depth = 1;
            let mut cursor = mux.parent();
            while let Some((parent, _)) = cursor {
                // Parents must precede their children; this rules out cycles.
                if parent.0 >= idx {
                    return Err(CatalogError::UnknownMux(parent.0));
                }
                depth += 1;
                if depth > MAX_MUX_DEPTH {
                    return Err(CatalogError::DepthExceeded {
                        block: layout.block.clone(),
                        max: MAX_MUX_DEPTH,
                    });
                }
                cursor = self.muxes[parent.0].parent();
            }

            let mut regs = layout.registers();
            if let MuxKind::Root(counter) = &mux.kind {
                regs.extend(counter.registers());
            }
            for offset in regs {
                if check_offset(layout.phys, layout.size, offset).is_err() {
                    return Err(CatalogError::RegisterOutsideWindow {
                        block: layout.block.clone(),
                        offset,
                        size: layout.size,
                    });
                }
            }

            if let Some(div) = layout.divider {
                if div.field().is_none() {
                    return Err(CatalogError::InvalidDivider {
                        block: layout.block.clone(),
                        shift: div.shift,
                        mask: div.mask,
                        divisor: div.divisor,
                    });
                }
            }

            match sizes.get(&layout.phys) {
                Some(&first) if first != layout.size => {
                    return Err(CatalogError::WindowSizeMismatch {
                        phys: layout.phys,
                        first,
                        second: layout.size,
                    });
                }
                Some(_) => {}
                None => {
                    sizes.insert(layout.phys, layout.size);
                }
            }
        }

        let mut by_name = HashMap::with_capacity(self.clocks.len());
        for (idx, clock) in self.clocks.iter().enumerate() {
            if clock.mux.0 >= self.muxes.len() {
                return Err(CatalogError::UnknownMux(clock.mux.0));
            }
            if by_name.insert(clock.name.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateClock(clock.name.clone()));
            }
        }

        debug!(
            "catalog {}: {} muxes, {} clocks",
            self.platform,
            self.muxes.len(),
            self.clocks.len()
        );
        Ok(Catalog {
            platform: self.platform,
            muxes: self.muxes,
            clocks: self.clocks,
            by_name,
        })
    }
}
