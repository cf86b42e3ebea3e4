// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.3
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! In-process register simulator.
//!
//! Stands in for `/dev/mem` so the engine can be exercised without a target
//! board. Each physical block is a sparse map of 32-bit registers; root
//! counters react to arm/disarm writes the way the hardware does, and every
//! access is recorded so tests can check ordering and window lifecycle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use crate::catalog::Catalog;
use crate::error::{DebugccError, Result};
use crate::hal::{check_offset, Hardware, RegisterWindow};
use crate::measure::{CTL_ARM, FULL_GATE_TICKS, STATUS_COUNT_MASK, STATUS_DONE, XO_DIV4_HZ};
use crate::mux::MuxKind;

/// What a simulated counter sees at its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Square wave of this frequency after the root divider.
    Rate(u64),
    /// Fixed counts latched for the short and the full gate.
    Counts { short: u32, full: u32 },
    /// Never raises DONE.
    Stuck,
}

/// One recorded register or lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    Open { phys: u64, size: usize },
    Close { phys: u64 },
    Read { phys: u64, offset: usize, value: u32 },
    Write { phys: u64, offset: usize, value: u32 },
}

#[derive(Clone, Debug)]
struct SimCounter {
    phys: u64,
    ctl_reg: usize,
    status_reg: usize,
    ref_hz: u64,
    signal: Signal,
}

impl SimCounter {
    fn latch(&self, ctl: u32) -> u32 {
        if ctl & CTL_ARM == 0 {
            return 0;
        }
        let ticks = ctl & !CTL_ARM;
        let count = match self.signal {
            Signal::Rate(hz) => {
                let edges = u64::from(ticks).saturating_mul(hz) / self.ref_hz.max(1);
                u32::try_from(edges).unwrap_or(u32::MAX)
            }
            Signal::Counts { short, full } => {
                if ticks >= FULL_GATE_TICKS {
                    full
                } else {
                    short
                }
            }
            Signal::Stuck => return 0,
        };
        STATUS_DONE | (count & STATUS_COUNT_MASK)
    }
}

#[derive(Debug, Default)]
struct SimState {
    blocks: HashMap<u64, HashMap<usize, u32>>,
    counters: Vec<SimCounter>,
    refusals: HashMap<u64, io::ErrorKind>,
    open_windows: usize,
    opened: usize,
    closed: usize,
    events: Vec<SimEvent>,
}

impl SimState {
    fn write(&mut self, phys: u64, offset: usize, value: u32) {
        self.events.push(SimEvent::Write {
            phys,
            offset,
            value,
        });
        self.blocks.entry(phys).or_default().insert(offset, value);

        let latched: Vec<(usize, u32)> = self
            .counters
            .iter()
            .filter(|c| c.phys == phys && c.ctl_reg == offset)
            .map(|c| (c.status_reg, c.latch(value)))
            .collect();
        for (status_reg, status) in latched {
            self.blocks.entry(phys).or_default().insert(status_reg, status);
        }
    }

    fn read(&mut self, phys: u64, offset: usize) -> u32 {
        let value = self.peek(phys, offset);
        self.events.push(SimEvent::Read {
            phys,
            offset,
            value,
        });
        value
    }

    fn peek(&self, phys: u64, offset: usize) -> u32 {
        self.blocks
            .get(&phys)
            .and_then(|regs| regs.get(&offset))
            .copied()
            .unwrap_or(0)
    }
}

/// Simulated hardware provider. Clones share the same register state.
#[derive(Clone, Debug, Default)]
pub struct SimHardware {
    state: Rc<RefCell<SimState>>,
}

impl SimHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a counter on every root mux of `catalog`, all fed `signal`.
    pub fn for_catalog(catalog: &Catalog, signal: Signal) -> Self {
        let sim = Self::new();
        for mux in catalog.muxes() {
            if let MuxKind::Root(counter) = &mux.kind {
                sim.add_counter(mux.layout.phys, counter.ctl_reg, counter.status_reg, signal);
            }
        }
        sim
    }

    pub fn add_counter(&self, phys: u64, ctl_reg: usize, status_reg: usize, signal: Signal) {
        self.state.borrow_mut().counters.push(SimCounter {
            phys,
            ctl_reg,
            status_reg,
            ref_hz: XO_DIV4_HZ,
            signal,
        });
    }

    /// Changes the input of every counter in block `phys`.
    pub fn set_signal(&self, phys: u64, signal: Signal) {
        let mut state = self.state.borrow_mut();
        for counter in state.counters.iter_mut().filter(|c| c.phys == phys) {
            counter.signal = signal;
        }
    }

    /// Makes future opens of `phys` fail with `kind`.
    pub fn refuse(&self, phys: u64, kind: io::ErrorKind) {
        self.state.borrow_mut().refusals.insert(phys, kind);
    }

    /// Sets a register without recording an event.
    pub fn poke(&self, phys: u64, offset: usize, value: u32) {
        self.state
            .borrow_mut()
            .blocks
            .entry(phys)
            .or_default()
            .insert(offset, value);
    }

    pub fn peek(&self, phys: u64, offset: usize) -> u32 {
        self.state.borrow().peek(phys, offset)
    }

    pub fn open_windows(&self) -> usize {
        self.state.borrow().open_windows
    }

    /// Total `(opened, closed)` window counts since creation.
    pub fn lifecycle(&self) -> (usize, usize) {
        let state = self.state.borrow();
        (state.opened, state.closed)
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.state.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }
}

impl Hardware for SimHardware {
    type Window = SimWindow;

    fn open(&mut self, phys: u64, size: usize) -> Result<SimWindow> {
        let mut state = self.state.borrow_mut();
        if let Some(&kind) = state.refusals.get(&phys) {
            return Err(match kind {
                io::ErrorKind::PermissionDenied => DebugccError::PermissionDenied { phys },
                _ => DebugccError::MapFailed {
                    phys,
                    size,
                    source: io::Error::from(kind),
                },
            });
        }
        state.open_windows += 1;
        state.opened += 1;
        state.events.push(SimEvent::Open { phys, size });
        Ok(SimWindow {
            phys,
            size,
            open: true,
            state: Rc::clone(&self.state),
        })
    }
}

/// Window over a simulated block.
#[derive(Debug)]
pub struct SimWindow {
    phys: u64,
    size: usize,
    open: bool,
    state: Rc<RefCell<SimState>>,
}

impl SimWindow {
    fn check(&self, offset: usize) -> Result<()> {
        if !self.open {
            return Err(DebugccError::WindowClosed { phys: self.phys });
        }
        check_offset(self.phys, self.size, offset)
    }
}

impl RegisterWindow for SimWindow {
    fn phys(&self) -> u64 {
        self.phys
    }

    fn size(&self) -> usize {
        self.size
    }

    fn read32(&self, offset: usize) -> Result<u32> {
        self.check(offset)?;
        Ok(self.state.borrow_mut().read(self.phys, offset))
    }

    fn write32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.check(offset)?;
        self.state.borrow_mut().write(self.phys, offset, value);
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            let mut state = self.state.borrow_mut();
            state.open_windows -= 1;
            state.closed += 1;
            state.events.push(SimEvent::Close { phys: self.phys });
        }
    }
}

impl Drop for SimWindow {
    fn drop(&mut self) {
        self.close();
    }
}
