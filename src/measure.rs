// CLASSIFICATION: COMMUNITY
// Filename: measure.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Measurement strategies.
//!
//! A root mux owns a pulse counter gated by the divided reference oscillator:
//! the counter samples the selected signal for a fixed number of reference
//! ticks and latches the edge count. A leaf mux has no counter of its own; it
//! is routed through its parent chain until a root can see it.
//!
//! Sequence for one clock:
//!
//! 1. select every mux from the root down to the clock's own mux,
//! 2. run a short and a full gate on the root counter,
//! 3. scale the full count to Hz and undo each fixed divider on the path,
//! 4. disable the muxes again, innermost first.

use log::{debug, trace};

use crate::catalog::{Catalog, ClockEntry};
use crate::error::{CatalogError, DebugccError, Result};
use crate::hal::{RegisterWindow, WindowSet};
use crate::mux::{self, MuxId, MuxKind, MuxLayout, RootCounter};

/// Divided crystal feeding the debug counter gate (19.2 MHz / 4).
pub const XO_DIV4_HZ: u64 = 4_800_000;

pub const SHORT_GATE_TICKS: u32 = 0x1000;
pub const FULL_GATE_TICKS: u32 = 0x10000;
pub const DEFAULT_MAX_POLLS: u32 = 1_000_000;

/// Control register: start counting.
pub const CTL_ARM: u32 = 1 << 20;
/// Status register: count latched.
pub const STATUS_DONE: u32 = 1 << 25;
/// Status register: latched edge count.
pub const STATUS_COUNT_MASK: u32 = 0x00ff_ffff;
/// Reference-enable register: route the divided crystal to the counter.
pub const REF_ENABLE: u32 = 1 << 0;

/// Parameters of the counting protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    pub ref_hz: u64,
    pub short_ticks: u32,
    pub full_ticks: u32,
    /// Status reads allowed per wait phase before giving up. Each gate waits
    /// twice (DONE clear, then DONE set), so one gate may read status up to
    /// `2 * max_polls` times.
    pub max_polls: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            ref_hz: XO_DIV4_HZ,
            short_ticks: SHORT_GATE_TICKS,
            full_ticks: FULL_GATE_TICKS,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

impl CounterConfig {
    /// Frequency resolution of one counted edge in the full gate.
    pub fn quantum_hz(&self, divisor: u64) -> u64 {
        (self.ref_hz * divisor).div_ceil(u64::from(self.full_ticks.max(1)))
    }
}

/// Called between status polls.
pub trait Pacer {
    fn pause(&mut self, attempt: u32);
}

/// Busy-wait pacing for real hardware.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spin;

impl Pacer for Spin {
    fn pause(&mut self, _attempt: u32) {
        std::hint::spin_loop();
    }
}

/// Polls `reg` until the DONE bit equals `done`, at most `max_polls` reads.
fn wait_done<W, P>(
    window: &W,
    block: &str,
    reg: usize,
    done: bool,
    max_polls: u32,
    pacer: &mut P,
) -> Result<u32>
where
    W: RegisterWindow,
    P: Pacer,
{
    for attempt in 0..max_polls {
        let status = window.read32(reg)?;
        if (status & STATUS_DONE != 0) == done {
            trace!("{block}: status {status:#x} after {} polls", attempt + 1);
            return Ok(status);
        }
        pacer.pause(attempt);
    }
    Err(DebugccError::MeasurementTimeout {
        block: block.to_string(),
        polls: max_polls,
    })
}

/// Runs one gate of `ticks` reference cycles and returns the latched count.
pub fn measure_ticks<W, P>(
    window: &mut W,
    block: &str,
    counter: &RootCounter,
    config: &CounterConfig,
    pacer: &mut P,
    ticks: u32,
) -> Result<u32>
where
    W: RegisterWindow,
    P: Pacer,
{
    window.write32(counter.ctl_reg, ticks)?;
    wait_done(window, block, counter.status_reg, false, config.max_polls, pacer)?;

    window.write32(counter.ctl_reg, ticks | CTL_ARM)?;
    let status = wait_done(window, block, counter.status_reg, true, config.max_polls, pacer)?;

    window.write32(counter.ctl_reg, ticks)?;
    Ok(status & STATUS_COUNT_MASK)
}

/// Converts gate counts to Hz at the root mux output, undoing its divider.
///
/// Equal short and full counts mean the signal never toggled.
pub fn scale_counts(short: u32, full: u32, config: &CounterConfig, divisor: u64) -> u64 {
    if short == full {
        return 0;
    }
    u64::from(full) * config.ref_hz * divisor / u64::from(config.full_ticks.max(1))
}

/// Counts the signal currently routed to a root mux.
///
/// The reference-enable register is restored on every path.
pub fn count_root<W, P>(
    window: &mut W,
    layout: &MuxLayout,
    counter: &RootCounter,
    config: &CounterConfig,
    pacer: &mut P,
) -> Result<u64>
where
    W: RegisterWindow,
    P: Pacer,
{
    let saved = window.read32(counter.ref_enable_reg)?;
    window.write32(counter.ref_enable_reg, saved | REF_ENABLE)?;

    let counts = run_gates(window, layout, counter, config, pacer);
    let restored = window.write32(counter.ref_enable_reg, saved);

    let (short, full) = counts?;
    restored?;

    let hz = scale_counts(short, full, config, layout.divisor());
    debug!(
        "{}: short {:#x} full {:#x} -> {} Hz",
        layout.block, short, full, hz
    );
    Ok(hz)
}

fn run_gates<W, P>(
    window: &mut W,
    layout: &MuxLayout,
    counter: &RootCounter,
    config: &CounterConfig,
    pacer: &mut P,
) -> Result<(u32, u32)>
where
    W: RegisterWindow,
    P: Pacer,
{
    let short = measure_ticks(window, &layout.block, counter, config, pacer, config.short_ticks)?;
    let full = measure_ticks(window, &layout.block, counter, config, pacer, config.full_ticks)?;
    Ok((short, full))
}

fn mux_of(catalog: &Catalog, id: MuxId) -> Result<&mux::DebugMux> {
    catalog
        .mux(id)
        .ok_or(DebugccError::Catalog(CatalogError::UnknownMux(id.index())))
}

/// Selects input `code` on `id`, routing through its parents first.
///
/// Each mux is appended to `selected` once programmed so the caller can
/// disable exactly what was touched. Returns the root of the chain.
pub fn route<W: RegisterWindow>(
    catalog: &Catalog,
    windows: &mut WindowSet<W>,
    id: MuxId,
    code: u32,
    selected: &mut Vec<MuxId>,
) -> Result<MuxId> {
    let node = mux_of(catalog, id)?;
    let root = match node.kind {
        MuxKind::Root(_) => id,
        MuxKind::Leaf { parent, parent_sel } => {
            route(catalog, windows, parent, parent_sel, selected)?
        }
    };
    mux::select(windows.get_mut(node.layout.phys)?, &node.layout, code)?;
    selected.push(id);
    Ok(root)
}

/// Disables routed muxes, last selected first.
///
/// Keeps going after a failure and reports the first one.
pub fn unroute<W: RegisterWindow>(
    catalog: &Catalog,
    windows: &mut WindowSet<W>,
    selected: &[MuxId],
) -> Result<()> {
    let mut first_err = None;
    for &id in selected.iter().rev() {
        let outcome = mux_of(catalog, id).and_then(|node| {
            let window = windows.get_mut(node.layout.phys)?;
            mux::disable(window, &node.layout)
        });
        if let Err(err) = outcome {
            first_err.get_or_insert(err);
        }
    }
    first_err.map_or(Ok(()), Err)
}

/// Measures one catalog entry over already opened windows.
pub fn measure_entry<W, P>(
    catalog: &Catalog,
    windows: &mut WindowSet<W>,
    entry: &ClockEntry,
    config: &CounterConfig,
    pacer: &mut P,
) -> Result<u64>
where
    W: RegisterWindow,
    P: Pacer,
{
    let mut selected = Vec::new();
    let result = route(catalog, windows, entry.mux, entry.code, &mut selected)
        .and_then(|root| count_at(catalog, windows, root, config, pacer))
        .map(|hz| hz * leaf_divisors(catalog, entry.mux));
    let released = unroute(catalog, windows, &selected);

    let hz = result?;
    released?;
    Ok(hz)
}

fn count_at<W, P>(
    catalog: &Catalog,
    windows: &mut WindowSet<W>,
    root: MuxId,
    config: &CounterConfig,
    pacer: &mut P,
) -> Result<u64>
where
    W: RegisterWindow,
    P: Pacer,
{
    let node = mux_of(catalog, root)?;
    match &node.kind {
        MuxKind::Root(counter) => {
            let window = windows.get_mut(node.layout.phys)?;
            count_root(window, &node.layout, counter, config, pacer)
        }
        MuxKind::Leaf { .. } => Err(DebugccError::Catalog(CatalogError::UnknownMux(root.index()))),
    }
}

/// Product of the fixed dividers of every non-root mux from `id` upward.
fn leaf_divisors(catalog: &Catalog, id: MuxId) -> u64 {
    catalog
        .chain(id)
        .into_iter()
        .filter_map(|m| catalog.mux(m))
        .filter(|m| !m.is_root())
        .map(|m| m.layout.divisor())
        .product()
}
