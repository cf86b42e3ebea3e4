// CLASSIFICATION: COMMUNITY
// Filename: mod.rs · HAL facade v0.3
// Date Modified: 2026-10-19
// Author: Lukas Bower

//! Hardware abstraction for debug mux register access.
//!
//! The engine only needs two operations from the platform: map a physical
//! register block, and perform 32-bit accesses inside it. Keeping the surface
//! this small lets the same engine run against `/dev/mem` and against the
//! register simulator in [`crate::sim`].

pub mod mmio;

pub use mmio::{DevMem, MmioRegion};

use crate::error::{DebugccError, Result};

/// Provider of register windows over physical address ranges.
pub trait Hardware {
    /// Window type handed out by this provider.
    type Window: RegisterWindow;

    /// Maps `size` bytes of physical address space starting at `phys`.
    fn open(&mut self, phys: u64, size: usize) -> Result<Self::Window>;
}

/// Exclusive handle over one mapped register block.
pub trait RegisterWindow {
    /// Physical base address of the window.
    fn phys(&self) -> u64;

    /// Size of the window in bytes.
    fn size(&self) -> usize;

    /// Reads the 32-bit register at byte `offset`.
    fn read32(&self, offset: usize) -> Result<u32>;

    /// Writes the 32-bit register at byte `offset`.
    fn write32(&mut self, offset: usize, value: u32) -> Result<()>;

    /// Releases the mapping. Calling it again is a no-op.
    fn close(&mut self);

    /// Read-modify-write: clears `mask` then ORs in `bits & mask`.
    fn update32(&mut self, offset: usize, mask: u32, bits: u32) -> Result<()> {
        let current = self.read32(offset)?;
        self.write32(offset, (current & !mask) | (bits & mask))
    }
}

/// Windows opened for one measurement, keyed by physical base.
///
/// Every window still held is closed when the set is dropped, so an early
/// return through `?` cannot leak a mapping.
pub struct WindowSet<W: RegisterWindow> {
    windows: Vec<W>,
}

impl<W: RegisterWindow> WindowSet<W> {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
        }
    }

    /// Opens each `(phys, size)` range not already present.
    ///
    /// On failure the windows opened so far stay in the set and are released
    /// with it.
    pub fn open_all<H>(&mut self, hw: &mut H, ranges: &[(u64, usize)]) -> Result<()>
    where
        H: Hardware<Window = W>,
    {
        for &(phys, size) in ranges {
            if self.windows.iter().any(|w| w.phys() == phys) {
                continue;
            }
            let window = hw.open(phys, size)?;
            self.windows.push(window);
        }
        Ok(())
    }

    pub fn get_mut(&mut self, phys: u64) -> Result<&mut W> {
        self.windows
            .iter_mut()
            .find(|w| w.phys() == phys)
            .ok_or(DebugccError::WindowClosed { phys })
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Closes and forgets every window, most recently opened first.
    pub fn close_all(&mut self) {
        while let Some(mut window) = self.windows.pop() {
            window.close();
        }
    }
}

impl<W: RegisterWindow> Default for WindowSet<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: RegisterWindow> Drop for WindowSet<W> {
    fn drop(&mut self) {
        self.close_all();
    }
}

/// Validates a 32-bit access against a window of `size` bytes.
///
/// Offsets must be word aligned and the whole word must fit in the window.
pub fn check_offset(phys: u64, size: usize, offset: usize) -> Result<()> {
    let in_range = offset
        .checked_add(4)
        .map_or(false, |end| end <= size);
    if !in_range || offset % 4 != 0 {
        return Err(DebugccError::OutOfRange { phys, offset, size });
    }
    Ok(())
}
