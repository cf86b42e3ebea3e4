// CLASSIFICATION: COMMUNITY
// Filename: mux.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Debug mux descriptions and the selection protocol.
//!
//! A debug mux routes one of its inputs to a single output. Root muxes feed
//! the pulse counter directly; leaf muxes feed an input of a parent mux.

use log::debug;

use crate::error::{CatalogError, Result};
use crate::hal::RegisterWindow;

/// Index of a mux inside a [`crate::catalog::Catalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MuxId(pub(crate) usize);

impl MuxId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Post-mux divider programmed to a fixed ratio before counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divider {
    pub offset: usize,
    pub shift: u32,
    pub mask: u32,
    /// Divide-by-N ratio; the field itself holds `N - 1`.
    pub divisor: u32,
}

impl Divider {
    /// Field value for the configured ratio, already shifted into place.
    ///
    /// `None` when the shift leaves the register or the ratio does not fit
    /// inside `mask`.
    pub fn field(&self) -> Option<u32> {
        let ratio = self.divisor.max(1) - 1;
        let window = u32::MAX.checked_shl(self.shift)?;
        let bits = ratio.checked_shl(self.shift)?;
        let fits = bits >> self.shift == ratio && bits & !self.mask == 0;
        (self.mask & !window == 0 && fits).then_some(bits)
    }
}

/// Register layout of one mux block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MuxLayout {
    pub block: String,
    pub phys: u64,
    pub size: usize,
    pub enable_reg: usize,
    pub enable_mask: u32,
    pub select_reg: usize,
    pub select_mask: u32,
    pub divider: Option<Divider>,
}

impl MuxLayout {
    pub fn new(block: impl Into<String>, phys: u64, size: usize) -> Self {
        Self {
            block: block.into(),
            phys,
            size,
            enable_reg: 0,
            enable_mask: 0,
            select_reg: 0,
            select_mask: 0,
            divider: None,
        }
    }

    pub fn enable(mut self, reg: usize, mask: u32) -> Self {
        self.enable_reg = reg;
        self.enable_mask = mask;
        self
    }

    pub fn select(mut self, reg: usize, mask: u32) -> Self {
        self.select_reg = reg;
        self.select_mask = mask;
        self
    }

    pub fn divider(mut self, offset: usize, shift: u32, mask: u32, divisor: u32) -> Self {
        self.divider = Some(Divider {
            offset,
            shift,
            mask,
            divisor,
        });
        self
    }

    /// Bit position of the select field, taken from the mask.
    pub fn select_shift(&self) -> u32 {
        if self.select_mask == 0 {
            0
        } else {
            self.select_mask.trailing_zeros()
        }
    }

    /// Fixed division applied between the routed signal and the mux output.
    pub fn divisor(&self) -> u64 {
        self.divider
            .map_or(1, |div| u64::from(div.divisor.max(1)))
    }

    /// Register offsets this layout touches.
    pub fn registers(&self) -> Vec<usize> {
        let mut regs = Vec::with_capacity(3);
        if self.enable_mask != 0 {
            regs.push(self.enable_reg);
        }
        if self.select_mask != 0 {
            regs.push(self.select_reg);
        }
        if let Some(div) = self.divider {
            regs.push(div.offset);
        }
        regs
    }
}

/// Registers driving the reference-gated pulse counter of a root mux.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootCounter {
    /// Gates the divided reference oscillator into the counter (bit 0).
    pub ref_enable_reg: usize,
    pub ctl_reg: usize,
    pub status_reg: usize,
}

impl RootCounter {
    pub fn registers(&self) -> [usize; 3] {
        [self.ref_enable_reg, self.ctl_reg, self.status_reg]
    }
}

/// How a mux reaches the counter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MuxKind {
    /// Owns the counter.
    Root(RootCounter),
    /// Feeds input `parent_sel` of `parent`.
    Leaf { parent: MuxId, parent_sel: u32 },
}

/// A mux block registered in a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugMux {
    pub layout: MuxLayout,
    pub kind: MuxKind,
}

impl DebugMux {
    pub fn block(&self) -> &str {
        &self.layout.block
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, MuxKind::Root(_))
    }

    pub fn parent(&self) -> Option<(MuxId, u32)> {
        match self.kind {
            MuxKind::Root(_) => None,
            MuxKind::Leaf { parent, parent_sel } => Some((parent, parent_sel)),
        }
    }
}

/// Routes input `code` to the mux output and gates it on.
///
/// Order: select field, enable bit, then the fixed divider. Every write is a
/// read-modify-write so neighbouring fields survive.
pub fn select<W: RegisterWindow>(window: &mut W, layout: &MuxLayout, code: u32) -> Result<()> {
    debug!("{}: select {:#x}", layout.block, code);

    if layout.select_mask != 0 {
        let bits = code << layout.select_shift();
        window.update32(layout.select_reg, layout.select_mask, bits)?;
    }

    if layout.enable_mask != 0 {
        window.update32(layout.enable_reg, layout.enable_mask, layout.enable_mask)?;
    }

    if let Some(div) = layout.divider {
        let bits = div.field().ok_or_else(|| CatalogError::InvalidDivider {
            block: layout.block.clone(),
            shift: div.shift,
            mask: div.mask,
            divisor: div.divisor,
        })?;
        window.update32(div.offset, div.mask, bits)?;
    }

    Ok(())
}

/// Clears the enable bit of a previously selected mux.
pub fn disable<W: RegisterWindow>(window: &mut W, layout: &MuxLayout) -> Result<()> {
    if layout.enable_mask != 0 {
        debug!("{}: disable", layout.block);
        window.update32(layout.enable_reg, layout.enable_mask, 0)?;
    }
    Ok(())
}
