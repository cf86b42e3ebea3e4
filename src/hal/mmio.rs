// CLASSIFICATION: COMMUNITY
// Filename: mmio.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! `/dev/mem` backed register windows.
#![allow(unsafe_code)]

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::ptr;

use log::debug;
use memmap2::{MmapOptions, MmapRaw};

use super::{check_offset, Hardware, RegisterWindow};
use crate::error::{DebugccError, Result};

/// Default physical memory device.
pub const DEV_MEM: &str = "/dev/mem";

/// Hardware provider mapping physical ranges through a memory device file.
#[derive(Clone, Debug)]
pub struct DevMem {
    path: PathBuf,
}

impl DevMem {
    /// Provider over `/dev/mem`.
    pub fn new() -> Self {
        Self::with_path(DEV_MEM)
    }

    /// Provider over an arbitrary device or file, e.g. a sparse file in tests.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DevMem {
    fn default() -> Self {
        Self::new()
    }
}

impl Hardware for DevMem {
    type Window = MmioRegion;

    fn open(&mut self, phys: u64, size: usize) -> Result<MmioRegion> {
        if size == 0 || phys % 4 != 0 {
            return Err(DebugccError::MapFailed {
                phys,
                size,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "window must be non-empty and word aligned",
                ),
            });
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.path)
            .map_err(|err| classify(phys, size, err))?;

        // The mapping outlives the descriptor; `file` closes at scope end.
        let map = MmapOptions::new()
            .offset(phys)
            .len(size)
            .map_raw(&file)
            .map_err(|err| classify(phys, size, err))?;

        debug!(
            "mapped {:#x}+{:#x} from {} at {:p}",
            phys,
            size,
            self.path.display(),
            map.as_ptr()
        );
        Ok(MmioRegion {
            phys,
            size,
            map: Some(map),
        })
    }
}

fn classify(phys: u64, size: usize, err: io::Error) -> DebugccError {
    let denied = matches!(err.raw_os_error(), Some(libc::EACCES) | Some(libc::EPERM))
        || err.kind() == io::ErrorKind::PermissionDenied;
    if denied {
        DebugccError::PermissionDenied { phys }
    } else {
        DebugccError::MapFailed {
            phys,
            size,
            source: err,
        }
    }
}

/// A mapped register block. Sole owner of its mapping.
pub struct MmioRegion {
    phys: u64,
    size: usize,
    map: Option<MmapRaw>,
}

impl MmioRegion {
    /// Returns true while the mapping is live.
    pub fn is_mapped(&self) -> bool {
        self.map.is_some()
    }

    fn live(&self) -> Result<&MmapRaw> {
        self.map
            .as_ref()
            .ok_or(DebugccError::WindowClosed { phys: self.phys })
    }
}

impl RegisterWindow for MmioRegion {
    fn phys(&self) -> u64 {
        self.phys
    }

    fn size(&self) -> usize {
        self.size
    }

    fn read32(&self, offset: usize) -> Result<u32> {
        let map = self.live()?;
        check_offset(self.phys, self.size, offset)?;
        // SAFETY: offset is aligned and the word lies inside the live mapping.
        let value = unsafe { ptr::read_volatile(map.as_ptr().add(offset) as *const u32) };
        Ok(value)
    }

    fn write32(&mut self, offset: usize, value: u32) -> Result<()> {
        let map = self.live()?;
        check_offset(self.phys, self.size, offset)?;
        // SAFETY: offset is aligned and the word lies inside the live mapping.
        unsafe { ptr::write_volatile(map.as_mut_ptr().add(offset) as *mut u32, value) };
        Ok(())
    }

    fn close(&mut self) {
        if self.map.take().is_some() {
            debug!("unmapped {:#x}+{:#x}", self.phys, self.size);
        }
    }
}

impl Drop for MmioRegion {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for MmioRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MmioRegion")
            .field("phys", &format_args!("{:#x}", self.phys))
            .field("size", &format_args!("{:#x}", self.size))
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
