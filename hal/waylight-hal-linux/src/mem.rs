//! Physical memory window over `/dev/mem`
//!
//! The mailbox lives in the co-processor's tightly-coupled memory, which
//! the host reaches by mapping a fixed physical address range. Opening
//! `/dev/mem` requires root; a failure here means the process is
//! misconfigured and should terminate.

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;

use memmap2::{MmapMut, MmapOptions};
use waylight_hal::mem::SharedWindow;

/// Device file exposing physical memory
pub const DEV_MEM: &str = "/dev/mem";

/// Failures while acquiring the window; both are fatal configuration errors
#[derive(Debug)]
pub enum MapError {
    /// Could not open the memory device (usually: not running as root)
    Open(io::Error),
    /// The mapping itself failed
    Map(io::Error),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Open(e) => write!(f, "could not open memory device: {e}"),
            MapError::Map(e) => write!(f, "could not map shared memory window: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Open(e) | MapError::Map(e) => Some(e),
        }
    }
}

/// A mapped window of physical memory
///
/// Host-side writer view of the mailbox region. The mapping is shared
/// and uncached-coherent with the co-processor's view; word accesses go
/// straight through.
#[derive(Debug)]
pub struct PhysWindow {
    map: MmapMut,
}

impl PhysWindow {
    /// Map `len` bytes of physical memory starting at `base`
    pub fn open(base: u64, len: usize) -> Result<Self, MapError> {
        Self::open_at(DEV_MEM, base, len)
    }

    /// Map a window from an explicit device or backing file
    ///
    /// Tests point this at a regular file; production uses [`DEV_MEM`].
    pub fn open_at(path: &str, base: u64, len: usize) -> Result<Self, MapError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(MapError::Open)?;

        // Safety: the region is a dedicated mailbox; nothing else in this
        // process maps or aliases it.
        let map = unsafe { MmapOptions::new().offset(base).len(len).map_mut(&file) }
            .map_err(MapError::Map)?;

        Ok(Self { map })
    }
}

impl SharedWindow for PhysWindow {
    fn load_u32(&self, offset: usize) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.map[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    fn store_u32(&mut self, offset: usize, value: u32) {
        self.map[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
