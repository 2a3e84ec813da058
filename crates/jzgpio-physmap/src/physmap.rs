//! Physical memory mapping for MMIO access
//!
//! # Safety
//!
//! Accessing physical memory is inherently unsafe. A [`PhysMap`] owns its
//! mapping and only ever performs aligned 32-bit volatile accesses inside
//! it; what those accesses do to the hardware is the caller's business.

use crate::error::{PhysMapError, Result};
use jzgpio_core::RegisterIo;

/// Path of the physical memory device
pub const DEV_MEM: &str = "/dev/mem";

/// Requested protection of a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// A mapped region of physical memory
#[cfg(unix)]
pub struct PhysMap {
    /// Pointer to `phys_addr` inside the mapping
    ptr: *mut u8,
    /// Usable bytes from `ptr`
    size: usize,
    /// Length passed to mmap
    map_size: usize,
    /// Page offset of `phys_addr`
    page_offset: usize,
    /// Physical address (for error reporting)
    phys_addr: u64,
    access: Access,
}

#[cfg(unix)]
impl PhysMap {
    /// Map `size` bytes of physical memory starting at `phys_addr`
    ///
    /// The address need not be page aligned; the mapping is widened to
    /// whole pages and the returned handle addresses `phys_addr` at offset 0.
    /// The device file is closed again once the mapping exists.
    pub fn new(phys_addr: u64, size: usize, access: Access) -> Result<Self> {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;
        use std::os::unix::io::AsRawFd;

        // O_SYNC for uncached access to device registers
        let file = OpenOptions::new()
            .read(true)
            .write(access == Access::ReadWrite)
            .custom_flags(libc::O_SYNC)
            .open(DEV_MEM)
            .map_err(|source| PhysMapError::Open {
                path: DEV_MEM,
                source,
            })?;

        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
        let page_mask = page_size - 1;
        let page_offset = (phys_addr as usize) & page_mask;
        let aligned_addr = phys_addr & !(page_mask as u64);
        let map_size = (size + page_offset + page_mask) & !page_mask;

        let prot = match access {
            Access::ReadOnly => libc::PROT_READ,
            Access::ReadWrite => libc::PROT_READ | libc::PROT_WRITE,
        };

        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                map_size,
                prot,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                aligned_addr as libc::off_t,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(PhysMapError::Map {
                address: phys_addr,
                size,
                source: std::io::Error::last_os_error(),
            });
        }

        log::debug!(
            "Mapped {:#x} bytes at {:#x} ({:?})",
            map_size,
            aligned_addr,
            access
        );

        Ok(Self {
            ptr: unsafe { (ptr as *mut u8).add(page_offset) },
            size,
            map_size,
            page_offset,
            phys_addr,
            access,
        })
    }

    /// Read a 32-bit value from the mapped region
    #[inline]
    pub fn read32(&self, offset: usize) -> u32 {
        debug_assert!(offset + 4 <= self.size);
        debug_assert!(offset & 3 == 0, "unaligned 32-bit read");
        unsafe { core::ptr::read_volatile(self.ptr.add(offset) as *const u32) }
    }

    /// Write a 32-bit value to the mapped region
    #[inline]
    pub fn write32(&self, offset: usize, value: u32) {
        debug_assert!(offset + 4 <= self.size);
        debug_assert!(offset & 3 == 0, "unaligned 32-bit write");
        debug_assert!(self.access == Access::ReadWrite, "write to read-only map");
        unsafe { core::ptr::write_volatile(self.ptr.add(offset) as *mut u32, value) }
    }

    /// Physical address of offset 0
    pub fn phys_addr(&self) -> u64 {
        self.phys_addr
    }

    /// Usable size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(unix)]
impl Drop for PhysMap {
    fn drop(&mut self) {
        unsafe {
            let base = self.ptr.sub(self.page_offset);
            libc::munmap(base as *mut libc::c_void, self.map_size);
        }
    }
}

// Stub for platforms without /dev/mem
#[cfg(not(unix))]
pub struct PhysMap {
    _private: (),
}

#[cfg(not(unix))]
impl PhysMap {
    pub fn new(_phys_addr: u64, _size: usize, _access: Access) -> Result<Self> {
        Err(PhysMapError::NotSupported(
            "physical memory mapping requires a Unix /dev/mem",
        ))
    }

    pub fn read32(&self, _offset: usize) -> u32 {
        0
    }
    pub fn write32(&self, _offset: usize, _value: u32) {}
    pub fn phys_addr(&self) -> u64 {
        0
    }
    pub fn size(&self) -> usize {
        0
    }
}

impl RegisterIo for PhysMap {
    fn read32(&self, offset: usize) -> u32 {
        PhysMap::read32(self, offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        PhysMap::write32(self, offset, value)
    }

    fn size(&self) -> usize {
        PhysMap::size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires root and an Ingenic SoC
    fn test_map_control_register() {
        let map = PhysMap::new(jzgpio_core::soc::CONTROL_REG, 4, Access::ReadOnly).unwrap();
        assert_eq!(map.size(), 4);
        let _ = map.read32(0);
    }

    #[test]
    fn test_open_error_message() {
        let err = PhysMapError::Open {
            path: DEV_MEM,
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("failed to open /dev/mem: "));
    }
}
