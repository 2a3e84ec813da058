//! jzgpio-physmap - /dev/mem access for jzgpio
//!
//! This crate maps physical register windows into the process and exposes
//! them through [`jzgpio_core::RegisterIo`]. It requires root privileges
//! (or CAP_SYS_RAWIO) and a kernel that allows `/dev/mem` access to the
//! peripheral range.
//!
//! Two mappings are made per invocation: a short-lived read-only one for
//! the SoC identification register ([`read_soc_id`]) and a read-write one
//! for the GPIO controller that lives until the process exits.

pub mod error;
pub mod physmap;

pub use error::{PhysMapError, Result};
pub use physmap::{Access, PhysMap};

use jzgpio_core::soc::CONTROL_REG;

/// Read the raw SoC identifier from the control register
///
/// The register page is mapped read-only for the duration of the call.
pub fn read_soc_id() -> Result<u32> {
    let map = PhysMap::new(CONTROL_REG, 4, Access::ReadOnly)?;
    let id = map.read32(0);
    log::debug!("SoC control register {:#010x} = {:#010x}", CONTROL_REG, id);
    Ok(id)
}
