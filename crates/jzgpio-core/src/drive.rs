//! Drive strength fields
//!
//! Every pin has a 2-bit drive strength code. Pins 0-15 live in DRVL and
//! pins 16-31 in DRVH, each at bit `(pin % 16) * 2`. These registers have no
//! set/clear aliases, so updates are read-modify-write.

use crate::error::{Error, Result};
use crate::regs::{Port, Register, RegisterIo};

/// Highest valid drive strength code
pub const DRIVE_MAX: u8 = 3;

/// Output current for a drive strength code, in milliamps
///
/// Returns 0 for codes outside 0-3.
pub fn drive_strength_to_ma(code: u8) -> u8 {
    match code {
        0 => 2,
        1 => 4,
        2 => 8,
        3 => 12,
        _ => 0,
    }
}

/// Register and bit shift holding a pin's drive field
fn drive_field(pin: u8) -> (Register, u32) {
    if pin < 16 {
        (Register::DrvL, u32::from(pin) * 2)
    } else {
        (Register::DrvH, u32::from(pin - 16) * 2)
    }
}

impl<R: RegisterIo + ?Sized> Port<'_, R> {
    /// Drive strength code of one pin
    pub fn drive(&self, pin: u8) -> u8 {
        let (reg, shift) = drive_field(pin);
        ((self.read(reg) >> shift) & 0b11) as u8
    }

    /// Set one pin's drive strength code
    ///
    /// Codes above 3 are rejected and the register is left alone.
    pub fn set_drive(&self, pin: u8, code: u32) -> Result<()> {
        if code > u32::from(DRIVE_MAX) {
            return Err(Error::InvalidDriveStrength(code));
        }

        let (reg, shift) = drive_field(pin);
        let value = (self.read(reg) & !(0b11 << shift)) | (code << shift);
        self.write(reg, value);
        Ok(())
    }
}
