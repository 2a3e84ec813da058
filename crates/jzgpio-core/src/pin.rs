//! Pin designator parsing
//!
//! A designator is exactly four ASCII characters: the prefix `P`, a port
//! letter `A`-`G` and a two digit decimal offset `00`-`31`. Case is ignored,
//! so `pc23` and `PC23` name the same pin.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::regs::{PINS_PER_PORT, PORT_COUNT};

/// A single pin: port index and bit offset within the port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinRef {
    /// Port index, 0 = A
    pub port: usize,
    /// Bit offset within the port, 0-31
    pub offset: u8,
}

impl PinRef {
    /// Create a pin reference, checking both ranges
    pub fn new(port: usize, offset: u8) -> Option<Self> {
        (port < PORT_COUNT && offset < PINS_PER_PORT).then_some(Self { port, offset })
    }

    /// Parse a designator such as `PC23`
    pub fn parse(designator: &str) -> Result<Self> {
        let invalid = || Error::InvalidDesignator(designator.to_string());

        let bytes = designator.as_bytes();
        if bytes.len() != 4 || !bytes[0].eq_ignore_ascii_case(&b'P') {
            return Err(invalid());
        }

        let letter = bytes[1].to_ascii_uppercase();
        if !(b'A'..=b'G').contains(&letter) {
            return Err(invalid());
        }

        let (tens, ones) = (bytes[2], bytes[3]);
        if !tens.is_ascii_digit() || !ones.is_ascii_digit() {
            return Err(invalid());
        }
        let offset = (tens - b'0') * 10 + (ones - b'0');

        Self::new(usize::from(letter - b'A'), offset).ok_or_else(invalid)
    }

    /// Port letter, `'A'` to `'G'`
    pub fn letter(&self) -> char {
        char::from(b'A' + self.port as u8)
    }

    /// Pin number counted across all ports (port * 32 + offset)
    pub fn global_index(&self) -> usize {
        self.port * usize::from(PINS_PER_PORT) + usize::from(self.offset)
    }

    /// Address of this pin's port block
    pub fn port_address(&self, base: u64, stride: usize) -> u64 {
        base + (self.port * stride) as u64
    }
}

impl FromStr for PinRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{:02}", self.letter(), self.offset)
    }
}

/// Resolve a designator to its port block address and bit offset
pub fn resolve(designator: &str, base: u64, stride: usize) -> Result<(u64, u8)> {
    let pin = PinRef::parse(designator)?;
    Ok((pin.port_address(base, stride), pin.offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_valid() {
        assert_eq!(resolve("PC23", 0, 0x100), Ok((0x200, 23)));
        assert_eq!(resolve("PA00", 0, 0x1000), Ok((0, 0)));
        assert_eq!(resolve("PG31", 0, 0x1000), Ok((0x6000, 31)));
        assert_eq!(resolve("pb27", 0x1001_0000, 0x100), Ok((0x1001_0100, 27)));
    }

    #[test]
    fn test_resolve_every_valid_pin() {
        for (port, letter) in ('A'..='G').enumerate() {
            for offset in 0..32u8 {
                let designator = format!("P{}{:02}", letter, offset);
                let (addr, off) = resolve(&designator, 0, 0x100).unwrap();
                assert_eq!(addr, (port * 0x100) as u64);
                assert_eq!(off, offset);
            }
        }
    }

    #[test]
    fn test_resolve_invalid() {
        for designator in [
            "PH00", "PA32", "PA99", "PA1", "PA001", "", "P@05", "PA-1", "PA 5", "PA1x", "XA05",
            "PÄ0",
        ] {
            assert_eq!(
                resolve(designator, 0, 0x100),
                Err(Error::InvalidDesignator(designator.to_string())),
                "{designator}"
            );
        }
    }

    #[test]
    fn test_pin_display() {
        let pin: PinRef = "pc07".parse().unwrap();
        assert_eq!(pin, PinRef { port: 2, offset: 7 });
        assert_eq!(pin.to_string(), "PC07");
        assert_eq!(pin.global_index(), 71);
    }
}
