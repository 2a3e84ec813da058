//! SoC identification
//!
//! The control register at [`CONTROL_REG`] holds a 32-bit identifier. Newer
//! parts keep the type code in bits 19:12; the older T10/T20 family marks
//! itself with `0001` in the top nibble and stores a 16-bit code below it.

/// Physical address of the SoC identification register
pub const CONTROL_REG: u64 = 0x1300_002C;

/// Port stride used by the T10/T20 family and anything unrecognised
pub const STRIDE_SMALL: usize = 0x100;
/// Port stride used by the T21/T30/T31 family
pub const STRIDE_LARGE: usize = 0x1000;

/// Identification result, computed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocInfo {
    /// Raw identifier as read from [`CONTROL_REG`]
    pub id: u32,
    /// Type code derived from the identifier
    pub soc_type: u32,
    /// Byte distance between successive port register blocks
    pub port_stride: usize,
}

impl SocInfo {
    /// Derive type code and stride from a raw identifier
    pub fn from_id(id: u32) -> Self {
        let soc_type = soc_type(id);
        Self {
            id,
            soc_type,
            port_stride: stride_for(soc_type),
        }
    }

    /// Result used when the identification register cannot be read
    pub fn fallback() -> Self {
        Self::from_id(0)
    }
}

/// Extract the SoC type code from a raw identifier
pub fn soc_type(id: u32) -> u32 {
    if id >> 28 != 1 {
        (id >> 12) & 0xFF
    } else {
        (id << 4) >> 16
    }
}

/// Select the port register stride for a SoC type code
pub fn stride_for(soc_type: u32) -> usize {
    match soc_type {
        // T10, T20
        0x5 | 0x2000 => STRIDE_SMALL,
        // T21, T30, T31
        0x21 | 0x30 | 0x31 => STRIDE_LARGE,
        _ => STRIDE_SMALL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_table() {
        assert_eq!(stride_for(5), 0x100);
        assert_eq!(stride_for(0x2000), 0x100);
        assert_eq!(stride_for(0x21), 0x1000);
        assert_eq!(stride_for(0x30), 0x1000);
        assert_eq!(stride_for(0x31), 0x1000);
        assert_eq!(stride_for(0x99), 0x100);
        assert_eq!(stride_for(0), 0x100);
    }

    #[test]
    fn test_soc_type_bits_19_12() {
        assert_eq!(soc_type(0x0003_1000), 0x31);
        assert_eq!(soc_type(0x2002_1000), 0x21);
        assert_eq!(soc_type(0xFFF3_0FFF), 0x30);
    }

    #[test]
    fn test_soc_type_legacy_encoding() {
        // Top nibble 0001 selects the middle 16 bits
        assert_eq!(soc_type(0x1000_5000), 0x0005);
        assert_eq!(soc_type(0x1200_0000), 0x2000);
        assert_eq!(soc_type(0x1ABC_DEF0), 0xABCD);
    }

    #[test]
    fn test_from_id() {
        let info = SocInfo::from_id(0x0003_1000);
        assert_eq!(info.soc_type, 0x31);
        assert_eq!(info.port_stride, STRIDE_LARGE);

        let info = SocInfo::from_id(0x1200_0000);
        assert_eq!(info.soc_type, 0x2000);
        assert_eq!(info.port_stride, STRIDE_SMALL);
    }

    #[test]
    fn test_fallback() {
        let info = SocInfo::fallback();
        assert_eq!(info.id, 0);
        assert_eq!(info.soc_type, 0);
        assert_eq!(info.port_stride, STRIDE_SMALL);
    }
}
