//! GPIO port register layout and typed accessors
//!
//! One port occupies a fixed-layout block of 32-bit registers. Blocks for
//! ports A-G follow each other at a SoC-dependent stride from the GPIO base.
//! Callers never compute addresses: a [`Gpio`] hands out [`Port`] handles,
//! and a [`Port`] turns a [`Register`] plus a pin offset into an access on
//! the underlying [`RegisterIo`].

use crate::error::{Error, Result};

/// Physical base address of the GPIO controller
pub const GPIO_BASE: u64 = 0x1001_0000;
/// Size of the window mapped at [`GPIO_BASE`]
pub const GPIO_WINDOW: usize = 0x10000;
/// Number of ports addressable by a pin designator (A-G)
pub const PORT_COUNT: usize = 7;
/// Pins per port
pub const PINS_PER_PORT: u8 = 32;
/// Bytes of a port block that are accessed (up to and including DRVH)
///
/// On 0x100-stride parts this exceeds the stride: DRVL and DRVH of port N
/// land on the same words as PAT1 and PAT0 of port N+1. The hardware
/// decodes them that way too, so blocks are not assumed to be disjoint.
pub const PORT_BLOCK_SIZE: usize = Register::DrvH.offset() + 4;

/// Raw 32-bit register access relative to the start of a mapped window
///
/// Implementations must perform each call as exactly one volatile access;
/// the alias registers have side effects and must not be merged or elided.
pub trait RegisterIo {
    /// Read the register at `offset` bytes into the window
    fn read32(&self, offset: usize) -> u32;

    /// Write the register at `offset` bytes into the window
    fn write32(&self, offset: usize, value: u32);

    /// Size of the window in bytes
    fn size(&self) -> usize;
}

/// Registers of one port block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Input level (read-only)
    Inl,
    Int,
    IntS,
    IntC,
    Msk,
    MskS,
    MskC,
    Pat1,
    Pat1S,
    Pat1C,
    Pat0,
    Pat0S,
    Pat0C,
    /// Drive strength, pins 0-15, 2 bits each
    DrvL,
    /// Drive strength, pins 16-31, 2 bits each
    DrvH,
}

impl Register {
    /// Every register in block order
    pub const ALL: [Register; 15] = [
        Self::Inl,
        Self::Int,
        Self::IntS,
        Self::IntC,
        Self::Msk,
        Self::MskS,
        Self::MskC,
        Self::Pat1,
        Self::Pat1S,
        Self::Pat1C,
        Self::Pat0,
        Self::Pat0S,
        Self::Pat0C,
        Self::DrvL,
        Self::DrvH,
    ];

    /// Register at a byte offset within the port block
    pub fn at(offset: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|reg| reg.offset() == offset)
    }

    /// Byte offset from the start of the port block
    pub const fn offset(self) -> usize {
        match self {
            Self::Inl => 0x00,
            Self::Int => 0x10,
            Self::IntS => 0x14,
            Self::IntC => 0x18,
            Self::Msk => 0x20,
            Self::MskS => 0x24,
            Self::MskC => 0x28,
            Self::Pat1 => 0x30,
            Self::Pat1S => 0x34,
            Self::Pat1C => 0x38,
            Self::Pat0 => 0x40,
            Self::Pat0S => 0x44,
            Self::Pat0C => 0x48,
            Self::DrvL => 0x130,
            Self::DrvH => 0x140,
        }
    }

    /// Register name as it appears in the programming manual
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inl => "INL",
            Self::Int => "INT",
            Self::IntS => "INTS",
            Self::IntC => "INTC",
            Self::Msk => "MSK",
            Self::MskS => "MSKS",
            Self::MskC => "MSKC",
            Self::Pat1 => "PAT1",
            Self::Pat1S => "PAT1S",
            Self::Pat1C => "PAT1C",
            Self::Pat0 => "PAT0",
            Self::Pat0S => "PAT0S",
            Self::Pat0C => "PAT0C",
            Self::DrvL => "DRVL",
            Self::DrvH => "DRVH",
        }
    }
}

/// Control bits that come with set/clear aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Int,
    Msk,
    Pat1,
    Pat0,
}

impl Control {
    /// Value register
    pub const fn value(self) -> Register {
        match self {
            Self::Int => Register::Int,
            Self::Msk => Register::Msk,
            Self::Pat1 => Register::Pat1,
            Self::Pat0 => Register::Pat0,
        }
    }

    /// Set alias
    pub const fn set(self) -> Register {
        match self {
            Self::Int => Register::IntS,
            Self::Msk => Register::MskS,
            Self::Pat1 => Register::Pat1S,
            Self::Pat0 => Register::Pat0S,
        }
    }

    /// Clear alias
    pub const fn clear(self) -> Register {
        match self {
            Self::Int => Register::IntC,
            Self::Msk => Register::MskC,
            Self::Pat1 => Register::Pat1C,
            Self::Pat0 => Register::Pat0C,
        }
    }
}

/// Addressing parameters fixed for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioConfig {
    /// Physical address of port A's register block
    pub base: u64,
    /// Byte distance between successive port blocks
    pub port_stride: usize,
}

impl GpioConfig {
    /// Configuration at the standard base address
    pub fn new(port_stride: usize) -> Self {
        Self {
            base: GPIO_BASE,
            port_stride,
        }
    }

    /// Physical address of a port's register block
    ///
    /// Only meaningful for a configuration accepted by [`Gpio::new`].
    pub fn port_address(&self, port: usize) -> u64 {
        self.base.wrapping_add((port as u64).wrapping_mul(self.port_stride as u64))
    }

    /// Window size needed to reach every register of every port
    ///
    /// `None` if the size does not fit in a `usize`. Blocks may overlap,
    /// see [`PORT_BLOCK_SIZE`].
    pub fn window_needed(&self) -> Option<usize> {
        (PORT_COUNT - 1)
            .checked_mul(self.port_stride)?
            .checked_add(PORT_BLOCK_SIZE)
    }
}

/// The GPIO controller as seen through a mapped register window
pub struct Gpio<'a, R: RegisterIo + ?Sized> {
    io: &'a R,
    config: GpioConfig,
}

impl<'a, R: RegisterIo + ?Sized> Gpio<'a, R> {
    /// Wrap a register window mapped at `config.base`
    ///
    /// Fails if the window cannot hold all seven port blocks at the
    /// configured stride.
    pub fn new(io: &'a R, config: GpioConfig) -> Result<Self> {
        let needed = config.window_needed().unwrap_or(usize::MAX);
        if needed > io.size() {
            return Err(Error::MappingTooSmall {
                needed,
                size: io.size(),
            });
        }
        Ok(Self { io, config })
    }

    /// Addressing parameters
    pub fn config(&self) -> &GpioConfig {
        &self.config
    }

    /// Handle for port `index` (0 = A)
    pub fn port(&self, index: usize) -> Result<Port<'a, R>> {
        if index >= PORT_COUNT {
            return Err(Error::PortOutOfRange(index));
        }
        Ok(Port {
            io: self.io,
            index,
            offset: index * self.config.port_stride,
        })
    }
}

/// One port's register block
pub struct Port<'a, R: RegisterIo + ?Sized> {
    io: &'a R,
    index: usize,
    offset: usize,
}

impl<'a, R: RegisterIo + ?Sized> Port<'a, R> {
    /// Port index (0 = A)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Port letter, `'A'` to `'G'`
    pub fn letter(&self) -> char {
        char::from(b'A' + self.index as u8)
    }

    /// Read a whole register
    pub fn read(&self, reg: Register) -> u32 {
        self.io.read32(self.offset + reg.offset())
    }

    /// Write a whole register
    pub fn write(&self, reg: Register, value: u32) {
        log::trace!("P{} {} <- {:#010x}", self.letter(), reg.name(), value);
        self.io.write32(self.offset + reg.offset(), value);
    }

    /// Read one pin's bit of a register
    pub fn bit(&self, reg: Register, pin: u8) -> bool {
        (self.read(reg) >> pin) & 1 != 0
    }

    /// Set one pin's control bit through the set alias
    pub fn set(&self, control: Control, pin: u8) {
        self.write(control.set(), 1 << pin);
    }

    /// Clear one pin's control bit through the clear alias
    pub fn clear(&self, control: Control, pin: u8) {
        self.write(control.clear(), 1 << pin);
    }

    /// Set or clear one pin's control bit
    pub fn assign(&self, control: Control, pin: u8, on: bool) {
        if on {
            self.set(control, pin);
        } else {
            self.clear(control, pin);
        }
    }

    /// Read one pin's control bit from the value register
    pub fn control(&self, control: Control, pin: u8) -> bool {
        self.bit(control.value(), pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Plain memory with a write log, no alias behaviour
    struct Scratch {
        mem: RefCell<Vec<u32>>,
        writes: RefCell<Vec<(usize, u32)>>,
    }

    impl Scratch {
        fn new(size: usize) -> Self {
            Self {
                mem: RefCell::new(vec![0; size / 4]),
                writes: RefCell::new(Vec::new()),
            }
        }
    }

    impl RegisterIo for Scratch {
        fn read32(&self, offset: usize) -> u32 {
            self.mem.borrow()[offset / 4]
        }

        fn write32(&self, offset: usize, value: u32) {
            self.mem.borrow_mut()[offset / 4] = value;
            self.writes.borrow_mut().push((offset, value));
        }

        fn size(&self) -> usize {
            self.mem.borrow().len() * 4
        }
    }

    #[test]
    fn test_layout_offsets() {
        assert_eq!(Register::Inl.offset(), 0x00);
        assert_eq!(Register::IntC.offset(), 0x18);
        assert_eq!(Register::MskS.offset(), 0x24);
        assert_eq!(Register::Pat1.offset(), 0x30);
        assert_eq!(Register::Pat0C.offset(), 0x48);
        assert_eq!(Register::DrvL.offset(), 0x130);
        assert_eq!(Register::DrvH.offset(), 0x140);
        assert_eq!(PORT_BLOCK_SIZE, 0x144);

        for reg in Register::ALL {
            assert_eq!(Register::at(reg.offset()), Some(reg));
        }
        assert_eq!(Register::at(0x04), None);
    }

    #[test]
    fn test_port_addressing() {
        let io = Scratch::new(GPIO_WINDOW);
        let gpio = Gpio::new(&io, GpioConfig::new(0x1000)).unwrap();
        let port = gpio.port(2).unwrap();
        assert_eq!(port.letter(), 'C');

        port.set(Control::Pat0, 5);
        assert_eq!(io.writes.borrow()[0], (0x2000 + 0x44, 1 << 5));

        port.clear(Control::Int, 31);
        assert_eq!(io.writes.borrow()[1], (0x2000 + 0x18, 1 << 31));

        assert_eq!(gpio.config().port_address(2), GPIO_BASE + 0x2000);
    }

    #[test]
    fn test_port_out_of_range() {
        let io = Scratch::new(GPIO_WINDOW);
        let gpio = Gpio::new(&io, GpioConfig::new(0x100)).unwrap();
        assert!(gpio.port(6).is_ok());
        assert_eq!(gpio.port(7).err(), Some(Error::PortOutOfRange(7)));
    }

    #[test]
    fn test_window_too_small() {
        let io = Scratch::new(0x1000);
        let err = Gpio::new(&io, GpioConfig::new(0x1000)).err();
        assert_eq!(
            err,
            Some(Error::MappingTooSmall {
                needed: 0x6144,
                size: 0x1000
            })
        );
        assert!(Gpio::new(&io, GpioConfig::new(0x100)).is_ok());
    }

    #[test]
    fn test_huge_stride_rejected() {
        let io = Scratch::new(GPIO_WINDOW);
        for stride in [usize::MAX, usize::MAX / 6 + 1, 0x2AAA_AAAA_AAAA_AAAB_u64 as usize] {
            let config = GpioConfig::new(stride);
            let err = Gpio::new(&io, config).err();
            assert!(
                matches!(err, Some(Error::MappingTooSmall { size: GPIO_WINDOW, .. })),
                "stride {stride:#x}"
            );
        }
        assert_eq!(GpioConfig::new(usize::MAX).window_needed(), None);
        assert_eq!(GpioConfig::new(0x1000).window_needed(), Some(0x6144));
    }
}
