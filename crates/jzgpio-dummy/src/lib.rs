//! jzgpio-dummy - In-memory GPIO controller emulator for testing
//!
//! This crate provides a [`RegisterIo`] backed by plain memory that behaves
//! like the Ingenic GPIO controller where it matters to jzgpio:
//!
//! - writes to a set alias OR into the value register, writes to a clear
//!   alias AND-NOT out of it, and the alias registers themselves read as 0
//! - INL is read-only; it reflects PAT0 for pins configured as GPIO output
//!   and an externally driven level (see [`DummyGpio::set_input`]) otherwise

use std::cell::{Cell, RefCell};

use jzgpio_core::regs::{GPIO_WINDOW, PORT_COUNT};
use jzgpio_core::soc::STRIDE_SMALL;
use jzgpio_core::{GpioConfig, Register, RegisterIo};

/// Configuration for the dummy controller
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Byte distance between port blocks
    pub port_stride: usize,
    /// Size of the emulated window in bytes
    pub size: usize,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            port_stride: STRIDE_SMALL,
            size: GPIO_WINDOW,
        }
    }
}

impl DummyConfig {
    /// Matching addressing configuration for [`jzgpio_core::Gpio::new`]
    pub fn gpio_config(&self) -> GpioConfig {
        GpioConfig::new(self.port_stride)
    }
}

/// Emulated GPIO controller
pub struct DummyGpio {
    config: DummyConfig,
    mem: Vec<Cell<u32>>,
    /// Externally applied pin levels, one word per port
    inputs: [Cell<u32>; PORT_COUNT],
    log: RefCell<Vec<(usize, u32)>>,
}

impl DummyGpio {
    /// Create a controller with every register cleared
    pub fn new(config: DummyConfig) -> Self {
        let mem = (0..config.size / 4).map(|_| Cell::new(0)).collect();
        Self {
            config,
            mem,
            inputs: Default::default(),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Create a controller with the default 0x100 port stride
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Drive a pin's external input level
    pub fn set_input(&self, port: usize, pin: u8, high: bool) {
        let cell = &self.inputs[port];
        if high {
            cell.set(cell.get() | (1 << pin));
        } else {
            cell.set(cell.get() & !(1 << pin));
        }
    }

    /// Read a register's stored value, bypassing INL emulation
    pub fn peek(&self, port: usize, reg: Register) -> u32 {
        self.mem[self.word(port, reg)].get()
    }

    /// Store a register value directly, bypassing alias emulation
    pub fn poke(&self, port: usize, reg: Register, value: u32) {
        self.mem[self.word(port, reg)].set(value);
    }

    /// Every write performed through [`RegisterIo`], as (offset, value)
    pub fn write_log(&self) -> Vec<(usize, u32)> {
        self.log.borrow().clone()
    }

    /// Forget recorded writes
    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    fn word(&self, port: usize, reg: Register) -> usize {
        (port * self.config.port_stride + reg.offset()) / 4
    }

    /// Port and register an access lands on
    ///
    /// At the 0x100 stride a port block is larger than the stride, so DRVL
    /// and DRVH of port N resolve to PAT1 and PAT0 of port N+1. The
    /// controller aliases them the same way.
    fn locate(&self, offset: usize) -> (usize, Option<Register>) {
        let port = offset / self.config.port_stride;
        (port, Register::at(offset % self.config.port_stride))
    }

    fn input_level(&self, port: usize) -> u32 {
        let int = self.peek(port, Register::Int);
        let msk = self.peek(port, Register::Msk);
        let pat1 = self.peek(port, Register::Pat1);
        let pat0 = self.peek(port, Register::Pat0);
        let outputs = !int & msk & !pat1;
        let external = self.inputs.get(port).map_or(0, Cell::get);
        (pat0 & outputs) | (external & !outputs)
    }

    fn update(&self, port: usize, reg: Register, f: impl FnOnce(u32) -> u32) {
        let cell = &self.mem[self.word(port, reg)];
        cell.set(f(cell.get()));
    }
}

impl RegisterIo for DummyGpio {
    fn read32(&self, offset: usize) -> u32 {
        match self.locate(offset) {
            (port, Some(Register::Inl)) => self.input_level(port),
            (
                _,
                Some(
                    Register::IntS
                    | Register::IntC
                    | Register::MskS
                    | Register::MskC
                    | Register::Pat1S
                    | Register::Pat1C
                    | Register::Pat0S
                    | Register::Pat0C,
                ),
            ) => 0,
            _ => self.mem[offset / 4].get(),
        }
    }

    fn write32(&self, offset: usize, value: u32) {
        self.log.borrow_mut().push((offset, value));

        let (port, reg) = self.locate(offset);
        match reg {
            Some(Register::Inl) => log::warn!("write to read-only INL at {:#x} ignored", offset),
            Some(Register::IntS) => self.update(port, Register::Int, |v| v | value),
            Some(Register::IntC) => self.update(port, Register::Int, |v| v & !value),
            Some(Register::MskS) => self.update(port, Register::Msk, |v| v | value),
            Some(Register::MskC) => self.update(port, Register::Msk, |v| v & !value),
            Some(Register::Pat1S) => self.update(port, Register::Pat1, |v| v | value),
            Some(Register::Pat1C) => self.update(port, Register::Pat1, |v| v & !value),
            Some(Register::Pat0S) => self.update(port, Register::Pat0, |v| v | value),
            Some(Register::Pat0C) => self.update(port, Register::Pat0, |v| v & !value),
            _ => self.mem[offset / 4].set(value),
        }
    }

    fn size(&self) -> usize {
        self.config.size
    }
}
