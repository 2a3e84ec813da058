//! Per-pin commands
//!
//! Every command except `drive` is carried out with writes to the set/clear
//! alias registers only, so no other pin in the port is disturbed.

use crate::error::{Error, Result};
use crate::regs::{Control, Port, Register, RegisterIo};

/// A command applied to a single pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Report the live input level (`inl`, `read`)
    ReadLevel,
    /// Set or clear the interrupt enable bit
    Int(bool),
    /// Set or clear the mask bit
    Msk(bool),
    /// Set or clear pattern bit 0 (`pat0`, `write`)
    Pat0(bool),
    /// Set or clear pattern bit 1
    Pat1(bool),
    /// Toggle PAT0 forever
    Flip,
    /// Plain GPIO input: INT off, MSK on, PAT1 on
    GpioInput,
    /// Plain GPIO output: INT off, MSK on, PAT1 off
    GpioOutput,
    /// Alternate function select, INT off, MSK off, PAT1:PAT0 = index
    Func(u8),
    /// Drive strength code (validated when applied)
    Drive(u32),
}

/// Result of a command that completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input level read back
    Level(bool),
    /// Registers written
    Done,
}

/// Command names accepted by [`Command::parse`], with a short description
pub const COMMANDS: &[(&str, &str)] = &[
    ("inl", "Read input level"),
    ("int <0|1>", "Set interrupt"),
    ("msk <0|1>", "Set mask"),
    ("pat0 <0|1>", "Set pattern 0 (data)"),
    ("pat1 <0|1>", "Set pattern 1 (direction)"),
    ("gpio_input", "Shortcut of `int 0', `msk 1', `pat1 1'"),
    ("gpio_output", "Shortcut of `int 0', `msk 1', `pat1 0'"),
    ("read", "Shortcut of `inl'"),
    ("write <0|1>", "Shortcut of `pat0'"),
    ("func <0-3>", "Shortcut of `int 0', `msk 0', `pat1 <1>', `pat0 <0>'"),
    ("drive <0-3>", "Set drive strength (0-3 for 2ma, 4ma, 8ma, 12ma)"),
    ("flip", "Toggle pattern 0 until interrupted (Ctrl-C)"),
];

fn number(command: &'static str, value: Option<&str>) -> Result<u32> {
    let value = value.ok_or(Error::MissingValue(command))?;
    value.trim().parse().map_err(|_| Error::InvalidValue {
        command,
        value: value.to_string(),
    })
}

fn flag(command: &'static str, value: Option<&str>) -> Result<bool> {
    number(command, value).map(|v| v != 0)
}

impl Command {
    /// Parse a command token and its optional value argument
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self> {
        let cmd = match name {
            "inl" | "read" => Self::ReadLevel,
            "int" => Self::Int(flag("int", value)?),
            "msk" => Self::Msk(flag("msk", value)?),
            "pat0" => Self::Pat0(flag("pat0", value)?),
            "write" => Self::Pat0(flag("write", value)?),
            "pat1" => Self::Pat1(flag("pat1", value)?),
            "flip" => Self::Flip,
            "gpio_input" => Self::GpioInput,
            "gpio_output" => Self::GpioOutput,
            "func" => {
                let n = number("func", value)?;
                if n > 3 {
                    log::warn!("function {} out of range, using low bits {}", n, n & 0b11);
                }
                Self::Func((n & 0b11) as u8)
            }
            "drive" => Self::Drive(number("drive", value)?),
            _ => return Err(Error::UnknownCommand(name.to_string())),
        };
        Ok(cmd)
    }
}

impl<R: RegisterIo + ?Sized> Port<'_, R> {
    /// Apply a command to one pin
    ///
    /// [`Command::Flip`] never returns; see [`Port::flip`].
    pub fn execute(&self, pin: u8, cmd: Command) -> Result<Outcome> {
        log::debug!("P{}{:02}: {:?}", self.letter(), pin, cmd);

        match cmd {
            Command::ReadLevel => return Ok(Outcome::Level(self.bit(Register::Inl, pin))),
            Command::Int(on) => self.assign(Control::Int, pin, on),
            Command::Msk(on) => self.assign(Control::Msk, pin, on),
            Command::Pat0(on) => self.assign(Control::Pat0, pin, on),
            Command::Pat1(on) => self.assign(Control::Pat1, pin, on),
            Command::Flip => self.flip(pin),
            Command::GpioInput | Command::GpioOutput => {
                self.clear(Control::Int, pin);
                self.set(Control::Msk, pin);
                self.assign(Control::Pat1, pin, cmd == Command::GpioInput);
            }
            Command::Func(index) => {
                self.clear(Control::Int, pin);
                self.clear(Control::Msk, pin);
                self.assign(Control::Pat1, pin, index & 0b10 != 0);
                self.assign(Control::Pat0, pin, index & 0b01 != 0);
            }
            Command::Drive(code) => self.set_drive(pin, code)?,
        }

        Ok(Outcome::Done)
    }

    /// One PAT0 high/low cycle
    pub fn pulse(&self, pin: u8) {
        self.set(Control::Pat0, pin);
        self.clear(Control::Pat0, pin);
    }

    /// Toggle PAT0 as fast as the bus allows, for probing with a scope
    ///
    /// Runs until the process is killed. There is no delay between edges
    /// and no cancellation point.
    pub fn flip(&self, pin: u8) -> ! {
        loop {
            self.pulse(pin);
        }
    }
}
