//! jzgpio-core - GPIO controller register semantics for Ingenic SoCs
//!
//! This crate knows how the Ingenic GPIO controller encodes pin state in its
//! register set, and nothing about how those registers are reached. Hardware
//! access goes through the [`RegisterIo`] trait, which is implemented by
//! `jzgpio-physmap` for `/dev/mem` and by `jzgpio-dummy` for tests.
//!
//! # Overview
//!
//! - [`soc`] - SoC type decoding and per-port register stride selection
//! - [`regs`] - register layout of one port block and the typed accessors
//! - [`pin`] - pin designator parsing (`PC23` style)
//! - [`decode`] - functional state decoding from INT/MSK/PAT1/PAT0
//! - [`drive`] - drive strength fields
//! - [`command`] - per-pin commands and their register sequences
//!
//! # Register model
//!
//! Each control register (INT, MSK, PAT1, PAT0) has a set alias and a clear
//! alias. Writing a 1 to a bit of the alias sets or clears only that bit in
//! the value register, so every mutation here is a single write with no
//! read-modify-write. Drive strength registers have no aliases and are the
//! one exception.

pub mod command;
pub mod decode;
pub mod drive;
pub mod error;
pub mod pin;
pub mod regs;
pub mod soc;

pub use command::{Command, Outcome};
pub use decode::{ControlBits, Direction, PinState, PinStatus, Trigger};
pub use drive::drive_strength_to_ma;
pub use error::{Error, Result};
pub use pin::{resolve, PinRef};
pub use regs::{Control, Gpio, GpioConfig, Port, Register, RegisterIo};
pub use soc::{stride_for, SocInfo};
