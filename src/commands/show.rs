//! `show`: decoded state of every pin

use std::io::Write;

use jzgpio_core::regs::PINS_PER_PORT;
use jzgpio_core::{Gpio, PinRef, RegisterIo};

use crate::error::AppError;

/// Print the decoded state of every pin on the first `ports` ports
pub fn run<R, W>(gpio: &Gpio<'_, R>, ports: u8, out: &mut W) -> Result<(), AppError>
where
    R: RegisterIo + ?Sized,
    W: Write,
{
    for index in 0..usize::from(ports) {
        let port = gpio.port(index)?;

        writeln!(out, "Port {}", port.letter())?;
        writeln!(out, "================")?;

        for offset in 0..PINS_PER_PORT {
            let pin = PinRef {
                port: index,
                offset,
            };
            writeln!(
                out,
                "{} [{:02}]: {}",
                pin,
                pin.global_index(),
                port.status(offset)
            )?;
        }

        writeln!(out)?;
    }

    Ok(())
}
