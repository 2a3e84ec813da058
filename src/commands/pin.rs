//! Single pin commands

use std::io::Write;

use jzgpio_core::{Command, Error, Gpio, Outcome, PinRef, RegisterIo};

use crate::error::AppError;

/// Apply `command` to the pin named by `designator`
///
/// `flip` does not return; the process runs until it is killed.
pub fn run<R, W>(
    gpio: &Gpio<'_, R>,
    designator: &str,
    command: Option<&str>,
    value: Option<&str>,
    out: &mut W,
) -> Result<(), AppError>
where
    R: RegisterIo + ?Sized,
    W: Write,
{
    let pin = PinRef::parse(designator)?;
    let name = command.ok_or(Error::MissingCommand)?;
    let cmd = Command::parse(name, value)?;
    let port = gpio.port(pin.port)?;

    log::debug!(
        "{} is bit {} of port block {:#x}",
        pin,
        pin.offset,
        gpio.config().port_address(pin.port)
    );

    if cmd == Command::Flip {
        writeln!(out, "Flipping... Ctrl-C to exit.")?;
        out.flush()?;
        port.flip(pin.offset);
    }

    if let Outcome::Level(high) = port.execute(pin.offset, cmd)? {
        writeln!(out, "{}", u8::from(high))?;
    }

    Ok(())
}
