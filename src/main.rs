//! jzgpio - GPIO diagnostic tool for Ingenic SoCs
//!
//! Reads and modifies GPIO controller registers directly through
//! `/dev/mem`. The SoC is identified once at startup to pick the distance
//! between port register blocks, then either every pin is decoded (`show`)
//! or a single command is applied to one pin.
//!
//! Exit status: 0 on success (also after an unknown command or a rejected
//! drive strength, which are only reported), 1 when run without arguments,
//! 2 on any other error.

mod cli;
mod commands;
mod error;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::Cli;
use error::AppError;
use jzgpio_core::regs::GPIO_WINDOW;
use jzgpio_core::{Gpio, GpioConfig, SocInfo};
use jzgpio_physmap::{Access, PhysMap};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set log level based on verbosity
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let status = execute(&cli, &mut io::stdout().lock());
    ExitCode::from(status)
}

/// Run the parsed command line and return the process exit status
///
/// Without a target the usage text goes to `out` and the status is 1.
fn execute<W: Write>(cli: &Cli, out: &mut W) -> u8 {
    let result = match cli.target.as_deref() {
        None => usage(out).map(|()| 1),
        Some(target) => run(cli, target, out).map(|()| 0),
    };

    match result {
        Ok(status) => status,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

fn usage<W: Write>(out: &mut W) -> Result<(), AppError> {
    Cli::command().write_help(out)?;
    out.flush()?;
    Ok(())
}

/// Read the SoC identifier, falling back to defaults if it is unreadable
fn identify() -> SocInfo {
    let soc = match jzgpio_physmap::read_soc_id() {
        Ok(id) => SocInfo::from_id(id),
        Err(e) => {
            log::error!("Cannot identify SoC: {}", e);
            SocInfo::fallback()
        }
    };

    log::info!("SOC ID: 0x{:08X}", soc.id);
    log::info!("SOC Type: 0x{:04X}", soc.soc_type);
    soc
}

fn run<W: Write>(cli: &Cli, target: &str, out: &mut W) -> Result<(), AppError> {
    let soc = identify();
    let config = GpioConfig {
        base: cli.gpio_base,
        port_stride: cli.port_stride.unwrap_or(soc.port_stride),
    };
    log::debug!(
        "GPIO base {:#x}, port stride {:#x}",
        config.base,
        config.port_stride
    );

    let map = PhysMap::new(config.base, GPIO_WINDOW, Access::ReadWrite)?;
    let gpio = Gpio::new(&map, config)?;

    if target == "show" {
        commands::show::run(&gpio, cli.ports, out)
    } else {
        commands::pin::run(
            &gpio,
            target,
            cli.command.as_deref(),
            cli.value.as_deref(),
            out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_prints_usage() {
        let cli = Cli::try_parse_from(["jzgpio"]).unwrap();
        let mut out = Vec::new();

        assert_eq!(execute(&cli, &mut out), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Usage: jzgpio"));
        assert!(text.contains("Commands:"));
        assert!(text.contains("gpio_output"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_usage_write_failure_is_reported() {
        let cli = Cli::try_parse_from(["jzgpio"]).unwrap();
        assert_eq!(execute(&cli, &mut ClosedPipe), 2);
    }
}
