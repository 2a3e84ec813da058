//! CLI argument parsing

use clap::Parser;
use jzgpio_core::command::COMMANDS;

/// Parse a string as a hex or decimal integer
fn parse_hex_u64(s: &str) -> Result<u64, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u64>().map_err(|e| format!("Invalid number: {}", e))
    }
}

fn parse_hex_usize(s: &str) -> Result<usize, String> {
    let value = parse_hex_u64(s)?;
    usize::try_from(value).map_err(|e| format!("Value out of range: {}", e))
}

/// Generate the command list and examples shown after the options
fn commands_help() -> String {
    let mut help = String::from("Commands:\n");
    for (name, description) in COMMANDS {
        help.push_str(&format!("  {:<26} {}\n", name, description));
    }
    help.push_str(
        "\n\
         Examples:\n  \
           jzgpio show\n  \
           jzgpio pc23 gpio_input\n  \
           jzgpio pc23 read\n  \
           jzgpio pa00 gpio_output\n  \
           jzgpio pa00 write 1\n  \
           jzgpio pb27 func 0  # Set PB27 as 24MHz clock output on X1000",
    );
    help
}

#[derive(Parser, Debug)]
#[command(name = "jzgpio")]
#[command(author, version, about = "GPIO diagnostic tool for Ingenic Tomahawk Series SoCs", long_about = None)]
#[command(override_usage = "jzgpio [OPTIONS] <show|PIN [COMMAND [VALUE]]>")]
#[command(after_help = commands_help())]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Physical base address of the GPIO controller (hex or decimal)
    #[arg(long, value_parser = parse_hex_u64, default_value = "0x10010000")]
    pub gpio_base: u64,

    /// Byte distance between port register blocks, overrides SoC detection
    #[arg(long, value_parser = parse_hex_usize)]
    pub port_stride: Option<usize>,

    /// Number of ports listed by `show`
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=7))]
    pub ports: u8,

    /// `show`, or a pin such as PC23 (P, port letter A-G, offset 00-31)
    #[arg(value_name = "show|PIN")]
    pub target: Option<String>,

    /// Command to apply to the pin
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Value for commands that take one
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["jzgpio"]).unwrap();
        assert!(cli.target.is_none());
        assert_eq!(cli.gpio_base, 0x1001_0000);
        assert_eq!(cli.ports, 3);
        assert_eq!(cli.port_stride, None);
    }

    #[test]
    fn test_pin_command() {
        let cli = Cli::try_parse_from(["jzgpio", "-v", "pa00", "write", "1"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.target.as_deref(), Some("pa00"));
        assert_eq!(cli.command.as_deref(), Some("write"));
        assert_eq!(cli.value.as_deref(), Some("1"));
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "jzgpio",
            "--port-stride",
            "0x1000",
            "--gpio-base",
            "268500992",
            "--ports",
            "7",
            "show",
        ])
        .unwrap();
        assert_eq!(cli.port_stride, Some(0x1000));
        assert_eq!(cli.gpio_base, 0x1001_0000);
        assert_eq!(cli.ports, 7);
        assert_eq!(cli.target.as_deref(), Some("show"));

        assert!(Cli::try_parse_from(["jzgpio", "--ports", "8", "show"]).is_err());
        assert!(Cli::try_parse_from(["jzgpio", "--port-stride", "0xZZ", "show"]).is_err());
    }

    #[test]
    fn test_help_lists_commands() {
        let help = commands_help();
        for name in ["inl", "int", "msk", "pat0", "pat1", "gpio_input", "func", "drive", "flip"] {
            assert!(help.contains(name), "{name}");
        }
    }
}
