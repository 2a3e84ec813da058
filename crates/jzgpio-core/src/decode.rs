//! Pin functional state decoding
//!
//! The meaning of PAT1/PAT0 depends on INT and MSK:
//!
//! | INT | MSK | mode      | PAT1            | PAT0              |
//! |-----|-----|-----------|-----------------|-------------------|
//! | 1   | x   | interrupt | edge (1) / level (0) | rising/high (1) |
//! | 0   | 1   | GPIO      | input (1) / output (0) | data        |
//! | 0   | 0   | function  | function bit 1  | function bit 0    |
//!
//! In interrupt mode a set MSK bit disables the interrupt.

use core::fmt;

use crate::drive::drive_strength_to_ma;
use crate::regs::{Control, Port, Register, RegisterIo};

/// Raw register bits for one pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlBits {
    pub int: bool,
    pub msk: bool,
    pub pat1: bool,
    pub pat0: bool,
    /// Live input level
    pub inl: bool,
}

/// Interrupt trigger condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    RisingEdge,
    FallingEdge,
    HighLevel,
    LowLevel,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RisingEdge => "RISING_EDGE",
            Self::FallingEdge => "FALLING_EDGE",
            Self::HighLevel => "HIGH_LEVEL",
            Self::LowLevel => "LOW_LEVEL",
        }
    }
}

/// GPIO direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
        }
    }
}

/// Decoded functional state of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    Interrupt { trigger: Trigger, enabled: bool },
    Gpio { direction: Direction, value: bool },
    Function { index: u8 },
}

/// Decode the functional state from a pin's register bits
///
/// For an input pin the reported value is the live level only when PAT0 is
/// set; with PAT0 clear it reports 0. The dump has always shown input pins
/// this way and the output is kept as is.
pub fn decode(bits: ControlBits) -> PinState {
    if bits.int {
        let trigger = match (bits.pat1, bits.pat0) {
            (true, true) => Trigger::RisingEdge,
            (true, false) => Trigger::FallingEdge,
            (false, true) => Trigger::HighLevel,
            (false, false) => Trigger::LowLevel,
        };
        PinState::Interrupt {
            trigger,
            enabled: !bits.msk,
        }
    } else if bits.msk {
        if bits.pat1 {
            PinState::Gpio {
                direction: Direction::Input,
                value: bits.pat0 && bits.inl,
            }
        } else {
            PinState::Gpio {
                direction: Direction::Output,
                value: bits.pat0,
            }
        }
    } else {
        PinState::Function {
            index: (u8::from(bits.pat1) << 1) | u8::from(bits.pat0),
        }
    }
}

impl fmt::Display for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt { trigger, enabled } => write!(
                f,
                "INTERRUPT {} {}",
                trigger.as_str(),
                if *enabled { "ENABLED" } else { "DISABLED" }
            ),
            Self::Gpio { direction, value } => {
                write!(f, "GPIO {} {}", direction.as_str(), u8::from(*value))
            }
            Self::Function { index } => write!(f, "FUNCTION {}", index),
        }
    }
}

/// Functional state plus drive strength, one line of the dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinStatus {
    pub state: PinState,
    /// Drive strength code, 0-3
    pub drive: u8,
}

impl fmt::Display for PinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}ma", self.state, drive_strength_to_ma(self.drive))
    }
}

impl<R: RegisterIo + ?Sized> Port<'_, R> {
    /// Read the raw control bits of one pin
    pub fn control_bits(&self, pin: u8) -> ControlBits {
        ControlBits {
            int: self.control(Control::Int, pin),
            msk: self.control(Control::Msk, pin),
            pat1: self.control(Control::Pat1, pin),
            pat0: self.control(Control::Pat0, pin),
            inl: self.bit(Register::Inl, pin),
        }
    }

    /// Decode one pin from the live registers
    pub fn status(&self, pin: u8) -> PinStatus {
        PinStatus {
            state: decode(self.control_bits(pin)),
            drive: self.drive(pin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(int: u8, msk: u8, pat1: u8, pat0: u8, inl: u8) -> ControlBits {
        ControlBits {
            int: int != 0,
            msk: msk != 0,
            pat1: pat1 != 0,
            pat0: pat0 != 0,
            inl: inl != 0,
        }
    }

    fn interrupt(trigger: Trigger, enabled: bool) -> PinState {
        PinState::Interrupt { trigger, enabled }
    }

    fn gpio(direction: Direction, value: bool) -> PinState {
        PinState::Gpio { direction, value }
    }

    #[test]
    fn test_decode_truth_table() {
        use Direction::*;
        use Trigger::*;

        // (int, msk, pat1, pat0) -> state, with the input level low
        let table = [
            ((0, 0, 0, 0), PinState::Function { index: 0 }),
            ((0, 0, 0, 1), PinState::Function { index: 1 }),
            ((0, 0, 1, 0), PinState::Function { index: 2 }),
            ((0, 0, 1, 1), PinState::Function { index: 3 }),
            ((0, 1, 0, 0), gpio(Output, false)),
            ((0, 1, 0, 1), gpio(Output, true)),
            ((0, 1, 1, 0), gpio(Input, false)),
            ((0, 1, 1, 1), gpio(Input, false)),
            ((1, 0, 0, 0), interrupt(LowLevel, true)),
            ((1, 0, 0, 1), interrupt(HighLevel, true)),
            ((1, 0, 1, 0), interrupt(FallingEdge, true)),
            ((1, 0, 1, 1), interrupt(RisingEdge, true)),
            ((1, 1, 0, 0), interrupt(LowLevel, false)),
            ((1, 1, 0, 1), interrupt(HighLevel, false)),
            ((1, 1, 1, 0), interrupt(FallingEdge, false)),
            ((1, 1, 1, 1), interrupt(RisingEdge, false)),
        ];

        for ((int, msk, pat1, pat0), expected) in table {
            assert_eq!(
                decode(bits(int, msk, pat1, pat0, 0)),
                expected,
                "int={int} msk={msk} pat1={pat1} pat0={pat0}"
            );
        }
    }

    #[test]
    fn test_decode_input_level() {
        // PAT0 clear: input reads as 0 whatever the level
        assert_eq!(decode(bits(0, 1, 1, 0, 1)), gpio(Direction::Input, false));
        // PAT0 set: live level shows through
        assert_eq!(decode(bits(0, 1, 1, 1, 1)), gpio(Direction::Input, true));
        assert_eq!(decode(bits(0, 1, 1, 1, 0)), gpio(Direction::Input, false));
    }

    #[test]
    fn test_decode_output_ignores_level() {
        assert_eq!(decode(bits(0, 1, 0, 1, 0)), gpio(Direction::Output, true));
        assert_eq!(decode(bits(0, 1, 0, 0, 1)), gpio(Direction::Output, false));
    }

    #[test]
    fn test_render() {
        assert_eq!(
            decode(bits(1, 0, 1, 1, 0)).to_string(),
            "INTERRUPT RISING_EDGE ENABLED"
        );
        assert_eq!(
            decode(bits(1, 1, 0, 0, 0)).to_string(),
            "INTERRUPT LOW_LEVEL DISABLED"
        );
        assert_eq!(decode(bits(0, 1, 1, 1, 1)).to_string(), "GPIO INPUT 1");
        assert_eq!(decode(bits(0, 1, 0, 0, 0)).to_string(), "GPIO OUTPUT 0");
        assert_eq!(decode(bits(0, 0, 1, 0, 0)).to_string(), "FUNCTION 2");

        let status = PinStatus {
            state: PinState::Function { index: 1 },
            drive: 3,
        };
        assert_eq!(status.to_string(), "FUNCTION 1 12ma");
    }
}
