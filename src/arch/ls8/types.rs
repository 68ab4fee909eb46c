//! Types used in modeling the LS-8

use std::cmp::Ordering;
use std::{fmt, result, str};

/// The type which represents a value contained in an LS-8 register.
pub type Value = u8;

/// The type which represents data stored in memory as seen by the processor.
pub type Data = u8;

/// The type which represents an LS-8 memory address.
///
/// Registers can only name the first 256 addresses, but the program counter
/// is allowed to run past that so that falling off the end of memory is
/// reported rather than wrapped.
pub type PtrVal = usize;

/// The number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Where the stack pointer starts, just below the top of a stock 256-byte
/// memory.
pub const STACK_POINTER_INIT: Value = 0xF4;

/// Enumeration of all architectural LS-8 registers.
///
/// R7 doubles as the stack pointer. The program counter and flags are not
/// addressable by instructions and are not listed here.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    /// The register used as the stack pointer.
    pub const SP: Register = Register::R7;

    /// Decode a register operand byte.
    ///
    /// Operand bytes are `00000rrr`; anything with the upper five bits set
    /// does not name a register.
    pub fn from_operand(operand: Data) -> Option<Self> {
        use Register::*;

        match operand {
            0 => Some(R0),
            1 => Some(R1),
            2 => Some(R2),
            3 => Some(R3),
            4 => Some(R4),
            5 => Some(R5),
            6 => Some(R6),
            7 => Some(R7),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Encode the register as an operand byte.
    #[cfg(test)]
    pub fn into_operand(self) -> Data {
        self as Data
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.index())
    }
}

impl str::FromStr for Register {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SP" => Ok(Register::SP),
            upper => upper
                .strip_prefix('R')
                .and_then(|index| index.parse::<Data>().ok())
                .and_then(Register::from_operand)
                .ok_or(()),
        }
    }
}

/// The branch conditions conditional jumps can test.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    Equal,
    NotEqual,
    Greater,
    Less,
}

/// The result of the last compare.
///
/// At most one flag is ever set. Before the first CMP none are.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub equal: bool,
    pub greater: bool,
    pub less: bool,
}

impl Flags {
    pub const EQUAL_BIT: u8 = 0b001;
    pub const GREATER_BIT: u8 = 0b010;
    pub const LESS_BIT: u8 = 0b100;

    /// Compare two register values the way CMP does.
    pub fn compare(a: Value, b: Value) -> Self {
        match a.cmp(&b) {
            Ordering::Equal => Flags {
                equal: true,
                ..Flags::default()
            },
            Ordering::Greater => Flags {
                greater: true,
                ..Flags::default()
            },
            Ordering::Less => Flags {
                less: true,
                ..Flags::default()
            },
        }
    }

    /// Pack the flags into the FL register layout.
    pub fn bits(self) -> u8 {
        let mut bits = 0;

        if self.equal {
            bits |= Self::EQUAL_BIT;
        }
        if self.greater {
            bits |= Self::GREATER_BIT;
        }
        if self.less {
            bits |= Self::LESS_BIT;
        }

        bits
    }

    /// Determine if a conditional jump with the given condition is taken.
    pub fn satisfies(self, cond: Condition) -> bool {
        match cond {
            Condition::Equal => self.equal,
            Condition::NotEqual => !self.equal,
            Condition::Greater => self.greater,
            Condition::Less => self.less,
        }
    }
}

/// Execution state of the processor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}
