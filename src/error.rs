//! Error type for loading and executing LS-8 programs

use crate::arch::ls8::PtrVal;
use std::{io, result};
use thiserror::Error;

/// Every way a run of the machine can fail.
///
/// All of these are fatal to the run they occur in. Errors raised while
/// executing an instruction halt the processor before they are handed back to
/// the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A fetch or instruction touched an address outside of memory.
    ///
    /// The address is signed so that underflowing address arithmetic can be
    /// reported as-is.
    #[error("memory access out of range at address {address} (capacity is {capacity} bytes)")]
    OutOfRangeMemoryAccess { address: i64, capacity: usize },

    /// The byte at `address` does not encode any instruction.
    #[error("unknown opcode {opcode:#010b} at address {address:#04x}")]
    UnknownOpcode { opcode: u8, address: PtrVal },

    /// DIV or MOD was executed with a zero divisor.
    #[error("division by zero in instruction at address {address:#04x}")]
    DivisionByZero { address: PtrVal },

    /// An operand byte that should name a register names none of R0-R7.
    #[error("invalid register operand {operand} in instruction at address {address:#04x}")]
    InvalidRegister { operand: u8, address: PtrVal },

    /// The program file contained a line that is not an 8-bit binary string.
    #[error("malformed program line {line}: {text:?}")]
    MalformedProgramLine { line: usize, text: String },

    /// The scheduler ran the configured number of cycles without the machine
    /// halting.
    #[error("program did not halt within {limit} cycles")]
    CycleLimitExceeded { limit: u64 },

    /// The machine configuration is unusable.
    #[error("invalid machine configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::MalformedProgramLine { .. } | Error::Config(_) | Error::Json(_) => {
                io::Error::new(io::ErrorKind::InvalidData, format!("{}", err))
            }
            _ => io::Error::new(io::ErrorKind::Other, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
