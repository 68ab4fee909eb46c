//! The LS-8: an 8-bit teaching processor with eight registers, a downward
//! growing stack, and a single compare flag register.

mod alu;
mod clock;
mod cpu;
mod dis;
mod instr;
mod types;

pub use clock::{Clock, Pacing, DEFAULT_INTERVAL};
pub use cpu::Processor;
pub use dis::disassemble;
pub use instr::{AluOp, Instruction};
pub use types::*;
