//! Implementations of processor architectures that can be emulated.
//!
//! Each architecture lives in a child module which provides its register
//! and value types, an `Instruction` type that can be fetched and decoded
//! from a `memory::Memory`, a `Processor` that executes one instruction per
//! `step`, and a disassembler.

pub mod ls8;
