//! Disassembly of LS-8 machine code

use crate::arch::ls8::{Data, Instruction, PtrVal};
use crate::memory::Memory;
use std::fmt;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();

        match self {
            Instruction::Load(a, b)
            | Instruction::Alu(_, a, b)
            | Instruction::Compare(a, b) => write!(f, "{} {},{}", mnemonic, a, b),
            Instruction::LoadImmediate(a, imm) => write!(f, "{} {},{}", mnemonic, a, imm),
            Instruction::PrintNumber(a)
            | Instruction::PrintChar(a)
            | Instruction::Increment(a)
            | Instruction::Decrement(a)
            | Instruction::Push(a)
            | Instruction::Pop(a)
            | Instruction::Call(a)
            | Instruction::Jump(_, a) => write!(f, "{} {}", mnemonic, a),
            Instruction::Return | Instruction::Halt => write!(f, "{}", mnemonic),
        }
    }
}

/// One line of a disassembly listing.
///
/// Bytes that do not decode to an instruction are listed as raw data, one
/// byte per line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disasm {
    address: PtrVal,
    bytes: Vec<Data>,
    instr: Option<Instruction>,
}

impl Disasm {
    pub fn address(&self) -> PtrVal {
        self.address
    }

    pub fn as_bytes(&self) -> &[Data] {
        &self.bytes
    }

    pub fn as_instr(&self) -> Option<&Instruction> {
        self.instr.as_ref()
    }
}

impl fmt::Display for Disasm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();

        match &self.instr {
            Some(instr) => write!(f, "{:02X}: {:<9} {}", self.address, hex.join(" "), instr),
            None => write!(f, "{:02X}: {:<9} .db {:#04x}", self.address, hex.join(" "), self.bytes[0]),
        }
    }
}

/// Disassemble the memory range `[start, end)`.
///
/// Decoding resumes directly after each instruction, so a listing that starts
/// in the middle of an instruction will be misaligned; start from an address
/// known to hold code.
pub fn disassemble(mem: &Memory, start: PtrVal, end: PtrVal) -> Vec<Disasm> {
    let end = end.min(mem.capacity());
    let mut listing = Vec::new();
    let mut pc = start;

    while pc < end {
        match Instruction::fetch(pc, mem) {
            Ok(instr) => {
                let len = instr.len();
                listing.push(Disasm {
                    address: pc,
                    bytes: mem.slice(pc, pc + len).to_vec(),
                    instr: Some(instr),
                });
                pc += len;
            }
            Err(_) => {
                listing.push(Disasm {
                    address: pc,
                    bytes: mem.slice(pc, pc + 1).to_vec(),
                    instr: None,
                });
                pc += 1;
            }
        }
    }

    listing
}
