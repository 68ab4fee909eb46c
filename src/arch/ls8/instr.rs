//! Instruction enumeration and decoding

use crate::arch::ls8::{Condition, Data, PtrVal, Register, Value};
use crate::error::{Error, Result};
use crate::memory::Memory;

/// Every opcode the LS-8 understands.
///
/// The two most significant bits of each opcode give the number of operand
/// bytes that follow it; see `operand_count`.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ret = 0b0000_1001,
    Pra = 0b0100_0010,
    Prn = 0b0100_0011,
    Call = 0b0100_1000,
    Pop = 0b0100_1100,
    Push = 0b0100_1101,
    Jmp = 0b0101_0000,
    Jeq = 0b0101_0001,
    Jne = 0b0101_0010,
    Jlt = 0b0101_0011,
    Jgt = 0b0101_0100,
    Inc = 0b0111_1000,
    Dec = 0b0111_1001,
    Ld = 0b1001_1000,
    Ldi = 0b1001_1001,
    Cmp = 0b1010_0000,
    Add = 0b1010_1000,
    Sub = 0b1010_1001,
    Mul = 0b1010_1010,
    Div = 0b1010_1011,
    Mod = 0b1010_1100,
}

/// All opcodes, in encoding order.
pub static ALL_OPCODES: [Opcode; 22] = [
    Opcode::Hlt,
    Opcode::Ret,
    Opcode::Pra,
    Opcode::Prn,
    Opcode::Call,
    Opcode::Pop,
    Opcode::Push,
    Opcode::Jmp,
    Opcode::Jeq,
    Opcode::Jne,
    Opcode::Jlt,
    Opcode::Jgt,
    Opcode::Inc,
    Opcode::Dec,
    Opcode::Ld,
    Opcode::Ldi,
    Opcode::Cmp,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Mod,
];

lazy_static! {
    /// Byte-indexed decode table. Bytes that are not opcodes map to `None`.
    static ref DECODE_TABLE: [Option<Opcode>; 256] = {
        let mut table = [None; 256];

        for op in ALL_OPCODES.iter() {
            table[op.byte() as usize] = Some(*op);
        }

        table
    };
}

/// Number of operand bytes encoded in the top two bits of an opcode byte.
pub fn operand_count(opcode: Data) -> usize {
    (opcode >> 6) as usize
}

impl Opcode {
    pub fn decode(byte: Data) -> Option<Self> {
        DECODE_TABLE[byte as usize]
    }

    pub fn byte(self) -> Data {
        self as Data
    }

    pub fn operand_count(self) -> usize {
        operand_count(self.byte())
    }

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;

        match self {
            Hlt => "HLT",
            Ret => "RET",
            Pra => "PRA",
            Prn => "PRN",
            Call => "CALL",
            Pop => "POP",
            Push => "PUSH",
            Jmp => "JMP",
            Jeq => "JEQ",
            Jne => "JNE",
            Jlt => "JLT",
            Jgt => "JGT",
            Inc => "INC",
            Dec => "DEC",
            Ld => "LD",
            Ldi => "LDI",
            Cmp => "CMP",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Mod => "MOD",
        }
    }
}

/// Two-operand arithmetic evaluated by the ALU.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// A fully decoded instruction.
///
/// Register operands are validated during decoding; immediates are carried
/// as-is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `LD A,B`: copy register B into register A.
    Load(Register, Register),
    /// `LDI A,imm`
    LoadImmediate(Register, Value),
    /// `PRN A`: print a register as a decimal number.
    PrintNumber(Register),
    /// `PRA A`: print the character stored at the address held in A.
    PrintChar(Register),
    Alu(AluOp, Register, Register),
    Increment(Register),
    Decrement(Register),
    Compare(Register, Register),
    Push(Register),
    Pop(Register),
    Call(Register),
    Return,
    /// `JMP`, or one of the conditional jumps.
    Jump(Option<Condition>, Register),
    Halt,
}

impl Instruction {
    /// Decode an opcode and the two bytes that follow it.
    ///
    /// Operand bytes the instruction does not use are ignored.
    #[cfg(test)]
    pub fn decode(address: PtrVal, opcode: Data, operands: [Data; 2]) -> Result<Self> {
        Instruction::decode_partial(
            address,
            opcode,
            [Some(operands[0]), Some(operands[1])],
            usize::MAX,
        )
    }

    /// Decode an opcode whose operand bytes may run off the end of memory.
    ///
    /// `operands` holds whatever could be read from PC+1 and PC+2; `None`
    /// means the byte lies beyond `capacity`. That is only an error if the
    /// instruction actually needs the byte.
    fn decode_partial(
        address: PtrVal,
        opcode: Data,
        operands: [Option<Data>; 2],
        capacity: usize,
    ) -> Result<Self> {
        use Opcode::*;

        let op = Opcode::decode(opcode).ok_or(Error::UnknownOpcode { opcode, address })?;

        let operand = |n: usize| {
            operands[n].ok_or(Error::OutOfRangeMemoryAccess {
                address: (address + 1 + n) as i64,
                capacity,
            })
        };
        let reg = |n: usize| {
            let byte = operand(n)?;
            Register::from_operand(byte).ok_or(Error::InvalidRegister {
                operand: byte,
                address,
            })
        };

        Ok(match op {
            Hlt => Instruction::Halt,
            Ret => Instruction::Return,
            Pra => Instruction::PrintChar(reg(0)?),
            Prn => Instruction::PrintNumber(reg(0)?),
            Call => Instruction::Call(reg(0)?),
            Pop => Instruction::Pop(reg(0)?),
            Push => Instruction::Push(reg(0)?),
            Jmp => Instruction::Jump(None, reg(0)?),
            Jeq => Instruction::Jump(Some(Condition::Equal), reg(0)?),
            Jne => Instruction::Jump(Some(Condition::NotEqual), reg(0)?),
            Jlt => Instruction::Jump(Some(Condition::Less), reg(0)?),
            Jgt => Instruction::Jump(Some(Condition::Greater), reg(0)?),
            Inc => Instruction::Increment(reg(0)?),
            Dec => Instruction::Decrement(reg(0)?),
            Ld => Instruction::Load(reg(0)?, reg(1)?),
            Ldi => Instruction::LoadImmediate(reg(0)?, operand(1)?),
            Cmp => Instruction::Compare(reg(0)?, reg(1)?),
            Add => Instruction::Alu(AluOp::Add, reg(0)?, reg(1)?),
            Sub => Instruction::Alu(AluOp::Sub, reg(0)?, reg(1)?),
            Mul => Instruction::Alu(AluOp::Mul, reg(0)?, reg(1)?),
            Div => Instruction::Alu(AluOp::Div, reg(0)?, reg(1)?),
            Mod => Instruction::Alu(AluOp::Mod, reg(0)?, reg(1)?),
        })
    }

    /// Fetch and decode the instruction at `pc`.
    ///
    /// The opcode must be readable. The two bytes after it are read if they
    /// exist, and a byte past the end of memory is only an
    /// `OutOfRangeMemoryAccess` when the instruction uses it as an operand.
    /// `HLT` or `RET` in the last cell of memory therefore executes normally.
    pub fn fetch(pc: PtrVal, mem: &Memory) -> Result<Self> {
        let opcode = mem.read(pc)?;
        let operands = [mem.get(pc + 1), mem.get(pc + 2)];

        Instruction::decode_partial(pc, opcode, operands, mem.capacity())
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Load(_, _) => Opcode::Ld,
            Instruction::LoadImmediate(_, _) => Opcode::Ldi,
            Instruction::PrintNumber(_) => Opcode::Prn,
            Instruction::PrintChar(_) => Opcode::Pra,
            Instruction::Alu(AluOp::Add, _, _) => Opcode::Add,
            Instruction::Alu(AluOp::Sub, _, _) => Opcode::Sub,
            Instruction::Alu(AluOp::Mul, _, _) => Opcode::Mul,
            Instruction::Alu(AluOp::Div, _, _) => Opcode::Div,
            Instruction::Alu(AluOp::Mod, _, _) => Opcode::Mod,
            Instruction::Increment(_) => Opcode::Inc,
            Instruction::Decrement(_) => Opcode::Dec,
            Instruction::Compare(_, _) => Opcode::Cmp,
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop(_) => Opcode::Pop,
            Instruction::Call(_) => Opcode::Call,
            Instruction::Return => Opcode::Ret,
            Instruction::Jump(None, _) => Opcode::Jmp,
            Instruction::Jump(Some(Condition::Equal), _) => Opcode::Jeq,
            Instruction::Jump(Some(Condition::NotEqual), _) => Opcode::Jne,
            Instruction::Jump(Some(Condition::Less), _) => Opcode::Jlt,
            Instruction::Jump(Some(Condition::Greater), _) => Opcode::Jgt,
            Instruction::Halt => Opcode::Hlt,
        }
    }

    /// Size of the encoded instruction, in bytes.
    pub fn len(&self) -> usize {
        1 + self.opcode().operand_count()
    }

    /// Does this instruction only touch registers and flags?
    pub fn is_alu(&self) -> bool {
        matches!(
            self,
            Instruction::Alu(_, _, _)
                | Instruction::Increment(_)
                | Instruction::Decrement(_)
                | Instruction::Compare(_, _)
        )
    }

    /// Can this instruction take the program counter somewhere other than the
    /// next instruction?
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Instruction::Call(_) | Instruction::Return | Instruction::Jump(_, _) | Instruction::Halt
        )
    }

    /// Encode the instruction back into machine code.
    #[cfg(test)]
    pub fn encode(&self) -> Vec<Data> {
        let mut bytes = vec![self.opcode().byte()];

        match *self {
            Instruction::Load(a, b)
            | Instruction::Alu(_, a, b)
            | Instruction::Compare(a, b) => {
                bytes.push(a.into_operand());
                bytes.push(b.into_operand());
            }
            Instruction::LoadImmediate(a, imm) => {
                bytes.push(a.into_operand());
                bytes.push(imm);
            }
            Instruction::PrintNumber(a)
            | Instruction::PrintChar(a)
            | Instruction::Increment(a)
            | Instruction::Decrement(a)
            | Instruction::Push(a)
            | Instruction::Pop(a)
            | Instruction::Call(a)
            | Instruction::Jump(_, a) => bytes.push(a.into_operand()),
            Instruction::Return | Instruction::Halt => {}
        }

        bytes
    }
}
