//! The LS-8 processor

use crate::arch::ls8::alu;
use crate::arch::ls8::{Flags, Instruction, PtrVal, Register, Status, Value, REGISTER_COUNT};
use crate::error::{Error, Result};
use crate::memory::Memory;
use std::convert::TryFrom;
use std::io::Write;

#[cfg(test)]
use crate::arch::ls8::{Data, STACK_POINTER_INIT};

/// What the program counter does once an instruction has executed.
enum Flow {
    /// Move on to the instruction after this one.
    Advance,
    /// Continue at the given address.
    Goto(PtrVal),
    Halt,
}

/// A single LS-8 processor and the memory it exclusively owns.
///
/// Console output from PRN and PRA goes to `W`.
///
/// Execution proceeds one `step` at a time. A step either completes in full
/// or, if the instruction faults, leaves registers, flags and memory exactly
/// as they were and halts the machine.
pub struct Processor<W> {
    memory: Memory,
    out: W,
    reg: [Value; REGISTER_COUNT],
    pc: PtrVal,
    flags: Flags,
    status: Status,
    cycles: u64,
}

impl<W> Processor<W>
where
    W: Write,
{
    /// Construct a processor whose stack starts at `stack_pointer`.
    pub fn with_stack_pointer(memory: Memory, out: W, stack_pointer: Value) -> Self {
        let mut reg = [0; REGISTER_COUNT];
        reg[Register::SP.index()] = stack_pointer;

        Processor {
            memory,
            out,
            reg,
            pc: 0,
            flags: Flags::default(),
            status: Status::Running,
            cycles: 0,
        }
    }

    pub fn register(&self, r: Register) -> Value {
        self.reg[r.index()]
    }

    pub fn registers(&self) -> &[Value; REGISTER_COUNT] {
        &self.reg
    }

    pub fn pc(&self) -> PtrVal {
        self.pc
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// Number of instructions completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one fetch-decode-execute cycle.
    ///
    /// Stepping a halted machine does nothing. Any error halts the machine
    /// before it is returned.
    pub fn step(&mut self) -> Result<Status> {
        if self.is_halted() {
            return Ok(Status::Halted);
        }

        match self.cycle() {
            Ok(status) => Ok(status),
            Err(e) => {
                tracing::error!("Processor halted at {:#04x}: {}", self.pc, e);
                self.status = Status::Halted;
                Err(e)
            }
        }
    }

    fn cycle(&mut self) -> Result<Status> {
        let instr = Instruction::fetch(self.pc, &self.memory)?;

        tracing::trace!("{:02X}: {} FL={:03b}", self.pc, instr, self.flags.bits());

        let flow = if instr.is_control() {
            self.control(instr)?
        } else if instr.is_alu() {
            self.alu(instr)?;
            Flow::Advance
        } else {
            self.transfer(instr)?;
            Flow::Advance
        };

        match flow {
            Flow::Advance => self.pc += instr.len(),
            Flow::Goto(target) => self.pc = target,
            Flow::Halt => self.status = Status::Halted,
        }
        self.cycles += 1;

        Ok(self.status)
    }

    fn push(&mut self, value: Value) -> Result<()> {
        let sp = self.reg[Register::SP.index()].wrapping_sub(1);

        self.memory.write(sp, value)?;
        self.reg[Register::SP.index()] = sp;

        Ok(())
    }

    fn pop(&mut self) -> Result<Value> {
        let sp = self.reg[Register::SP.index()];
        let value = self.memory.read(sp)?;

        self.reg[Register::SP.index()] = sp.wrapping_add(1);

        Ok(value)
    }

    /// Execute an instruction that only touches registers and flags.
    fn alu(&mut self, instr: Instruction) -> Result<()> {
        match instr {
            Instruction::Alu(op, a, b) => {
                let value = alu::evaluate(op, self.register(a), self.register(b))
                    .ok_or(Error::DivisionByZero { address: self.pc })?;
                self.reg[a.index()] = value;
            }
            Instruction::Increment(a) => self.reg[a.index()] = alu::increment(self.register(a)),
            Instruction::Decrement(a) => self.reg[a.index()] = alu::decrement(self.register(a)),
            Instruction::Compare(a, b) => {
                self.flags = Flags::compare(self.register(a), self.register(b))
            }
            _ => {}
        }

        Ok(())
    }

    /// Execute an instruction that may move the program counter.
    fn control(&mut self, instr: Instruction) -> Result<Flow> {
        Ok(match instr {
            Instruction::Call(a) => {
                let target = self.register(a) as PtrVal;
                let return_to = self.pc + instr.len();
                let return_to =
                    Value::try_from(return_to).map_err(|_| Error::OutOfRangeMemoryAccess {
                        address: return_to as i64,
                        capacity: self.memory.capacity(),
                    })?;

                self.push(return_to)?;
                Flow::Goto(target)
            }
            Instruction::Return => Flow::Goto(self.pop()? as PtrVal),
            Instruction::Jump(None, a) => Flow::Goto(self.register(a) as PtrVal),
            Instruction::Jump(Some(cond), a) if self.flags.satisfies(cond) => {
                Flow::Goto(self.register(a) as PtrVal)
            }
            Instruction::Halt => Flow::Halt,
            _ => Flow::Advance,
        })
    }

    /// Execute a load, store, stack or console instruction.
    fn transfer(&mut self, instr: Instruction) -> Result<()> {
        match instr {
            Instruction::Load(a, b) => self.reg[a.index()] = self.register(b),
            Instruction::LoadImmediate(a, imm) => self.reg[a.index()] = imm,
            Instruction::PrintNumber(a) => {
                writeln!(self.out, "{}", self.register(a))?;
                self.out.flush()?;
            }
            Instruction::PrintChar(a) => {
                let ch = char::from(self.memory.read(self.register(a))?);
                write!(self.out, "{}", ch)?;
                self.out.flush()?;
            }
            Instruction::Push(a) => self.push(self.register(a))?,
            Instruction::Pop(a) => self.reg[a.index()] = self.pop()?,
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
impl<W> Processor<W>
where
    W: Write,
{
    pub fn new(memory: Memory, out: W) -> Self {
        Processor::with_stack_pointer(memory, out, STACK_POINTER_INIT)
    }

    /// Store a value in memory; used to load programs.
    pub fn poke(&mut self, address: PtrVal, value: Data) -> Result<()> {
        self.memory.write(address, value)
    }

    pub fn peek(&self, address: PtrVal) -> Result<Data> {
        self.memory.read(address)
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}
