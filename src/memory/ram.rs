//! A flat, bounds-checked store of memory cells.

use crate::arch::ls8::{Data, PtrVal};
use crate::error::{Error, Result};
use num::ToPrimitive;

/// Number of memory cells in a stock LS-8.
pub const DEFAULT_CAPACITY: usize = 256;

/// Models the machine's RAM.
///
/// Memory is a fixed number of byte-wide cells addressed from zero. It never
/// grows, and it never wraps: any access outside `[0, capacity)` is an
/// `OutOfRangeMemoryAccess` error and leaves every cell untouched.
///
/// Accessors take any primitive integer as an address so that callers doing
/// signed or oversized address arithmetic get an error instead of a silently
/// truncated address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Data>,
}

impl Memory {
    /// Construct zero-filled memory with the given number of cells.
    pub fn new(capacity: usize) -> Self {
        Memory {
            cells: vec![0; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Resolve an address into a cell index, if it lies within memory.
    fn decode_addr<A>(&self, address: A) -> Result<usize>
    where
        A: ToPrimitive + Copy,
    {
        match address.to_usize() {
            Some(index) if index < self.cells.len() => Ok(index),
            _ => Err(Error::OutOfRangeMemoryAccess {
                address: address.to_i64().unwrap_or(i64::MAX),
                capacity: self.cells.len(),
            }),
        }
    }

    pub fn read<A>(&self, address: A) -> Result<Data>
    where
        A: ToPrimitive + Copy,
    {
        Ok(self.cells[self.decode_addr(address)?])
    }

    pub fn write<A>(&mut self, address: A, value: Data) -> Result<()>
    where
        A: ToPrimitive + Copy,
    {
        let index = self.decode_addr(address)?;
        self.cells[index] = value;

        Ok(())
    }

    /// Read a cell, yielding `None` instead of an error if it does not exist.
    pub fn get<A>(&self, address: A) -> Option<Data>
    where
        A: ToPrimitive + Copy,
    {
        self.decode_addr(address).ok().map(|index| self.cells[index])
    }

    /// Copy a run of bytes into memory starting at `base`.
    ///
    /// The whole run is checked against the end of memory before anything is
    /// written, so a program that does not fit leaves memory unchanged.
    pub fn load(&mut self, base: PtrVal, bytes: &[Data]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        let last = base
            .checked_add(bytes.len() - 1)
            .ok_or(Error::OutOfRangeMemoryAccess {
                address: i64::MAX,
                capacity: self.cells.len(),
            })?;
        self.decode_addr(base)?;
        self.decode_addr(last)?;

        self.cells[base..=last].copy_from_slice(bytes);

        Ok(())
    }

    /// View a range of memory, clamped to the end of memory.
    pub fn slice(&self, start: PtrVal, end: PtrVal) -> &[Data] {
        let end = end.min(self.cells.len());
        let start = start.min(end);

        &self.cells[start..end]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new(DEFAULT_CAPACITY)
    }
}
