//! Arithmetic evaluation

use crate::arch::ls8::AluOp;
use num_traits::{CheckedDiv, CheckedRem, One, WrappingAdd, WrappingSub, WrappingMul};

/// Evaluate `a OP b`.
///
/// Addition, subtraction and multiplication wrap at the width of `T`. Yields
/// `None` if a division or modulus has a zero divisor.
pub fn evaluate<T>(op: AluOp, a: T, b: T) -> Option<T>
where
    T: WrappingAdd + WrappingSub + WrappingMul + CheckedDiv + CheckedRem,
{
    match op {
        AluOp::Add => Some(a.wrapping_add(&b)),
        AluOp::Sub => Some(a.wrapping_sub(&b)),
        AluOp::Mul => Some(a.wrapping_mul(&b)),
        AluOp::Div => a.checked_div(&b),
        AluOp::Mod => a.checked_rem(&b),
    }
}

pub fn increment<T>(a: T) -> T
where
    T: WrappingAdd + One,
{
    a.wrapping_add(&T::one())
}

pub fn decrement<T>(a: T) -> T
where
    T: WrappingSub + One,
{
    a.wrapping_sub(&T::one())
}
