//! Finite field GF(2) arithmetic.
//!
//! This module contains the struct [GF2], the scalar type used by the encoder
//! and by the sparse matrix-vector routines in [`sparse`](crate::sparse).
//! Addition is XOR and multiplication is AND.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use ndarray::Array1;
use num_traits::{One, Zero};

/// Finite field GF(2) element.
///
/// This struct represents an element of the finite field GF(2). The inner
/// value is always 0 or 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct GF2(u8);

impl GF2 {
    /// Converts an unpacked bit into a GF(2) element.
    ///
    /// Any nonzero value is mapped to one.
    pub fn from_bit(bit: u8) -> GF2 {
        GF2(u8::from(bit != 0))
    }

    /// Returns the element as an unpacked bit (0 or 1).
    pub fn bit(self) -> u8 {
        self.0
    }
}

impl From<bool> for GF2 {
    fn from(b: bool) -> GF2 {
        GF2(u8::from(b))
    }
}

impl From<GF2> for u8 {
    fn from(x: GF2) -> u8 {
        x.0
    }
}

impl Zero for GF2 {
    fn zero() -> GF2 {
        GF2(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for GF2 {
    fn one() -> GF2 {
        GF2(1)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl Add for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: GF2) -> GF2 {
        GF2(self.0 ^ rhs.0)
    }
}

impl Sub for GF2 {
    type Output = GF2;

    // -1 = 1 in GF(2)
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: GF2) -> GF2 {
        self + rhs
    }
}

impl Mul for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, rhs: GF2) -> GF2 {
        GF2(self.0 & rhs.0)
    }
}

impl Div for GF2 {
    type Output = GF2;

    fn div(self, rhs: GF2) -> GF2 {
        assert!(!rhs.is_zero(), "division by zero in GF(2)");
        self
    }
}

macro_rules! impl_assign_ops {
    ($($op:ident :: $method:ident => $assign:ident :: $assign_method:ident),*) => {
        $(
            impl $op<&GF2> for GF2 {
                type Output = GF2;
                fn $method(self, rhs: &GF2) -> GF2 {
                    self.$method(*rhs)
                }
            }

            impl $assign for GF2 {
                fn $assign_method(&mut self, rhs: GF2) {
                    *self = self.$method(rhs);
                }
            }
        )*
    };
}

impl_assign_ops!(
    Add::add => AddAssign::add_assign,
    Sub::sub => SubAssign::sub_assign,
    Mul::mul => MulAssign::mul_assign,
    Div::div => DivAssign::div_assign
);

impl Sum for GF2 {
    fn sum<I: Iterator<Item = GF2>>(iter: I) -> GF2 {
        iter.fold(GF2::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a GF2> for GF2 {
    fn sum<I: Iterator<Item = &'a GF2>>(iter: I) -> GF2 {
        iter.copied().sum()
    }
}


/// Converts a slice of unpacked bits into a GF(2) vector.
pub fn from_bits(bits: &[u8]) -> Array1<GF2> {
    bits.iter().map(|&b| GF2::from_bit(b)).collect()
}

/// Converts a sequence of GF(2) elements into unpacked bits.
pub fn to_bits<'a, I>(elements: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a GF2>,
{
    elements.into_iter().map(|x| x.bit()).collect()
}
