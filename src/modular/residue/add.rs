//! Residue addition.

use super::Residue;
use crate::{Error, Result, U256};
use core::ops::{Add, AddAssign};
use subtle::{Choice, ConditionallySelectable};

impl<'m> Residue<'m> {
    /// Compute `self + rhs`.
    ///
    /// Returns [`Error::ModulusMismatch`] when the operands are bound to
    /// different moduli.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        if !self.same_modulus(rhs) {
            return Err(Error::ModulusMismatch);
        }

        Ok(self.add_inner(rhs))
    }

    /// Double this residue.
    pub fn double(&self) -> Self {
        self.add_inner(self)
    }

    pub(crate) fn add_inner(&self, rhs: &Self) -> Self {
        let (sum, carry) = self.value.carrying_add(&rhs.value, 0);

        if carry == 0 {
            // The class is preserved even when the sum exceeds m.
            return self.with_value(sum);
        }

        // The 257-bit sum wrapped past 2^256. Subtracting the bracketing
        // multiples of m yields two candidates; exactly one of them is the
        // wrapped sum moved back into range. m_floor applies when the
        // subtraction borrows (restoring the lost 2^256), m_ceil otherwise.
        let (lo, borrow) = sum.borrowing_sub(self.modulus.m_floor(), 0);
        let (hi, _) = sum.borrowing_sub(self.modulus.m_ceil(), 0);

        let value = U256::conditional_select(&hi, &lo, Choice::from(borrow as u8));
        self.with_value(value)
    }
}

impl<'m> Add<&Residue<'m>> for &Residue<'m> {
    type Output = Residue<'m>;

    fn add(self, rhs: &Residue<'m>) -> Residue<'m> {
        self.checked_add(rhs).expect("incompatible moduli")
    }
}

impl<'m> Add<Residue<'m>> for &Residue<'m> {
    type Output = Residue<'m>;

    #[allow(clippy::op_ref)]
    fn add(self, rhs: Residue<'m>) -> Residue<'m> {
        self + &rhs
    }
}

impl<'m> Add<&Residue<'m>> for Residue<'m> {
    type Output = Residue<'m>;

    #[allow(clippy::op_ref)]
    fn add(self, rhs: &Residue<'m>) -> Residue<'m> {
        &self + rhs
    }
}

impl<'m> Add<Residue<'m>> for Residue<'m> {
    type Output = Residue<'m>;

    fn add(self, rhs: Residue<'m>) -> Residue<'m> {
        &self + &rhs
    }
}

impl<'m> AddAssign<&Residue<'m>> for Residue<'m> {
    fn add_assign(&mut self, rhs: &Residue<'m>) {
        *self = *self + rhs;
    }
}

impl<'m> AddAssign<Residue<'m>> for Residue<'m> {
    fn add_assign(&mut self, rhs: Residue<'m>) {
        *self += &rhs;
    }
}
