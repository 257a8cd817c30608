//! Residue multiplication and squaring.

use super::super::reduction::barrett_reduce_wide;
use super::Residue;
use crate::{
    primitives::{carrying_add, carrying_mul_add, widening_mul},
    word::Word,
    Error, Result,
};
use core::ops::{Mul, MulAssign};
use core::ptr;

impl Residue<'_> {
    /// Compute `self * rhs`.
    ///
    /// Returns [`Error::ModulusMismatch`] when the operands are bound to
    /// different moduli. When both operands are the same object, this
    /// dispatches to [`Residue::square`].
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self> {
        if ptr::eq(self, rhs) {
            return Ok(self.square());
        }

        if !self.same_modulus(rhs) {
            return Err(Error::ModulusMismatch);
        }

        Ok(self.mul_inner(rhs))
    }

    pub(crate) fn mul_inner(&self, rhs: &Self) -> Self {
        let a = self.as_uint().as_words();
        let b = rhs.as_uint().as_words();

        // schoolbook 256x256 -> 512
        let mut product = [0 as Word; 8];

        for i in 0..4 {
            let mut carry = 0;
            for j in 0..4 {
                (product[i + j], carry) = carrying_mul_add(a[i], b[j], product[i + j], carry);
            }
            product[i + 4] = carry;
        }

        self.with_value(barrett_reduce_wide(self.modulus(), &product))
    }

    /// Square this residue.
    ///
    /// Uses the standard shortcut: accumulate the off-diagonal
    /// half-products once, double them, then add the diagonal squares.
    pub fn square(&self) -> Self {
        let a = self.as_uint().as_words();

        let mut product = [0 as Word; 8];

        for i in 0..4 {
            let mut carry = 0;
            for j in (i + 1)..4 {
                (product[i + j], carry) = carrying_mul_add(a[i], a[j], product[i + j], carry);
            }
            product[i + 4] = carry;
        }

        let mut carry = 0;
        for word in product.iter_mut() {
            (*word, carry) = carrying_add(*word, *word, carry);
        }

        let mut carry = 0;
        for i in 0..4 {
            let (lo, hi) = widening_mul(a[i], a[i]);
            let (word, c) = carrying_add(product[2 * i], lo, carry);
            product[2 * i] = word;
            (product[2 * i + 1], carry) = carrying_add(product[2 * i + 1], hi, c);
        }

        self.with_value(barrett_reduce_wide(self.modulus(), &product))
    }
}

impl<'m> Mul<&Residue<'m>> for &Residue<'m> {
    type Output = Residue<'m>;

    fn mul(self, rhs: &Residue<'m>) -> Residue<'m> {
        self.checked_mul(rhs).expect("incompatible moduli")
    }
}

impl<'m> Mul<Residue<'m>> for &Residue<'m> {
    type Output = Residue<'m>;

    #[allow(clippy::op_ref)]
    fn mul(self, rhs: Residue<'m>) -> Residue<'m> {
        self * &rhs
    }
}

impl<'m> Mul<&Residue<'m>> for Residue<'m> {
    type Output = Residue<'m>;

    #[allow(clippy::op_ref)]
    fn mul(self, rhs: &Residue<'m>) -> Residue<'m> {
        &self * rhs
    }
}

impl<'m> Mul<Residue<'m>> for Residue<'m> {
    type Output = Residue<'m>;

    fn mul(self, rhs: Residue<'m>) -> Residue<'m> {
        &self * &rhs
    }
}

impl<'m> MulAssign<&Residue<'m>> for Residue<'m> {
    fn mul_assign(&mut self, rhs: &Residue<'m>) {
        *self = *self * rhs;
    }
}

impl<'m> MulAssign<Residue<'m>> for Residue<'m> {
    fn mul_assign(&mut self, rhs: Residue<'m>) {
        *self *= &rhs;
    }
}
