//! Residue subtraction.

use super::Residue;
use crate::{Error, Result, U256};
use core::ops::{Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable};

impl<'m> Residue<'m> {
    /// Compute `self - rhs`.
    ///
    /// Returns [`Error::ModulusMismatch`] when the operands are bound to
    /// different moduli.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        if !self.same_modulus(rhs) {
            return Err(Error::ModulusMismatch);
        }

        Ok(self.sub_inner(rhs))
    }

    pub(crate) fn sub_inner(&self, rhs: &Self) -> Self {
        let (diff, borrow) = self.value.borrowing_sub(&rhs.value, 0);

        if borrow == 0 {
            return self.with_value(diff);
        }

        // The difference went below zero. Adding back a bracketing multiple
        // of m restores the class; m_floor applies when it carries back past
        // 2^256, m_ceil otherwise.
        let (lo, carry) = diff.carrying_add(self.modulus.m_floor(), 0);
        let (hi, _) = diff.carrying_add(self.modulus.m_ceil(), 0);

        let value = U256::conditional_select(&hi, &lo, Choice::from(carry as u8));
        self.with_value(value)
    }
}

impl<'m> Sub<&Residue<'m>> for &Residue<'m> {
    type Output = Residue<'m>;

    fn sub(self, rhs: &Residue<'m>) -> Residue<'m> {
        self.checked_sub(rhs).expect("incompatible moduli")
    }
}

impl<'m> Sub<Residue<'m>> for &Residue<'m> {
    type Output = Residue<'m>;

    #[allow(clippy::op_ref)]
    fn sub(self, rhs: Residue<'m>) -> Residue<'m> {
        self - &rhs
    }
}

impl<'m> Sub<&Residue<'m>> for Residue<'m> {
    type Output = Residue<'m>;

    #[allow(clippy::op_ref)]
    fn sub(self, rhs: &Residue<'m>) -> Residue<'m> {
        &self - rhs
    }
}

impl<'m> Sub<Residue<'m>> for Residue<'m> {
    type Output = Residue<'m>;

    fn sub(self, rhs: Residue<'m>) -> Residue<'m> {
        &self - &rhs
    }
}

impl<'m> SubAssign<&Residue<'m>> for Residue<'m> {
    fn sub_assign(&mut self, rhs: &Residue<'m>) {
        *self = *self - rhs;
    }
}

impl<'m> SubAssign<Residue<'m>> for Residue<'m> {
    fn sub_assign(&mut self, rhs: Residue<'m>) {
        *self -= &rhs;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        modular::{Modulus, Residue},
        word::Word,
    };

    const P256: [Word; 4] = [
        0xffffffffffffffff,
        0x00000000ffffffff,
        0x0000000000000000,
        0xffffffff00000001,
    ];

    #[test]
    fn sub_without_borrow() {
        let modulus = Modulus::new(P256).unwrap();
        let a = Residue::new(&modulus, [11, 0, 0, 0]);
        let b = Residue::new(&modulus, [4, 0, 0, 0]);
        let mut diff = a - b;
        assert_eq!(diff.to_words(), [7, 0, 0, 0]);
    }

    #[test]
    fn sub_with_borrow() {
        // 4 - 11 wraps below zero; the class of -7 must come back
        let modulus = Modulus::new(P256).unwrap();
        let a = Residue::new(&modulus, [4, 0, 0, 0]);
        let b = Residue::new(&modulus, [11, 0, 0, 0]);
        let seven = Residue::new(&modulus, [7, 0, 0, 0]);

        let diff = a - b;
        assert_eq!(diff + b, a);
        assert_eq!(diff, seven.neg());
    }

    #[test]
    fn self_subtraction_is_zero() {
        let modulus = Modulus::new(P256).unwrap();
        let a = Residue::new(&modulus, [99, 7, 0, 3]);
        assert_eq!(a - a, Residue::zero(&modulus));
    }
}
