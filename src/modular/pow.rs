//! Modular exponentiation with interleaved 4-bit windows.
//!
//! The exponent is treated as four (or, for the precomputed-base variant,
//! eight) interleaved bit streams, one per 64-bit word (half-word): each
//! window gathers one bit from the top of every stream, so a single
//! squaring per iteration advances all streams at once.

use super::Residue;
use crate::{word::Word, U256};

/// One bit from the top of each exponent word.
const fn window(y: &[Word; 4]) -> usize {
    (((y[3] >> 60) & 8) | ((y[2] >> 61) & 4) | ((y[1] >> 62) & 2) | ((y[0] >> 63) & 1)) as usize
}

/// Advance all four streams by one bit.
fn shift(y: &mut [Word; 4]) {
    y[0] <<= 1;
    y[1] <<= 1;
    y[2] <<= 1;
    y[3] <<= 1;
}

impl Residue<'_> {
    /// Raise this residue to a 256-bit power.
    ///
    /// Performs 255 squarings and 74 multiplications; the table is rebuilt
    /// on every call. Use [`PowBase`] to amortise the table across repeated
    /// exponentiations with the same base.
    pub fn pow(&self, exponent: &U256) -> Self {
        // t[j] = self^e(j) with e(j) spreading j's four bits 64 positions
        // apart, matching the interleaved window indexing.
        let mut t = [Residue::one(self.modulus()); 16];
        t[1] = *self;

        let mut r = *self;

        for _ in 0..64 {
            r = r.square();
        }
        t[2] = r;
        t[3] = r.mul_inner(&t[1]);

        for _ in 0..64 {
            r = r.square();
        }
        t[4] = r;
        t[5] = r.mul_inner(&t[1]);
        t[6] = r.mul_inner(&t[2]);
        t[7] = r.mul_inner(&t[3]);

        for _ in 0..64 {
            r = r.square();
        }
        t[8] = r;
        for j in 1..8 {
            t[8 + j] = r.mul_inner(&t[j]);
        }

        let mut y = exponent.to_words();
        let mut z = t[window(&y)];

        for _ in 1..64 {
            shift(&mut y);
            z = z.square().mul_inner(&t[window(&y)]);
        }

        z
    }
}

/// Lookup tables enabling fast repeated exponentiation with a fixed base.
///
/// Two 16-entry tables offset by 32 squarings split the exponent into a
/// high and a low half processed simultaneously, cutting the per-call cost
/// to 31 squarings and 63 multiplications.
#[derive(Clone, Copy, Debug)]
pub struct PowBase<'m> {
    h: [Residue<'m>; 16],
    l: [Residue<'m>; 16],
}

impl<'m> PowBase<'m> {
    /// Build the tables for `base`.
    ///
    /// Performs 224 squarings and 22 multiplications.
    pub fn new(base: &Residue<'m>) -> Self {
        let one = Residue::one(base.modulus());
        let mut l = [one; 16];
        let mut h = [one; 16];

        let mut r = *base;
        l[1] = r;

        for _ in 0..32 {
            r = r.square();
        }
        l[2] = r;
        l[3] = r.mul_inner(&l[1]);

        for _ in 0..32 {
            r = r.square();
        }
        l[4] = r;
        for j in 1..4 {
            l[4 + j] = r.mul_inner(&l[j]);
        }

        for _ in 0..32 {
            r = r.square();
        }
        l[8] = r;
        for j in 1..8 {
            l[8 + j] = r.mul_inner(&l[j]);
        }

        // 32 more squarings put h[1] = base^(2^128); the h table then
        // repeats the l table's shape shifted up by half the exponent.
        for _ in 0..32 {
            r = r.square();
        }
        h[1] = r;

        for _ in 0..32 {
            r = r.square();
        }
        h[2] = r;
        h[3] = r.mul_inner(&h[1]);

        for _ in 0..32 {
            r = r.square();
        }
        h[4] = r;
        for j in 1..4 {
            h[4 + j] = r.mul_inner(&h[j]);
        }

        for _ in 0..32 {
            r = r.square();
        }
        h[8] = r;
        for j in 1..8 {
            h[8 + j] = r.mul_inner(&h[j]);
        }

        Self { h, l }
    }

    /// Raise the precomputed base to a 256-bit power.
    ///
    /// Performs 31 squarings and 63 multiplications.
    pub fn pow(&self, exponent: &U256) -> Residue<'m> {
        let mut y = exponent.to_words();

        let mut z = self.h[Self::high_window(&y)].mul_inner(&self.l[Self::low_window(&y)]);

        for _ in 1..32 {
            shift(&mut y);
            z = z
                .square()
                .mul_inner(&self.h[Self::high_window(&y)])
                .mul_inner(&self.l[Self::low_window(&y)]);
        }

        z
    }

    /// One bit from the top of each 32-bit stream in the high exponent half.
    const fn high_window(y: &[Word; 4]) -> usize {
        (((y[3] >> 60) & 8) | ((y[3] >> 29) & 4) | ((y[2] >> 62) & 2) | ((y[2] >> 31) & 1)) as usize
    }

    /// One bit from the top of each 32-bit stream in the low exponent half.
    const fn low_window(y: &[Word; 4]) -> usize {
        (((y[1] >> 60) & 8) | ((y[1] >> 29) & 4) | ((y[0] >> 62) & 2) | ((y[0] >> 31) & 1)) as usize
    }
}
