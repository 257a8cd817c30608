//! Residues: representatives of classes modulo a [`Modulus`], supporting
//! the full set of ring operations.

mod add;
mod inv;
mod mul;
mod neg;
mod sub;

use super::{reduction::barrett_reduce, Modulus};
use crate::{word::Word, U256};
use core::ptr;

/// A representative of a residue class modulo a fixed [`Modulus`].
///
/// The stored value is *any* 256-bit member of the class: operations
/// preserve the class but only the canonicalising accessors
/// ([`Residue::retrieve`], [`Residue::to_words`], [`Residue::canonicalize`])
/// and comparison bring it into `[0, m)`.
///
/// Residues are plain `Copy` values borrowing their modulus, so they cannot
/// outlive it.
#[derive(Clone, Copy, Debug)]
pub struct Residue<'m> {
    modulus: &'m Modulus,
    value: U256,
}

impl<'m> Residue<'m> {
    /// Create a residue from a little-endian word array.
    ///
    /// The value is taken as-is; it does not need to lie in `[0, m)`.
    pub const fn new(modulus: &'m Modulus, words: [Word; 4]) -> Self {
        Self {
            modulus,
            value: U256::from_words(words),
        }
    }

    /// Create a residue from a [`U256`].
    pub const fn from_uint(modulus: &'m Modulus, value: U256) -> Self {
        Self { modulus, value }
    }

    /// The additive identity.
    pub const fn zero(modulus: &'m Modulus) -> Self {
        Self {
            modulus,
            value: U256::ZERO,
        }
    }

    /// The multiplicative identity.
    pub const fn one(modulus: &'m Modulus) -> Self {
        Self {
            modulus,
            value: U256::ONE,
        }
    }

    /// The modulus this residue is bound to.
    pub const fn modulus(&self) -> &'m Modulus {
        self.modulus
    }

    /// The current representative, which may be anywhere in `[0, 2^256)`.
    pub const fn as_uint(&self) -> &U256 {
        &self.value
    }

    /// Reduce the stored representative to the canonical one in `[0, m)`,
    /// in place.
    pub fn canonicalize(&mut self) -> &mut Self {
        self.value = barrett_reduce(self.modulus, &self.value);
        self
    }

    /// The canonical representative in `[0, m)`, reducing in place.
    pub fn retrieve(&mut self) -> U256 {
        self.canonicalize();
        self.value
    }

    /// The canonical representative as a little-endian word array, reducing
    /// in place.
    pub fn to_words(&mut self) -> [Word; 4] {
        self.retrieve().to_words()
    }

    /// Whether `other` is bound to the same modulus: the same `Modulus`
    /// object, or one with equal words.
    pub(crate) fn same_modulus(&self, other: &Self) -> bool {
        ptr::eq(self.modulus, other.modulus) || self.modulus.modulus() == other.modulus.modulus()
    }

    pub(crate) const fn with_value(&self, value: U256) -> Self {
        Self {
            modulus: self.modulus,
            value,
        }
    }
}

impl PartialEq for Residue<'_> {
    /// Residues compare equal when their moduli have equal words and they
    /// represent the same class. Canonical forms of both sides are compared;
    /// the stored representatives are left untouched.
    fn eq(&self, other: &Self) -> bool {
        if self.modulus.modulus() != other.modulus.modulus() {
            return false;
        }

        barrett_reduce(self.modulus, &self.value) == barrett_reduce(other.modulus, &other.value)
    }
}

impl Eq for Residue<'_> {}
