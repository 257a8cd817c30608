//! `Word` is the unsigned integer type residue and modulus limbs are made of.

/// Unsigned integer type that residues and moduli are stored in.
///
/// The reciprocal and reduction kernels are specified at 64-bit word
/// granularity (the reciprocal seeds itself with a 32-in-64-bit division and
/// the inversion cofactors are signed 5×64-bit values), so this is `u64` on
/// every target rather than the pointer width.
pub type Word = u64;

/// Wide integer type: double the width of [`Word`].
pub(crate) type WideWord = u128;
