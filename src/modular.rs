//! Modular arithmetic support for moduli set at runtime.
//!
//! The entry point is [`Modulus::new`], which computes the 320-bit Barrett
//! reciprocal of the modulus once; every [`Residue`] bound to it then pays
//! only multiply-and-subtract for its reductions.

mod modulus;
mod pow;
mod reciprocal;
mod reduction;
mod residue;

pub use self::{modulus::Modulus, pow::PowBase, residue::Residue};
