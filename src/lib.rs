//! Pure Rust implementation of modular arithmetic for 193–256-bit moduli.
//!
//! # About
//! This library implements the ring ℤ/mℤ for a modulus `m` with
//! `2^192 <= m < 2^256`, chosen at runtime. Residues are four 64-bit
//! little-endian words; reduction is Barrett's algorithm specialised to a
//! 256-bit modulus with a 320-bit reciprocal, which keeps the quotient
//! estimate within two of the truth and the correction loop at two trial
//! subtractions.
//!
//! A [`modular::Modulus`] bundles the modulus with its reciprocal and with
//! the two multiples of `m` bracketing 2^256 that addition, subtraction and
//! negation use to fix up carries without inspecting the modulus itself.
//! [`modular::Residue`] values borrow the `Modulus` and stay freely `Copy`.
//! Repeated exponentiations with a fixed base can amortise their table
//! build through [`modular::PowBase`].
//!
//! # Laziness
//! Operations keep residues anywhere in `[0, 2^256)` as long as the class
//! is preserved; the unique representative in `[0, m)` is only produced by
//! the canonicalising accessors ([`modular::Residue::retrieve`],
//! [`modular::Residue::to_words`]) and by comparison.
//!
//! # Timing
//! All operations are **variable-time**: the reduction, inversion and
//! reciprocal kernels branch on the data they process. This crate is not
//! suitable where timing side channels are a concern.
//!
//! # Goals
//! - No heap allocations, `no_std`-friendly.
//! - No `unsafe`.
//! - `const fn` word plumbing wherever the algorithms allow it.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

#[cfg(test)]
extern crate std;

mod error;
mod primitives;
mod uint;
mod word;

pub mod modular;

pub use crate::{
    error::{Error, Result},
    uint::U256,
    word::Word,
};
pub use subtle;
