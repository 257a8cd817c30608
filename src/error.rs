//! Error types.

use core::fmt;

/// Result type with the `barrett256` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The modulus is below 2^192: its most significant word is zero.
    ModulusTooSmall,

    /// A binary operation was applied to residues bound to different moduli.
    ModulusMismatch,

    /// The product of the modulus and the top reciprocal word overflowed
    /// 256 bits during modulus construction.
    ///
    /// The reciprocal stored next to the modulus does not match it; this is
    /// an internal invariant, not a usage error.
    ReciprocalTooLarge,

    /// The next multiple of the modulus after [`Error::ReciprocalTooLarge`]'s
    /// product failed to reach 2^256 during modulus construction.
    ///
    /// As above, this indicates a corrupted reciprocal.
    ReciprocalTooSmall,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ModulusTooSmall => f.write_str("modulus below 2^192"),
            Error::ModulusMismatch => f.write_str("incompatible moduli"),
            Error::ReciprocalTooLarge => {
                f.write_str("multiple of the modulus overflowed 256 bits")
            }
            Error::ReciprocalTooSmall => {
                f.write_str("multiple of the modulus failed to reach 2^256")
            }
        }
    }
}

impl core::error::Error for Error {}
