//! Common functionality shared between tests.

// Different tests may use only a subset of the available functionality
#![allow(dead_code)]

use barrett256::{U256, Word};
use num_bigint::BigUint;

/// NIST P-256, little-endian words.
pub const P256: [Word; 4] = [
    0xffffffffffffffff,
    0x00000000ffffffff,
    0x0000000000000000,
    0xffffffff00000001,
];

/// NIST P-224, little-endian words.
pub const P224: [Word; 4] = [
    0x0000000000000001,
    0xffffffff00000000,
    0xffffffffffffffff,
    0x00000000ffffffff,
];

/// `U256` (or any word slice) to `num_bigint::BigUint`.
pub fn to_biguint(words: &[Word]) -> BigUint {
    let mut bytes = Vec::with_capacity(words.len() * 8);

    for word in words {
        bytes.extend_from_slice(&word.to_le_bytes());
    }

    BigUint::from_bytes_le(&bytes)
}

/// `num_bigint::BigUint` to `U256`; the value must fit in 256 bits.
pub fn from_biguint(value: &BigUint) -> U256 {
    let bytes = value.to_bytes_le();
    assert!(bytes.len() <= 32, "value does not fit in 256 bits");

    let mut words = [0 as Word; 4];

    for (i, byte) in bytes.iter().enumerate() {
        words[i / 8] |= (*byte as Word) << ((i % 8) * 8);
    }

    U256::from_words(words)
}
