//! Barrett reduction against a 256-bit modulus with a 320-bit reciprocal.
//!
//! Variable names in the comments follow the Barrett reduction pseudocode in
//! the Handbook of Applied Cryptography. The extra word of reciprocal
//! precision keeps the quotient estimate within two of the true quotient, so
//! at most two trial subtractions complete either reduction.

use super::Modulus;
use crate::{
    primitives::{borrowing_sub, carrying_add, carrying_mul_add, widening_mul},
    word::Word,
    U256,
};

/// Reduce a 256-bit value to the canonical representative in `[0, m)`.
pub(crate) fn barrett_reduce(modulus: &Modulus, value: &U256) -> U256 {
    let m = modulus.modulus().as_words();
    let mu = modulus.mu();
    let x = value.as_words();

    // q1 = x/2^192; q2 = q1 * mu; q3 = q2/2^320.
    // With x below 2^256 the estimate collapses to one high half-product.
    let (_, q3) = widening_mul(x[3], mu[4]);

    // r = r1 - r2 = (x mod 2^320) - (q3 * m mod 2^320).
    //
    // q3 <= x/m, so q3 * m <= x and the difference cannot go negative.
    let mut r = [x[0], x[1], x[2], x[3], 0];
    let mut carry = 0;
    let mut borrow = 0;

    for i in 0..4 {
        let (t, mul_carry) = carrying_mul_add(q3, m[i], 0, carry);
        carry = mul_carry;
        (r[i], borrow) = borrowing_sub(r[i], t, borrow);
    }
    (r[4], _) = borrowing_sub(r[4], carry, borrow);

    // while r >= m: r -= m (at most twice)
    loop {
        let mut t = [0; 5];
        let mut borrow = 0;

        for i in 0..4 {
            (t[i], borrow) = borrowing_sub(r[i], m[i], borrow);
        }
        (t[4], borrow) = borrowing_sub(r[4], 0, borrow);

        if borrow != 0 {
            break;
        }

        r = t;
    }

    U256::from_words([r[0], r[1], r[2], r[3]])
}

/// Reduce a 512-bit product to a 256-bit representative of its class.
///
/// The result stays below 2^256 but is not necessarily canonical.
pub(crate) fn barrett_reduce_wide(modulus: &Modulus, product: &[Word; 8]) -> U256 {
    let m = modulus.modulus().as_words();
    let mu = modulus.mu();

    // q1 = x/2^192, five words.
    let q1 = [product[3], product[4], product[5], product[6], product[7]];

    // q2 = q1 * mu; q3 = q2/2^320, the top five words of the ten-word
    // product. The full product never loses the low-order carries, which can
    // only sharpen the estimate.
    let mut q2 = [0 as Word; 10];

    for i in 0..5 {
        let mut carry = 0;
        for j in 0..5 {
            (q2[i + j], carry) = carrying_mul_add(q1[i], mu[j], q2[i + j], carry);
        }
        q2[i + 5] = carry;
    }

    let q3 = [q2[5], q2[6], q2[7], q2[8], q2[9]];

    // r1 = x mod 2^320
    let mut r = [product[0], product[1], product[2], product[3], product[4]];

    // r2 = q3 * m mod 2^320
    let mut r2 = [0 as Word; 5];

    for i in 0..5 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 && i + j < 5 {
            (r2[i + j], carry) = carrying_mul_add(q3[i], m[j], r2[i + j], carry);
            j += 1;
        }
        if i + j < 5 {
            (r2[i + j], _) = carrying_add(r2[i + j], carry, 0);
        }
    }

    // r = r1 - r2; the quotient estimate is at most two too small, so
    // 0 <= r < 3m fits in 320 bits.
    let mut borrow = 0;
    for i in 0..5 {
        (r[i], borrow) = borrowing_sub(r[i], r2[i], borrow);
    }

    if r[4] == 0 {
        return U256::from_words([r[0], r[1], r[2], r[3]]);
    }

    // r >= 2^256 > m: subtract m once unconditionally...
    let mut borrow = 0;
    for i in 0..4 {
        (r[i], borrow) = borrowing_sub(r[i], m[i], borrow);
    }
    (r[4], _) = borrowing_sub(r[4], 0, borrow);

    // ...then once more, committed only without a borrow.
    let mut t = [0; 5];
    let mut borrow = 0;
    for i in 0..4 {
        (t[i], borrow) = borrowing_sub(r[i], m[i], borrow);
    }
    (t[4], borrow) = borrowing_sub(r[4], 0, borrow);

    if borrow == 0 {
        r = t;
    }

    U256::from_words([r[0], r[1], r[2], r[3]])
}
