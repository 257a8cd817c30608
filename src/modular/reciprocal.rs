//! 320-bit reciprocal of a 256-bit modulus.

use crate::{
    primitives::{borrowing_sub, carrying_add, widening_mul},
    word::Word,
    U256,
};

/// Compute the 320-bit value `mu` representing `2^512/m`, equivalently `1/m`
/// in 0.320 fixed point.
///
/// Starts from a 32-bit division and doubles precision through four
/// Newton–Raphson refinements. The result satisfies
///
/// - `mu * m < 2^512` (except for powers of two, where `mu * m == 2^512`
///   would hold for the exact reciprocal, so one less is returned),
/// - `mu * m + m >= 2^512`.
///
/// The caller must ensure `m[3] != 0`.
pub(crate) const fn reciprocal(modulus: &U256) -> [Word; 5] {
    let m = modulus.as_words();
    debug_assert!(m[3] != 0);

    let s = m[3].leading_zeros();
    let p = 63 - s as i32;

    // A single bit set anywhere means m is a power of two: the exact
    // reciprocal would be 2^512/m itself, one bit too wide, so return one
    // less and let `mu * m + m == 2^512` hold with equality.
    if (m[0] | m[1] | m[2] | (m[3] & (m[3] - 1))) == 0 {
        return [
            Word::MAX,
            Word::MAX,
            Word::MAX,
            Word::MAX,
            Word::MAX >> (p as u32),
        ];
    }

    // Left-align the divisor to maximise division precision: 1/2 < y < 1
    // in 0.256 fixed point.
    let y = modulus.shl_vartime(s).to_words();

    // Seed from the top 32 bits of y: r0 ~ 2^31/y.
    let yh = (y[3] >> 32) as u32;
    let r0: Word = if yh == 0x8000_0000 {
        // Avoid overflow in the division below.
        0xffff_ffff
    } else {
        (1u64 << 63) / (yh as u64)
    };

    // First iteration: 32 -> 64.

    let t = r0 * r0; //                                 2^62/y^2
    let (_, t) = widening_mul(t, y[3]); //              2^62/y
    let r1 = (r0 << 32).wrapping_sub(t).wrapping_mul(2); // 2^63/y

    let r1 = if (r1 | (y[3] << 1)) == 0 { Word::MAX } else { r1 };

    // Second iteration: 64 -> 128.

    // square: 2^126/y^2
    let (a2l, a2h) = widening_mul(r1, r1);

    // multiply by y, keeping the top 128 bits: e2h:e2l = 2^126/y
    let (_, b2h) = widening_mul(a2l, y[2]);
    let (c2l, c2h) = widening_mul(a2l, y[3]);
    let (d2l, d2h) = widening_mul(a2h, y[2]);
    let (e2l, e2h) = widening_mul(a2h, y[3]);

    let (b2h, c) = carrying_add(b2h, c2l, 0);
    let (e2l, c) = carrying_add(e2l, c2h, c);
    let (e2h, _) = carrying_add(e2h, 0, c);

    let (_, c) = carrying_add(b2h, d2l, 0);
    let (e2l, c) = carrying_add(e2l, d2h, c);
    let (e2h, _) = carrying_add(e2h, 0, c);

    // subtract from 2^127: t2 = 2^127/y - 2^126/y = 2^126/y
    let (t2l, b) = borrowing_sub(0, e2l, 0);
    let (t2h, _) = borrowing_sub(r1, e2h, b);

    // double: r2 = 2^127/y
    let (r2l, c) = carrying_add(t2l, t2l, 0);
    let (r2h, _) = carrying_add(t2h, t2h, c);

    // Saturate when y is so close to 1/2 that the true reciprocal does not
    // fit the representation.
    let (r2l, r2h) = if (r2h | r2l | (y[3] << 1)) == 0 {
        (Word::MAX, Word::MAX)
    } else {
        (r2l, r2h)
    };

    // Third iteration: 128 -> 192.

    // square r2, keeping 256 bits: 2^190/y^2
    let (a3l, a3h) = widening_mul(r2l, r2l);
    let (b3l, b3h) = widening_mul(r2l, r2h);
    let (c3l, c3h) = widening_mul(r2h, r2h);

    // the cross product enters twice
    let (a3h, c) = carrying_add(a3h, b3l, 0);
    let (c3l, c) = carrying_add(c3l, b3h, c);
    let (c3h, _) = carrying_add(c3h, 0, c);

    let (a3h, c) = carrying_add(a3h, b3l, 0);
    let (c3l, c) = carrying_add(c3l, b3h, c);
    let (c3h, _) = carrying_add(c3h, 0, c);

    let (x0, x1, x2, x3) = (a3l, a3h, c3l, c3h);

    // multiply by y, keeping the top 192 bits: q4:q3:q2 = 2^190/y
    let (_, q0) = widening_mul(x2, y[0]);
    let (t0, q1) = widening_mul(x3, y[0]);
    let (q0, c) = carrying_add(q0, t0, 0);
    let (q1, _) = carrying_add(q1, 0, c);

    let (_, t1) = widening_mul(x1, y[1]);
    let (q0, c) = carrying_add(q0, t1, 0);
    let (t0, q2) = widening_mul(x3, y[1]);
    let (q1, c) = carrying_add(q1, t0, c);
    let (q2, _) = carrying_add(q2, 0, c);

    let (t0, t1) = widening_mul(x2, y[1]);
    let (q0, c) = carrying_add(q0, t0, 0);
    let (q1, c) = carrying_add(q1, t1, c);
    let (q2, _) = carrying_add(q2, 0, c);

    let (t0, t1) = widening_mul(x1, y[2]);
    let (q0, c) = carrying_add(q0, t0, 0);
    let (q1, c) = carrying_add(q1, t1, c);
    let (t0, q3) = widening_mul(x3, y[2]);
    let (q2, c) = carrying_add(q2, t0, c);
    let (q3, _) = carrying_add(q3, 0, c);

    let (_, t1) = widening_mul(x0, y[2]);
    let (q0, c) = carrying_add(q0, t1, 0);
    let (t0, t1) = widening_mul(x2, y[2]);
    let (q1, c) = carrying_add(q1, t0, c);
    let (q2, c) = carrying_add(q2, t1, c);
    let (q3, _) = carrying_add(q3, 0, c);

    let (t0, t1) = widening_mul(x1, y[3]);
    let (q1, c) = carrying_add(q1, t0, 0);
    let (q2, c) = carrying_add(q2, t1, c);
    let (t0, q4) = widening_mul(x3, y[3]);
    let (q3, c) = carrying_add(q3, t0, c);
    let (q4, _) = carrying_add(q4, 0, c);

    let (t0, t1) = widening_mul(x0, y[3]);
    let (q0, c) = carrying_add(q0, t0, 0);
    let (q1, c) = carrying_add(q1, t1, c);
    let (t0, t1) = widening_mul(x2, y[3]);
    let (q2, c) = carrying_add(q2, t0, c);
    let (q3, c) = carrying_add(q3, t1, c);
    let (q4, _) = carrying_add(q4, 0, c);

    // subtract: t3 = 2^191/y - 2^190/y = 2^190/y
    let (_, b) = borrowing_sub(0, q0, 0);
    let (_, b) = borrowing_sub(0, q1, b);
    let (t3l, b) = borrowing_sub(0, q2, b);
    let (t3m, b) = borrowing_sub(r2l, q3, b);
    let (t3h, _) = borrowing_sub(r2h, q4, b);

    // double: r3 = 2^191/y
    let (r3l, c) = carrying_add(t3l, t3l, 0);
    let (r3m, c) = carrying_add(t3m, t3m, c);
    let (r3h, _) = carrying_add(t3h, t3h, c);

    // Fourth iteration: 192 -> 320.

    // square r3
    let (a4l, a4h) = widening_mul(r3l, r3l);
    let (b4l, b4h) = widening_mul(r3l, r3m);
    let (c4l, c4h) = widening_mul(r3l, r3h);
    let (d4l, d4h) = widening_mul(r3m, r3m);
    let (e4l, e4h) = widening_mul(r3m, r3h);
    let (f4l, f4h) = widening_mul(r3h, r3h);

    let (b4h, c) = carrying_add(b4h, c4l, 0);
    let (e4l, c) = carrying_add(e4l, c4h, c);
    let (e4h, _) = carrying_add(e4h, 0, c);

    // cross products enter twice
    let (a4h, c) = carrying_add(a4h, b4l, 0);
    let (d4l, c) = carrying_add(d4l, b4h, c);
    let (d4h, c) = carrying_add(d4h, e4l, c);
    let (f4l, c) = carrying_add(f4l, e4h, c);
    let (f4h, _) = carrying_add(f4h, 0, c);

    let (a4h, c) = carrying_add(a4h, b4l, 0);
    let (d4l, c) = carrying_add(d4l, b4h, c);
    let (d4h, c) = carrying_add(d4h, e4l, c);
    let (f4l, c) = carrying_add(f4l, e4h, c);
    let (f4h, _) = carrying_add(f4h, 0, c);

    // multiply by y
    let (x0, x1) = widening_mul(d4h, y[0]);
    let (x2, x3) = widening_mul(f4h, y[0]);
    let (t0, t1) = widening_mul(f4l, y[0]);
    let (x1, c) = carrying_add(x1, t0, 0);
    let (x2, c) = carrying_add(x2, t1, c);
    let (x3, _) = carrying_add(x3, 0, c);

    let (t0, t1) = widening_mul(d4h, y[1]);
    let (x1, c) = carrying_add(x1, t0, 0);
    let (x2, c) = carrying_add(x2, t1, c);
    let (t0, x4) = widening_mul(f4h, y[1]);
    let (x3, c) = carrying_add(x3, t0, c);
    let (x4, _) = carrying_add(x4, 0, c);
    let (t0, t1) = widening_mul(d4l, y[1]);
    let (x0, c) = carrying_add(x0, t0, 0);
    let (x1, c) = carrying_add(x1, t1, c);
    let (t0, t1) = widening_mul(f4l, y[1]);
    let (x2, c) = carrying_add(x2, t0, c);
    let (x3, c) = carrying_add(x3, t1, c);
    let (x4, _) = carrying_add(x4, 0, c);

    let (t0, t1) = widening_mul(a4h, y[2]);
    let (x0, c) = carrying_add(x0, t0, 0);
    let (x1, c) = carrying_add(x1, t1, c);
    let (t0, t1) = widening_mul(d4h, y[2]);
    let (x2, c) = carrying_add(x2, t0, c);
    let (x3, c) = carrying_add(x3, t1, c);
    let (t0, x5) = widening_mul(f4h, y[2]);
    let (x4, c) = carrying_add(x4, t0, c);
    let (x5, _) = carrying_add(x5, 0, c);
    let (t0, t1) = widening_mul(d4l, y[2]);
    let (x1, c) = carrying_add(x1, t0, 0);
    let (x2, c) = carrying_add(x2, t1, c);
    let (t0, t1) = widening_mul(f4l, y[2]);
    let (x3, c) = carrying_add(x3, t0, c);
    let (x4, c) = carrying_add(x4, t1, c);
    let (x5, _) = carrying_add(x5, 0, c);

    let (t0, t1) = widening_mul(a4h, y[3]);
    let (x1, c) = carrying_add(x1, t0, 0);
    let (x2, c) = carrying_add(x2, t1, c);
    let (t0, t1) = widening_mul(d4h, y[3]);
    let (x3, c) = carrying_add(x3, t0, c);
    let (x4, c) = carrying_add(x4, t1, c);
    let (t0, x6) = widening_mul(f4h, y[3]);
    let (x5, c) = carrying_add(x5, t0, c);
    let (x6, _) = carrying_add(x6, 0, c);
    let (t0, t1) = widening_mul(a4l, y[3]);
    let (x0, c) = carrying_add(x0, t0, 0);
    let (x1, c) = carrying_add(x1, t1, c);
    let (t0, t1) = widening_mul(d4l, y[3]);
    let (x2, c) = carrying_add(x2, t0, c);
    let (x3, c) = carrying_add(x3, t1, c);
    let (t0, t1) = widening_mul(f4l, y[3]);
    let (x4, c) = carrying_add(x4, t0, c);
    let (x5, c) = carrying_add(x5, t1, c);
    let (x6, _) = carrying_add(x6, 0, c);

    // subtract: r4 is the candidate for (1/4)/y across five words
    let (_, b) = borrowing_sub(0, x0, 0);
    let (_, b) = borrowing_sub(0, x1, b);
    let (r4_0, b) = borrowing_sub(0, x2, b);
    let (r4_1, b) = borrowing_sub(0, x3, b);
    let (r4_2, b) = borrowing_sub(r3l, x4, b);
    let (r4_3, b) = borrowing_sub(r3m, x5, b);
    let (r4_4, _) = borrowing_sub(r3h, x6, b);

    // Multiply the candidate by y with full precision; the 1/4 comparison
    // below decides whether the candidate is one off in either direction.
    let (q0, q1) = widening_mul(r4_0, y[0]);
    let (q2, q3) = widening_mul(r4_2, y[0]);
    let (q4, q5) = widening_mul(r4_4, y[0]);

    let (t0, t1) = widening_mul(r4_1, y[0]);
    let (q1, c) = carrying_add(q1, t0, 0);
    let (q2, c) = carrying_add(q2, t1, c);
    let (t0, t1) = widening_mul(r4_3, y[0]);
    let (q3, c) = carrying_add(q3, t0, c);
    let (q4, c) = carrying_add(q4, t1, c);
    let (q5, _) = carrying_add(q5, 0, c);

    let (t0, t1) = widening_mul(r4_0, y[1]);
    let (q1, c) = carrying_add(q1, t0, 0);
    let (q2, c) = carrying_add(q2, t1, c);
    let (t0, t1) = widening_mul(r4_2, y[1]);
    let (q3, c) = carrying_add(q3, t0, c);
    let (q4, c) = carrying_add(q4, t1, c);
    let (t0, q6) = widening_mul(r4_4, y[1]);
    let (q5, c) = carrying_add(q5, t0, c);
    let (q6, _) = carrying_add(q6, 0, c);

    let (t0, t1) = widening_mul(r4_1, y[1]);
    let (q2, c) = carrying_add(q2, t0, 0);
    let (q3, c) = carrying_add(q3, t1, c);
    let (t0, t1) = widening_mul(r4_3, y[1]);
    let (q4, c) = carrying_add(q4, t0, c);
    let (q5, c) = carrying_add(q5, t1, c);
    let (q6, _) = carrying_add(q6, 0, c);

    let (t0, t1) = widening_mul(r4_0, y[2]);
    let (q2, c) = carrying_add(q2, t0, 0);
    let (q3, c) = carrying_add(q3, t1, c);
    let (t0, t1) = widening_mul(r4_2, y[2]);
    let (q4, c) = carrying_add(q4, t0, c);
    let (q5, c) = carrying_add(q5, t1, c);
    let (t0, q7) = widening_mul(r4_4, y[2]);
    let (q6, c) = carrying_add(q6, t0, c);
    let (q7, _) = carrying_add(q7, 0, c);

    let (t0, t1) = widening_mul(r4_1, y[2]);
    let (q3, c) = carrying_add(q3, t0, 0);
    let (q4, c) = carrying_add(q4, t1, c);
    let (t0, t1) = widening_mul(r4_3, y[2]);
    let (q5, c) = carrying_add(q5, t0, c);
    let (q6, c) = carrying_add(q6, t1, c);
    let (q7, _) = carrying_add(q7, 0, c);

    let (t0, t1) = widening_mul(r4_0, y[3]);
    let (q3, c) = carrying_add(q3, t0, 0);
    let (q4, c) = carrying_add(q4, t1, c);
    let (t0, t1) = widening_mul(r4_2, y[3]);
    let (q5, c) = carrying_add(q5, t0, c);
    let (q6, c) = carrying_add(q6, t1, c);
    let (t0, q8) = widening_mul(r4_4, y[3]);
    let (q7, c) = carrying_add(q7, t0, c);
    let (q8, _) = carrying_add(q8, 0, c);

    let (t0, t1) = widening_mul(r4_1, y[3]);
    let (q4, c) = carrying_add(q4, t0, 0);
    let (q5, c) = carrying_add(q5, t1, c);
    let (t0, t1) = widening_mul(r4_3, y[3]);
    let (q6, c) = carrying_add(q6, t0, c);
    let (q7, c) = carrying_add(q7, t1, c);
    let (q8, _) = carrying_add(q8, 0, c);

    // Final adjustments: increment or decrement to the exact reciprocal.

    // subtract the product from 1/4
    let (q0, b) = borrowing_sub(0, q0, 0);
    let (q1, b) = borrowing_sub(0, q1, b);
    let (q2, b) = borrowing_sub(0, q2, b);
    let (q3, b) = borrowing_sub(0, q3, b);
    let (q4, b) = borrowing_sub(0, q4, b);
    let (q5, b) = borrowing_sub(0, q5, b);
    let (q6, b) = borrowing_sub(0, q6, b);
    let (q7, b) = borrowing_sub(0, q7, b);
    let (q8, b) = borrowing_sub(1 << 62, q8, b);

    // decrement the candidate, committed when the subtraction underflowed
    // (the candidate was one too large)
    let (d0, t) = borrowing_sub(r4_0, 1, 0);
    let (d1, t) = borrowing_sub(r4_1, 0, t);
    let (d2, t) = borrowing_sub(r4_2, 0, t);
    let (d3, t) = borrowing_sub(r4_3, 0, t);
    let (d4, _) = borrowing_sub(r4_4, 0, t);

    let (r4_0, r4_1, r4_2, r4_3, r4_4) = if b != 0 {
        (d0, d1, d2, d3, d4)
    } else {
        (r4_0, r4_1, r4_2, r4_3, r4_4)
    };

    // subtract y from the difference
    let (_, b) = borrowing_sub(q0, y[0], 0);
    let (_, b) = borrowing_sub(q1, y[1], b);
    let (_, b) = borrowing_sub(q2, y[2], b);
    let (_, b) = borrowing_sub(q3, y[3], b);
    let (_, b) = borrowing_sub(q4, 0, b);
    let (_, b) = borrowing_sub(q5, 0, b);
    let (_, b) = borrowing_sub(q6, 0, b);
    let (_, b) = borrowing_sub(q7, 0, b);
    let (_, b) = borrowing_sub(q8, 0, b);

    // increment the candidate, committed when no underflow occurred
    // (one more y still fits below 1/4: the candidate was one too small)
    let (d0, t) = carrying_add(r4_0, 1, 0);
    let (d1, t) = carrying_add(r4_1, 0, t);
    let (d2, t) = carrying_add(r4_2, 0, t);
    let (d3, t) = carrying_add(r4_3, 0, t);
    let (d4, _) = carrying_add(r4_4, 0, t);

    let (r4_0, r4_1, r4_2, r4_3, r4_4) = if b == 0 {
        (d0, d1, d2, d3, d4)
    } else {
        (r4_0, r4_1, r4_2, r4_3, r4_4)
    };

    // Shift to the alignment where mu * m lies just below 2^512.

    let p = p - 1;

    if p < 0 {
        // p was 0: a 1-bit left shift keeps the precision a right shift
        // would discard.
        let (r4_0, c) = carrying_add(r4_0, r4_0, 0);
        let (r4_1, c) = carrying_add(r4_1, r4_1, c);
        let (r4_2, c) = carrying_add(r4_2, r4_2, c);
        let (r4_3, c) = carrying_add(r4_3, r4_3, c);
        let (r4_4, _) = carrying_add(r4_4, r4_4, c);

        return [r4_0, r4_1, r4_2, r4_3, r4_4];
    }

    if p > 0 {
        // shift right 1-62 bits, truncating
        let r = p as u32;
        let l = 64 - r;

        return [
            (r4_0 >> r) | (r4_1 << l),
            (r4_1 >> r) | (r4_2 << l),
            (r4_2 >> r) | (r4_3 << l),
            (r4_3 >> r) | (r4_4 << l),
            r4_4 >> r,
        ];
    }

    [r4_0, r4_1, r4_2, r4_3, r4_4]
}

#[cfg(test)]
mod tests {
    use super::reciprocal;
    use crate::{word::Word, U256};
    use num_bigint::BigUint;
    use std::vec::Vec;

    fn to_biguint(words: &[Word]) -> BigUint {
        let mut bytes = Vec::with_capacity(words.len() * 8);
        for word in words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        BigUint::from_bytes_le(&bytes)
    }

    /// `floor(2^512/m)`, the value `reciprocal` must produce for every
    /// modulus that is not a power of two.
    fn reference(m: &U256) -> BigUint {
        (BigUint::from(1u8) << 512u32) / to_biguint(m.as_words())
    }

    fn assert_reciprocal(m: U256) {
        let mu = to_biguint(&reciprocal(&m));
        let m_big = to_biguint(m.as_words());
        let expected = if m_big.count_ones() == 1 {
            reference(&m) - 1u8
        } else {
            reference(&m)
        };
        assert_eq!(mu, expected, "m = {m}");
    }

    #[test]
    fn nist_p256() {
        assert_reciprocal(U256::from_be_hex(
            "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        ));
    }

    #[test]
    fn nist_p224() {
        assert_reciprocal(U256::from_be_hex(
            "00000000ffffffffffffffffffffffffffffffff000000000000000000000001",
        ));
    }

    #[test]
    fn secp256k1() {
        assert_reciprocal(U256::from_be_hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        ));
    }

    #[test]
    fn powers_of_two() {
        // m = 2^255: one less than 2^512/m = 2^257
        let m = U256::from_words([0, 0, 0, 1 << 63]);
        assert_eq!(
            reciprocal(&m),
            [Word::MAX, Word::MAX, Word::MAX, Word::MAX, 1]
        );

        // every admissible power of two
        for bit in 0..64 {
            assert_reciprocal(U256::from_words([0, 0, 0, 1 << bit]));
        }
    }

    #[test]
    fn boundary_values() {
        // the extremes of the admissible range
        assert_reciprocal(U256::from_words([1, 0, 0, 1]));
        assert_reciprocal(U256::MAX);

        // just above/below word boundaries
        assert_reciprocal(U256::from_words([Word::MAX, Word::MAX, Word::MAX, 1]));
        assert_reciprocal(U256::from_words([0, 0, 0, Word::MAX]));
        assert_reciprocal(U256::from_words([1, 0, 0, 1 << 63]));
        assert_reciprocal(U256::from_words([Word::MAX, 0, 0, Word::MAX]));
    }

    #[test]
    fn bit_grid() {
        // single bits in the top word crossed with assorted low parts
        let lows: [[Word; 3]; 4] = [
            [0, 0, 0],
            [1, 0, 0],
            [Word::MAX, Word::MAX, Word::MAX],
            [0x243f6a8885a308d3, 0x13198a2e03707344, 0xa4093822299f31d0],
        ];

        for bit in 0..64 {
            for low in &lows {
                assert_reciprocal(U256::from_words([low[0], low[1], low[2], 1 << bit]));
            }
        }
    }
}
