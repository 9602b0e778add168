use std::cmp::min;

use crate::{Digit, DoubleDigit};

// add_with_carry calculates: sum = x + y + carry.
// The carry input must be 0 or 1; so is carry_out.
pub fn add_with_carry(x: Digit, y: Digit, carry: Digit) -> (/* sum */ Digit, /* carry_out */ Digit) {
    debug_assert!(carry <= 1);
    let (sum, o1) = x.overflowing_add(y);
    let (sum, o2) = sum.overflowing_add(carry);
    (sum, o1 as Digit | o2 as Digit)
}

// sub_with_borrow calculates: diff = x - y - borrow.
// The borrow input must be 0 or 1; so is borrow_out.
pub fn sub_with_borrow(x: Digit, y: Digit, borrow: Digit) -> (/* diff */ Digit, /* borrow_out */ Digit) {
    debug_assert!(borrow <= 1);
    let (diff, o1) = x.overflowing_sub(y);
    let (diff, o2) = diff.overflowing_sub(borrow);
    (diff, o1 as Digit | o2 as Digit)
}

// x * y + acc + carry never overflows a DoubleDigit:
// (2^32 - 1)^2 + 2 * (2^32 - 1) == 2^64 - 1
pub fn mul_add_carry(x: Digit, y: Digit, acc: Digit, carry: Digit) -> (/* lo */ Digit, /* hi */ Digit) {
    let t: DoubleDigit = x as DoubleDigit * y as DoubleDigit + acc as DoubleDigit + carry as DoubleDigit;
    (t as Digit, (t >> Digit::BITS) as Digit)
}

// Divide the two-digit number (hi, lo) by 'divisor'.
// pre-condition: hi < divisor, so the quotient fits in one digit.
pub fn div_wide(hi: Digit, lo: Digit, divisor: Digit) -> (/* quotient */ Digit, /* remainder */ Digit) {
    assert!(divisor > 0, "div_wide - divide by zero error");
    debug_assert!(hi < divisor, "div_wide - quotient overflow");
    let n: DoubleDigit = (hi as DoubleDigit) << Digit::BITS | lo as DoubleDigit;
    let d = divisor as DoubleDigit;
    ((n / d) as Digit, (n % d) as Digit)
}

// Estimate a quotient digit from the three leading digits of the dividend window
// (u2, u1, u0) and the two leading digits (v1, v0) of the normalized divisor.
// The estimate is never too small and at most one too large.
pub fn trial_digit(u2: Digit, u1: Digit, u0: Digit, v1: Digit, v0: Digit) -> Digit {
    debug_assert!(v1 & (1 << (Digit::BITS - 1)) != 0, "trial_digit - divisor not normalized");
    let num: u128 = (u2 as u128) << (2 * Digit::BITS) | (u1 as u128) << Digit::BITS | u0 as u128;
    let den: u128 = (v1 as u128) << Digit::BITS | v0 as u128;
    min(num / den, Digit::MAX as u128) as Digit
}

pub fn leading_zeroes_count(x: Digit) -> u32 {
    Digit::BITS - len_binary_digit(x)
}

// "length" of a digit in binary representation; zero for zero.
pub fn len_binary_digit(x: Digit) -> u32 {
    Digit::BITS - x.leading_zeros()
}
