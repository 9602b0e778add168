use std::cmp::{max, Ordering};
use std::fmt::Formatter;

use crate::bits::{add_with_carry, div_wide, leading_zeroes_count, len_binary_digit, mul_add_carry, sub_with_borrow, trial_digit};
use crate::store::DigitStore;
use crate::{Digit, Int, IntError, Result};

impl std::fmt::Debug for Int {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Int {{ sign: {}, digits: {}, mag_hex: {:X?} }}",
               if self.sign { '-' } else { '+' }, self.width(), self.mag.as_slice())
    }
}

impl Int {
    fn valid(&self) {
        #[cfg(any(debug_assertions, release_test))]
        {
            assert_ne!(self.mag.last(), Some(0), "Int::valid - trailing zero digit in the magnitude");
            assert!(!(self.sign && self.mag.is_empty()), "Int::valid - negative zero");
        }
    }

    // strip trailing zero digits; zero is never negative.
    fn normalize(&mut self) {
        while self.mag.last() == Some(0) {
            self.mag.pop();
        }
        if self.mag.is_empty() {
            self.sign = false;
        }
        self.valid();
    }

    pub(crate) fn from_store(negative: bool, mag: DigitStore) -> Int {
        let mut n = Int { sign: negative, mag };
        n.normalize();
        n
    }

    pub fn zero() -> Int {
        Int::default()
    }

    pub fn one() -> Int {
        Int::new_digit(false, 1)
    }

    pub fn new_digit(negative: bool, d: Digit) -> Int {
        Int::from_store(negative, DigitStore::from(vec![d]))
    }

    /// Builds a value from little-endian digits; zero digits on top are dropped.
    pub fn from_parts(negative: bool, digits: Vec<Digit>) -> Int {
        Int::from_store(negative, DigitStore::from(digits))
    }

    pub fn from_le_digits(digits: Vec<Digit>) -> Int {
        Int::from_parts(false, digits)
    }

    pub(crate) fn from_u128(negative: bool, mut m: u128) -> Int {
        let mut mag = DigitStore::new();
        while m > 0 {
            mag.push(m as Digit);
            m >>= Digit::BITS;
        }
        Int::from_store(negative, mag)
    }

    /// The value as an `i128`, if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        self.valid();
        if self.width() > 4 {
            return None;
        }
        let m = self.mag.iter().rev().fold(0u128, |acc, &d| acc << Digit::BITS | d as u128);
        if self.sign {
            if m <= i128::MAX as u128 + 1 {
                Some((m as i128).wrapping_neg())
            } else {
                None
            }
        } else {
            i128::try_from(m).ok()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mag.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.sign
    }

    pub fn is_positive(&self) -> bool {
        !self.sign && !self.is_zero()
    }

    pub fn signum(&self) -> i32 {
        match (self.sign, self.is_zero()) {
            (_, true) => 0,
            (true, _) => -1,
            _ => 1,
        }
    }

    // count of digits in the magnitude
    pub fn width(&self) -> usize {
        self.mag.len()
    }

    // count of significant bits in the magnitude
    pub fn bit_width(&self) -> u64 {
        match self.mag.last() {
            None => 0,
            Some(top) => (self.width() as u64 - 1) * Digit::BITS as u64 + len_binary_digit(top) as u64,
        }
    }

    pub fn digit(&self, i: usize) -> Digit {
        assert!(i < self.width(), "Int::digit - invalid index {i} >= {}", self.width());
        self.mag.get(i)
    }

    pub fn digits(&self) -> &[Digit] {
        self.mag.as_slice()
    }

    pub(crate) fn store(&self) -> &DigitStore {
        &self.mag
    }

    /// Copy-and-swap assignment.
    pub fn assign(&mut self, other: &Int) {
        let mut tmp = other.clone();
        std::mem::swap(self, &mut tmp);
    }

    // unary plus
    pub fn pos(&self) -> Int {
        self.clone()
    }

    pub fn abs(&self) -> Int {
        Int { sign: false, mag: self.mag.clone() }
    }

    pub fn negate(&self) -> Int {
        Int::from_store(!self.sign, self.mag.clone())
    }

    // !a == -a - 1
    pub fn complement(&self) -> Int {
        self.negate().difference(&Int::one())
    }

    pub fn compare(&self, t: &Int) -> Ordering {
        self.valid();
        t.valid();
        match (self.sign, t.sign) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_mag(self.digits(), t.digits()),
            (true, true) => cmp_mag(t.digits(), self.digits()),
        }
    }

    pub fn sum(&self, t: &Int) -> Int {
        self.additive(t, false)
    }

    pub fn difference(&self, t: &Int) -> Int {
        self.additive(t, true)
    }

    // Same signs add magnitudes. Otherwise the smaller magnitude is subtracted
    // from the larger one, which also decides the sign.
    fn additive(&self, t: &Int, subtract: bool) -> Int {
        self.valid();
        t.valid();
        let t_sign = t.sign ^ subtract;
        if self.sign == t_sign {
            Int::from_store(self.sign, add_mag(self.digits(), t.digits()))
        } else {
            match cmp_mag(self.digits(), t.digits()) {
                Ordering::Greater => Int::from_store(self.sign, sub_mag(self.digits(), t.digits())),
                Ordering::Less => Int::from_store(t_sign, sub_mag(t.digits(), self.digits())),
                Ordering::Equal => Int::zero(),
            }
        }
    }

    // elementary school-book multiplication
    pub fn multiply(&self, t: &Int) -> Int {
        self.valid();
        t.valid();
        Int::from_store(self.sign ^ t.sign, mul_mag(self.digits(), t.digits()))
    }

    pub fn pow(&self, exp: u32) -> Int {
        let mut exp = exp;
        let mut base = self.clone();
        let mut acc = Int::one();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.multiply(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.multiply(&base);
            }
        }
        acc
    }

    /// Truncating division: the quotient rounds toward zero and the remainder
    /// has the sign of the dividend, so `self == q * divisor + r`.
    pub fn div_rem(&self, divisor: &Int) -> Result<(/* quotient */ Int, /* remainder */ Int)> {
        self.valid();
        divisor.valid();
        if divisor.is_zero() {
            return Err(IntError::DivideByZero);
        }
        let (q, r) = if cmp_mag(self.digits(), divisor.digits()) == Ordering::Less {
            (DigitStore::new(), self.mag.clone())
        } else if divisor.width() == 1 {
            log::debug!("div_rem - short division of {} digits", self.width());
            let (q, r) = div_rem_digit(self.digits(), divisor.digit(0));
            (q, DigitStore::from(vec![r]))
        } else {
            log::debug!("div_rem - long division of {} by {} digits", self.width(), divisor.width());
            div_rem_knuth(self.digits(), divisor.digits())
        };
        Ok((Int::from_store(self.sign ^ divisor.sign, q), Int::from_store(self.sign, r)))
    }

    pub fn checked_div(&self, divisor: &Int) -> Result<Int> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    pub fn checked_rem(&self, divisor: &Int) -> Result<Int> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    pub fn and(&self, t: &Int) -> Int {
        self.bit_operation(t, |x, y| x & y)
    }

    pub fn or(&self, t: &Int) -> Int {
        self.bit_operation(t, |x, y| x | y)
    }

    pub fn xor(&self, t: &Int) -> Int {
        self.bit_operation(t, |x, y| x ^ y)
    }

    // Both operands are widened by one digit so the top digit of their
    // two's complement form is a pure sign digit. The operator applied to the
    // sign digits gives the sign of the result.
    fn bit_operation(&self, t: &Int, op: fn(Digit, Digit) -> Digit) -> Int {
        self.valid();
        t.valid();
        let len = max(self.width(), t.width()) + 1;
        let x = self.to_complement(len);
        let y = t.to_complement(len);
        let mut r: DigitStore = x.iter().zip(y.iter()).map(|(&a, &b)| op(a, b)).collect();
        let negative = r.get(len - 1) >> (Digit::BITS - 1) == 1;
        if negative {
            negate_complement(r.as_mut_slice());
        }
        Int::from_store(negative, r)
    }

    fn to_complement(&self, len: usize) -> DigitStore {
        debug_assert!(len > self.width());
        let mut d = self.mag.clone();
        d.resize(len, 0);
        if self.sign {
            negate_complement(d.as_mut_slice());
        }
        d
    }

    // self * 2^count
    pub fn shl_bits(&self, count: usize) -> Int {
        let mut r = self.clone();
        r.shl_mut(count);
        r
    }

    // Shifts the digits in place, so a shared magnitude is copied first.
    pub fn shl_mut(&mut self, count: usize) {
        self.valid();
        if self.is_zero() {
            return;
        }
        let (digits, bits) = (count / Digit::BITS as usize, (count % Digit::BITS as usize) as u32);
        if bits > 0 {
            let mut carry: Digit = 0;
            for x in self.mag.as_mut_slice() {
                let out = *x >> (Digit::BITS - bits);
                *x = *x << bits | carry;
                carry = out;
            }
            if carry != 0 {
                self.mag.push(carry);
            }
        }
        self.mag.insert(0, digits, 0);
        self.valid();
    }

    // floor(self / 2^count); negative values round toward negative infinity.
    pub fn shr_bits(&self, count: usize) -> Int {
        let mut r = self.clone();
        r.shr_mut(count);
        r
    }

    pub fn shr_mut(&mut self, count: usize) {
        self.valid();
        let negative = self.sign;
        let (digits, bits) = (count / Digit::BITS as usize, (count % Digit::BITS as usize) as u32);
        if digits >= self.width() {
            *self = if negative { Int::new_digit(true, 1) } else { Int::zero() };
            return;
        }
        // any one-bit shifted out of a negative value moves the result one step down.
        let lost = self.digits()[..digits].iter().any(|&d| d != 0)
            || self.digit(digits) & ((1 << bits) - 1) != 0;
        self.mag.erase(0..digits);
        if bits > 0 {
            let mut carry: Digit = 0;
            for x in self.mag.as_mut_slice().iter_mut().rev() {
                let out = *x << (Digit::BITS - bits);
                *x = *x >> bits | carry;
                carry = out;
            }
        }
        self.normalize();
        if negative && lost {
            self.dec();
        }
    }

    pub fn inc(&mut self) -> &mut Int {
        *self = self.sum(&Int::one());
        self
    }

    pub fn dec(&mut self) -> &mut Int {
        *self = self.difference(&Int::one());
        self
    }

    // returns the value before the increment
    pub fn post_inc(&mut self) -> Int {
        let old = self.clone();
        self.inc();
        old
    }

    pub fn post_dec(&mut self) -> Int {
        let old = self.clone();
        self.dec();
        old
    }
}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Int) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Int) -> Ordering {
        self.compare(other)
    }
}

// Magnitude comparison; both operands in canonical form (or equally long).
pub(crate) fn cmp_mag(a: &[Digit], b: &[Digit]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

pub(crate) fn add_mag(a: &[Digit], b: &[Digit]) -> DigitStore {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut sum = DigitStore::new();
    let mut carry: Digit = 0;
    for (i, &x) in long.iter().enumerate() {
        let y = short.get(i).copied().unwrap_or(0);
        let s: Digit;
        (s, carry) = add_with_carry(x, y, carry);
        sum.push(s);
    }
    if carry != 0 {
        sum.push(carry);
    }
    sum
}

// pre-condition: a >= b
pub(crate) fn sub_mag(a: &[Digit], b: &[Digit]) -> DigitStore {
    debug_assert_ne!(cmp_mag(a, b), Ordering::Less, "sub_mag - minuend smaller than subtrahend");
    let mut diff = DigitStore::new();
    let mut borrow: Digit = 0;
    for (i, &x) in a.iter().enumerate() {
        let y = b.get(i).copied().unwrap_or(0);
        let d: Digit;
        (d, borrow) = sub_with_borrow(x, y, borrow);
        diff.push(d);
    }
    debug_assert_eq!(borrow, 0);
    diff
}

// a -= b in place over the full length of 'a'; returns the outgoing borrow.
fn sub_in_place(a: &mut [Digit], b: &[Digit]) -> Digit {
    debug_assert!(b.len() <= a.len());
    let mut borrow: Digit = 0;
    for (i, x) in a.iter_mut().enumerate() {
        let y = b.get(i).copied().unwrap_or(0);
        (*x, borrow) = sub_with_borrow(*x, y, borrow);
    }
    borrow
}

// two's complement negation over the full width: !d + 1
fn negate_complement(d: &mut [Digit]) {
    let mut carry: Digit = 1;
    for x in d.iter_mut() {
        (*x, carry) = add_with_carry(!*x, 0, carry);
    }
}

// acc += a * x
// returns the carry out of the most significant column.
pub(crate) fn add_mul_row(a: &[Digit], x: Digit, acc: &mut [Digit]) -> Digit {
    debug_assert_eq!(a.len(), acc.len(), "add_mul_row - length mismatch.");
    let mut carry: Digit = 0;
    for (&d, r) in a.iter().zip(acc.iter_mut()) {
        (*r, carry) = mul_add_carry(d, x, *r, carry);
    }
    carry
}

pub(crate) fn mul_mag(a: &[Digit], b: &[Digit]) -> DigitStore {
    if a.is_empty() || b.is_empty() {
        return DigitStore::new();
    }
    // allocate space for the the product accumulator.
    let mut prod = DigitStore::from_elem(0, a.len() + b.len());
    let acc = prod.as_mut_slice();
    for (i, &x) in a.iter().enumerate() {
        // the carry lands in the column 'right' of i + b.len() - 1
        let carry = add_mul_row(b, x, &mut acc[i..i + b.len()]);
        acc[i + b.len()] = carry;
    }
    prod
}

// a * 2^s for s < Digit::BITS; the result has one more digit than 'a'.
fn shl_mag(a: &[Digit], s: u32) -> DigitStore {
    debug_assert!(s < Digit::BITS);
    let mut r = DigitStore::new();
    let mut carry: Digit = 0;
    for &x in a {
        if s == 0 {
            r.push(x);
        } else {
            r.push(x << s | carry);
            carry = x >> (Digit::BITS - s);
        }
    }
    r.push(carry);
    r
}

// a / 2^s for s < Digit::BITS
fn shr_mag(a: &[Digit], s: u32) -> DigitStore {
    debug_assert!(s < Digit::BITS);
    if s == 0 {
        return DigitStore::from(a);
    }
    (0..a.len())
        .map(|i| {
            let hi = a.get(i + 1).map_or(0, |&next| next << (Digit::BITS - s));
            a[i] >> s | hi
        })
        .collect()
}

// Short division: one pass from the most significant digit down, carrying
// the running remainder into the next two-digit dividend.
pub(crate) fn div_rem_digit(u: &[Digit], d: Digit) -> (DigitStore, Digit) {
    assert!(d > 0, "div_rem_digit - division by zero error");
    let mut q = DigitStore::new();
    let mut r: Digit = 0;
    for &x in u.iter().rev() {
        let qd: Digit;
        (qd, r) = div_wide(r, x, d);
        q.push(qd);
    }
    q.reverse();
    (q, r)
}

// Knuth, TAOCP vol. 2, 4.3.1, Algorithm D.
// pre-conditions:
// v is canonical, v.len() > 1, u.len() >= v.len()
pub(crate) fn div_rem_knuth(u: &[Digit], v: &[Digit]) -> (/* quotient */ DigitStore, /* remainder */ DigitStore) {
    let m = u.len();
    let n = v.len();
    assert!(n > 1 && m >= n && v[n - 1] != 0);

    // D1. normalize so the leading divisor digit has its top bit set.
    let s = leading_zeroes_count(v[n - 1]);
    let mut vn = shl_mag(v, s);
    let top = vn.pop();
    debug_assert_eq!(top, Some(0));
    debug_assert_eq!(vn.get(n - 1) >> (Digit::BITS - 1), 1);
    // the dividend gains one digit here: u[m] in Knuth's notation.
    let mut un = shl_mag(u, s);
    let vn = vn.as_slice();

    let mut quotient = DigitStore::from_elem(0, m - n + 1);
    let mut product = DigitStore::new();
    for j in (0..=m - n).rev() {
        // D3. trial quotient digit from the top three digits of the window.
        let mut q = trial_digit(un[j + n], un[j + n - 1], un[j + n - 2], vn[n - 1], vn[n - 2]);
        log::trace!("\tD3. trial quotient digit {j} = {q:#x}");

        // D4. multiply; the trial digit is at most one too large.
        product.clear();
        product.resize(n, 0);
        let carry = add_mul_row(vn, q, product.as_mut_slice());
        product.push(carry);
        while cmp_mag(product.as_slice(), &un.as_slice()[j..=j + n]) == Ordering::Greater {
            log::trace!("\tD6. add-back, quotient digit {j}");
            q -= 1;
            sub_in_place(product.as_mut_slice(), vn);
        }
        // ... and subtract.
        let borrow = sub_in_place(&mut un.as_mut_slice()[j..=j + n], product.as_slice());
        debug_assert_eq!(borrow, 0);

        // D5.
        quotient[j] = q;

        // the window's top digit is now zero; drop it.
        debug_assert_eq!(un.last(), Some(0));
        un.pop();
    }
    // D8. un-normalize the remainder.
    let remainder = shr_mag(un.as_slice(), s);
    (quotient, remainder)
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Int {
            fn from(n: $t) -> Int {
                Int::from_u128(false, n as u128)
            }
        }
    )*}
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Int {
            fn from(n: $t) -> Int {
                Int::from_u128(n < 0, (n as i128).unsigned_abs())
            }
        }
    )*}
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);


#[cfg(not(debug_assertions))]
#[cfg(test)]
mod release {
    use crate::Int;

    #[test]
    fn int4k_div_rem() {
        // (2^4096 - 1) == (2^2048 - 1) * (2^2048 + 1)
        let n: Int = Int::one().shl_bits(4096) - Int::one();
        let d: Int = Int::one().shl_bits(2048) - Int::one();
        let (q, r) = n.div_rem(&d).unwrap();
        assert_eq!(q, Int::one().shl_bits(2048) + Int::one());
        assert!(r.is_zero());
        assert_eq!(q.bit_width(), 2049);
        assert_eq!((&n + Int::one()) >> 4095usize, Int::from(2));
    }
}
