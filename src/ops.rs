//! Operator traits for `Int`.
//!
//! Every binary operator is available for all owned/borrowed operand pairs and
//! for a native integer on the right, together with its compound form. The
//! work is done by the by-reference methods in `int.rs`; `/` and `%` panic on a
//! zero divisor the way primitive integers do (use `Int::checked_div` and
//! friends to get an `IntError` instead).

use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign, Mul,
    MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::{Int, Result};

fn or_panic(r: Result<Int>) -> Int {
    r.unwrap_or_else(|e| panic!("{e}"))
}

fn quotient(a: &Int, b: &Int) -> Int {
    or_panic(a.checked_div(b))
}

fn remainder(a: &Int, b: &Int) -> Int {
    or_panic(a.checked_rem(b))
}

macro_rules! forward_all_binop {
    (impl $imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident => $fun:path) => {
        impl $imp<&Int> for &Int {
            type Output = Int;

            #[inline]
            fn $method(self, rhs: &Int) -> Int {
                $fun(self, rhs)
            }
        }

        impl $imp<Int> for &Int {
            type Output = Int;

            #[inline]
            fn $method(self, rhs: Int) -> Int {
                $fun(self, &rhs)
            }
        }

        impl $imp<&Int> for Int {
            type Output = Int;

            #[inline]
            fn $method(self, rhs: &Int) -> Int {
                $fun(&self, rhs)
            }
        }

        impl $imp<Int> for Int {
            type Output = Int;

            #[inline]
            fn $method(self, rhs: Int) -> Int {
                $fun(&self, &rhs)
            }
        }

        // the result is computed before the receiver is replaced, so a panic
        // leaves the receiver as it was.
        impl $assign_imp<&Int> for Int {
            #[inline]
            fn $assign_method(&mut self, rhs: &Int) {
                *self = $fun(self, rhs);
            }
        }

        impl $assign_imp<Int> for Int {
            #[inline]
            fn $assign_method(&mut self, rhs: Int) {
                *self = $fun(self, &rhs);
            }
        }
    };
}

macro_rules! forward_native_binop {
    (impl $imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident => $fun:path; $($t:ty),*) => {$(
        impl $imp<$t> for &Int {
            type Output = Int;

            #[inline]
            fn $method(self, rhs: $t) -> Int {
                $fun(self, &Int::from(rhs))
            }
        }

        impl $imp<$t> for Int {
            type Output = Int;

            #[inline]
            fn $method(self, rhs: $t) -> Int {
                $fun(&self, &Int::from(rhs))
            }
        }

        impl $assign_imp<$t> for Int {
            #[inline]
            fn $assign_method(&mut self, rhs: $t) {
                *self = $fun(self, &Int::from(rhs));
            }
        }
    )*};
}

macro_rules! impl_binop {
    (impl $imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident => $fun:path) => {
        forward_all_binop!(impl $imp, $method, $assign_imp, $assign_method => $fun);
        forward_native_binop!(impl $imp, $method, $assign_imp, $assign_method => $fun; i32, u32, i64, u64);
    };
}

impl_binop!(impl Add, add, AddAssign, add_assign => Int::sum);
impl_binop!(impl Sub, sub, SubAssign, sub_assign => Int::difference);
impl_binop!(impl Mul, mul, MulAssign, mul_assign => Int::multiply);
impl_binop!(impl Div, div, DivAssign, div_assign => quotient);
impl_binop!(impl Rem, rem, RemAssign, rem_assign => remainder);
impl_binop!(impl BitAnd, bitand, BitAndAssign, bitand_assign => Int::and);
impl_binop!(impl BitOr, bitor, BitOrAssign, bitor_assign => Int::or);
impl_binop!(impl BitXor, bitxor, BitXorAssign, bitxor_assign => Int::xor);

macro_rules! impl_shift {
    ($($t:ty),*) => {$(
        impl Shl<$t> for Int {
            type Output = Int;

            fn shl(mut self, count: $t) -> Int {
                self.shl_mut(count as usize);
                self
            }
        }

        impl Shl<$t> for &Int {
            type Output = Int;

            fn shl(self, count: $t) -> Int {
                self.shl_bits(count as usize)
            }
        }

        impl ShlAssign<$t> for Int {
            fn shl_assign(&mut self, count: $t) {
                self.shl_mut(count as usize);
            }
        }

        impl Shr<$t> for Int {
            type Output = Int;

            fn shr(mut self, count: $t) -> Int {
                self.shr_mut(count as usize);
                self
            }
        }

        impl Shr<$t> for &Int {
            type Output = Int;

            fn shr(self, count: $t) -> Int {
                self.shr_bits(count as usize)
            }
        }

        impl ShrAssign<$t> for Int {
            fn shr_assign(&mut self, count: $t) {
                self.shr_mut(count as usize);
            }
        }
    )*};
}

impl_shift!(u32, usize);

impl Neg for Int {
    type Output = Int;

    fn neg(mut self) -> Int {
        if !self.is_zero() {
            self.sign = !self.sign;
        }
        self
    }
}

impl Neg for &Int {
    type Output = Int;

    fn neg(self) -> Int {
        self.negate()
    }
}

impl Not for Int {
    type Output = Int;

    fn not(self) -> Int {
        self.complement()
    }
}

impl Not for &Int {
    type Output = Int;

    fn not(self) -> Int {
        self.complement()
    }
}

impl Sum for Int {
    fn sum<I: Iterator<Item = Int>>(iter: I) -> Int {
        iter.fold(Int::zero(), |acc, n| acc + n)
    }
}

impl<'a> Sum<&'a Int> for Int {
    fn sum<I: Iterator<Item = &'a Int>>(iter: I) -> Int {
        iter.fold(Int::zero(), |acc, n| acc + n)
    }
}

impl Product for Int {
    fn product<I: Iterator<Item = Int>>(iter: I) -> Int {
        iter.fold(Int::one(), |acc, n| acc * n)
    }
}

impl<'a> Product<&'a Int> for Int {
    fn product<I: Iterator<Item = &'a Int>>(iter: I) -> Int {
        iter.fold(Int::one(), |acc, n| acc * n)
    }
}

#[cfg(test)]
mod ops_test {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use crate::init_logger;
    use crate::Int;

    fn init() {
        init_logger(true)
    }

    fn int(s: &str) -> Int {
        s.parse().unwrap()
    }

    #[test]
    fn operand_forms_agree() {
        init();
        let a = int("-98765432109876543210");
        let b = int("1234567890123");
        let sum = &a + &b;
        assert_eq!(a.clone() + b.clone(), sum);
        assert_eq!(a.clone() + &b, sum);
        assert_eq!(&a + b.clone(), sum);
        let mut c = a.clone();
        c += &b;
        assert_eq!(c, sum);
        let mut c = a.clone();
        c += b.clone();
        assert_eq!(c, sum);
        assert_eq!(sum, int("-98765430875308653087"));
    }

    #[test]
    fn arithmetic_operators() {
        init();
        let a = int("123456789012345678901234567890");
        assert_eq!(&a + 1, int("123456789012345678901234567891"));
        assert_eq!(&a - &a, Int::zero());
        assert_eq!(&a + -&a, Int::zero());
        assert_eq!(Int::from(6) * -7, Int::from(-42));
        assert_eq!(int("1000000000000000000000") / int("1000000000"), int("1000000000000"));
        assert_eq!(int("1000000000000000000000") % int("1000000000"), Int::zero());
        assert_eq!(Int::from(-7) % Int::from(3), Int::from(-1));
        assert_eq!(Int::from(-7) / 3, Int::from(-2));
        assert_eq!(Int::from(7) % -3, Int::from(1));
    }

    #[test]
    fn bitwise_and_shift_operators() {
        init();
        assert_eq!(Int::from(5) & Int::from(3), Int::from(1));
        assert_eq!(Int::from(5) | 3, Int::from(7));
        assert_eq!(Int::from(5) ^ 3u32, Int::from(6));
        assert_eq!(!Int::from(0), Int::from(-1));
        assert_eq!(!&Int::from(-8), Int::from(7));
        assert_eq!(Int::from(-1) >> 1u32, Int::from(-1));
        assert_eq!(&Int::from(1) << 100usize, Int::from(2).pow(100));
        assert_eq!(Int::from(-1) << 32u32, Int::from(-(1i64 << 32)));
        assert_eq!(-Int::zero(), Int::zero());
        assert!(!(-Int::zero()).is_negative());
    }

    #[test]
    fn compound_assignment() {
        init();
        let mut n = Int::from(10);
        n -= 15;
        assert_eq!(n, Int::from(-5));
        n *= Int::from(-4);
        assert_eq!(n, Int::from(20));
        n /= 6u64;
        assert_eq!(n, Int::from(3));
        n %= 2i64;
        assert_eq!(n, Int::from(1));
        n <<= 64u32;
        assert_eq!(n.digits(), [0, 0, 1]);
        n >>= 63usize;
        assert_eq!(n, Int::from(2));
        n |= 5;
        assert_eq!(n, Int::from(7));
        n &= 6;
        assert_eq!(n, Int::from(6));
        n ^= -1;
        assert_eq!(n, Int::from(-7));
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn div_by_zero_panics() {
        init();
        let _ = Int::from(1) / Int::zero();
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn rem_by_zero_panics() {
        init();
        let _ = &Int::from(1) % 0;
    }

    #[test]
    fn failed_compound_assignment_keeps_receiver() {
        init();
        let mut n = int("-123456789012345678901234567890");
        let r = catch_unwind(AssertUnwindSafe(|| n /= Int::zero()));
        assert!(r.is_err());
        assert_eq!(n, int("-123456789012345678901234567890"));
        let r = catch_unwind(AssertUnwindSafe(|| n %= 0u32));
        assert!(r.is_err());
        assert_eq!(n, int("-123456789012345678901234567890"));
    }

    #[test]
    fn shift_assign_copies_shared_store() {
        init();
        let x = int("123456789012345678901234567890");
        let mut y = x.clone();
        assert!(x.store().is_shared());
        y <<= 3u32;
        assert!(!x.store().is_shared());
        assert_eq!(x, int("123456789012345678901234567890"));
        assert_eq!(y, &x * 8);
        let mut z = x.clone();
        z >>= 1u32;
        assert_eq!(x, int("123456789012345678901234567890"));
        assert_eq!(z, int("61728394506172839450617283945"));
    }

    #[test]
    fn sum_and_product() {
        init();
        let v: Vec<Int> = (1..=30).map(Int::from).collect();
        assert_eq!(v.iter().sum::<Int>(), Int::from(465));
        assert_eq!(v.into_iter().product::<Int>(), int("265252859812191058636308480000000"));
    }
}
