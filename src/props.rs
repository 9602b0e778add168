// Property tests: Int against i128 on word-sized operands, and the algebraic
// identities on multi-digit operands.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::{Digit, Int};

fn arb_int() -> impl Strategy<Value = Int> {
    (any::<bool>(), vec(any::<Digit>(), 0..8)).prop_map(|(negative, digits)| Int::from_parts(negative, digits))
}

fn arb_nonzero_int() -> impl Strategy<Value = Int> {
    arb_int().prop_filter("divisor must be nonzero", |n| !n.is_zero())
}

proptest! {
    #[test]
    fn matches_i128_arithmetic(a in any::<i64>(), b in any::<i64>()) {
        let (x, y) = (Int::from(a), Int::from(b));
        let (a, b) = (a as i128, b as i128);
        prop_assert_eq!(&x + &y, Int::from(a + b));
        prop_assert_eq!(&x - &y, Int::from(a - b));
        prop_assert_eq!(&x * &y, Int::from(a * b));
        prop_assert_eq!(&x & &y, Int::from(a & b));
        prop_assert_eq!(&x | &y, Int::from(a | b));
        prop_assert_eq!(&x ^ &y, Int::from(a ^ b));
        prop_assert_eq!(!&x, Int::from(!a));
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
        if b != 0 {
            prop_assert_eq!(&x / &y, Int::from(a / b));
            prop_assert_eq!(&x % &y, Int::from(a % b));
        }
    }

    #[test]
    fn matches_i128_shifts(a in any::<i64>(), n in 0u32..64) {
        let x = Int::from(a);
        prop_assert_eq!(&x << n, Int::from((a as i128) << n));
        prop_assert_eq!(&x >> n, Int::from((a as i128) >> n));
    }

    #[test]
    fn decimal_round_trip(a in any::<i128>()) {
        let s = a.to_string();
        let x: Int = s.parse().unwrap();
        prop_assert_eq!(x.to_string(), s);
        prop_assert_eq!(x.to_i128(), Some(a));
    }

    #[test]
    fn decimal_round_trip_big(x in arb_int()) {
        let s = x.to_string();
        prop_assert_eq!(s.parse::<Int>().unwrap(), x);
    }

    #[test]
    fn additive_identities(a in arb_int(), b in arb_int(), c in arb_int()) {
        prop_assert_eq!(&a + Int::zero(), a.clone());
        prop_assert_eq!(&a - &a, Int::zero());
        prop_assert_eq!(&a + -&a, Int::zero());
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!((&a + &b) + &c, &a + (&b + &c));
        prop_assert_eq!(&a * &b, &b * &a);
        prop_assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
    }

    #[test]
    fn division_identity(a in arb_int(), b in arb_nonzero_int()) {
        let (q, r) = a.div_rem(&b).unwrap();
        prop_assert_eq!(&q * &b + &r, a.clone());
        prop_assert!(r.abs() < b.abs());
        prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());
    }

    #[test]
    fn exact_division(a in arb_int(), b in arb_nonzero_int()) {
        let p = &a * &b;
        prop_assert_eq!(&p / &b, a);
        prop_assert_eq!(&p % &b, Int::zero());
    }

    #[test]
    fn bitwise_identities(a in arb_int(), b in arb_int()) {
        prop_assert_eq!((&a & &b) | (&a ^ &b), &a | &b);
        prop_assert_eq!(!!a.clone(), a.clone());
        prop_assert_eq!(&a ^ &a, Int::zero());
        prop_assert_eq!(&a & !&a, Int::zero());
        prop_assert_eq!(!&a, -&a - 1);
    }

    #[test]
    fn shift_identities(a in arb_int(), n in 0usize..200) {
        let p = Int::from(2).pow(n as u32);
        prop_assert_eq!(&a << n, &a * &p);
        // floor division
        let (q, r) = a.div_rem(&p).unwrap();
        let floor = if r.is_negative() { q - 1 } else { q };
        prop_assert_eq!(&a >> n, floor);
    }

    #[test]
    fn clone_is_isolated(a in arb_int(), b in arb_int()) {
        let before = a.to_string();
        let mut y = a.clone();
        y += &b;
        y <<= 7u32;
        y.inc();
        prop_assert_eq!(a.to_string(), before);
    }
}
