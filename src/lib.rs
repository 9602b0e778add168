use std::io::Write;
use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

use crate::store::DigitStore;

pub use crate::error::{IntError, Result};

/// Environment variable holding an `env_logger` filter spec, e.g. `COWINT_LOG=trace`.
pub const LOG_ENV: &str = "COWINT_LOG";

pub fn init_logger(is_test: bool) {
    let _ = Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                     "{} [{}] - {}",
                     Local::now().format("%Y-%m-%dT%H:%M:%S"),
                     record.level(),
                     record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_env(LOG_ENV)
        .is_test(is_test)
        .try_init();
}

pub type Digit = u32;
// wide enough for a digit product plus two digit-sized addends.
pub type DoubleDigit = u64;

/// Arbitrary-precision signed integer.
///
/// Sign-magnitude form. The magnitude is a little-endian sequence of base 2^32
/// digits with no trailing (most-significant) zero digits; zero has an empty
/// magnitude and is never negative. Every operation restores this canonical form.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Int {
    // true for negative values.
    sign: bool,
    mag: DigitStore,
}

pub mod bits;
pub mod dec;
pub mod error;
pub mod int;
pub mod ops;
pub mod store;

#[cfg(test)]
mod props;
