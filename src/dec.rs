/*
    Copyright 2024 M. Devi Prasad (dp@web3pleb.org)

    Licensed under the Apache License, Version 2.0 (the "License");
    you may not use this file except in compliance with the License.
    You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

use std::fmt::Formatter;
use std::str::FromStr;

use crate::bits::mul_add_carry;
use crate::int::div_rem_digit;
use crate::store::DigitStore;
use crate::{Digit, Int, IntError, Result};

pub fn val(c: u8) -> std::result::Result<u8, char> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        _ => Err(c as char),
    }
}

impl Int {
    // largest power of ten that fits in a digit, and its exponent.
    pub const DECIMAL_CHUNK: Digit = 1_000_000_000;
    pub const DECIMAL_CHUNK_WIDTH: usize = 9;

    /// Parses `[+-]?[0-9]+`.
    ///
    /// The magnitude accumulates as `acc * 10^k + chunk` over runs of up to
    /// `DECIMAL_CHUNK_WIDTH` decimal digits. The sign is applied last, so `"-0"` is zero.
    pub fn parse(text: &str) -> Result<Int> {
        let bytes = text.as_bytes();
        let (negative, start) = match bytes.first() {
            Some(b'-') => (true, 1),
            Some(b'+') => (false, 1),
            _ => (false, 0),
        };
        if start == bytes.len() {
            log::error!("dec - reject {text:?}, no digits");
            return Err(IntError::Empty { text: text.to_string() });
        }

        let mut mag = DigitStore::new();
        for (k, chunk) in bytes[start..].chunks(Int::DECIMAL_CHUNK_WIDTH).enumerate() {
            let mut n: Digit = 0;
            for (i, &c) in chunk.iter().enumerate() {
                match val(c) {
                    Ok(v) => n = n * 10 + v as Digit,
                    Err(lead) => {
                        let position = start + k * Int::DECIMAL_CHUNK_WIDTH + i;
                        // everything before position is ASCII, so it is a char boundary.
                        let found = text[position..].chars().next().unwrap_or(lead);
                        log::error!("dec - reject '{found}' at {position} in {text:?}");
                        return Err(IntError::InvalidDigit { text: text.to_string(), position, found });
                    }
                }
            }
            // acc = acc * 10^len + n
            let scale = (10 as Digit).pow(chunk.len() as u32);
            let mut carry = n;
            for d in mag.as_mut_slice() {
                (*d, carry) = mul_add_carry(*d, scale, 0, carry);
            }
            if carry != 0 {
                mag.push(carry);
            }
        }
        Ok(Int::from_store(negative, mag))
    }

    pub fn dec_str(&self) -> String {
        let mut chunks: Vec<Digit> = Vec::new();
        let mut rest = self.store().clone();
        while !rest.is_empty() {
            let (q, r) = div_rem_digit(rest.as_slice(), Int::DECIMAL_CHUNK);
            chunks.push(r);
            rest = q;
            while rest.last() == Some(0) {
                rest.pop();
            }
        }
        let mut s = String::with_capacity(chunks.len() * Int::DECIMAL_CHUNK_WIDTH + 1);
        if self.is_negative() {
            s.push('-');
        }
        match chunks.split_last() {
            None => s.push('0'),
            Some((top, lower)) => {
                s.push_str(&top.to_string());
                for c in lower.iter().rev() {
                    s.push_str(&format!("{c:0width$}", width = Int::DECIMAL_CHUNK_WIDTH));
                }
            }
        }
        s
    }
}

impl std::fmt::Display for Int {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.dec_str();
        f.pad_integral(!self.is_negative(), "", s.trim_start_matches('-'))
    }
}

impl FromStr for Int {
    type Err = IntError;

    fn from_str(s: &str) -> Result<Int> {
        Int::parse(s)
    }
}

impl TryFrom<&str> for Int {
    type Error = IntError;

    fn try_from(s: &str) -> Result<Int> {
        Int::parse(s)
    }
}
