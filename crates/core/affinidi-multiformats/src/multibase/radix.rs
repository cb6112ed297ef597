//! Big-integer radix codec
//!
//! base8, base10, base36 and base58btc do not align with byte boundaries, so
//! the input is treated as one big-endian unsigned integer and converted digit
//! by digit. Leading `0x00` bytes carry no numeric value and would be lost, so
//! each one is written as a leading zero symbol and restored on decode. This is
//! done for every radix, not just base58, so all of them round-trip exactly.
//!
//! Conversion is quadratic in the input length.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use super::codec::{BaseCodec, Case};
use crate::{EncodingError, error::Result};

const INVALID: u8 = u8::MAX;

const fn symbol_table(alphabet: &[u8]) -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < alphabet.len() {
        table[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Arbitrary-precision radix codec over an ASCII alphabet
#[derive(Debug)]
pub struct BigRadix {
    name: &'static str,
    alphabet: &'static [u8],
    values: [u8; 128],
    /// Output case. Decoding is case-insensitive when set.
    case: Option<Case>,
}

impl BigRadix {
    /// `alphabet` must be ASCII, at most 128 symbols, and in lower case when
    /// `case` is set.
    pub const fn new(name: &'static str, alphabet: &'static str, case: Option<Case>) -> Self {
        let alphabet = alphabet.as_bytes();
        Self {
            name,
            alphabet,
            values: symbol_table(alphabet),
            case,
        }
    }

    pub fn radix(&self) -> u32 {
        self.alphabet.len() as u32
    }

    fn zero_symbol(&self) -> u8 {
        self.alphabet[0]
    }

    fn value_of(&self, symbol: u8) -> Option<u32> {
        match self.values.get(symbol as usize) {
            Some(&value) if value != INVALID => Some(value as u32),
            _ => None,
        }
    }
}

impl BaseCodec for BigRadix {
    fn name(&self) -> &'static str {
        self.name
    }

    fn encode(&self, data: &[u8]) -> String {
        if data.is_empty() {
            return String::new();
        }

        let zeros = data.iter().take_while(|&&b| b == 0).count();
        let radix = BigUint::from(self.radix());
        let mut n = BigUint::from_bytes_be(&data[zeros..]);

        // Least significant digit first, reversed at the end
        let mut digits = Vec::with_capacity(data.len() * 2);
        while !n.is_zero() {
            let (quotient, remainder) = n.div_rem(&radix);
            let digit = remainder.to_u32_digits().first().copied().unwrap_or(0);
            digits.push(self.alphabet[digit as usize]);
            n = quotient;
        }
        digits.extend(std::iter::repeat_n(self.zero_symbol(), zeros));
        digits.reverse();

        let encoded: String = digits.into_iter().map(char::from).collect();
        match self.case {
            Some(case) => case.apply(encoded),
            None => encoded,
        }
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let text = match self.case {
            Some(_) => Case::Lower.normalize(text),
            None => text.into(),
        };
        let symbols = text.as_bytes();

        let zeros = symbols
            .iter()
            .take_while(|&&s| s == self.zero_symbol())
            .count();
        let radix = self.radix();

        let mut n = BigUint::zero();
        for (index, &symbol) in symbols.iter().enumerate().skip(zeros) {
            let value = self.value_of(symbol).ok_or_else(|| {
                EncodingError::invalid(self.name, format!("invalid symbol at index {index}"))
            })?;
            n = n * radix + value;
        }

        let mut out = vec![0u8; zeros];
        if zeros < symbols.len() {
            out.extend(n.to_bytes_be());
        }
        Ok(out)
    }
}
