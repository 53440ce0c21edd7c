use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::LedgerResult;

/// Maximum length of an IBAN
const MAX_LEN: usize = 34;

/// Number of digits following the prefix in allocated IBANs
const ALLOCATED_DIGITS: usize = 19;

/// External, globally unique account identifier
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iban(String);

impl Iban {
    /// Normalizes (spaces removed, upper-cased) and validates an IBAN-like string:
    /// two letters, two check digits, then alphanumerics, at most 34 characters.
    pub fn parse(raw: &str) -> LedgerResult<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let bytes = normalized.as_bytes();

        let well_formed = bytes.len() > 4
            && bytes.len() <= MAX_LEN
            && bytes[..2].iter().all(u8::is_ascii_uppercase)
            && bytes[2..4].iter().all(u8::is_ascii_digit)
            && bytes[4..].iter().all(u8::is_ascii_alphanumeric);

        if !well_formed {
            return Err(LedgerError::Validation(format!("Malformed IBAN: {raw:?}")));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

/// Deterministic IBAN source: a fixed prefix followed by a zero-padded sequence number.
///
/// Candidates are never trusted to be unique; the store rejects a collision and the caller
/// asks for the next candidate.
#[derive(Debug)]
pub struct IbanAllocator {
    prefix: String,
    next: AtomicU64,
}

impl IbanAllocator {
    pub fn new(prefix: &str) -> LedgerResult<Self> {
        let allocator = Self {
            prefix: prefix.to_string(),
            next: AtomicU64::new(1),
        };

        // the prefix must yield valid IBANs
        Iban::parse(&allocator.format(0))?;

        Ok(allocator)
    }

    pub fn next_candidate(&self) -> Iban {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed);
        Iban(self.format(sequence))
    }

    fn format(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = ALLOCATED_DIGITS)
    }
}
