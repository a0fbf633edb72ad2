//! Column label codec.
//!
//! Column labels are bijective base-26 numerals with no zero digit:
//! `A..Z` are 1..26, `AA` is 27 and so on. Indices are 0-indexed.

use crate::error::{ReferenceError, Result};

/// Convert column label (A, B, ..., Z, AA, AB, ...) to index (0-indexed)
///
/// Labels are case-insensitive. The codec imposes no upper bound: a label
/// too long to fit saturates at `usize::MAX`, which is out of bounds for any
/// table.
pub fn col_from_label(label: &str) -> Result<usize> {
    if label.is_empty() {
        return Err(ReferenceError::MalformedLabel {
            label: label.to_string(),
        });
    }

    let mut col: usize = 0;

    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(ReferenceError::MalformedLabel {
                label: label.to_string(),
            });
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        col = col.saturating_mul(26).saturating_add(digit);
    }

    Ok(col - 1)
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: usize) -> String {
    let mut label = String::new();
    let mut n = col as u128 + 1; // 1-indexed for calculation

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}
