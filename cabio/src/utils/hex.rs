//! Hexadecimal helpers used for card ID files and debug output.
//!
//! Card ID files hold two-digit uppercase hex pairs separated by spaces. The
//! parser is lenient about separators: pairs may be spaced, contiguous or
//! split across lines.

use std::fmt::Write;

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Convert a byte slice to uppercase hex pairs separated by single spaces.
///
/// Example: `&[0xde, 0xad]` -> `"DE AD"`
pub fn bytes_to_hex_spaced_upper(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Parse exactly `count` leading hex byte pairs from `s`.
///
/// Whitespace between pairs is skipped. Content after the last pair is
/// ignored. Returns an error message when fewer than `count` valid pairs are
/// present.
pub fn parse_hex_pairs(s: &str, count: usize) -> Result<Vec<u8>, String> {
    let mut digits = s.chars().filter(|c| !c.is_whitespace());
    let mut out = Vec::with_capacity(count);

    for i in 0..count {
        let (hi, lo) = match (digits.next(), digits.next()) {
            (Some(hi), Some(lo)) => (hi, lo),
            _ => return Err(format!("expected {} hex pairs, found {}", count, i)),
        };
        let hi = hi
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}' in pair {}", hi, i))?;
        let lo = lo
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}' in pair {}", lo, i))?;
        out.push(((hi << 4) | lo) as u8);
    }

    Ok(out)
}
