// cabio/src/protocol/checksum.rs

/// Compute the LED board frame checksum: the unsigned 8-bit sum of every
/// byte after the sync byte, up to but excluding the checksum itself.
pub fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}
