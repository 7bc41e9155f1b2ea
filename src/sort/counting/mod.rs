pub mod lsd_string;
pub mod msd_string;

/// One class for "past the end of the string" plus one per byte value.
pub(crate) const RADIX: usize = 257;

/// Class of the byte at position `d`: 0 when `s` is shorter, else byte + 1.
pub(crate) fn char_at(s: &str, d: usize) -> usize {
    s.as_bytes().get(d).map_or(0, |&b| b as usize + 1)
}
