/// Multiply an 8-bit value by an 8.8 fixed-point factor
///
/// `256` means 1.0. Factors above `256` scale up and saturate at 255.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn mult8(value: u8, multiplier: u16) -> u8 {
    let scaled = (value as u32 * multiplier as u32) >> 8;
    if scaled > u8::MAX as u32 {
        u8::MAX
    } else {
        scaled as u8
    }
}

/// Add two 8-bit values, clipping the result at 255
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Fractional complement of an 8.8 remainder (`256 - fraction`)
///
/// Always in `1..=256`, so it can be fed straight into [`mult8`].
#[inline]
pub const fn complement8(fraction: u8) -> u16 {
    256 - fraction as u16
}
