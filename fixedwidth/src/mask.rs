//! Bit masks.  These are plain functions of their arguments; the
//! width engine in [`crate::value`] and the radix formatter both use
//! them to keep values within their declared width.

/// The narrowest width a value may have.
pub const MIN_WIDTH: u32 = 1;

/// The widest width a value may have.
pub const MAX_WIDTH: u32 = u64::BITS;

/// Returns a mask having the `width` least-significant bits set.
/// `width` is clamped to `MIN_WIDTH..=MAX_WIDTH`, so `mask(0)` is 1
/// and `mask(100)` is `u64::MAX`.
pub const fn mask(width: u32) -> u64 {
    let width = if width < MIN_WIDTH {
        MIN_WIDTH
    } else if width > MAX_WIDTH {
        MAX_WIDTH
    } else {
        width
    };
    // A shift by 64 would overflow.
    if width == MAX_WIDTH {
        u64::MAX
    } else {
        (1_u64 << width) - 1
    }
}

/// Returns a mask of `width` contiguous ones whose least-significant
/// bit is bit `lsb`.  `lsb` is clamped to 63 and the field is cut
/// short so that it never extends past bit 63.
pub const fn mask_field(lsb: u32, width: u32) -> u64 {
    let lsb = if lsb >= MAX_WIDTH { MAX_WIDTH - 1 } else { lsb };
    if lsb == 0 {
        return mask(width);
    }
    let width = if lsb.saturating_add(width) > MAX_WIDTH {
        MAX_WIDTH - lsb
    } else {
        width
    };
    mask(width) << lsb
}
