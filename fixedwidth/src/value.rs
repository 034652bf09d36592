//! `FixedWidthInteger` is an integer of between 1 and 64 bits.  The
//! bits are held in a `u64`; the declared width says how many of the
//! least-significant bits are part of the value.  Construction keeps
//! the magnitude exactly as given, so a freshly built value may carry
//! bits above its width; formatting and [`FixedWidthInteger::magnitude_at`]
//! ignore them.  Every operation which changes a value, or which
//! produces a new value from one, leaves no bit above the width set.
//!
//! A value may be flagged as signed, meaning that the bits are a
//! two's complement quantity.  How signed values should be widened
//! (sign extension) and saturated (clamping to the signed range) has
//! not been settled, so those conversions are refused rather than
//! quietly performed as though the value were unsigned.

use std::cmp::Ordering;
use std::fmt::{self, Binary, Debug, Display, Formatter, UpperHex};
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Not, Shl, Shr, Sub};

use serde::Serialize;
use tracing::{event, Level};

use super::error::Error;
use super::mask::{mask, mask_field, MAX_WIDTH, MIN_WIDTH};
use super::radix::{self, Radix};


fn check_width(width: u32) -> Result<u32, Error> {
    if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        Ok(width)
    } else {
        Err(Error::WidthOutOfRange(width))
    }
}

#[derive(Clone, Copy, Serialize)]
pub struct FixedWidthInteger {
    magnitude: u64,
    width: u32,
    signed: bool,
}

impl FixedWidthInteger {
    pub const ZERO: Self = Self {
        magnitude: 0,
        width: MAX_WIDTH,
        signed: false,
    };

    /// A 64-bit unsigned value.
    pub const fn new(magnitude: u64) -> Self {
        Self {
            magnitude,
            width: MAX_WIDTH,
            signed: false,
        }
    }

    /// An unsigned value of the given width.
    pub fn with_width(magnitude: u64, width: u32) -> Result<Self, Error> {
        Self::from_parts(magnitude, width, false)
    }

    pub fn from_parts(magnitude: u64, width: u32, signed: bool) -> Result<Self, Error> {
        let width = check_width(width)?;
        Ok(Self {
            magnitude,
            width,
            signed,
        })
    }

    /// Parses `text` written in `radix`.  Hexadecimal digits may be
    /// in either case.
    pub fn from_str_radix(
        text: &str,
        radix: Radix,
        width: u32,
        signed: bool,
    ) -> Result<Self, Error> {
        let width = check_width(width)?;
        let magnitude = radix::parse(text, radix)?;
        Self::from_parts(magnitude, width, signed)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn signed(&self) -> bool {
        self.signed
    }

    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// The raw bits of the value.
    pub const fn magnitude(&self) -> u64 {
        self.magnitude
    }

    /// The raw bits of the value, limited to the `width`
    /// least-significant bits (with `width` clamped as for [`mask`]).
    pub const fn magnitude_at(&self, width: u32) -> u64 {
        self.magnitude & mask(width)
    }

    /// True if every bit within the width is clear.
    pub const fn is_zero(&self) -> bool {
        self.magnitude_at(self.width) == 0
    }

    /// The largest value representable in our width.
    pub const fn max_magnitude(&self) -> u64 {
        mask(self.width)
    }

    /// Changes the width, silently discarding any bits above the new
    /// width.
    pub fn truncate(&mut self, width: u32) -> Result<(), Error> {
        let width = check_width(width)?;
        self.width = width;
        self.magnitude &= mask(width);
        Ok(())
    }

    /// Changes the width.  If the value does not fit in the new
    /// width, it becomes the largest value which does.
    pub fn saturate(&mut self, width: u32) -> Result<(), Error> {
        let width = check_width(width)?;
        if self.signed {
            event!(
                Level::DEBUG,
                "refusing to saturate signed value {:?} to {} bits",
                self,
                width
            );
            return Err(Error::SignedSaturate);
        }
        let limit = mask(width);
        if self.magnitude & !limit != 0 {
            event!(
                Level::TRACE,
                "saturating {:#x} to {} bits gives {:#x}",
                self.magnitude,
                width,
                limit
            );
            self.width = width;
            self.magnitude = limit;
            Ok(())
        } else {
            self.truncate(width)
        }
    }

    /// Increases the width, preserving the value seen at the old
    /// width.
    pub fn expand(&mut self, width: u32) -> Result<(), Error> {
        let width = check_width(width)?;
        if width < self.width {
            return Err(Error::NotWider {
                current: self.width,
                requested: width,
            });
        }
        if self.signed {
            event!(
                Level::DEBUG,
                "refusing to expand signed value {:?} to {} bits",
                self,
                width
            );
            return Err(Error::SignedExpand);
        }
        self.magnitude &= mask(self.width);
        self.width = width;
        Ok(())
    }

    /// Expands to a wider width, or saturates to a narrower (or the
    /// same) width.
    pub fn set_new_width(&mut self, width: u32) -> Result<(), Error> {
        if width > self.width {
            self.expand(width)
        } else {
            self.saturate(width)
        }
    }

    /// Returns a copy of `self` having the bit pattern seen at its
    /// own width but a width of `width`, if that is wider.  This is
    /// how the narrower right operand of an arithmetic or bitwise
    /// operation is brought up to the width of the other.
    const fn widened_bits(self, width: u32) -> Self {
        if width > self.width {
            Self {
                magnitude: self.magnitude & mask(self.width),
                width,
                signed: self.signed,
            }
        } else {
            self
        }
    }

    /// Builds a result having the width and signedness of `self`.
    const fn with_bits(&self, bits: u64) -> Self {
        Self {
            magnitude: bits & mask(self.width),
            width: self.width,
            signed: self.signed,
        }
    }

    /// Toggles bit `position` (0 is the least-significant bit).
    /// Positions at or above the width are ignored.
    pub fn revert_bit(&mut self, position: u32) {
        if position < self.width {
            self.magnitude = (self.magnitude ^ mask_field(position, 1)) & mask(self.width);
        }
    }

    /// Returns the character at position `index` of the binary
    /// representation (see [`FixedWidthInteger::format`]).  Index 0 is
    /// the most-significant bit.
    pub fn get_bit(&self, index: u32) -> Result<char, Error> {
        if index >= self.width {
            return Err(Error::BitIndexOutOfRange {
                index,
                width: self.width,
            });
        }
        let position = self.width - 1 - index;
        if self.magnitude & mask_field(position, 1) == 0 {
            Ok('0')
        } else {
            Ok('1')
        }
    }

    /// Three-way comparison of the raw magnitudes: negative if `self`
    /// is less than `other`, zero if they are equal, positive if
    /// `self` is greater.
    pub fn compare_to(&self, other: &FixedWidthInteger) -> i32 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Formats the whole value.  Hexadecimal output has one digit per
    /// nibble of width (rounded up) and binary output has one digit
    /// per bit; both are zero-padded.  Decimal output is not padded.
    pub fn format(&self, radix: Radix) -> String {
        let bits = self.magnitude & mask(self.width);
        Self::format_bits(bits, self.width, radix)
    }

    /// Formats bits `msb` down to `lsb` (inclusive) of the value, as
    /// though they formed a value of width `msb - lsb + 1`.
    pub fn format_field(&self, radix: Radix, msb: u32, lsb: u32) -> Result<String, Error> {
        if msb >= self.width || lsb > msb {
            return Err(Error::FieldOutOfRange {
                msb,
                lsb,
                width: self.width,
            });
        }
        let field_width = msb - lsb + 1;
        let bits = (self.magnitude & mask_field(lsb, field_width)) >> lsb;
        Ok(Self::format_bits(bits, field_width, radix))
    }

    fn format_bits(bits: u64, width: u32, radix: Radix) -> String {
        let digits = match radix {
            Radix::Decimal => radix::to_decimal(bits),
            Radix::Hexadecimal => radix::to_hex(bits),
            Radix::Binary => radix::to_binary(bits),
        };
        match radix.fixed_digits(width) {
            Some(len) => radix::fit_to(&digits, len),
            None => digits,
        }
    }
}

impl Default for FixedWidthInteger {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for FixedWidthInteger {
    fn from(n: u64) -> Self {
        Self::new(n)
    }
}

impl From<FixedWidthInteger> for u64 {
    fn from(n: FixedWidthInteger) -> u64 {
        n.magnitude
    }
}

impl Display for FixedWidthInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&self.format(Radix::Decimal))
    }
}

impl UpperHex for FixedWidthInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&self.format(Radix::Hexadecimal))
    }
}

impl Binary for FixedWidthInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&self.format(Radix::Binary))
    }
}

impl Debug for FixedWidthInteger {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "FixedWidthInteger{{magnitude: {:#x}, width: {}, signed: {}}}",
            self.magnitude, self.width, self.signed
        )
    }
}

// Equality, ordering and hashing all look only at the magnitude, so
// that they agree with each other.

impl Hash for FixedWidthInteger {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.magnitude.hash(state)
    }
}

impl PartialEq for FixedWidthInteger {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FixedWidthInteger {}

impl PartialEq<u64> for FixedWidthInteger {
    fn eq(&self, other: &u64) -> bool {
        self.magnitude == *other
    }
}

impl PartialOrd for FixedWidthInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd<u64> for FixedWidthInteger {
    fn partial_cmp(&self, other: &u64) -> Option<Ordering> {
        Some(self.magnitude.cmp(other))
    }
}

impl Ord for FixedWidthInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude.cmp(&other.magnitude)
    }
}

impl Add for FixedWidthInteger {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let rhs = rhs.widened_bits(self.width);
        self.with_bits(self.magnitude.wrapping_add(rhs.magnitude))
    }
}

impl Sub for FixedWidthInteger {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let rhs = rhs.widened_bits(self.width);
        self.with_bits(self.magnitude.wrapping_sub(rhs.magnitude))
    }
}

impl Shl<u32> for FixedWidthInteger {
    type Output = Self;
    fn shl(self, shift_by: u32) -> Self {
        self.with_bits(self.magnitude.checked_shl(shift_by).unwrap_or(0))
    }
}

impl Shr<u32> for FixedWidthInteger {
    type Output = Self;
    fn shr(self, shift_by: u32) -> Self {
        // Bits above the width must not be shifted down into it.
        let bits = self.magnitude_at(self.width);
        self.with_bits(bits.checked_shr(shift_by).unwrap_or(0))
    }
}

impl BitAnd for FixedWidthInteger {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        let rhs = rhs.widened_bits(self.width);
        self.with_bits(self.magnitude & rhs.magnitude)
    }
}

impl BitOr for FixedWidthInteger {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        let rhs = rhs.widened_bits(self.width);
        self.with_bits(self.magnitude | rhs.magnitude)
    }
}

impl BitXor for FixedWidthInteger {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        let rhs = rhs.widened_bits(self.width);
        self.with_bits(self.magnitude ^ rhs.magnitude)
    }
}

impl BitAnd<u64> for FixedWidthInteger {
    type Output = Self;
    fn bitand(self, mask: u64) -> Self {
        self.with_bits(self.magnitude & mask)
    }
}

impl BitOr<u64> for FixedWidthInteger {
    type Output = Self;
    fn bitor(self, mask: u64) -> Self {
        self.with_bits(self.magnitude | mask)
    }
}

impl BitXor<u64> for FixedWidthInteger {
    type Output = Self;
    fn bitxor(self, mask: u64) -> Self {
        self.with_bits(self.magnitude ^ mask)
    }
}

impl Not for FixedWidthInteger {
    type Output = Self;
    fn not(self) -> Self {
        self ^ mask(self.width)
    }
}
