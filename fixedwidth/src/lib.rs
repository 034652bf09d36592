//! The `fixedwidth` crate defines [`FixedWidthInteger`], an integer
//! value which carries its own bit width (1 to 64 bits) and a
//! signedness flag.  Width changes (truncation, saturation,
//! expansion), arithmetic and bitwise operations all keep the value
//! within its width, and the value can be written and read as
//! fixed-width decimal, hexadecimal or binary text.

mod error;
mod mask;
mod radix;
mod value;

pub mod prelude;

pub use crate::error::{Error, ErrorKind};
pub use crate::mask::{mask, mask_field, MAX_WIDTH, MIN_WIDTH};
pub use crate::radix::{hex_to_dec, parse, parse_binary, parse_decimal, Radix};
pub use crate::value::FixedWidthInteger;

/// Builds a [`FixedWidthInteger`] of the given width, or of 64 bits
/// when no width is given.  The width must be a constant in 1..=64; this is checked at compile
/// time.
#[macro_export]
macro_rules! fwi {
    ($n:expr) => {
        $crate::FixedWidthInteger::new($n)
    };
    ($n:expr, $w:expr) => {{
        const _: () = assert!($w >= $crate::MIN_WIDTH && $w <= $crate::MAX_WIDTH);
        match $crate::FixedWidthInteger::with_width($n, $w) {
            Ok(value) => value,
            Err(_) => unreachable!(),
        }
    }};
}

#[test]
fn test_fwi() {
    let m: FixedWidthInteger = fwi!(0xFF_u64, 8);
    let n: FixedWidthInteger =
        FixedWidthInteger::with_width(0xFF, 8).expect("test data should be in range");
    assert_eq!(m, n);
    assert_eq!(m.width(), 8);

    let p: FixedWidthInteger = fwi!(0x1FF_u64, 8);
    assert_eq!(p.magnitude_at(8), 0xFF);

    let q: FixedWidthInteger = fwi!(5_u64);
    assert_eq!(q.width(), 64);
}
