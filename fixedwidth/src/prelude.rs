//! The prelude exports the value type together with the helpers and
//! error types which are needed to use it.
pub use super::error::*;
pub use super::fwi;
pub use super::mask::*;
pub use super::radix::{hex_to_dec, Radix};
pub use super::value::FixedWidthInteger;
