//! # emx-nbt
//!
//! Binary value codec for NBT-style tag trees.
//!
//! This crate covers the leaf values of the format: fixed-width numbers and
//! length-prefixed strings, plus the modified UTF-8 text encoding those
//! strings use. Tag containers (compounds, lists) and file-level readers are
//! built on top of it elsewhere.
//!
//! ## Binary Forms
//!
//! | Kind   | Bytes | Layout                                      |
//! |--------|-------|---------------------------------------------|
//! | Byte   | 1     | two's complement                            |
//! | Short  | 2     | two's complement, big-endian                |
//! | Int    | 4     | two's complement, big-endian                |
//! | Long   | 8     | two's complement, big-endian                |
//! | Float  | 4     | IEEE-754, big-endian                        |
//! | Double | 8     | IEEE-754, big-endian                        |
//! | String | 2 + n | `u16` big-endian byte count, modified UTF-8 |
//!
//! ## Values
//!
//! Values are immutable. They are built either from a native value, which is
//! range-checked, or from raw bytes, which are accepted as-is (fixed-width
//! kinds are padded or truncated to their width). Decoding happens on first
//! read and is cached.
//!
//! ```
//! use emx_nbt::{ByteValue, StringValue};
//!
//! let byte = ByteValue::from_value(-2).unwrap();
//! assert_eq!(byte.bin(), vec![0xFE]);
//! assert!(ByteValue::from_value(200).is_err());
//!
//! let text = StringValue::from_value("\0").unwrap();
//! assert_eq!(text.bin(), vec![0x00, 0x02, 0xC0, 0x80]);
//! assert_eq!(text.value().unwrap(), "\0");
//! ```
//!
//! ## Modified UTF-8
//!
//! See [`mutf8`] for the encoding rules and the recovery policy applied to
//! malformed input.

pub mod buffer;
pub mod error;
pub mod mutf8;
pub mod range;
pub mod text;
pub mod value;

pub use buffer::{normalize, Endian};
pub use error::ValueError;
pub use mutf8::{DecodeConfig, Decoder, Mutf8Error, Mutf8Warning};
pub use range::{is_byte, is_int, is_long, is_short, Signedness};
pub use text::{parse_value, BinaryText};
pub use value::{
    ByteValue, DoubleValue, FloatValue, IntValue, LongValue, NativeValue, ShortValue, StringValue,
    TagKind, Value,
};
