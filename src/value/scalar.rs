//! Fixed-width numeric tag values

use std::fmt;
use std::sync::OnceLock;

use crate::buffer::{normalize, Endian};
use crate::error::ValueError;
use crate::range::{is_byte, is_int, is_long, is_short, Signedness};
use crate::value::TagKind;

/// Wire layout of a fixed-width value kind
pub trait FixedWidth {
    const KIND: TagKind;
    const WIDTH: usize;
    type Native: Copy + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Decode exactly `WIDTH` big-endian bytes
    fn decode(bin: &[u8]) -> Self::Native;

    /// Encode to exactly `WIDTH` big-endian bytes
    fn encode(value: Self::Native) -> Vec<u8>;
}

fn be<const N: usize>(bin: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bin[..N]);
    out
}

macro_rules! fixed_kind {
    ($(#[$meta:meta])* $marker:ident, $native:ty, $width:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $marker {}

        impl FixedWidth for $marker {
            const KIND: TagKind = TagKind::$marker;
            const WIDTH: usize = $width;
            type Native = $native;

            fn decode(bin: &[u8]) -> $native {
                <$native>::from_be_bytes(be(bin))
            }

            fn encode(value: $native) -> Vec<u8> {
                value.to_be_bytes().to_vec()
            }
        }
    };
}

fixed_kind!(
    /// 8-bit signed integer
    Byte, i8, 1
);
fixed_kind!(
    /// 16-bit signed integer
    Short, i16, 2
);
fixed_kind!(
    /// 32-bit signed integer
    Int, i32, 4
);
fixed_kind!(
    /// 64-bit signed integer
    Long, i64, 8
);
fixed_kind!(
    /// IEEE-754 single precision
    Float, f32, 4
);
fixed_kind!(
    /// IEEE-754 double precision
    Double, f64, 8
);

pub type ByteValue = Scalar<Byte>;
pub type ShortValue = Scalar<Short>;
pub type IntValue = Scalar<Int>;
pub type LongValue = Scalar<Long>;
pub type FloatValue = Scalar<Float>;
pub type DoubleValue = Scalar<Double>;

/// An immutable fixed-width value
///
/// The big-endian buffer is authoritative; the native value is decoded on
/// first access and cached.
pub struct Scalar<K: FixedWidth> {
    bin: Box<[u8]>,
    cache: OnceLock<K::Native>,
}

impl<K: FixedWidth> Scalar<K> {
    /// Build from raw bytes, padding or truncating to the kind's width
    ///
    /// Extra leading bytes are dropped and missing ones are zero-filled, so
    /// `[0x01, 0x02, 0x7F]` becomes the byte `0x7F`.
    pub fn from_bin(bin: &[u8]) -> Self {
        Self {
            bin: normalize(bin, K::WIDTH, Endian::Big).into_boxed_slice(),
            cache: OnceLock::new(),
        }
    }

    fn from_native(value: K::Native) -> Self {
        Self {
            bin: K::encode(value).into_boxed_slice(),
            cache: OnceLock::new(),
        }
    }

    /// The decoded native value
    pub fn value(&self) -> K::Native {
        *self.cache.get_or_init(|| K::decode(&self.bin))
    }

    /// A copy of the canonical binary form
    pub fn bin(&self) -> Vec<u8> {
        self.bin.to_vec()
    }

    /// The kind marker's tag kind
    pub fn kind(&self) -> TagKind {
        K::KIND
    }

    /// A new value of the same kind built from different bytes
    pub fn with_bin(&self, bin: &[u8]) -> Self {
        Self::from_bin(bin)
    }

    #[cfg(test)]
    pub(crate) fn is_decoded(&self) -> bool {
        self.cache.get().is_some()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bin
    }
}

impl<K: FixedWidth> Clone for Scalar<K> {
    /// Copies the buffer; the decode cache starts empty
    fn clone(&self) -> Self {
        Self::from_bin(&self.bin)
    }
}

impl<K: FixedWidth> PartialEq for Scalar<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bin == other.bin
    }
}

impl<K: FixedWidth> fmt::Debug for Scalar<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar")
            .field("kind", &K::KIND)
            .field("bin", &self.bin)
            .finish()
    }
}

macro_rules! integer_factory {
    ($marker:ident, $native:ty, $check:ident, $noun:literal) => {
        impl Scalar<$marker> {
            /// Build from an integer, rejecting values outside the kind's range
            pub fn from_value(value: i64) -> Result<Self, ValueError> {
                if !$check(value as f64, Signedness::Signed) {
                    return Err(ValueError::invalid(
                        TagKind::$marker,
                        value,
                        format!(
                            "{} values must be between {} and {}",
                            $noun,
                            <$native>::MIN,
                            <$native>::MAX
                        ),
                    ));
                }
                Ok(Self::from_native(value as $native))
            }

            /// A new value of the same kind; `self` is left unchanged
            pub fn with_value(&self, value: i64) -> Result<Self, ValueError> {
                Self::from_value(value)
            }
        }

        impl From<$native> for Scalar<$marker> {
            fn from(value: $native) -> Self {
                Self::from_native(value)
            }
        }
    };
}

integer_factory!(Byte, i8, is_byte, "byte");
integer_factory!(Short, i16, is_short, "short");
integer_factory!(Int, i32, is_int, "int");

impl Scalar<Long> {
    /// Build from an integer, rejecting values outside the signed 64-bit range
    pub fn from_value(value: i128) -> Result<Self, ValueError> {
        if !is_long(value, Signedness::Signed) {
            return Err(ValueError::invalid(
                TagKind::Long,
                value,
                format!("long values must be between {} and {}", i64::MIN, i64::MAX),
            ));
        }
        Ok(Self::from_native(value as i64))
    }

    /// A new value of the same kind; `self` is left unchanged
    pub fn with_value(&self, value: i128) -> Result<Self, ValueError> {
        Self::from_value(value)
    }
}

impl From<i64> for Scalar<Long> {
    fn from(value: i64) -> Self {
        Self::from_native(value)
    }
}

macro_rules! float_factory {
    ($marker:ident, $native:ty) => {
        impl Scalar<$marker> {
            /// Build from a float; every value including NaN is representable
            pub fn from_value(value: $native) -> Self {
                Self::from_native(value)
            }

            /// A new value of the same kind
            pub fn with_value(&self, value: $native) -> Self {
                Self::from_value(value)
            }
        }

        impl From<$native> for Scalar<$marker> {
            fn from(value: $native) -> Self {
                Self::from_native(value)
            }
        }
    };
}

float_factory!(Float, f32);
float_factory!(Double, f64);
