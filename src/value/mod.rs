//! Immutable tag values
//!
//! Every value owns its canonical binary form and decodes the native value
//! lazily on first read. Values never change after construction: `with_value`,
//! `with_bin` and `clone` all return new, independent values.

pub mod scalar;
pub mod string;

pub use scalar::{
    Byte, ByteValue, Double, DoubleValue, FixedWidth, Float, FloatValue, Int, IntValue, Long,
    LongValue, Scalar, Short, ShortValue,
};
pub use string::{StringValue, MAX_STRING_LEN};

use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::error::ValueError;

/// Wire discriminant of a value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl TagKind {
    pub const ALL: [TagKind; 7] = [
        TagKind::Byte,
        TagKind::Short,
        TagKind::Int,
        TagKind::Long,
        TagKind::Float,
        TagKind::Double,
        TagKind::String,
    ];

    /// Tag id written on the wire
    pub fn id(self) -> u8 {
        match self {
            TagKind::Byte => 1,
            TagKind::Short => 2,
            TagKind::Int => 3,
            TagKind::Long => 4,
            TagKind::Float => 5,
            TagKind::Double => 6,
            TagKind::String => 8,
        }
    }

    /// Look up a kind by its tag id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Display name, e.g. `"Byte"`
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Byte => "Byte",
            TagKind::Short => "Short",
            TagKind::Int => "Int",
            TagKind::Long => "Long",
            TagKind::Float => "Float",
            TagKind::Double => "Double",
            TagKind::String => "String",
        }
    }

    /// Binary width, or `None` for the variable-length string
    pub fn width(self) -> Option<usize> {
        match self {
            TagKind::Byte => Some(Byte::WIDTH),
            TagKind::Short => Some(Short::WIDTH),
            TagKind::Int => Some(Int::WIDTH),
            TagKind::Long => Some(Long::WIDTH),
            TagKind::Float => Some(Float::WIDTH),
            TagKind::Double => Some(Double::WIDTH),
            TagKind::String => None,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown tag kind '{}', expected one of {}",
                    s,
                    "byte, short, int, long, float, double, string"
                )
            })
    }
}

/// A decoded native value of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl NativeValue {
    pub fn kind(&self) -> TagKind {
        match self {
            NativeValue::Byte(_) => TagKind::Byte,
            NativeValue::Short(_) => TagKind::Short,
            NativeValue::Int(_) => TagKind::Int,
            NativeValue::Long(_) => TagKind::Long,
            NativeValue::Float(_) => TagKind::Float,
            NativeValue::Double(_) => TagKind::Double,
            NativeValue::String(_) => TagKind::String,
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Byte(v) => write!(f, "{}", v),
            NativeValue::Short(v) => write!(f, "{}", v),
            NativeValue::Int(v) => write!(f, "{}", v),
            NativeValue::Long(v) => write!(f, "{}", v),
            NativeValue::Float(v) => write!(f, "{}", v),
            NativeValue::Double(v) => write!(f, "{}", v),
            NativeValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// A tag value of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(ByteValue),
    Short(ShortValue),
    Int(IntValue),
    Long(LongValue),
    Float(FloatValue),
    Double(DoubleValue),
    String(StringValue),
}

impl Value {
    /// Build from a native value
    pub fn from_native(native: NativeValue) -> std::result::Result<Self, ValueError> {
        Ok(match native {
            NativeValue::Byte(v) => Value::Byte(v.into()),
            NativeValue::Short(v) => Value::Short(v.into()),
            NativeValue::Int(v) => Value::Int(v.into()),
            NativeValue::Long(v) => Value::Long(v.into()),
            NativeValue::Float(v) => Value::Float(v.into()),
            NativeValue::Double(v) => Value::Double(v.into()),
            NativeValue::String(v) => Value::String(StringValue::from_value(&v)?),
        })
    }

    /// Build from raw bytes of the given kind
    pub fn from_bin(kind: TagKind, bin: &[u8]) -> Self {
        match kind {
            TagKind::Byte => Value::Byte(ByteValue::from_bin(bin)),
            TagKind::Short => Value::Short(ShortValue::from_bin(bin)),
            TagKind::Int => Value::Int(IntValue::from_bin(bin)),
            TagKind::Long => Value::Long(LongValue::from_bin(bin)),
            TagKind::Float => Value::Float(FloatValue::from_bin(bin)),
            TagKind::Double => Value::Double(DoubleValue::from_bin(bin)),
            TagKind::String => Value::String(StringValue::from_bin(bin)),
        }
    }

    pub fn kind(&self) -> TagKind {
        match self {
            Value::Byte(_) => TagKind::Byte,
            Value::Short(_) => TagKind::Short,
            Value::Int(_) => TagKind::Int,
            Value::Long(_) => TagKind::Long,
            Value::Float(_) => TagKind::Float,
            Value::Double(_) => TagKind::Double,
            Value::String(_) => TagKind::String,
        }
    }

    /// The decoded native value
    pub fn native(&self) -> std::result::Result<NativeValue, ValueError> {
        Ok(match self {
            Value::Byte(v) => NativeValue::Byte(v.value()),
            Value::Short(v) => NativeValue::Short(v.value()),
            Value::Int(v) => NativeValue::Int(v.value()),
            Value::Long(v) => NativeValue::Long(v.value()),
            Value::Float(v) => NativeValue::Float(v.value()),
            Value::Double(v) => NativeValue::Double(v.value()),
            Value::String(v) => NativeValue::String(v.value()?.to_string()),
        })
    }

    /// A copy of the canonical binary form
    pub fn bin(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// A new value of the same kind from a native value of that kind
    pub fn with_native(&self, native: NativeValue) -> std::result::Result<Self, ValueError> {
        if native.kind() != self.kind() {
            return Err(ValueError::invalid(
                self.kind(),
                &native,
                format!("expected a {} value, got {}", self.kind(), native.kind()),
            ));
        }
        Self::from_native(native)
    }

    /// A new value of the same kind from different bytes
    pub fn with_bin(&self, bin: &[u8]) -> Self {
        Self::from_bin(self.kind(), bin)
    }

    /// Write the binary form
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }

    /// Write the binary form to a file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.as_bytes())
            .with_context(|| format!("Failed to write {} value to {}", self.kind(), path.display()))
    }

    /// Read exactly one value of the given kind
    ///
    /// Fixed-width kinds read their width; strings read the length header
    /// and then the declared number of bytes.
    pub fn read_from<R: Read>(kind: TagKind, mut reader: R) -> io::Result<Self> {
        let bin = match kind.width() {
            Some(width) => {
                let mut bin = vec![0u8; width];
                reader.read_exact(&mut bin)?;
                bin
            }
            None => {
                let mut header = [0u8; 2];
                reader.read_exact(&mut header)?;
                let len = u16::from_be_bytes(header) as usize;
                let mut bin = vec![0u8; 2 + len];
                bin[..2].copy_from_slice(&header);
                reader.read_exact(&mut bin[2..])?;
                bin
            }
        };
        Ok(Self::from_bin(kind, &bin))
    }

    /// Read a file holding exactly one value of the given kind
    pub fn read_from_file(kind: TagKind, path: &Path) -> Result<Self> {
        let bin = std::fs::read(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        Ok(Self::from_bin(kind, &bin))
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Byte(v) => v.as_bytes(),
            Value::Short(v) => v.as_bytes(),
            Value::Int(v) => v.as_bytes(),
            Value::Long(v) => v.as_bytes(),
            Value::Float(v) => v.as_bytes(),
            Value::Double(v) => v.as_bytes(),
            Value::String(v) => v.as_bytes(),
        }
    }
}

macro_rules! value_from {
    ($($variant:ident($inner:ty)),* $(,)?) => {
        $(
            impl From<$inner> for Value {
                fn from(value: $inner) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from!(
    Byte(ByteValue),
    Short(ShortValue),
    Int(IntValue),
    Long(LongValue),
    Float(FloatValue),
    Double(DoubleValue),
    String(StringValue),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids() {
        assert_eq!(TagKind::Byte.id(), 1);
        assert_eq!(TagKind::Double.id(), 6);
        assert_eq!(TagKind::String.id(), 8);
        assert_eq!(TagKind::from_id(3), Some(TagKind::Int));
        assert_eq!(TagKind::from_id(7), None);
        assert_eq!(TagKind::from_id(0), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("int".parse::<TagKind>(), Ok(TagKind::Int));
        assert_eq!("STRING".parse::<TagKind>(), Ok(TagKind::String));
        assert!("compound".parse::<TagKind>().is_err());
    }

    #[test]
    fn test_kind_widths() {
        assert_eq!(TagKind::Byte.width(), Some(1));
        assert_eq!(TagKind::Long.width(), Some(8));
        assert_eq!(TagKind::Float.width(), Some(4));
        assert_eq!(TagKind::String.width(), None);
    }

    #[test]
    fn test_kind_available_without_decoding() {
        let value = Value::from_bin(TagKind::String, &[0xFF]);
        assert_eq!(value.kind(), TagKind::String);
        assert!(value.native().is_err());
    }

    #[test]
    fn test_native_round_trip() {
        let natives = [
            NativeValue::Byte(-3),
            NativeValue::Short(300),
            NativeValue::Int(-70000),
            NativeValue::Long(1 << 40),
            NativeValue::Float(0.5),
            NativeValue::Double(-1e300),
            NativeValue::String("héllo\0".to_string()),
        ];
        for native in natives {
            let value = Value::from_native(native.clone()).unwrap();
            assert_eq!(value.kind(), native.kind());
            assert_eq!(value.native().unwrap(), native);

            let rebuilt = Value::from_bin(value.kind(), &value.bin());
            assert_eq!(rebuilt, value);
        }
    }

    #[test]
    fn test_with_native_requires_same_kind() {
        let value = Value::from(IntValue::from(1));
        let changed = value.with_native(NativeValue::Int(2)).unwrap();
        assert_eq!(changed.native().unwrap(), NativeValue::Int(2));

        let err = value.with_native(NativeValue::Byte(2)).unwrap_err();
        assert!(err.to_string().contains("expected a Int value, got Byte"));
    }

    #[test]
    fn test_with_bin_keeps_kind() {
        let value = Value::from(ShortValue::from(1));
        let changed = value.with_bin(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(changed.kind(), TagKind::Short);
        assert_eq!(changed.native().unwrap(), NativeValue::Short(-1));
    }

    #[test]
    fn test_read_and_write() {
        let values = [
            Value::from(ByteValue::from(-1)),
            Value::from(DoubleValue::from(3.25)),
            Value::from(StringValue::from_value("abc").unwrap()),
        ];
        let mut out = Vec::new();
        for value in &values {
            value.write_to(&mut out).unwrap();
        }
        assert_eq!(out.len(), 1 + 8 + 5);

        let mut reader = &out[..];
        for value in &values {
            let read = Value::read_from(value.kind(), &mut reader).unwrap();
            assert_eq!(&read, value);
        }
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_truncated_input() {
        let err = Value::read_from(TagKind::Int, &[0u8, 1][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let err = Value::read_from(TagKind::String, &[0u8, 4, b'a'][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
