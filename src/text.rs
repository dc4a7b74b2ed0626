//! Text renderings of binary payloads and native values

use anyhow::{anyhow, Result};
use base64::Engine;

use crate::error::ValueError;
use crate::value::{
    ByteValue, DoubleValue, FloatValue, IntValue, LongValue, ShortValue, StringValue, TagKind,
    Value,
};

/// How binary payloads are written as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryText {
    #[default]
    Base64,
    Hex,
}

impl BinaryText {
    /// Render bytes as text
    pub fn encode(self, bin: &[u8]) -> String {
        match self {
            BinaryText::Base64 => base64::engine::general_purpose::STANDARD.encode(bin),
            BinaryText::Hex => hex::encode(bin),
        }
    }

    /// Decode text, ignoring surrounding whitespace and line breaks
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        match self {
            BinaryText::Base64 => base64::engine::general_purpose::STANDARD
                .decode(&compact)
                .map_err(|e| anyhow!("Failed to decode base64 payload: {}", e)),
            BinaryText::Hex => {
                hex::decode(&compact).map_err(|e| anyhow!("Failed to decode hex payload: {}", e))
            }
        }
    }
}

/// Parse a textual native value and build a value of `kind` with the
/// validating factory
///
/// Integers are parsed wide so out-of-range input reports a range error
/// instead of a parse error.
pub fn parse_value(kind: TagKind, text: &str) -> Result<Value> {
    let value = match kind {
        TagKind::Byte => Value::Byte(ByteValue::from_value(parse_i64(kind, text)?)?),
        TagKind::Short => Value::Short(ShortValue::from_value(parse_i64(kind, text)?)?),
        TagKind::Int => Value::Int(IntValue::from_value(parse_i64(kind, text)?)?),
        TagKind::Long => Value::Long(LongValue::from_value(parse_i128(kind, text)?)?),
        TagKind::Float => Value::Float(FloatValue::from_value(
            text.trim()
                .parse::<f32>()
                .map_err(|e| anyhow!("Invalid {} value '{}': {}", kind, text, e))?,
        )),
        TagKind::Double => Value::Double(DoubleValue::from_value(
            text.trim()
                .parse::<f64>()
                .map_err(|e| anyhow!("Invalid {} value '{}': {}", kind, text, e))?,
        )),
        TagKind::String => Value::String(StringValue::from_value(text)?),
    };
    Ok(value)
}

fn parse_i128(kind: TagKind, text: &str) -> Result<i128> {
    text.trim()
        .parse::<i128>()
        .map_err(|e| anyhow!("Invalid {} value '{}': {}", kind, text, e))
}

fn parse_i64(kind: TagKind, text: &str) -> Result<i64> {
    let wide = parse_i128(kind, text)?;
    i64::try_from(wide).map_err(|_| {
        ValueError::invalid(kind, wide, "value does not fit a 64-bit integer").into()
    })
}
