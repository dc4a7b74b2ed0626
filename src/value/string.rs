//! Length-prefixed string tag value

use std::fmt;
use std::sync::OnceLock;

use crate::error::ValueError;
use crate::mutf8::{self, Decoder};
use crate::value::TagKind;

/// Largest encoded length the 2-byte header can declare
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

const HEADER_LEN: usize = 2;

/// An immutable string value
///
/// Binary form: a big-endian `u16` byte count followed by that many bytes of
/// modified UTF-8. Buffers built with [`StringValue::from_bin`] are not
/// checked until the value is read.
pub struct StringValue {
    bin: Box<[u8]>,
    cache: OnceLock<String>,
}

impl StringValue {
    /// Encode a string, failing if it needs more than 65535 bytes
    pub fn from_value(text: &str) -> Result<Self, ValueError> {
        check_len(mutf8::encoded_len(text), text)?;
        Ok(Self::from_encoded(mutf8::encode(text)))
    }

    /// Encode UTF-16 code units, failing on unpaired surrogates or overlength
    pub fn from_utf16(units: &[u16]) -> Result<Self, ValueError> {
        let encoded = mutf8::encode_utf16(units).map_err(|e| {
            ValueError::invalid(TagKind::String, String::from_utf16_lossy(units), e.to_string())
        })?;
        check_len(encoded.len(), String::from_utf16_lossy(units))?;
        Ok(Self::from_encoded(encoded))
    }

    fn from_encoded(encoded: Vec<u8>) -> Self {
        let mut bin = Vec::with_capacity(HEADER_LEN + encoded.len());
        bin.extend_from_slice(&(encoded.len() as u16).to_be_bytes());
        bin.extend_from_slice(&encoded);
        Self::from_bin(&bin)
    }

    /// Wrap raw bytes without validating them
    pub fn from_bin(bin: &[u8]) -> Self {
        Self {
            bin: bin.into(),
            cache: OnceLock::new(),
        }
    }

    /// The decoded string, cached after the first successful read
    pub fn value(&self) -> Result<&str, ValueError> {
        if let Some(text) = self.cache.get() {
            return Ok(text.as_str());
        }
        let decoded = decode_bin(&self.bin, &Decoder::new())?;
        Ok(self.cache.get_or_init(|| decoded).as_str())
    }

    /// Decode with a specific decoder; the result is not cached
    pub fn value_with(&self, decoder: &Decoder) -> Result<String, ValueError> {
        decode_bin(&self.bin, decoder)
    }

    /// A copy of the binary form, header included
    pub fn bin(&self) -> Vec<u8> {
        self.bin.to_vec()
    }

    /// Always [`TagKind::String`]
    pub fn kind(&self) -> TagKind {
        TagKind::String
    }

    /// A new string value; `self` is left unchanged
    pub fn with_value(&self, text: &str) -> Result<Self, ValueError> {
        Self::from_value(text)
    }

    /// A new string value over different bytes
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

fn check_len(len: usize, shown: impl fmt::Display) -> Result<(), ValueError> {
    if len > MAX_STRING_LEN {
        return Err(ValueError::invalid(
            TagKind::String,
            shown,
            format!("encoded length must not exceed {} bytes, got {}", MAX_STRING_LEN, len),
        ));
    }
    Ok(())
}

fn decode_bin(bin: &[u8], decoder: &Decoder) -> Result<String, ValueError> {
    if bin.len() < HEADER_LEN {
        return Err(ValueError::decode(
            TagKind::String,
            format!("binary is {} bytes, missing the 2-byte length header", bin.len()),
        ));
    }

    let declared = u16::from_be_bytes([bin[0], bin[1]]) as usize;
    let body = &bin[HEADER_LEN..];
    if body.len() != declared {
        return Err(ValueError::decode(
            TagKind::String,
            format!(
                "length header declares {} bytes but {} bytes follow",
                declared,
                body.len()
            ),
        ));
    }

    decoder.decode(body).map_err(|e| ValueError::Decode {
        kind: TagKind::String,
        reason: "invalid modified UTF-8".to_string(),
        source: Some(e),
    })
}

impl Clone for StringValue {
    /// Copies the buffer; the decode cache starts empty
    fn clone(&self) -> Self {
        Self::from_bin(&self.bin)
    }
}

impl PartialEq for StringValue {
    fn eq(&self, other: &Self) -> bool {
        self.bin == other.bin
    }
}

impl Eq for StringValue {}

impl fmt::Debug for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringValue").field("bin", &self.bin).finish()
    }
}
