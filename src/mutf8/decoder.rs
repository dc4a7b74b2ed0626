//! Modified UTF-8 decoder

use super::{DecodeConfig, Mutf8Error, Mutf8Warning, REPLACEMENT};

/// Decoded text together with the recoverable problems found on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub warnings: Vec<Mutf8Warning>,
}

/// Decode with the default (lenient, logging) configuration
pub fn decode(bytes: &[u8]) -> Result<String, Mutf8Error> {
    Decoder::new().decode(bytes)
}

/// Decodes modified UTF-8 byte strings
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with an explicit configuration
    pub fn with_config(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Reject recoverable problems instead of replacing them
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Stop reporting recoverable problems through `tracing`
    pub fn quiet(mut self) -> Self {
        self.config.log_warnings = false;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode bytes to a string
    pub fn decode(&self, bytes: &[u8]) -> Result<String, Mutf8Error> {
        self.decode_with_warnings(bytes).map(|decoded| decoded.text)
    }

    /// Decode bytes, returning every recoverable problem alongside the text
    pub fn decode_with_warnings(&self, bytes: &[u8]) -> Result<Decoded, Mutf8Error> {
        let mut state = DecodeState::new(&self.config, bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            let b0 = bytes[i];
            match b0 {
                0x00 => return Err(Mutf8Error::NulByte { position: i }),
                0x01..=0x7F => {
                    state.flush_pending()?;
                    state.push(b0 as u32);
                    i += 1;
                }
                0x80..=0xBF => {
                    state.flush_pending()?;
                    state.warn(Mutf8Warning::UnexpectedContinuation { position: i })?;
                    i += 1;
                }
                0xC0..=0xDF => {
                    let b1 = continuation(bytes, i + 1)
                        .ok_or(Mutf8Error::Incomplete { position: i, width: 2 })?;
                    let code_point = ((b0 as u32 & 0x1F) << 6) | b1;
                    if (0x01..=0x7F).contains(&code_point) {
                        return Err(Mutf8Error::Overlong { position: i, width: 2, code_point });
                    }
                    state.flush_pending()?;
                    state.push(code_point);
                    i += 2;
                }
                0xE0..=0xEF => {
                    let (b1, b2) = match (continuation(bytes, i + 1), continuation(bytes, i + 2)) {
                        (Some(b1), Some(b2)) => (b1, b2),
                        _ => return Err(Mutf8Error::Incomplete { position: i, width: 3 }),
                    };
                    let code_point = ((b0 as u32 & 0x0F) << 12) | (b1 << 6) | b2;
                    if code_point <= 0x7FF {
                        return Err(Mutf8Error::Overlong { position: i, width: 3, code_point });
                    }
                    state.three_byte(i, code_point)?;
                    i += 3;
                }
                0xF0..=0xF7 => {
                    // Only the lead byte is consumed; the rest is rescanned.
                    state.flush_pending()?;
                    state.warn(Mutf8Warning::FourByteSequence { position: i })?;
                    state.text.push(REPLACEMENT);
                    i += 1;
                }
                _ => return Err(Mutf8Error::InvalidLeadByte { position: i, byte: b0 }),
            }
        }

        state.finish()
    }
}

/// Low six bits of the byte at `index` if it is a continuation byte
fn continuation(bytes: &[u8], index: usize) -> Option<u32> {
    bytes
        .get(index)
        .filter(|&&b| b & 0xC0 == 0x80)
        .map(|&b| (b & 0x3F) as u32)
}

struct DecodeState<'a> {
    config: &'a DecodeConfig,
    text: String,
    warnings: Vec<Mutf8Warning>,
    /// Position and value of a high surrogate waiting for its low half
    pending_high: Option<(usize, u32)>,
}

impl<'a> DecodeState<'a> {
    fn new(config: &'a DecodeConfig, capacity: usize) -> Self {
        Self {
            config,
            text: String::with_capacity(capacity),
            warnings: Vec::new(),
            pending_high: None,
        }
    }

    fn push(&mut self, code_point: u32) {
        self.text.push(char::from_u32(code_point).unwrap_or(REPLACEMENT));
    }

    fn warn(&mut self, warning: Mutf8Warning) -> Result<(), Mutf8Error> {
        if self.config.strict {
            return Err(Mutf8Error::Rejected(warning));
        }
        if self.config.log_warnings {
            tracing::warn!(%warning, "recovered malformed modified UTF-8");
        }
        self.warnings.push(warning);
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<(), Mutf8Error> {
        if let Some((position, code_point)) = self.pending_high.take() {
            self.warn(Mutf8Warning::LoneHighSurrogate { position, code_point })?;
            self.text.push(REPLACEMENT);
        }
        Ok(())
    }

    fn three_byte(&mut self, position: usize, code_point: u32) -> Result<(), Mutf8Error> {
        match code_point {
            0xD800..=0xDBFF => {
                self.flush_pending()?;
                self.pending_high = Some((position, code_point));
            }
            0xDC00..=0xDFFF => match self.pending_high.take() {
                Some((_, high)) => {
                    self.push(0x10000 + ((high & 0x3FF) << 10) + (code_point & 0x3FF));
                }
                None => {
                    self.warn(Mutf8Warning::LoneLowSurrogate { position, code_point })?;
                    self.text.push(REPLACEMENT);
                }
            },
            _ => {
                self.flush_pending()?;
                self.push(code_point);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Decoded, Mutf8Error> {
        if let Some((position, code_point)) = self.pending_high.take() {
            self.warn(Mutf8Warning::UnterminatedHighSurrogate { position, code_point })?;
            self.text.push(REPLACEMENT);
        }
        Ok(Decoded {
            text: self.text,
            warnings: self.warnings,
        })
    }
}
