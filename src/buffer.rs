//! Fixed-width buffer normalization

/// Which end of a buffer holds the least significant byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Most significant byte first; the tail of the buffer is kept
    #[default]
    Big,
    /// Least significant byte first; the head of the buffer is kept
    Little,
}

/// Pad or truncate `bytes` to exactly `width` bytes
///
/// Truncation drops the high-order end and padding adds zero bytes on the
/// high-order end, so for integers the low-order bytes always survive.
pub fn normalize(bytes: &[u8], width: usize, endian: Endian) -> Vec<u8> {
    if bytes.len() == width {
        return bytes.to_vec();
    }

    if bytes.len() > width {
        return match endian {
            Endian::Big => bytes[bytes.len() - width..].to_vec(),
            Endian::Little => bytes[..width].to_vec(),
        };
    }

    let mut out = vec![0u8; width];
    match endian {
        Endian::Big => out[width - bytes.len()..].copy_from_slice(bytes),
        Endian::Little => out[..bytes.len()].copy_from_slice(bytes),
    }
    out
}
