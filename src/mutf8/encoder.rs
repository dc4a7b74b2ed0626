//! Modified UTF-8 encoder

use super::Mutf8Error;

/// Encode a string
///
/// A `&str` cannot hold a lone surrogate, so this cannot fail. Use
/// [`encode_code_points`] or [`encode_utf16`] for unchecked input.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(text));
    for c in text.chars() {
        push_char(c, &mut out);
    }
    out
}

/// Encode a sequence of raw code points
pub fn encode_code_points<I>(code_points: I) -> Result<Vec<u8>, Mutf8Error>
where
    I: IntoIterator<Item = u32>,
{
    let mut out = Vec::new();
    for code_point in code_points {
        push_char(to_char(code_point)?, &mut out);
    }
    Ok(out)
}

/// Encode UTF-16 code units, failing on any unpaired surrogate
pub fn encode_utf16(units: &[u16]) -> Result<Vec<u8>, Mutf8Error> {
    let mut out = Vec::with_capacity(units.len());
    for unit in char::decode_utf16(units.iter().copied()) {
        let c = unit.map_err(|e| Mutf8Error::LoneSurrogate {
            code_point: e.unpaired_surrogate() as u32,
        })?;
        push_char(c, &mut out);
    }
    Ok(out)
}

/// Encoded byte length of a string, without allocating
pub fn encoded_len(text: &str) -> usize {
    text.chars().map(char_len).sum()
}

/// Encoded byte length of raw code points; fails exactly where encoding would
pub fn encoded_len_code_points<I>(code_points: I) -> Result<usize, Mutf8Error>
where
    I: IntoIterator<Item = u32>,
{
    code_points
        .into_iter()
        .try_fold(0usize, |len, code_point| Ok(len + char_len(to_char(code_point)?)))
}

fn to_char(code_point: u32) -> Result<char, Mutf8Error> {
    char::from_u32(code_point).ok_or(if (0xD800..=0xDFFF).contains(&code_point) {
        Mutf8Error::LoneSurrogate { code_point }
    } else {
        Mutf8Error::CodePointOutOfRange { code_point }
    })
}

fn char_len(c: char) -> usize {
    match c as u32 {
        0 => 2,
        0x01..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 6,
    }
}

fn push_char(c: char, out: &mut Vec<u8>) {
    let code_point = c as u32;
    match code_point {
        0 => out.extend_from_slice(&[0xC0, 0x80]),
        0x01..=0x7F => out.push(code_point as u8),
        0x80..=0x7FF => out.extend_from_slice(&[
            0xC0 | (code_point >> 6) as u8,
            0x80 | (code_point & 0x3F) as u8,
        ]),
        0x800..=0xFFFF => push_three_byte(code_point, out),
        _ => {
            let offset = code_point - 0x10000;
            push_three_byte(0xD800 + (offset >> 10), out);
            push_three_byte(0xDC00 + (offset & 0x3FF), out);
        }
    }
}

fn push_three_byte(unit: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(&[
        0xE0 | (unit >> 12) as u8,
        0x80 | ((unit >> 6) & 0x3F) as u8,
        0x80 | (unit & 0x3F) as u8,
    ]);
}
