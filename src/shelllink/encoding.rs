// Text encodings used by Shell Link string fields.
//
// Two encodings appear in shortcut files: UTF-16LE when the header's
// IS_UNICODE flag is set, and the legacy Windows-1252 code page otherwise.
// Both are available as a whole-buffer decoder and as an incremental
// decoder that is fed one byte at a time and reports when a character is
// complete, which is what the character-count and NUL-terminated string
// readers need.

use std::char::REPLACEMENT_CHARACTER;

/// Code points for bytes 0x80..=0x9F in Windows-1252. The five bytes the
/// code page leaves undefined map to the C1 control with the same value.
const WINDOWS_1252_HIGH: [u16; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F, //
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178, //
];

/// Text encoding of a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Fixed 2-byte code units, little-endian.
    Utf16Le,
    /// Single-byte legacy code page.
    Windows1252,
}

impl TextEncoding {
    /// Decode a complete byte buffer. Malformed sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Windows1252 => bytes.iter().map(|&b| windows_1252_char(b)).collect(),
            Self::Utf16Le => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
                let mut out: String = char::decode_utf16(units)
                    .map(|r| r.unwrap_or(REPLACEMENT_CHARACTER))
                    .collect();
                if bytes.len() % 2 != 0 {
                    out.push(REPLACEMENT_CHARACTER);
                }
                out
            }
        }
    }

    /// A fresh incremental decoder for this encoding.
    pub fn decoder(self) -> CharDecoder {
        CharDecoder {
            encoding: self,
            low_byte: None,
            high_surrogate: None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Utf16Le => "UTF-16LE",
            Self::Windows1252 => "Windows-1252",
        }
    }
}

#[inline]
fn windows_1252_char(b: u8) -> char {
    let cp = match b {
        0x80..=0x9F => u32::from(WINDOWS_1252_HIGH[usize::from(b - 0x80)]),
        _ => u32::from(b),
    };
    char::from_u32(cp).unwrap_or(REPLACEMENT_CHARACTER)
}

// ---------------------------------------------------------------------------
// Incremental decoding
// ---------------------------------------------------------------------------

/// Output of one [`CharDecoder::push`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// More bytes are needed before a character is complete.
    Pending,
    One(char),
    /// An unpaired high surrogate (reported as U+FFFD) followed by the
    /// character that broke the pair.
    Two(char, char),
}

impl Decoded {
    /// Number of UTF-16 code units the decoded characters occupy. Character
    /// counts in shortcut files are expressed in these units.
    pub fn units(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::One(c) => c.len_utf16(),
            Self::Two(a, b) => a.len_utf16() + b.len_utf16(),
        }
    }
}

/// Byte-at-a-time decoder. Holds at most one partial code unit and one
/// pending high surrogate.
#[derive(Debug, Clone)]
pub struct CharDecoder {
    encoding: TextEncoding,
    low_byte: Option<u8>,
    high_surrogate: Option<u16>,
}

impl CharDecoder {
    /// Feed one byte.
    pub fn push(&mut self, byte: u8) -> Decoded {
        match self.encoding {
            TextEncoding::Windows1252 => Decoded::One(windows_1252_char(byte)),
            TextEncoding::Utf16Le => match self.low_byte.take() {
                None => {
                    self.low_byte = Some(byte);
                    Decoded::Pending
                }
                Some(lo) => self.push_unit(u16::from_le_bytes([lo, byte])),
            },
        }
    }

    fn push_unit(&mut self, unit: u16) -> Decoded {
        match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                Decoded::Pending
            }
            (None, 0xDC00..=0xDFFF) => Decoded::One(REPLACEMENT_CHARACTER),
            (None, u) => Decoded::One(bmp_char(u)),
            (Some(high), 0xDC00..=0xDFFF) => {
                let cp = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                Decoded::One(char::from_u32(cp).unwrap_or(REPLACEMENT_CHARACTER))
            }
            (Some(_), 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                Decoded::One(REPLACEMENT_CHARACTER)
            }
            (Some(_), u) => Decoded::Two(REPLACEMENT_CHARACTER, bmp_char(u)),
        }
    }
}

#[inline]
fn bmp_char(unit: u16) -> char {
    char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER)
}
