// Primitive reader over a shortcut byte stream.
//
// Every read funnels through `read_exact_or`, so a stream that ends early
// always surfaces as the caller-chosen EOF error (default: EndOfStream).
// The reader owns a scratch buffer that is reused across reads within one
// decode; a reader is never shared between decode calls.

use std::io::{self, Read, Seek, SeekFrom};

use super::encoding::{CharDecoder, Decoded, TextEncoding};
use crate::error::{Error, Result};

// Growth step for reads whose length comes from the stream.
const READ_CHUNK: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Fixed-layout records
// ---------------------------------------------------------------------------

/// A record with a fixed on-disk size, decoded field by field from explicit
/// little-endian offsets.
pub trait FixedLayout: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decode from exactly `SIZE` bytes.
    fn decode(bytes: &[u8]) -> Result<Self>;
}

#[inline]
pub(crate) fn le_u16(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

#[inline]
pub(crate) fn le_u32(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

#[inline]
pub(crate) fn le_i32(b: &[u8], off: usize) -> i32 {
    le_u32(b, off) as i32
}

#[inline]
pub(crate) fn le_u64(b: &[u8], off: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&b[off..off + 8]);
    u64::from_le_bytes(raw)
}

// ---------------------------------------------------------------------------
// Length prefixes
// ---------------------------------------------------------------------------

/// Width of a string length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixWidth {
    /// Unsigned byte.
    U8,
    /// Unsigned 16-bit.
    U16,
    /// Signed 32-bit; negative lengths are rejected.
    I32,
}

impl PrefixWidth {
    pub fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::I32 => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

pub struct ShellLinkReader<R> {
    inner: R,
    scratch: Vec<u8>,
}

impl<R> ShellLinkReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            scratch: Vec::new(),
        }
    }
}

impl<R: Read> ShellLinkReader<R> {
    /// Fill `buf` completely. A zero-length read before `buf` is full is
    /// terminal and reported through `on_eof`. Interrupted reads are retried.
    pub fn read_exact_or<F>(&mut self, buf: &mut [u8], on_eof: F) -> Result<()>
    where
        F: FnOnce() -> Error,
    {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => return Err(on_eof()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_exact_or(buf, || Error::EndOfStream)
    }

    /// Append exactly `len` bytes to `buf`. The buffer grows one chunk at a
    /// time, so a length field larger than the stream fails at end of stream
    /// instead of allocating the declared size up front.
    pub fn read_into_vec(&mut self, buf: &mut Vec<u8>, len: usize) -> Result<()> {
        let end = buf.len() + len;
        while buf.len() < end {
            let start = buf.len();
            buf.resize(start + (end - start).min(READ_CHUNK), 0);
            self.read_exact(&mut buf[start..])?;
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a length prefix of the given width.
    pub fn read_length(&mut self, width: PrefixWidth) -> Result<usize> {
        match width {
            PrefixWidth::U8 => Ok(usize::from(self.read_array::<1>()?[0])),
            PrefixWidth::U16 => Ok(usize::from(self.read_u16()?)),
            PrefixWidth::I32 => {
                let n = self.read_i32()?;
                usize::try_from(n).map_err(|_| Error::invalid("Negative string length"))
            }
        }
    }

    /// Read a prefix giving a byte count, then decode exactly that many bytes.
    pub fn read_length_prefixed_string(
        &mut self,
        width: PrefixWidth,
        encoding: TextEncoding,
    ) -> Result<String> {
        let len = self.read_length(width)?;
        let mut bytes = Vec::new();
        self.read_into_vec(&mut bytes, len)?;
        Ok(encoding.decode(&bytes))
    }

    /// Read a prefix giving a character count (UTF-16 code units), then
    /// decode characters one at a time until that many have been produced.
    pub fn read_char_count_prefixed_string(
        &mut self,
        width: PrefixWidth,
        encoding: TextEncoding,
    ) -> Result<String> {
        let count = self.read_length(width)?;
        let mut decoder = encoding.decoder();
        let mut out = String::with_capacity(count);
        let mut units = 0;
        while units < count {
            let decoded = self.read_char(&mut decoder)?;
            units += decoded.units();
            match decoded {
                Decoded::Pending => {}
                Decoded::One(c) => out.push(c),
                Decoded::Two(a, b) => {
                    out.push(a);
                    out.push(b);
                }
            }
        }
        Ok(out)
    }

    /// Decode characters until one equals U+0000. The terminator is consumed
    /// but not returned.
    pub fn read_null_terminated_string(&mut self, encoding: TextEncoding) -> Result<String> {
        let mut decoder = encoding.decoder();
        let mut out = String::new();
        loop {
            match self.read_char(&mut decoder)? {
                Decoded::Pending => {}
                Decoded::One('\0') => return Ok(out),
                Decoded::One(c) => out.push(c),
                Decoded::Two(a, b) => {
                    out.push(a);
                    if b == '\0' {
                        return Ok(out);
                    }
                    out.push(b);
                }
            }
        }
    }

    /// Read exactly `byte_count` bytes, decode them, and cut at the first NUL.
    pub fn read_fixed_null_terminated_string(
        &mut self,
        byte_count: usize,
        encoding: TextEncoding,
    ) -> Result<String> {
        self.fill_scratch(byte_count)?;
        let mut s = encoding.decode(&self.scratch[..byte_count]);
        if let Some(nul) = s.find('\0') {
            s.truncate(nul);
        }
        Ok(s)
    }

    /// Read `T::SIZE` bytes and decode them as `T`.
    pub fn read_structure<T: FixedLayout>(&mut self) -> Result<T> {
        self.read_structure_or(|| Error::EndOfStream)
    }

    pub fn read_structure_or<T, F>(&mut self, on_eof: F) -> Result<T>
    where
        T: FixedLayout,
        F: FnOnce() -> Error,
    {
        self.fill_scratch_or(T::SIZE, on_eof)?;
        T::decode(&self.scratch[..T::SIZE])
    }

    /// Bytes of the most recent scratch-backed read.
    pub(crate) fn scratch(&self, len: usize) -> &[u8] {
        &self.scratch[..len]
    }

    fn fill_scratch(&mut self, len: usize) -> Result<()> {
        self.fill_scratch_or(len, || Error::EndOfStream)
    }

    fn fill_scratch_or<F: FnOnce() -> Error>(&mut self, len: usize, on_eof: F) -> Result<()> {
        if self.scratch.len() < len {
            self.scratch.resize(len, 0);
        }
        let mut scratch = std::mem::take(&mut self.scratch);
        let res = self.read_exact_or(&mut scratch[..len], on_eof);
        self.scratch = scratch;
        res
    }

    fn read_char(&mut self, decoder: &mut CharDecoder) -> Result<Decoded> {
        let mut byte = [0u8; 1];
        loop {
            self.read_exact(&mut byte)?;
            let decoded = decoder.push(byte[0]);
            if decoded != Decoded::Pending {
                return Ok(decoded);
            }
        }
    }
}

impl<R: Seek> ShellLinkReader<R> {
    /// Move forward `n` bytes without reading them. Seeking past the end is
    /// not an error here; the next read reports it.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        let delta = i64::try_from(n).map_err(|_| Error::invalid("Skip distance too large"))?;
        self.inner.seek(SeekFrom::Current(delta))?;
        Ok(())
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
