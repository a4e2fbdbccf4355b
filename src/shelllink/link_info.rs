// LinkInfo: the variable-length record carrying path-resolution data.
//
// The record starts with a header whose own size field decides its shape:
// 28 bytes for the base shape, 36 bytes when the Unicode offsets for the
// local base path and common path suffix are present. The header is read
// once and copied into the payload buffer so that offsets in the record,
// which are relative to the start of LinkInfo, index the buffer directly.

use std::io::Read;

use bitflags::bitflags;

use super::reader::{FixedLayout, ShellLinkReader, le_u32};
use crate::error::{Error, Result};

/// Size of the base LinkInfo header.
pub const BASE_HEADER_SIZE: usize = 0x1C;
/// Size of the header once both Unicode offsets are present.
pub const EXTENDED_HEADER_SIZE: usize = 0x24;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LinkInfoFlags: u32 {
        const VOLUME_ID_AND_LOCAL_BASE_PATH = 1 << 0;
        const COMMON_NETWORK_RELATIVE_LINK_AND_PATH_SUFFIX = 1 << 1;
    }
}

// ---------------------------------------------------------------------------
// Header shapes
// ---------------------------------------------------------------------------

/// The 28-byte base header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkInfoHeader {
    pub link_info_size: u32,
    pub link_info_header_size: u32,
    pub link_info_flags: LinkInfoFlags,
    pub volume_id_offset: u32,
    pub local_base_path_offset: u32,
    pub common_network_relative_link_offset: u32,
    pub common_path_suffix_offset: u32,
}

impl FixedLayout for LinkInfoHeader {
    const SIZE: usize = BASE_HEADER_SIZE;

    fn decode(b: &[u8]) -> Result<Self> {
        Ok(Self {
            link_info_size: le_u32(b, 0),
            link_info_header_size: le_u32(b, 4),
            link_info_flags: LinkInfoFlags::from_bits_retain(le_u32(b, 8)),
            volume_id_offset: le_u32(b, 12),
            local_base_path_offset: le_u32(b, 16),
            common_network_relative_link_offset: le_u32(b, 20),
            common_path_suffix_offset: le_u32(b, 24),
        })
    }
}

/// Header shape, chosen at decode time from `link_info_header_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkInfoShape {
    Base(LinkInfoHeader),
    Extended {
        base: LinkInfoHeader,
        local_base_path_offset_unicode: u32,
        common_path_suffix_offset_unicode: u32,
    },
}

impl LinkInfoShape {
    pub fn base(&self) -> &LinkInfoHeader {
        match self {
            Self::Base(base) | Self::Extended { base, .. } => base,
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended { .. })
    }
}

// ---------------------------------------------------------------------------
// Decoded record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    pub shape: LinkInfoShape,
    /// Unicode local base path; only available in the extended shape.
    pub local_base_path: Option<String>,
    /// Unicode common path suffix; only available in the extended shape.
    pub common_path_suffix: Option<String>,
}

impl LinkInfo {
    /// Read the whole LinkInfo record.
    pub fn read<R: Read>(reader: &mut ShellLinkReader<R>) -> Result<Self> {
        let base: LinkInfoHeader = reader.read_structure()?;
        let total = base.link_info_size as usize;
        let header_len = base.link_info_header_size as usize;
        if header_len < BASE_HEADER_SIZE || header_len > total {
            return Err(Error::invalid("Unexpected link info header size"));
        }

        let mut buf = Vec::with_capacity(header_len);
        buf.extend_from_slice(reader.scratch(BASE_HEADER_SIZE));
        reader.read_into_vec(&mut buf, total - BASE_HEADER_SIZE)?;

        let shape = if header_len >= EXTENDED_HEADER_SIZE {
            LinkInfoShape::Extended {
                base,
                local_base_path_offset_unicode: le_u32(&buf, 28),
                common_path_suffix_offset_unicode: le_u32(&buf, 32),
            }
        } else {
            LinkInfoShape::Base(base)
        };
        log::debug!(
            "link info: size={total} header={header_len} flags={:#X} extended={}",
            base.link_info_flags.bits(),
            shape.is_extended()
        );

        let (local_base_path, common_path_suffix) = match shape {
            LinkInfoShape::Extended {
                local_base_path_offset_unicode,
                common_path_suffix_offset_unicode,
                ..
            } => (
                utf16z_at(&buf, local_base_path_offset_unicode)?,
                utf16z_at(&buf, common_path_suffix_offset_unicode)?,
            ),
            LinkInfoShape::Base(_) => (None, None),
        };

        Ok(Self {
            shape,
            local_base_path,
            common_path_suffix,
        })
    }

    /// Local base path followed by the common path suffix. `None` when
    /// neither Unicode string is present.
    pub fn target_path(&self) -> Option<String> {
        match (&self.local_base_path, &self.common_path_suffix) {
            (None, None) => None,
            (base, suffix) => Some(format!(
                "{}{}",
                base.as_deref().unwrap_or(""),
                suffix.as_deref().unwrap_or("")
            )),
        }
    }
}

/// NUL-terminated UTF-16LE string at `offset` in `buf`. Offset 0 means the
/// field is absent.
fn utf16z_at(buf: &[u8], offset: u32) -> Result<Option<String>> {
    if offset == 0 {
        return Ok(None);
    }
    let start = offset as usize;
    let tail = buf
        .get(start..)
        .ok_or_else(|| Error::invalid("Link info string out of bounds"))?;
    let len = tail
        .chunks_exact(2)
        .position(|unit| unit[0] == 0 && unit[1] == 0)
        .ok_or_else(|| Error::invalid("Link info string out of bounds"))?;
    let units = tail[..len * 2]
        .chunks_exact(2)
        .map(|u| u16::from_le_bytes([u[0], u[1]]));
    Ok(Some(
        char::decode_utf16(units)
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
