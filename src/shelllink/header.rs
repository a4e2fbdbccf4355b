// Shell Link header: the fixed 76-byte record at the start of every
// shortcut file, plus the LinkFlags bitset that selects optional sections.

use std::fmt;
use std::io::Read;

use bitflags::bitflags;

use super::encoding::TextEncoding;
use super::reader::{FixedLayout, ShellLinkReader, le_i32, le_u16, le_u32, le_u64};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Declared and actual size of the header record.
pub const HEADER_SIZE: usize = 0x4C;

/// `00021401-0000-0000-C000-000000000046` in on-disk GUID byte order.
pub const LINK_CLSID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

// ---------------------------------------------------------------------------
// LinkFlags
// ---------------------------------------------------------------------------

bitflags! {
    /// Header flags selecting optional sections and string encoding.
    /// Bits 11 and 16 are unused by the format.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct LinkFlags: u32 {
        const HAS_LINK_TARGET_ID_LIST = 1 << 0;
        const HAS_LINK_INFO = 1 << 1;
        const HAS_NAME = 1 << 2;
        const HAS_RELATIVE_PATH = 1 << 3;
        const HAS_WORKING_DIR = 1 << 4;
        const HAS_ARGUMENTS = 1 << 5;
        const HAS_ICON_LOCATION = 1 << 6;
        const IS_UNICODE = 1 << 7;
        const FORCE_NO_LINK_INFO = 1 << 8;
        const HAS_EXP_STRING = 1 << 9;
        const RUN_IN_SEPARATE_PROCESS = 1 << 10;
        const HAS_DARWIN_ID = 1 << 12;
        const RUN_AS_USER = 1 << 13;
        const HAS_EXP_ICON = 1 << 14;
        const NO_PIDL_ALIAS = 1 << 15;
        const RUN_WITH_SHIM_LAYER = 1 << 17;
        const FORCE_NO_LINK_TRACK = 1 << 18;
        const ENABLE_TARGET_METADATA = 1 << 19;
        const DISABLE_LINK_PATH_TRACKING = 1 << 20;
        const DISABLE_KNOWN_FOLDER_TRACKING = 1 << 21;
        const DISABLE_KNOWN_FOLDER_ALIAS = 1 << 22;
        const ALLOW_LINK_TO_LINK = 1 << 23;
        const UNALIAS_ON_SAVE = 1 << 24;
        const PREFER_ENVIRONMENT_PATH = 1 << 25;
        const KEEP_LOCAL_ID_LIST_FOR_UNC_TARGET = 1 << 26;
    }
}

impl LinkFlags {
    /// Encoding of the string-data fields that follow LinkInfo.
    pub fn text_encoding(self) -> TextEncoding {
        if self.contains(Self::IS_UNICODE) {
            TextEncoding::Utf16Le
        } else {
            TextEncoding::Windows1252
        }
    }
}

impl fmt::Display for LinkFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

// ---------------------------------------------------------------------------
// Header record
// ---------------------------------------------------------------------------

/// Decoded Shell Link header. Only `header_size`, `link_clsid` and
/// `link_flags` drive decoding; the rest is reported as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLinkHeader {
    pub header_size: i32,
    pub link_clsid: [u8; 16],
    pub link_flags: LinkFlags,
    pub file_attributes: u32,
    /// FILETIME (100 ns ticks since 1601-01-01 UTC).
    pub creation_time: u64,
    pub access_time: u64,
    pub write_time: u64,
    pub file_size: u32,
    pub icon_index: i32,
    pub show_command: u32,
    pub hot_key: u16,
    pub reserved1: u16,
    pub reserved2: u32,
    pub reserved3: u32,
}

impl FixedLayout for ShellLinkHeader {
    const SIZE: usize = HEADER_SIZE;

    fn decode(b: &[u8]) -> Result<Self> {
        let mut link_clsid = [0u8; 16];
        link_clsid.copy_from_slice(&b[4..20]);
        Ok(Self {
            header_size: le_i32(b, 0),
            link_clsid,
            link_flags: LinkFlags::from_bits_retain(le_u32(b, 20)),
            file_attributes: le_u32(b, 24),
            creation_time: le_u64(b, 28),
            access_time: le_u64(b, 36),
            write_time: le_u64(b, 44),
            file_size: le_u32(b, 52),
            icon_index: le_i32(b, 56),
            show_command: le_u32(b, 60),
            hot_key: le_u16(b, 64),
            reserved1: le_u16(b, 66),
            reserved2: le_u32(b, 68),
            reserved3: le_u32(b, 72),
        })
    }
}

impl ShellLinkHeader {
    /// Read and validate the header.
    ///
    /// Fails with `InvalidFormat` when the stream holds fewer than 76 bytes,
    /// when the size field is not 76, or when the class identifier is wrong.
    pub fn read<R: Read>(reader: &mut ShellLinkReader<R>) -> Result<Self> {
        let header: Self =
            reader.read_structure_or(|| Error::invalid("Unable to read header"))?;

        if header.header_size != HEADER_SIZE as i32 {
            return Err(Error::invalid("Unexpected header size"));
        }
        if header.link_clsid != LINK_CLSID {
            return Err(Error::invalid("Unexpected header magic value"));
        }

        log::debug!(
            "shell link header: flags={:#010X} attributes={:#010X}",
            header.link_flags.bits(),
            header.file_attributes
        );
        Ok(header)
    }

    /// Encoding of the variable-width string fields.
    pub fn text_encoding(&self) -> TextEncoding {
        self.link_flags.text_encoding()
    }

    #[inline]
    pub fn has(&self, flag: LinkFlags) -> bool {
        self.link_flags.contains(flag)
    }
}

/// Canonical text form of a 16-byte GUID stored in on-disk byte order.
pub fn format_guid(g: &[u8; 16]) -> String {
    format!(
        "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
        le_u32(g, 0),
        le_u16(g, 4),
        le_u16(g, 6),
        g[8],
        g[9],
        g[10],
        g[11],
        g[12],
        g[13],
        g[14],
        g[15]
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
