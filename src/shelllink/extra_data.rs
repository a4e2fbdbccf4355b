// ExtraData: the tagged block stream at the end of a shortcut file.
//
// Each block is `{i32 size, u32 signature, payload[size - 8]}`; a size
// below 4 terminates the stream. Only the environment-variable block is
// decoded. Every other block, recognized or not, is skipped by its size.

use std::io::{Read, Seek};

use super::encoding::TextEncoding;
use super::reader::ShellLinkReader;
use crate::error::{Error, Result};

/// Size + signature prefix of every block.
pub const BLOCK_PREFIX_SIZE: u32 = 8;
/// Below this, a size field is the terminal block.
pub const TERMINAL_BLOCK_LIMIT: i32 = 4;

/// Byte width of the ANSI target field of an environment block.
pub const ENV_TARGET_ANSI_SIZE: usize = 260;
/// Byte width of the Unicode target field of an environment block.
pub const ENV_TARGET_UNICODE_SIZE: usize = 520;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ExtraDataSignature {
    Environment = 0xA000_0001,
    Console = 0xA000_0002,
    Tracker = 0xA000_0003,
    SpecialFolder = 0xA000_0005,
    Darwin = 0xA000_0006,
    IconEnvironment = 0xA000_0007,
    Shim = 0xA000_0008,
    PropertyStore = 0xA000_0009,
    KnownFolder = 0xA000_000B,
    VistaAndAboveIdList = 0xA000_000C,
}

impl ExtraDataSignature {
    pub fn from_u32(v: u32) -> Option<Self> {
        Some(match v {
            0xA000_0001 => Self::Environment,
            0xA000_0002 => Self::Console,
            0xA000_0003 => Self::Tracker,
            0xA000_0005 => Self::SpecialFolder,
            0xA000_0006 => Self::Darwin,
            0xA000_0007 => Self::IconEnvironment,
            0xA000_0008 => Self::Shim,
            0xA000_0009 => Self::PropertyStore,
            0xA000_000B => Self::KnownFolder,
            0xA000_000C => Self::VistaAndAboveIdList,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Environment => "EnvironmentVariableDataBlock",
            Self::Console => "ConsoleDataBlock",
            Self::Tracker => "TrackerDataBlock",
            Self::SpecialFolder => "SpecialFolderDataBlock",
            Self::Darwin => "DarwinDataBlock",
            Self::IconEnvironment => "IconEnvironmentDataBlock",
            Self::Shim => "ShimDataBlock",
            Self::PropertyStore => "PropertyStoreDataBlock",
            Self::KnownFolder => "KnownFolderDataBlock",
            Self::VistaAndAboveIdList => "VistaAndAboveIDListDataBlock",
        }
    }
}

/// One block seen while walking the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraDataBlockInfo {
    /// Declared block size, prefix included.
    pub size: u32,
    pub signature: u32,
}

impl ExtraDataBlockInfo {
    pub fn kind(&self) -> Option<ExtraDataSignature> {
        ExtraDataSignature::from_u32(self.signature)
    }
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraData {
    /// Unicode target of the environment-variable block, if present.
    pub environment_variable: Option<String>,
    pub blocks: Vec<ExtraDataBlockInfo>,
}

impl ExtraData {
    /// Walk blocks until the terminal block. Running out of stream before
    /// the terminal block is an error.
    pub fn read<R: Read + Seek>(reader: &mut ShellLinkReader<R>) -> Result<Self> {
        let mut out = Self::default();
        loop {
            let size = reader.read_i32()?;
            if size < TERMINAL_BLOCK_LIMIT {
                log::trace!("extra data: terminal block ({size})");
                return Ok(out);
            }
            let size = size as u32;
            let signature = reader.read_u32()?;
            if size < BLOCK_PREFIX_SIZE {
                return Err(Error::invalid("Extra data block too small"));
            }
            let remaining = u64::from(size - BLOCK_PREFIX_SIZE);
            let info = ExtraDataBlockInfo { size, signature };
            log::debug!(
                "extra data block {signature:#010X} ({}) size={size}",
                info.kind().map_or("unknown", ExtraDataSignature::name)
            );
            out.blocks.push(info);

            match info.kind() {
                Some(ExtraDataSignature::Environment) => {
                    let consumed = (ENV_TARGET_ANSI_SIZE + ENV_TARGET_UNICODE_SIZE) as u64;
                    if remaining < consumed {
                        return Err(Error::invalid("Environment data block too small"));
                    }
                    let _ansi = reader.read_fixed_null_terminated_string(
                        ENV_TARGET_ANSI_SIZE,
                        TextEncoding::Windows1252,
                    )?;
                    let unicode = reader.read_fixed_null_terminated_string(
                        ENV_TARGET_UNICODE_SIZE,
                        TextEncoding::Utf16Le,
                    )?;
                    out.environment_variable = Some(unicode);
                    reader.skip(remaining - consumed)?;
                }
                _ => reader.skip(remaining)?,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
