// One-pass shortcut decoder.
//
// Section order: header, [LinkTargetIDList], [LinkInfo], [StringData],
// ExtraData. Optional sections are selected by LinkFlags. A result is only
// returned once the terminal extra-data block has been read.

use std::io::{Read, Seek};

use super::extra_data::{ExtraData, ExtraDataBlockInfo};
use super::header::{LinkFlags, ShellLinkHeader};
use super::link_info::LinkInfo;
use super::reader::ShellLinkReader;
use super::string_data::StringData;
use crate::error::Result;

/// What a shortcut points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutParameters {
    /// Local base path plus common path suffix from an extended LinkInfo.
    pub target_path: Option<String>,
    pub relative_path: Option<String>,
    /// Unicode target of the environment-variable data block.
    pub environment_variable: Option<String>,
    pub working_dir: Option<String>,
    pub arguments: Option<String>,
    /// Every extra-data block in file order.
    pub extra_blocks: Vec<ExtraDataBlockInfo>,
}

/// Shortcut decoder. Holds no state between calls; each call builds its own
/// reader and scratch buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutParser;

impl ShortcutParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode from a borrowed stream. The stream is left open and positioned
    /// just past the terminal block on success.
    pub fn parse<R: Read + Seek>(&self, stream: &mut R) -> Result<ShortcutParameters> {
        self.parse_owned(stream)
    }

    /// Decode from a stream the parser takes ownership of. The stream is
    /// dropped when the call returns, on success or failure.
    pub fn parse_owned<R: Read + Seek>(&self, stream: R) -> Result<ShortcutParameters> {
        self.inspect(stream).map(ShortcutParameters::from)
    }

    /// Decode keeping every section instead of just the summary.
    pub fn inspect<R: Read + Seek>(&self, stream: R) -> Result<ShortcutDetails> {
        let mut reader = ShellLinkReader::new(stream);
        decode(&mut reader)
    }
}

/// Every decoded section of a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutDetails {
    pub header: ShellLinkHeader,
    pub link_info: Option<LinkInfo>,
    pub strings: StringData,
    pub extra: ExtraData,
}

impl From<ShortcutDetails> for ShortcutParameters {
    fn from(d: ShortcutDetails) -> Self {
        Self {
            target_path: d.link_info.as_ref().and_then(LinkInfo::target_path),
            relative_path: d.strings.relative_path,
            environment_variable: d.extra.environment_variable,
            working_dir: d.strings.working_dir,
            arguments: d.strings.arguments,
            extra_blocks: d.extra.blocks,
        }
    }
}

/// Decode from a borrowed stream with a default parser.
pub fn parse<R: Read + Seek>(stream: &mut R) -> Result<ShortcutParameters> {
    ShortcutParser::new().parse(stream)
}

fn decode<R: Read + Seek>(reader: &mut ShellLinkReader<R>) -> Result<ShortcutDetails> {
    let header = ShellLinkHeader::read(reader)?;

    if header.has(LinkFlags::HAS_LINK_TARGET_ID_LIST) {
        let id_list_size = reader.read_u16()?;
        log::trace!("skipping target id list ({id_list_size} bytes)");
        reader.skip(u64::from(id_list_size))?;
    }

    let link_info = if header.has(LinkFlags::HAS_LINK_INFO) {
        Some(LinkInfo::read(reader)?)
    } else {
        None
    };

    let strings = StringData::read(reader, header.link_flags)?;
    let extra = ExtraData::read(reader)?;

    Ok(ShortcutDetails {
        header,
        link_info,
        strings,
        extra,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
