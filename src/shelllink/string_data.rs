// StringData: the optional character-count-prefixed strings that follow
// LinkInfo, in fixed order NAME, RELATIVE_PATH, WORKING_DIR, ARGUMENTS,
// ICON_LOCATION. Every flagged field is consumed so the trailing block
// stream stays aligned, even the ones that are not kept.

use std::io::Read;

use super::header::LinkFlags;
use super::reader::{PrefixWidth, ShellLinkReader};
use crate::error::Result;

/// The StringData fields that are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringData {
    pub relative_path: Option<String>,
    pub working_dir: Option<String>,
    pub arguments: Option<String>,
}

impl StringData {
    pub fn read<R: Read>(reader: &mut ShellLinkReader<R>, flags: LinkFlags) -> Result<Self> {
        let encoding = flags.text_encoding();
        let mut field = |flag: LinkFlags| -> Result<Option<String>> {
            if !flags.contains(flag) {
                return Ok(None);
            }
            let s = reader.read_char_count_prefixed_string(PrefixWidth::U16, encoding)?;
            log::trace!("string data {flag:?}: {} chars", s.chars().count());
            Ok(Some(s))
        };

        // Name: consumed, discarded.
        field(LinkFlags::HAS_NAME)?;
        let relative_path = field(LinkFlags::HAS_RELATIVE_PATH)?;
        let working_dir = field(LinkFlags::HAS_WORKING_DIR)?;
        let arguments = field(LinkFlags::HAS_ARGUMENTS)?;
        // Icon location: consumed, discarded.
        field(LinkFlags::HAS_ICON_LOCATION)?;

        Ok(Self {
            relative_path,
            working_dir,
            arguments,
        })
    }
}
