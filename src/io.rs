// File-level helpers for shortcut decoding.
//
// Provides `parse_file()` and `inspect_file()` which open a path, wrap it in
// a `BufReader`, decode, and drop the file on every exit path.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::error::Result;
use crate::shelllink::parser::{ShortcutDetails, ShortcutParameters, ShortcutParser};

// Shortcut files are small; one buffer usually covers the whole file.
const BUF_SIZE: usize = 8 * 1024;

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::with_capacity(BUF_SIZE, file))
}

/// Decode the shortcut at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ShortcutParameters> {
    ShortcutParser::new().parse_owned(open(path.as_ref())?)
}

/// Decode the shortcut at `path`, keeping every section.
pub fn inspect_file(path: impl AsRef<Path>) -> Result<ShortcutDetails> {
    ShortcutParser::new().inspect(open(path.as_ref())?)
}

/// Decode a shortcut image held in memory.
pub fn parse_bytes(data: &[u8]) -> Result<ShortcutParameters> {
    ShortcutParser::new().parse_owned(Cursor::new(data))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
