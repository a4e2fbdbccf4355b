// Windows Shell Link (.lnk) decoding.
//
// # Modules
//
// - `encoding`    - UTF-16LE and Windows-1252 text decoding
// - `reader`      - primitive stream reader (integers, strings, fixed records)
// - `header`      - 76-byte header and LinkFlags
// - `link_info`   - LinkInfo record and its two header shapes
// - `string_data` - optional character-count-prefixed strings
// - `extra_data`  - trailing tagged data blocks
// - `parser`      - one-pass decode into `ShortcutParameters`

pub mod encoding;
pub mod extra_data;
pub mod header;
pub mod link_info;
pub mod parser;
pub mod reader;
pub mod string_data;

// Re-export key types for convenience.
pub use encoding::TextEncoding;
pub use extra_data::{ExtraData, ExtraDataBlockInfo, ExtraDataSignature};
pub use header::{LINK_CLSID, LinkFlags, ShellLinkHeader};
pub use link_info::{LinkInfo, LinkInfoFlags, LinkInfoShape};
pub use parser::{ShortcutDetails, ShortcutParameters, ShortcutParser, parse};
pub use reader::{FixedLayout, PrefixWidth, ShellLinkReader};
pub use string_data::StringData;
