//! lnkread: Windows Shell Link (`.lnk`) decoding in Rust.
//!
//! The crate provides:
//! - A streaming Shell Link decoder (`shelllink`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```no_run
//! let params = lnkread::io::parse_file("shortcut.lnk").unwrap();
//! if let Some(rel) = params.relative_path {
//!     println!("relative path: {rel}");
//! }
//! ```
//!
//! Decoding from any `Read + Seek` stream leaves the stream with the caller:
//!
//! ```no_run
//! use std::fs::File;
//! use lnkread::shelllink::ShortcutParser;
//!
//! let mut f = File::open("shortcut.lnk").unwrap();
//! let params = ShortcutParser::new().parse(&mut f).unwrap();
//! println!("{:?}", params.environment_variable);
//! ```

pub mod error;
pub mod io;
pub mod shelllink;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use shelllink::{ShortcutParameters, ShortcutParser};
