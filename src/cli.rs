// Command-line front end for lnkread.
//
// Subcommands print the decoded shortcut summary, the raw header, or the
// trailing extra-data block list. Exit code is 0 when every file decodes.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::io::{inspect_file, parse_file};
use crate::shelllink::extra_data::ExtraDataSignature;
use crate::shelllink::header::format_guid;
use crate::shelllink::{ExtraDataBlockInfo, ShortcutParameters};

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Windows Shell Link (.lnk) decoder.
#[derive(Parser, Debug)]
#[command(
    name = "lnkread",
    version,
    about = "Windows shortcut (.lnk) decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Decode shortcut files and print what they point at.
    Parse(ParseArgs),
    /// Print the decoded 76-byte header.
    Header(FileArgs),
    /// List trailing extra-data blocks.
    Blocks(FileArgs),
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Shortcut files to decode.
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct FileArgs {
    /// Shortcut file to inspect.
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Parse,
    Header,
    Blocks,
}

struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    files: Vec<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let (command, files) = match cli.command {
        Cmd::Parse(args) => (Command::Parse, args.files),
        Cmd::Header(args) => (Command::Header, vec![args.file]),
        Cmd::Blocks(args) => (Command::Blocks, vec![args.file]),
    };
    Options {
        command,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        files,
    }
}

/// Parse CLI arguments without side effects (used by fuzzing).
#[cfg(feature = "fuzzing")]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("lnkread".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn block_name(b: &ExtraDataBlockInfo) -> &'static str {
    b.kind().map_or("unknown", ExtraDataSignature::name)
}

fn params_json(path: &Path, p: &ShortcutParameters) -> serde_json::Value {
    serde_json::json!({
        "file": path.display().to_string(),
        "target_path": p.target_path,
        "relative_path": p.relative_path,
        "environment_variable": p.environment_variable,
        "working_dir": p.working_dir,
        "arguments": p.arguments,
        "extra_blocks": p.extra_blocks.iter().map(block_json).collect::<Vec<_>>(),
    })
}

fn block_json(b: &ExtraDataBlockInfo) -> serde_json::Value {
    serde_json::json!({
        "signature": format!("{:#010X}", b.signature),
        "name": block_name(b),
        "size": b.size,
    })
}

fn print_json(out: &mut impl Write, value: &serde_json::Value) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{text}")
}

fn print_field(out: &mut impl Write, name: &str, value: &Option<String>) -> io::Result<()> {
    match value {
        Some(v) => writeln!(out, "  {name}: {v}"),
        None => writeln!(out, "  {name}: -"),
    }
}

// ---------------------------------------------------------------------------
// Parse command
// ---------------------------------------------------------------------------

fn cmd_parse(opts: &Options) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    for path in &opts.files {
        let params = match parse_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("lnkread: {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };
        if opts.quiet {
            continue;
        }

        let res = if opts.json_output {
            print_json(&mut out, &params_json(path, &params))
        } else {
            writeln!(out, "{}:", path.display())
                .and_then(|_| print_field(&mut out, "target path", &params.target_path))
                .and_then(|_| print_field(&mut out, "relative path", &params.relative_path))
                .and_then(|_| {
                    print_field(&mut out, "environment variable", &params.environment_variable)
                })
                .and_then(|_| print_field(&mut out, "working dir", &params.working_dir))
                .and_then(|_| print_field(&mut out, "arguments", &params.arguments))
        };
        if let Err(e) = res {
            eprintln!("lnkread: write: {e}");
            return 1;
        }
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "lnkread: parse: {} files, {failed} failed",
            opts.files.len()
        );
    }

    i32::from(failed > 0)
}

// ---------------------------------------------------------------------------
// Header / blocks commands
// ---------------------------------------------------------------------------

fn cmd_header(opts: &Options) -> i32 {
    let path = &opts.files[0];
    let details = match inspect_file(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("lnkread: {}: {e}", path.display());
            return 1;
        }
    };
    let h = &details.header;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let res = if opts.json_output {
        print_json(
            &mut out,
            &serde_json::json!({
                "header_size": h.header_size,
                "link_clsid": format_guid(&h.link_clsid),
                "link_flags": h.link_flags.bits(),
                "link_flag_names": h.link_flags.to_string(),
                "text_encoding": h.text_encoding().name(),
                "file_attributes": h.file_attributes,
                "creation_time": h.creation_time,
                "access_time": h.access_time,
                "write_time": h.write_time,
                "file_size": h.file_size,
                "icon_index": h.icon_index,
                "show_command": h.show_command,
                "hot_key": h.hot_key,
                "link_info_extended": details.link_info.as_ref().map(|li| li.shape.is_extended()),
            }),
        )
    } else {
        writeln!(out, "Header size:       {}", h.header_size)
            .and_then(|_| writeln!(out, "Link CLSID:        {}", format_guid(&h.link_clsid)))
            .and_then(|_| {
                writeln!(
                    out,
                    "Link flags:        {:#010X} ({})",
                    h.link_flags.bits(),
                    h.link_flags
                )
            })
            .and_then(|_| writeln!(out, "Text encoding:     {}", h.text_encoding().name()))
            .and_then(|_| writeln!(out, "File attributes:   {:#010X}", h.file_attributes))
            .and_then(|_| writeln!(out, "Creation time:     {}", h.creation_time))
            .and_then(|_| writeln!(out, "Access time:       {}", h.access_time))
            .and_then(|_| writeln!(out, "Write time:        {}", h.write_time))
            .and_then(|_| writeln!(out, "File size:         {}", h.file_size))
            .and_then(|_| writeln!(out, "Icon index:        {}", h.icon_index))
            .and_then(|_| writeln!(out, "Show command:      {}", h.show_command))
            .and_then(|_| writeln!(out, "Hot key:           {:#06X}", h.hot_key))
            .and_then(|_| match &details.link_info {
                Some(li) => writeln!(
                    out,
                    "Link info:         {} bytes, {} header",
                    li.shape.base().link_info_size,
                    if li.shape.is_extended() { "extended" } else { "base" }
                ),
                None => writeln!(out, "Link info:         -"),
            })
    };
    if let Err(e) = res {
        eprintln!("lnkread: write: {e}");
        return 1;
    }
    0
}

fn cmd_blocks(opts: &Options) -> i32 {
    let path = &opts.files[0];
    let details = match inspect_file(path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("lnkread: {}: {e}", path.display());
            return 1;
        }
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let res = if opts.json_output {
        let blocks: Vec<_> = details.extra.blocks.iter().map(block_json).collect();
        print_json(&mut out, &serde_json::Value::Array(blocks))
    } else {
        details.extra.blocks.iter().try_for_each(|b| {
            writeln!(
                out,
                "{:#010X}  {:>6}  {}",
                b.signature,
                b.size,
                block_name(b)
            )
        })
    };
    if let Err(e) = res {
        eprintln!("lnkread: write: {e}");
        return 1;
    }
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let default_filter = match opts.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Parse => cmd_parse(&opts),
        Command::Header => cmd_header(&opts),
        Command::Blocks => cmd_blocks(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
