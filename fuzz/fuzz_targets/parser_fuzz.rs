#![no_main]
use libfuzzer_sys::fuzz_target;

const SUBCOMMANDS: [&str; 3] = ["parse", "header", "blocks"];

fuzz_target!(|data: &[u8]| {
    // First byte picks a subcommand so every argument shape gets exercised.
    let Some((&pick, rest)) = data.split_first() else {
        return;
    };
    let mut args = vec![SUBCOMMANDS[usize::from(pick) % SUBCOMMANDS.len()].to_string()];
    args.extend(
        String::from_utf8_lossy(rest)
            .split_whitespace()
            .take(16)
            .map(str::to_string),
    );
    lnkread::cli::fuzz_try_parse_args(&args);
});
