#![no_main]
use libfuzzer_sys::fuzz_target;
use lnkread::io::parse_bytes;

fuzz_target!(|data: &[u8]| {
    // Any input must decode or fail with an error, never panic.
    let _ = parse_bytes(data);
});
