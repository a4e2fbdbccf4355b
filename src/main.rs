fn main() {
    #[cfg(feature = "cli")]
    lnkread::cli::run();

    // Library-only build: the decoder is still usable through `lnkread::io`.
    #[cfg(not(feature = "cli"))]
    {
        eprintln!("lnkread: built without the `cli` feature; no shortcut commands available");
        std::process::exit(2);
    }
}
