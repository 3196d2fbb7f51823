//! AFL++ fuzz target for `pandoc-minted`.
//!
//! This binary is stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin pandoc_minted_afl
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/pandoc_minted_afl
//! ```
//!
//! Seed `fuzz/afl/in` with `pandoc -t json` output. Rust panics normally
//! unwind and exit with a non-crashing status code, while AFL++ only treats
//! signals/aborts as crashes, so any unwind is turned into `abort()`.

use std::io::Read;

use pandoc_minted::target::{OutputFormat, RenderTarget};
use pandoc_minted::{FilterOptions, filter_json};

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

const FORMATS: [OutputFormat; 4] = [
    OutputFormat::Latex,
    OutputFormat::Beamer,
    OutputFormat::Html,
    OutputFormat::Other,
];

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        return;
    }
    let src = String::from_utf8_lossy(data);

    for format in FORMATS {
        for highlighting in [false, true] {
            let target = RenderTarget::new(format, highlighting);
            // invalid documents are allowed to fail, never to panic.
            let Ok(out) = filter_json(&src, &target, &FilterOptions::default()) else {
                continue;
            };

            // invariants that must hold for any accepted document:
            // - tex-less formats never gain minted text
            // - only beamer ever gains a fragile marker
            if !format.supports_minted() {
                let before = src.matches("mint").count();
                let after = out.matches("mint").count();
                assert!(after <= before, "minted leaked into {format:?}");
            }
            if format != OutputFormat::Beamer {
                let before = src.matches("fragile").count();
                let after = out.matches("fragile").count();
                assert!(after <= before, "fragile added for {format:?}");
            }

            // output must itself be a valid document the filter accepts.
            filter_json(&out, &target, &FilterOptions::default()).unwrap();
        }
    }
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
