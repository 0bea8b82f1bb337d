//! Loader fuzz target: feed arbitrary bytes through the whole signature pipeline.
//! Loading must not panic; it returns Ok(SignatureSet) or Err(LoadError).
//! Build with: cargo fuzz run load_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(set) = pigsty::load_str(s) {
        // Whatever loads must render back to a document that loads to the same entries.
        let again = pigsty::load_str(&pigsty::dump::format_set(&set)).expect("reload");
        assert_eq!(set.entries(), again.entries());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run load_fuzz");
}
