//! Check pigsty signature files and report what they compile to.
//!
//! Usage:
//!   pigsty_check [OPTIONS] FILE.pigsty ...
//!
//! Options:
//!   --dump, -d     Print every compiled signature with its encoded fields
//!   --quiet, -q    Only report failures
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to change the level (default: warn).
//! Exit code 1 if any file fails to load.

use pigsty::dump::describe_entry;
use pigsty::load_file;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let dump = if let Some(pos) = args.iter().position(|a| a == "--dump" || a == "-d") {
        args.remove(pos);
        true
    } else {
        false
    };
    let quiet = if let Some(pos) = args.iter().position(|a| a == "--quiet" || a == "-q") {
        args.remove(pos);
        true
    } else {
        false
    };
    if args.is_empty() {
        anyhow::bail!("usage: pigsty_check [--dump] [--quiet] FILE.pigsty ...");
    }

    let mut failed = 0usize;
    for path in &args {
        let path = Path::new(path);
        match load_file(path) {
            Ok(set) => {
                if !quiet {
                    println!("{}: {} signature(s)", path.display(), set.len());
                }
                if dump {
                    for entry in &set {
                        print!("{}", describe_entry(entry));
                    }
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        eprintln!("pigsty_check: {} of {} file(s) rejected", failed, args.len());
        std::process::exit(1);
    }
    Ok(())
}
