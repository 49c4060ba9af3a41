// cp2cpp: C+ → C++ translator CLI

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cp2cpp::analysis::scope::KnownTypes;
use cp2cpp::translate::{translate_file, TranslateError};

/// Translate C+ sources into C++-compatible files.
///
/// Each input `<path>` produces a sibling output with the extension
/// replaced by `.cpp`.
#[derive(Parser)]
#[command(name = "cp2cpp", version, about)]
struct Cli {
    /// Input files to translate, in order.
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        eprintln!("usage: cp2cpp <file.cp> [file2.cp ...]");
        return ExitCode::from(1);
    }

    // one registry for the whole run: types declared in earlier files are
    // visible to later ones
    let mut types = KnownTypes::new();
    let mut failed = false;

    for path in &cli.files {
        match translate_file(path, &mut types) {
            Ok(out_path) => eprintln!("Wrote {}", out_path.display()),
            Err(TranslateError::Lex(err)) => {
                eprintln!("error: {err}");
                return ExitCode::from(2);
            }
            Err(err) => {
                eprintln!("error: {err}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
