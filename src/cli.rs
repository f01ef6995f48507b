//! Command-line entry point: argument parsing, the scrub pipeline, and the
//! process exit policy.

use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use miette::Report;

use crate::{
    errors::ScrubError,
    extract,
    filter::{self, FilterConfig},
    tree,
};

// ============================================================================
// CLI ARGUMENTS
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "xmlscrub",
    version,
    about = "Cleanup messy XML test-report output from hardware test harnesses."
)]
pub struct ScrubArgs {
    /// Input file (defaults to stdin).
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout).
    pub output: Option<PathBuf>,

    /// Suppress the pre-parse echo of the trimmed input region.
    #[arg(short, long)]
    pub quiet: bool,

    /// Top-level tag bounding the region of interest.
    #[arg(long, default_value = "testsuite")]
    pub top_tag: String,
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// Runs the whole pipeline: read, extract, echo, parse, locate, serialize.
///
/// Region extraction, parsing, top-tag lookup, and input access failures
/// terminate the process with status 1. Failures inside the whitelist walk
/// are reported to stderr and the status stays 0.
pub fn run() {
    let args = ScrubArgs::parse();
    let config = FilterConfig::default().with_top_tag(&args.top_tag);

    let data = read_input(args.input.as_deref()).unwrap_or_else(fatal);
    let region = extract::extract_region(&data, &config.top_tag).unwrap_or_else(fatal);

    // Echo the raw region before any parse attempt, so that a parser
    // failure still leaves the offending input on record for diagnosis.
    if !args.quiet {
        println!("{region}");
    }

    let root = tree::parse_lenient(region).unwrap_or_else(fatal);
    let top = root.find_first(&config.top_tag).unwrap_or_else(|| {
        fatal(ScrubError::TagNotFound {
            top_tag: config.top_tag.clone(),
        })
    });

    let mut out = BufWriter::new(open_output(args.output.as_deref()).unwrap_or_else(fatal));
    let emitted = filter::write_element(&mut out, top, &config).and_then(|()| out.flush());
    if let Err(error) = emitted {
        print_error(ScrubError::Serialization {
            message: error.to_string(),
        });
    }
}

// ============================================================================
// INPUT / OUTPUT PLUMBING
// ============================================================================

fn read_input(path: Option<&Path>) -> Result<String, ScrubError> {
    let mut bytes = Vec::new();
    let read = match path {
        Some(path) => fs::File::open(path).and_then(|mut file| file.read_to_end(&mut bytes)),
        None => io::stdin().lock().read_to_end(&mut bytes),
    };
    read.map_err(|source| ScrubError::Io {
        path: display_path(path),
        source,
    })?;
    Ok(decode_skipping_invalid(&bytes))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, ScrubError> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|source| ScrubError::Io {
                path: display_path(Some(path)),
                source,
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

/// Decodes harness output that is mostly UTF-8 but may carry serial-line
/// garbage; invalid byte sequences are skipped rather than rejected.
fn decode_skipping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

// ============================================================================
// ERROR OUTPUT
// ============================================================================

fn print_error(error: ScrubError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}

fn fatal<T>(error: ScrubError) -> T {
    print_error(error);
    process::exit(1);
}
