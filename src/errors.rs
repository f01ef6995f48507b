//! Unified diagnostics for the scrub pipeline.
//!
//! Every failure the pipeline can hit is a variant of [`ScrubError`]. The
//! region, parse, top-tag, and I/O variants are fatal and terminate the
//! process with a non-zero status; [`ScrubError::Serialization`] is reported
//! to stderr but leaves the exit status at zero. `cli::run` owns that
//! policy.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ScrubError {
    /// The input never contained a bracketable top-level region.
    #[error("failed to strip leading and trailing garbage: no <{top_tag}>...</{top_tag}> region in input")]
    #[diagnostic(
        code(xmlscrub::region),
        help("the harness output must contain `<{top_tag}>` followed later by `</{top_tag}>`")
    )]
    RegionNotFound { top_tag: String },

    /// The recovering parser produced nothing usable from the region.
    #[error("failed to parse input: {message}")]
    #[diagnostic(code(xmlscrub::parse))]
    Parse { message: String },

    /// Parsing succeeded but no element with the top-level tag name exists
    /// anywhere in the recovered document.
    #[error("failed to find initial <{top_tag}> tag")]
    #[diagnostic(code(xmlscrub::toptag))]
    TagNotFound { top_tag: String },

    /// Raised somewhere inside the whitelist walk. Reported, never fatal.
    #[error("while navigating XML: {message}")]
    #[diagnostic(code(xmlscrub::emit))]
    Serialization { message: String },

    /// An input or output stream could not be opened, read, or created.
    #[error("failed to access {path}")]
    #[diagnostic(code(xmlscrub::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
