//! Textual extraction of the top-level report region.
//!
//! The harness wraps its XML in boot logs and serial noise, and the tail is
//! frequently cut off mid-line. This stage slices from the first opening
//! top-level tag to the rightmost closing one and hands the substring on
//! without any attempt at parsing; well-formedness is the next stage's
//! problem.

use regex::Regex;

use crate::errors::ScrubError;

/// Returns the inclusive substring spanning the first `<top_tag>` and the
/// rightmost `</top_tag>`, newlines included.
pub fn extract_region<'a>(data: &'a str, top_tag: &str) -> Result<&'a str, ScrubError> {
    let pattern = format!("(?s)<{0}>.*</{0}>", regex::escape(top_tag));
    // The tag name is escaped above, so the pattern always compiles.
    let matcher = Regex::new(&pattern).expect("escaped tag name forms a valid pattern");
    matcher
        .find(data)
        .map(|found| found.as_str())
        .ok_or_else(|| ScrubError::RegionNotFound {
            top_tag: top_tag.to_string(),
        })
}
