// End-to-end tests for the compiled binary: pipeline behavior, the
// echo/quiet contract, and the exit-status policy.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const MINIMAL_REPORT: &str =
    "<testsuite><testcase><failure>boom</failure></testcase></testsuite>";

fn xmlscrub() -> Command {
    Command::cargo_bin("xmlscrub").unwrap()
}

#[test]
fn minimal_report_round_trips() {
    xmlscrub()
        .arg("--quiet")
        .write_stdin(MINIMAL_REPORT)
        .assert()
        .success()
        .stdout(contains("<failure>boom</failure>"))
        .stdout(contains("<testcase>"));
}

#[test]
fn garbage_around_region_is_trimmed() {
    let input = format!("boot noise\r\n{MINIMAL_REPORT}\ntrailing junk");
    let assert = xmlscrub()
        .arg("--quiet")
        .write_stdin(input)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("<testsuite>"));
    assert!(!stdout.contains("boot noise"));
    assert!(!stdout.contains("trailing junk"));
}

#[test]
fn missing_region_is_fatal_before_parsing() {
    xmlscrub()
        .write_stdin("no xml here at all")
        .assert()
        .failure()
        .stderr(contains("xmlscrub::region"));
}

#[test]
fn unknown_wrapper_subtree_is_dropped() {
    // Regression guard for the sharp edge: a whitelisted failure below a
    // non-whitelisted ancestor never reaches the output.
    let input =
        "<testsuite><testcase><unknowntag><failure>x</failure></unknowntag></testcase></testsuite>";
    let assert = xmlscrub()
        .arg("--quiet")
        .write_stdin(input)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("failure"));
}

#[test]
fn system_out_text_is_escaped() {
    let input =
        "<testsuite><testcase><system-out>a &lt; b &amp; c</system-out></testcase></testsuite>";
    xmlscrub()
        .arg("--quiet")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("<system-out>a &lt; b &amp; c</system-out>"));
}

#[test]
fn echo_precedes_filtered_output() {
    // "marker" sits inside a non-whitelisted tag, so it can only appear on
    // stdout through the pre-parse echo of the raw region.
    let input =
        "junk <testsuite><testcase><unknowntag>marker</unknowntag></testcase></testsuite> junk";
    xmlscrub()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("marker"))
        .stdout(contains("<testcase>"));
}

#[test]
fn quiet_suppresses_echo() {
    let input =
        "junk <testsuite><testcase><unknowntag>marker</unknowntag></testcase></testsuite> junk";
    xmlscrub()
        .arg("--quiet")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("marker").not());
}

#[test]
fn top_tag_override_extracts_other_regions() {
    let input = "noise <suite><testcase><failure>boom</failure></testcase></suite> noise";
    xmlscrub()
        .args(["--quiet", "--top-tag", "suite"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("<suite>"))
        .stdout(contains("<failure>boom</failure>"));
}

#[test]
fn writes_to_output_file() {
    let input_path = "tests/scratch_report.txt";
    let output_path = "tests/scratch_clean.xml";
    fs::write(input_path, MINIMAL_REPORT).unwrap();

    xmlscrub()
        .args(["--quiet", input_path, output_path])
        .assert()
        .success();
    let cleaned = fs::read_to_string(output_path).unwrap();
    assert!(cleaned.contains("<failure>boom</failure>"));

    // Clean up
    let _ = fs::remove_file(input_path);
    let _ = fs::remove_file(output_path);
}

#[test]
fn unreadable_input_is_fatal() {
    xmlscrub()
        .arg("tests/does_not_exist.txt")
        .assert()
        .failure()
        .stderr(contains("xmlscrub::io"));
}

#[test]
fn truncated_report_is_recovered() {
    // The closing tag must exist for region extraction, but the inner
    // elements may be cut off mid-stream.
    let input = "<testsuite><testcase><failure>boom</testsuite>";
    xmlscrub()
        .arg("--quiet")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("boom"));
}
