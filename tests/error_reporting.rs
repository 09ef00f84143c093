// ==============================================================================
// Error Reporting Snapshot Tests
// ==============================================================================
//
// Snapshot what a caller sees for each kind of failure: the diagnostic code,
// the message and any help text. drafter's own stderr must come through
// untouched apart from trailing whitespace.

mod common;

use drafter::{Drafter, DrafterError, DrafterOption};
use insta::assert_snapshot;
use miette::Diagnostic;

/// Flatten a diagnostic into `code` / `message` / `help` lines.
fn describe(err: &DrafterError) -> String {
    let mut lines = Vec::new();
    if let Some(code) = err.code() {
        lines.push(format!("code: {code}"));
    }
    lines.push(format!("message: {err}"));
    if let Some(help) = err.help() {
        lines.push(format!("help: {help}"));
    }
    lines.join("\n")
}

#[test]
fn input_missing() {
    let err = Drafter::with_binary("drafter").run().unwrap_err();
    assert_snapshot!(describe(&err), @r"
    code: drafter::input_missing
    message: Input argument missing
    help: pass an API Blueprint file, or `-` to read from stdin
    ");
}

#[test]
fn unknown_option_with_suggestion() {
    let err = "--valdate".parse::<DrafterOption>().unwrap_err();
    assert_snapshot!(describe(&err), @r"
    code: drafter::unknown_option
    message: unrecognized drafter option `--valdate`
    help: did you mean `--validate`?
    ");
}

#[test]
fn unknown_option_without_suggestion() {
    let err = "--pretty".parse::<DrafterOption>().unwrap_err();
    assert_snapshot!(describe(&err), @r"
    code: drafter::unknown_option
    message: unrecognized drafter option `--pretty`
    ");
}

#[cfg(unix)]
#[test]
fn launch_failure() {
    let err = Drafter::with_binary("INVALID").version().run().unwrap_err();
    assert_snapshot!(describe(&err), @r"
    code: drafter::launch
    message: INVALID: command not found
    help: install drafter, or point DRAFTER_BIN at the binary
    ");
}

#[cfg(unix)]
#[test]
fn missing_input_file() {
    let err = Drafter::with_binary(common::fake_drafter())
        .input("INVALID")
        .run()
        .unwrap_err();
    assert_snapshot!(describe(&err), @r"
    code: drafter::external_tool
    message: fatal: unable to open file 'INVALID'
    ");
}

#[cfg(unix)]
#[test]
fn invalid_format() {
    let err = Drafter::with_binary(common::fake_drafter())
        .input(common::fixture("simplest-example.apib"))
        .format("INVALID")
        .run()
        .unwrap_err();
    assert_snapshot!(describe(&err), @r"
    code: drafter::external_tool
    message: option value is invalid: --format=INVALID
    usage: drafter [options] ... <input file>
    ");
}

#[test]
fn rendered_command_line() {
    let mut d = Drafter::with_binary("vendor/bin/drafter");
    d.input("blueprint.apib")
        .format("json")
        .validate()
        .sourcemap("blueprint.map.json")
        .use_line_num()
        .output("blueprint.ast.json")
        .format("yaml");
    assert_snapshot!(
        d.render().join(" "),
        @"vendor/bin/drafter --format=yaml --validate --sourcemap=blueprint.map.json --use-line-num --output=blueprint.ast.json blueprint.apib"
    );
}
