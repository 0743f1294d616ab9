use color_eyre::eyre::{Context, Result};
use pretty_assertions::assert_eq;
use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn varconf(args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_varconf"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to start varconf")?;
    if let Some(mut input) = child.stdin.take() {
        input.write_all(stdin.as_bytes())?;
    }
    child.wait_with_output().context("Failed to wait for varconf")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_success_writes_document_only() -> Result<()> {
    let output = varconf(&[], "var a = 12\nvar b = !(a 5 -)\n")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "{\n  \"a\": 12,\n  \"b\": 7\n}\n");
    assert_eq!(stderr(&output), "");
    Ok(())
}

#[test]
fn test_syntax_error() -> Result<()> {
    let output = varconf(&["run"], "var x = << 1, 2 \n")?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "Syntax error: line 1, column 17\n");
    Ok(())
}

#[test]
fn test_evaluation_error() -> Result<()> {
    let output = varconf(&["run", "-"], "var x = 1\nvar z = !(x y +)\n")?;
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "unknown name: y\n");
    Ok(())
}

#[test]
fn test_unclassified_error() -> Result<()> {
    let output = varconf(&[], "var x = !(9223372036854775807 1 +)\n")?;
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(stdout(&output), "");
    assert!(!stderr(&output).is_empty());
    Ok(())
}

#[test]
fn test_deep_nesting_exits_cleanly() -> Result<()> {
    let depth = 100_000;
    let source = format!("var a = {}{}\n", "<<".repeat(depth), ">>".repeat(depth));
    let output = varconf(&[], &source)?;
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "arrays nest deeper than 128 levels\n");
    Ok(())
}

#[test]
fn test_end_of_input_error_points_at_last_token() -> Result<()> {
    let output = varconf(&[], "var x = << 1, 2")?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Syntax error: line 1, column 15\n");
    Ok(())
}

#[test]
fn test_parse_empty_program_prints_nothing() -> Result<()> {
    let output = varconf(&["parse"], "* only a comment\n")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
    Ok(())
}

#[test]
fn test_missing_file_is_unclassified() -> Result<()> {
    let output = varconf(&["run", "./test_data/does_not_exist.conf"], "")?;
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).starts_with("cannot read input:"));
    Ok(())
}

#[test]
fn test_run_from_file() -> Result<()> {
    let output = varconf(&["run", "./test_data/run/in/redeclare.conf"], "")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "{\n  \"a\": 3,\n  \"b\": 2\n}\n");
    Ok(())
}

#[test]
fn test_pretty_diagnostics_carry_the_code() -> Result<()> {
    let output = varconf(&["run", "--diagnostics", "pretty"], "var x = !(y)\n")?;
    assert_eq!(output.status.code(), Some(3));
    let report = stderr(&output);
    assert!(report.contains("EV001"), "{report}");
    assert!(report.contains("unknown name: y"), "{report}");
    Ok(())
}

#[test]
fn test_tokenize() -> Result<()> {
    let output = varconf(&["tokenize"], "var a = !(b chr())")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "1:1 VAR var\n1:5 NAME a\n1:7 EQUAL =\n1:9 RPN_OPEN !(\n1:11 NAME b\n1:13 CHR chr()\n\
         1:18 RPN_CLOSE )\n1:19 EOF\n"
    );

    let output = varconf(&["tokenize"], "0")?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "1:1 ERROR UNEXPECTED_CHAR 0\n1:2 EOF\n");
    Ok(())
}

#[test]
fn test_parse() -> Result<()> {
    let output = varconf(&["parse"], "var a = << 1, \"x\" >>\nvar b = !(a 1 +)\n")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "(var a (array 1 \"x\"))\n(var b (rpn a 1 +))\n"
    );

    let output = varconf(&["parse"], "var = 1\n")?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Syntax error: line 1, column 5\n");
    Ok(())
}
