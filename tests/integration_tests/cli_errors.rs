// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;

use super::common::{run, stderr};

fn assert_fatal(args: &[&str], message: &str) -> Result<()> {
    let out = run(args)?;
    assert_eq!(out.status.code(), Some(1), "args {args:?}");
    assert!(out.stdout.is_empty(), "args {args:?}");
    assert_eq!(stderr(&out), format!("FATAL ERROR: {message}\n"));
    Ok(())
}

#[test]
fn no_action() -> Result<()> {
    assert_fatal(&[], "No option selected, try running with -h")
}

#[test]
fn unknown_option() -> Result<()> {
    assert_fatal(
        &["-x"],
        "Unknown command line option: 'x', try running with -h",
    )
}

#[test]
fn missing_device_path() -> Result<()> {
    assert_fatal(
        &["-i"],
        "Missing argument for option 'i', try running with -h",
    )
}

#[test]
fn stray_positional() -> Result<()> {
    assert_fatal(
        &["-v", "/dev/sg0"],
        "Invalid argument in command line: '/dev/sg0', try running with -h",
    )
}

#[test]
fn missing_logger_config() -> Result<()> {
    let out = run(&["-l", "tests/no-such-logger.yaml", "-v"])?;
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("FATAL ERROR: failed to canonicalize path"));
    Ok(())
}
