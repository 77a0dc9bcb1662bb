// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;

use super::common::{fake_device, run, scratch_dir, stderr, stdout};

#[test]
fn version_prints_crate_version() -> Result<()> {
    let out = run(&["-v"])?;
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), format!("{}\n", env!("CARGO_PKG_VERSION")));
    assert!(out.stderr.is_empty());
    Ok(())
}

#[test]
fn help_goes_to_stderr() -> Result<()> {
    let out = run(&["-h"])?;
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    let err = stderr(&out);
    assert!(err.contains("Usage:"), "{err}");
    assert!(err.contains("-i <device path>"), "{err}");
    Ok(())
}

#[test]
fn last_action_wins() -> Result<()> {
    let out = run(&["-h", "-v"])?;
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), format!("{}\n", env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn logger_config_file_is_honoured() -> Result<()> {
    let dir = scratch_dir("stderr-log")?;
    let node = fake_device(&dir)?;

    let out = run(&[
        "-l",
        "tests/config_logger.yaml",
        "-i",
        node.to_str().unwrap_or_default(),
    ])?;
    std::fs::remove_dir_all(&dir)?;

    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    let lines: Vec<&str> = err.lines().collect();
    assert!(lines.len() > 1, "{err}");

    let Some((fatal, events)) = lines.split_last() else {
        panic!("no output: {err}");
    };
    assert!(fatal.starts_with("FATAL ERROR: "), "{err}");

    let messages: Vec<serde_json::Value> = events
        .iter()
        .map(|l| serde_json::from_str(l))
        .collect::<Result<_, _>>()?;
    assert!(
        messages
            .iter()
            .any(|e| e["level"] == "DEBUG" && e["fields"]["message"] == "device opened"),
        "{err}"
    );
    Ok(())
}
