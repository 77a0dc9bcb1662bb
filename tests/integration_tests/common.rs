// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

use anyhow::{Context, Result};

/// Run the `hpsahba` binary with `args`.
pub fn run(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_hpsahba"))
        .args(args)
        .output()
        .context("failed to spawn hpsahba")
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Fresh per-test directory under the system temp dir.
pub fn scratch_dir(tag: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("hpsahba-{tag}-{}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// A regular file: it opens r/w but refuses the passthrough ioctl.
pub fn fake_device(dir: &std::path::Path) -> Result<PathBuf> {
    let node = dir.join("sg0");
    fs::write(&node, [0u8; 16])?;
    Ok(node)
}
