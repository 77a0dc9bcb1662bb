// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::Result;

use super::common::{fake_device, run, scratch_dir, stderr};

#[test]
fn nonexistent_device() -> Result<()> {
    let path = "/nonexistent/hpsahba/sg9";
    let out = run(&["-i", path])?;

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = stderr(&out);
    assert!(err.starts_with("FATAL ERROR: "), "{err}");
    assert!(err.contains(path), "{err}");
    assert!(err.contains("Unable to open device r/w"), "{err}");
    assert!(err.contains("No such file or directory"), "{err}");
    Ok(())
}

#[test]
fn regular_file_is_not_a_controller() -> Result<()> {
    // opens fine, the ioctl is refused
    let dir = scratch_dir("ioctl")?;
    let node = fake_device(&dir)?;

    let out = run(&["-i", node.to_str().unwrap_or_default()])?;
    std::fs::remove_dir_all(&dir)?;

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = stderr(&out);
    assert!(
        err.contains("ioctl(CCISS_PASSTHRU) failed with command BMIC_IDENTIFY_CONTROLLER"),
        "{err}"
    );
    // default logger stays quiet: the fatal line is all there is
    assert_eq!(err.lines().count(), 1, "{err}");
    assert!(err.starts_with("FATAL ERROR: "), "{err}");
    Ok(())
}
