// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::Result;

use super::common::{fake_device, run, scratch_dir, stderr};

fn write_file_config(dir: &Path, log_path: &Path) -> Result<String> {
    let cfg = dir.join("logger.yaml");
    fs::write(
        &cfg,
        format!(
            "logger:\n  level: \"debug\"\n  output: \"file\"\n  is_show_line: false\n  \
             is_show_module_path: false\n  is_show_target: true\n  file:\n    \
             path: \"{}\"\n",
            log_path.display()
        ),
    )?;
    Ok(cfg.to_string_lossy().into_owned())
}

#[test]
fn file_output_records_device_events() -> Result<()> {
    let dir = scratch_dir("file-log")?;
    let node = fake_device(&dir)?;
    let log = dir.join("logs").join("hpsahba.log");
    let cfg = write_file_config(&dir, &log)?;

    let out = run(&["-l", &cfg, "-i", node.to_str().unwrap_or_default()])?;

    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert_eq!(err.lines().count(), 1, "{err}");
    assert!(err.starts_with("FATAL ERROR: "), "{err}");

    let text = fs::read_to_string(&log)?;
    fs::remove_dir_all(&dir)?;

    let events: Vec<serde_json::Value> = text
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    let has = |msg: &str| {
        events
            .iter()
            .any(|e| e["level"] == "DEBUG" && e["fields"]["message"] == msg)
    };
    assert!(has("device opened"), "{text}");
    assert!(has("CCISS_PASSTHRU failed"), "{text}");
    assert!(
        events
            .iter()
            .all(|e| e["target"].as_str().is_some_and(|t| t.starts_with("hpsahba"))),
        "{text}"
    );
    Ok(())
}

#[test]
fn uncreatable_log_directory_is_fatal() -> Result<()> {
    let dir = scratch_dir("bad-log")?;
    let log = Path::new("/proc/hpsahba-log/sub/x.log");
    let cfg = write_file_config(&dir, log)?;

    let out = run(&["-l", &cfg, "-v"])?;
    fs::remove_dir_all(&dir)?;

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = stderr(&out);
    assert_eq!(err.lines().count(), 1, "{err}");
    assert!(
        err.starts_with("FATAL ERROR: Failed to open log file /proc/hpsahba-log/sub/x.log"),
        "{err}"
    );
    Ok(())
}
