// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use hpsahba::{
    cfg::{
        cli::{Action, CliError, VERSION, help_text, parse_args, resolve_config_path},
        fatal::write_fatal,
        logger::{LoggerConfig, init_logger},
    },
    client::device::Device,
    handlers::info::collect_info,
};
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_fatal(&e);
            ExitCode::FAILURE
        },
    }
}

fn run() -> Result<()> {
    let mut argv = env::args_os();
    let exe_name = argv
        .next()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hpsahba".to_string());

    let args = parse_args(argv)?;

    let logger_config = match &args.logger_config {
        Some(path) => resolve_config_path(path).and_then(|p| LoggerConfig::load_from_file(&p))?,
        None => LoggerConfig::default(),
    };
    let _guard = init_logger(&logger_config)?;

    match args.action {
        Action::Help => eprint!("{}", help_text(&exe_name)),
        Action::Version => println!("{VERSION}"),
        Action::Info(path) => {
            let mut dev = Device::open(&path)?;
            info!(path = %path.display(), "querying controller");
            let report = collect_info(&mut dev)?;
            let mut out = io::stdout().lock();
            report
                .write_report(&mut out)
                .context("failed to write report")?;
            out.flush().context("failed to write report")?;
            dev.close()?;
        },
        Action::Unknown => return Err(CliError::NoAction.into()),
    }

    Ok(())
}

/// Print the driver error dump (if any) and the `FATAL ERROR` line.
fn report_fatal(err: &anyhow::Error) {
    let _ = write_fatal(&mut io::stderr().lock(), err);
}
