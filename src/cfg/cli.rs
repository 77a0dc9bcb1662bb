// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{
    ArgAction, Parser,
    error::{ContextKind, ContextValue, ErrorKind},
};
use thiserror::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the invocation asked for. The last action flag wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Version,
    Info(PathBuf),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub action: Action,
    /// YAML logger configuration given with `-l`.
    pub logger_config: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Unknown command line option: '{0}', try running with -h")]
    UnknownOption(String),
    #[error("Missing argument for option '{0}', try running with -h")]
    MissingArgument(String),
    #[error("Invalid argument in command line: '{0}', try running with -h")]
    UnexpectedArgument(String),
    #[error("No option selected, try running with -h")]
    NoAction,
    #[error("{0}, try running with -h")]
    Malformed(String),
}

#[derive(Debug, Parser)]
#[command(
    name = "hpsahba",
    disable_help_flag = true,
    disable_version_flag = true,
    no_binary_name = true
)]
struct RawArgs {
    #[arg(short = 'h', action = ArgAction::SetTrue, overrides_with_all = ["show_version", "device"])]
    show_help: bool,

    #[arg(short = 'v', action = ArgAction::SetTrue, overrides_with_all = ["show_help", "device"])]
    show_version: bool,

    #[arg(
        short = 'i',
        value_name = "DEVICE",
        allow_hyphen_values = true,
        overrides_with_all = ["show_help", "show_version"]
    )]
    device: Option<PathBuf>,

    #[arg(short = 'l', value_name = "CONFIG", allow_hyphen_values = true)]
    logger_config: Option<PathBuf>,

    /// Anything that is not an option; always rejected.
    #[arg(value_name = "ARG")]
    stray: Vec<OsString>,
}

impl RawArgs {
    fn action(&self) -> Action {
        if let Some(path) = &self.device {
            Action::Info(path.clone())
        } else if self.show_version {
            Action::Version
        } else if self.show_help {
            Action::Help
        } else {
            Action::Unknown
        }
    }
}

/// Option name from clap's `-x` / `-x <VALUE>` rendering.
fn option_name(err: &clap::Error) -> String {
    let raw = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(s)) => s.as_str(),
        _ => "",
    };
    let flag = raw.split_whitespace().next().unwrap_or(raw);
    let flag = flag.strip_prefix('-').unwrap_or(flag);
    flag.chars().next().map(String::from).unwrap_or_default()
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        match err.kind() {
            ErrorKind::UnknownArgument => Self::UnknownOption(option_name(&err)),
            ErrorKind::InvalidValue | ErrorKind::NoEquals | ErrorKind::TooFewValues => {
                Self::MissingArgument(option_name(&err))
            },
            kind => Self::Malformed(
                kind.as_str()
                    .unwrap_or("invalid command line")
                    .to_string(),
            ),
        }
    }
}

/// Parse arguments (without the program name) like `getopt(":hvi:l:")`.
///
/// Options may be grouped (`-hv`) and take their value attached
/// (`-i/dev/sg0`) or from the next argument. `--` ends option parsing.
/// Non-option arguments are rejected once all options have been seen.
pub fn parse_args<I, S>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let raw = RawArgs::try_parse_from(args)?;

    if let Some(arg) = raw.stray.first() {
        return Err(CliError::UnexpectedArgument(
            arg.to_string_lossy().into_owned(),
        ));
    }

    let action = raw.action();
    if action == Action::Unknown {
        return Err(CliError::NoAction);
    }

    Ok(CliArgs {
        action,
        logger_config: raw.logger_config,
    })
}

pub fn help_text(exe_name: &str) -> String {
    format!(
        "hpsahba version {VERSION}\n\
         \n\
         Usage:\n\
         \t{exe_name} -h\n\
         \t{exe_name} -v\n\
         \t{exe_name} [-l logger.yaml] -i /dev/sgN\n\
         \n\
         Options:\n\
         \t-h\n\
         \t\tPrint this help message and exit.\n\
         \n\
         \t-v\n\
         \t\tPrint version number and exit.\n\
         \n\
         \t-i <device path>\n\
         \t\tGet information about HP Smart Array controller.\n\
         \n\
         \t-l <config path>\n\
         \t\tRead logger configuration from a YAML file.\n"
    )
}

/// Absolute, canonical form of a user supplied path.
pub fn resolve_config_path(rel: &Path) -> Result<PathBuf> {
    let abs = if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot get current working dir")?
            .join(rel)
    };

    let canon = abs
        .canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))?;

    Ok(canon)
}
