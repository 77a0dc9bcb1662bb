// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    control_block::bmic::build_command,
    models::{
        opcode::BmicCommand,
        passthru::{BufferTooLarge, ErrorInfo, PassthroughCommand},
    },
    utils::OsError,
};

/// Failure of the submission call itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitError {
    pub rc: i32,
    pub errno: OsError,
}

/// Anything that can carry a `CCISS_PASSTHRU` envelope to a controller.
pub trait Passthrough {
    /// Path used in diagnostics.
    fn path(&self) -> &Path;

    /// Hand `cmd` to the driver and wait for completion.
    ///
    /// On `Ok` the driver has filled the envelope's error info and, for
    /// read commands, the data buffer.
    fn submit(&mut self, cmd: &mut PassthroughCommand<'_>) -> Result<(), SubmitError>;
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{}: cannot build command {cmd}", .path.display())]
    Build {
        path: PathBuf,
        cmd: BmicCommand,
        source: BufferTooLarge,
    },
    #[error(
        "{}: ioctl(CCISS_PASSTHRU) failed with command {cmd}, rc == {rc}: {errno}",
        .path.display()
    )]
    Passthru {
        path: PathBuf,
        cmd: BmicCommand,
        rc: i32,
        errno: OsError,
    },
    #[error("{}: Command {cmd} failed", .path.display())]
    CommandFailed {
        path: PathBuf,
        cmd: BmicCommand,
        info: ErrorInfo,
    },
}

impl ExecError {
    /// Driver status record of a failed command, if there is one.
    pub fn error_info(&self) -> Option<&ErrorInfo> {
        match self {
            Self::CommandFailed { info, .. } => Some(info),
            _ => None,
        }
    }
}

/// Run `cmd` on `dev`, transferring into `buf`.
///
/// Succeeds only when the driver accepted the envelope and the controller
/// reported command status zero.
pub fn execute<D: Passthrough + ?Sized>(
    dev: &mut D,
    cmd: BmicCommand,
    buf: &mut [u8],
) -> Result<(), ExecError> {
    let mut pt = build_command(cmd, buf).map_err(|source| ExecError::Build {
        path: dev.path().to_path_buf(),
        cmd,
        source,
    })?;

    trace!(
        command = %cmd,
        cdb = %hex::encode(pt.request().cdb()),
        buf_size = pt.buf_size(),
        "submitting BMIC command"
    );

    if let Err(SubmitError { rc, errno }) = dev.submit(&mut pt) {
        debug!(command = %cmd, rc, errno = %errno, "CCISS_PASSTHRU failed");
        return Err(ExecError::Passthru {
            path: dev.path().to_path_buf(),
            cmd,
            rc,
            errno,
        });
    }

    let info = pt.error_info();
    if !info.is_success() {
        debug!(
            command = %cmd,
            status = %info.status(),
            scsi_status = info.scsi_status,
            sense = %hex::encode(info.sense()),
            "BMIC command failed"
        );
        return Err(ExecError::CommandFailed {
            path: dev.path().to_path_buf(),
            cmd,
            info: info.clone(),
        });
    }

    debug!(command = %cmd, "BMIC command completed");
    Ok(())
}
