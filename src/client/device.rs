// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    fs::{File, OpenOptions},
    os::fd::{AsRawFd, IntoRawFd},
    path::{Path, PathBuf},
};

use nix::errno::Errno;
use thiserror::Error;
use tracing::debug;

use crate::{
    client::transport::{Passthrough, SubmitError},
    models::passthru::{IoctlCommand, PassthroughCommand},
    utils::OsError,
};

// _IOWR('B', 11, IOCTL_Command_struct)
nix::ioctl_readwrite!(cciss_passthru, b'B', 11, IoctlCommand);

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("{}: Unable to open device r/w: {errno}", .path.display())]
    Open { path: PathBuf, errno: OsError },
    #[error("{}: close() failed: {errno}", .path.display())]
    Close { path: PathBuf, errno: OsError },
}

/// Controller node (`/dev/sgN`, `/dev/cciss/cNdM`) opened read-write.
#[derive(Debug)]
pub struct Device {
    path: PathBuf,
    file: File,
}

impl Device {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            Err(e) => {
                return Err(DeviceError::Open {
                    path,
                    errno: e.into(),
                });
            },
        };
        debug!(path = %path.display(), "device opened");
        Ok(Self { path, file })
    }

    /// Close the node, reporting the error `close(2)` returns.
    pub fn close(self) -> Result<(), DeviceError> {
        let Self { path, file } = self;
        match nix::unistd::close(file.into_raw_fd()) {
            Ok(()) => {
                debug!(path = %path.display(), "device closed");
                Ok(())
            },
            Err(errno) => Err(DeviceError::Close {
                path,
                errno: errno.into(),
            }),
        }
    }
}

impl Passthrough for Device {
    fn path(&self) -> &Path {
        &self.path
    }

    fn submit(&mut self, cmd: &mut PassthroughCommand<'_>) -> Result<(), SubmitError> {
        // SAFETY: the envelope is a live `IOCTL_Command_struct` whose buffer
        // pointer is borrowed for the lifetime of `cmd`.
        match unsafe { cciss_passthru(self.file.as_raw_fd(), cmd.as_raw_mut()) } {
            Ok(0) => Ok(()),
            Ok(rc) => Err(SubmitError {
                rc,
                errno: Errno::last().into(),
            }),
            Err(errno) => Err(SubmitError {
                rc: -1,
                errno: errno.into(),
            }),
        }
    }
}
