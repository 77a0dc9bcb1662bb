// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use hex::FromHex;
use hpsahba::{
    client::transport::{Passthrough, SubmitError},
    models::passthru::PassthroughCommand,
    utils::OsError,
};

// Helper to load a hex fixture and decode it to a byte vector.
pub fn load_fixture(path: &str) -> Result<Vec<u8>> {
    let s = fs::read_to_string(path)?;
    let cleaned = s.trim().replace(|c: char| c.is_whitespace(), "");
    Ok(Vec::from_hex(&cleaned)?)
}

pub const IDENTIFY_FIXTURE: &str =
    "tests/unit_tests/fixtures/bmic/identify_controller_response.hex";
pub const PARAMS_FIXTURE: &str =
    "tests/unit_tests/fixtures/bmic/sense_controller_parameters_response.hex";

/// How the fake controller completes a command.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Copy these bytes into the data buffer, status zero.
    Data(Vec<u8>),
    /// Driver rejects the ioctl.
    Submit(SubmitError),
    /// Controller completes with a nonzero command status.
    Status {
        scsi_status: u8,
        command_status: u16,
        residual: u32,
        sense: Vec<u8>,
        sense_len: u8,
    },
}

/// In-memory controller answering BMIC commands by their CDB byte 6.
pub struct MockController {
    path: PathBuf,
    identify: Reply,
    params: Reply,
    /// Raw CDBs in submission order.
    pub seen: Vec<Vec<u8>>,
}

impl MockController {
    pub fn new(identify: Reply, params: Reply) -> Self {
        Self {
            path: PathBuf::from("/dev/sg-mock"),
            identify,
            params,
            seen: Vec::new(),
        }
    }

    pub fn from_fixtures() -> Result<Self> {
        Ok(Self::new(
            Reply::Data(load_fixture(IDENTIFY_FIXTURE)?),
            Reply::Data(load_fixture(PARAMS_FIXTURE)?),
        ))
    }
}

impl Passthrough for MockController {
    fn path(&self) -> &Path {
        &self.path
    }

    fn submit(&mut self, cmd: &mut PassthroughCommand<'_>) -> Result<(), SubmitError> {
        let cdb = cmd.request().cdb().to_vec();
        let reply = match cdb[6] {
            0x11 => self.identify.clone(),
            0x64 => self.params.clone(),
            other => panic!("unexpected BMIC command 0x{other:02x}"),
        };
        self.seen.push(cdb);

        match reply {
            Reply::Data(bytes) => {
                let buf = cmd.buffer_mut();
                let n = buf.len().min(bytes.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(())
            },
            Reply::Submit(e) => Err(e),
            Reply::Status {
                scsi_status,
                command_status,
                residual,
                sense,
                sense_len,
            } => {
                let info = cmd.error_info_mut();
                info.scsi_status = scsi_status;
                info.command_status.set(command_status);
                info.residual_cnt.set(residual);
                info.sense_len = sense_len;
                info.sense_info[..sense.len()].copy_from_slice(&sense);
                Ok(())
            },
        }
    }
}

pub fn enotty() -> SubmitError {
    SubmitError {
        rc: -1,
        errno: OsError(nix::errno::Errno::ENOTTY),
    }
}
