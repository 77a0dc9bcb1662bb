// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::models::{
    opcode::BmicCommand,
    passthru::{
        BufferTooLarge, CommandType, PassthroughCommand, TaskAttribute,
        encode_request_type,
    },
};

/// BMIC requests always use a 10-byte CDB.
pub const BMIC_CDB_LEN: u8 = 10;

/// Fill a padded 16-byte **BMIC** CDB.
///
/// * `cmd`       – BMIC command, goes to byte 6; byte 0 is BMIC READ/WRITE
/// * `alloc_len` – data buffer size, big-endian in bytes 7..9
#[inline]
pub fn fill_bmic_cdb(cdb: &mut [u8; 16], cmd: BmicCommand, alloc_len: u16) {
    cdb.fill(0);
    cdb[0] = cmd.cdb_opcode();
    cdb[6] = cmd.into();
    cdb[7..9].copy_from_slice(&alloc_len.to_be_bytes());
}

/// Build a `CCISS_PASSTHRU` envelope for `cmd` transferring into `buf`.
///
/// Simple-queued command, no timeout, addressed to the controller LUN.
pub fn build_command(
    cmd: BmicCommand,
    buf: &mut [u8],
) -> Result<PassthroughCommand<'_>, BufferTooLarge> {
    let mut pt = PassthroughCommand::with_buffer(buf)?;
    let size = pt.buf_size();

    let rb = pt.request_mut();
    fill_bmic_cdb(&mut rb.cdb, cmd, size);
    rb.cdb_len = BMIC_CDB_LEN;
    rb.request_type =
        encode_request_type(CommandType::Command, TaskAttribute::Simple, cmd.direction());
    rb.timeout.set(0);

    Ok(pt)
}
