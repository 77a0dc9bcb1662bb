// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::io::{self, Write};

use crate::client::transport::ExecError;

/// Write the driver error dump (if any) followed by the `FATAL ERROR` line.
pub fn write_fatal<W: Write>(out: &mut W, err: &anyhow::Error) -> io::Result<()> {
    let info = err
        .chain()
        .find_map(|e| e.downcast_ref::<ExecError>())
        .and_then(ExecError::error_info);

    if let Some(info) = info {
        write!(out, "{info}")?;
    }
    writeln!(out, "FATAL ERROR: {err:#}")?;
    out.flush()
}
