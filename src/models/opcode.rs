// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! BMIC command numbers and their transfer directions.
//!
//! A BMIC request is tunnelled inside a 10-byte vendor CDB:
//!
//! ```text
//!  byte  0      1..5      6          7          8          9
//! +------+-------------+--------+----------+----------+---------+
//! | 0x26 |  reserved   | BMIC # | len (hi) | len (lo) | control |
//! | 0x27 |             |        |          |          |         |
//! +------+-------------+--------+----------+----------+---------+
//! ```
//!
//! * byte 0 is `BMIC_READ` for controller→host transfers and `BMIC_WRITE`
//!   for host→controller transfers;
//! * byte 6 selects the BMIC command itself.

use core::fmt;

use thiserror::Error;

use crate::models::passthru::Direction;

/// CDB byte 0 for BMIC commands that read from the controller.
pub const BMIC_READ: u8 = 0x26;
/// CDB byte 0 for BMIC commands that write to the controller.
pub const BMIC_WRITE: u8 = 0x27;

/// BMIC commands understood by this tool.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmicCommand {
    IdentifyController = 0x11,
    SenseControllerParameters = 0x64,
}

impl BmicCommand {
    /// Name used in diagnostics, spelled like the vendor header constant.
    pub fn name(self) -> &'static str {
        match self {
            Self::IdentifyController => "BMIC_IDENTIFY_CONTROLLER",
            Self::SenseControllerParameters => "BMIC_SENSE_CONTROLLER_PARAMETERS",
        }
    }

    /// Transfer direction of the data phase.
    pub fn direction(self) -> Direction {
        match self {
            Self::IdentifyController | Self::SenseControllerParameters => {
                Direction::Read
            },
        }
    }

    /// CDB byte 0 matching [`Self::direction`].
    pub fn cdb_opcode(self) -> u8 {
        match self.direction() {
            Direction::Write => BMIC_WRITE,
            Direction::Read => BMIC_READ,
        }
    }
}

impl From<BmicCommand> for u8 {
    #[inline]
    fn from(cmd: BmicCommand) -> u8 {
        cmd as u8
    }
}

/// Returned when a raw byte is not a known BMIC command.
#[derive(Debug, Error)]
#[error("unknown BMIC command: 0x{0:02x}")]
pub struct UnknownBmicCommand(pub u8);

impl TryFrom<u8> for BmicCommand {
    type Error = UnknownBmicCommand;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0x11 => Self::IdentifyController,
            0x64 => Self::SenseControllerParameters,
            other => return Err(UnknownBmicCommand(other)),
        })
    }
}

impl fmt::Display for BmicCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
