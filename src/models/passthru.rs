// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The `CCISS_PASSTHRU` ioctl envelope (`linux/cciss_ioctl.h`).
//!
//! ```text
//!  offset  size  field
//!       0     8  LUN address (zero = the controller itself)
//!       8    20  request block: CDB len, type byte, timeout, CDB[16]
//!      28    48  error info, filled in by the driver
//!      76     2  buffer size
//!      80   ptr  buffer pointer (natural alignment, 64-bit hosts)
//! ```
//!
//! The request block and error info are byte-packed in the kernel header,
//! the outer struct is not. Integers inside the envelope are host-endian.

use core::{fmt, marker::PhantomData};

use thiserror::Error;
use zerocopy::{
    FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{NativeEndian, U16, U32},
};

/// Capacity of the sense buffer inside [`ErrorInfo`].
pub const SENSE_INFO_BYTES: usize = 32;
/// CDB field size inside [`RequestBlock`].
pub const CDB_MAX_LEN: usize = 16;
/// Size of the LUN address at the head of the envelope.
pub const LUN_ADDR_LEN: usize = 8;

/// `Type.Type` of the request block.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Command = 0x00,
    Message = 0x01,
}

/// `Type.Attribute` of the request block.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAttribute {
    Untagged = 0x00,
    Simple = 0x04,
    HeadOfQueue = 0x05,
    Ordered = 0x06,
    Aca = 0x07,
}

/// `Type.Direction` of the request block.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Write = 0x01,
    Read = 0x02,
}

const TYPE_MASK: u8 = 0b0000_0111;
const ATTR_SHIFT: u8 = 3;
const ATTR_MASK: u8 = 0b0011_1000;
const DIR_SHIFT: u8 = 6;

/// Pack type (bits 0-2), attribute (bits 3-5) and direction (bits 6-7) the
/// way GCC lays out the `Type` bit-field on little-endian hosts.
#[inline]
pub fn encode_request_type(
    kind: CommandType,
    attribute: TaskAttribute,
    direction: Direction,
) -> u8 {
    (kind as u8 & TYPE_MASK)
        | (((attribute as u8) << ATTR_SHIFT) & ATTR_MASK)
        | ((direction as u8) << DIR_SHIFT)
}

/// `RequestBlock_struct`, 20 bytes.
#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone)]
pub struct RequestBlock {
    pub cdb_len: u8,
    /// Packed type/attribute/direction, see [`encode_request_type`].
    pub request_type: u8,
    /// Seconds; zero waits forever.
    pub timeout: U16<NativeEndian>,
    pub cdb: [u8; CDB_MAX_LEN],
}

impl RequestBlock {
    pub fn command_type(&self) -> Option<CommandType> {
        match self.request_type & TYPE_MASK {
            0x00 => Some(CommandType::Command),
            0x01 => Some(CommandType::Message),
            _ => None,
        }
    }

    pub fn attribute(&self) -> Option<TaskAttribute> {
        match (self.request_type & ATTR_MASK) >> ATTR_SHIFT {
            0x00 => Some(TaskAttribute::Untagged),
            0x04 => Some(TaskAttribute::Simple),
            0x05 => Some(TaskAttribute::HeadOfQueue),
            0x06 => Some(TaskAttribute::Ordered),
            0x07 => Some(TaskAttribute::Aca),
            _ => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.request_type >> DIR_SHIFT {
            0x01 => Some(Direction::Write),
            0x02 => Some(Direction::Read),
            _ => None,
        }
    }

    /// The part of the CDB that is actually sent.
    pub fn cdb(&self) -> &[u8] {
        &self.cdb[..usize::from(self.cdb_len).min(CDB_MAX_LEN)]
    }
}

/// `CommandStatus` values reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    TargetStatus,
    DataUnderrun,
    DataOverrun,
    Invalid,
    ProtocolError,
    HardwareError,
    ConnectionLost,
    Aborted,
    AbortFailed,
    UnsolicitedAbort,
    Timeout,
    Unabortable,
    Other(u16),
}

impl From<u16> for CommandStatus {
    fn from(v: u16) -> Self {
        match v {
            0x00 => Self::Success,
            0x01 => Self::TargetStatus,
            0x02 => Self::DataUnderrun,
            0x03 => Self::DataOverrun,
            0x04 => Self::Invalid,
            0x05 => Self::ProtocolError,
            0x06 => Self::HardwareError,
            0x07 => Self::ConnectionLost,
            0x08 => Self::Aborted,
            0x09 => Self::AbortFailed,
            0x0A => Self::UnsolicitedAbort,
            0x0B => Self::Timeout,
            0x0C => Self::Unabortable,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::TargetStatus => f.write_str("target status"),
            Self::DataUnderrun => f.write_str("data underrun"),
            Self::DataOverrun => f.write_str("data overrun"),
            Self::Invalid => f.write_str("invalid command"),
            Self::ProtocolError => f.write_str("protocol error"),
            Self::HardwareError => f.write_str("hardware error"),
            Self::ConnectionLost => f.write_str("connection lost"),
            Self::Aborted => f.write_str("aborted"),
            Self::AbortFailed => f.write_str("abort failed"),
            Self::UnsolicitedAbort => f.write_str("unsolicited abort"),
            Self::Timeout => f.write_str("timeout"),
            Self::Unabortable => f.write_str("unabortable"),
            Self::Other(v) => write!(f, "unknown status 0x{v:04x}"),
        }
    }
}

/// `ErrorInfo_struct`, 48 bytes, written by the driver on completion.
#[repr(C)]
#[derive(
    FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone, PartialEq,
)]
pub struct ErrorInfo {
    pub scsi_status: u8,
    pub sense_len: u8,
    pub command_status: U16<NativeEndian>,
    pub residual_cnt: U32<NativeEndian>,
    /// `MoreErrInfo_struct` union, kept raw.
    pub more_err_info: [u8; 8],
    pub sense_info: [u8; SENSE_INFO_BYTES],
}

impl ErrorInfo {
    #[inline]
    pub fn status(&self) -> CommandStatus {
        CommandStatus::from(self.command_status.get())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.command_status.get() == 0
    }

    /// Sense bytes, with the reported length clamped to the buffer size.
    pub fn sense(&self) -> &[u8] {
        let len = usize::from(self.sense_len).min(SENSE_INFO_BYTES);
        &self.sense_info[..len]
    }
}

/// Multi-line dump printed before a failed command is reported.
impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HPSA SCSI error info:")?;
        writeln!(f, "\tScsiStatus: 0x{:02x}", self.scsi_status)?;
        writeln!(f, "\tSenseLen: {}", self.sense_len)?;
        writeln!(f, "\tCommandStatus: 0x{:04x}", self.command_status.get())?;
        writeln!(f, "\tResidualCnt: 0x{:08x}", self.residual_cnt.get())?;
        write!(f, "\tSenseInfo:")?;
        if self.sense_len == 0 {
            write!(f, " <none>")?;
        } else {
            for b in self.sense() {
                write!(f, " 0x{b:02x}")?;
            }
        }
        writeln!(f)
    }
}

/// `IOCTL_Command_struct` exactly as the kernel reads it.
#[repr(C)]
#[derive(Debug)]
pub struct IoctlCommand {
    pub lun_info: [u8; LUN_ADDR_LEN],
    pub request: RequestBlock,
    pub error_info: ErrorInfo,
    pub buf_size: u16,
    pub buf: *mut u8,
}

/// Returned when a data buffer does not fit the 16-bit size fields.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("buffer of {0} bytes exceeds the 65535 byte passthrough limit")]
pub struct BufferTooLarge(pub usize);

/// Passthrough envelope holding an exclusive borrow of its data buffer.
///
/// The raw pointer inside [`IoctlCommand`] stays valid for `'a`, so the
/// driver may write into the buffer whenever the envelope is submitted.
#[derive(Debug)]
pub struct PassthroughCommand<'a> {
    raw: IoctlCommand,
    _buf: PhantomData<&'a mut [u8]>,
}

impl<'a> PassthroughCommand<'a> {
    /// Zeroed envelope pointing at `buf`.
    pub fn with_buffer(buf: &'a mut [u8]) -> Result<Self, BufferTooLarge> {
        let buf_size = u16::try_from(buf.len()).map_err(|_| BufferTooLarge(buf.len()))?;
        Ok(Self {
            raw: IoctlCommand {
                lun_info: [0; LUN_ADDR_LEN],
                request: RequestBlock::new_zeroed(),
                error_info: ErrorInfo::new_zeroed(),
                buf_size,
                buf: buf.as_mut_ptr(),
            },
            _buf: PhantomData,
        })
    }

    #[inline]
    pub fn buf_size(&self) -> u16 {
        self.raw.buf_size
    }

    #[inline]
    pub fn lun(&self) -> &[u8; LUN_ADDR_LEN] {
        &self.raw.lun_info
    }

    #[inline]
    pub fn request(&self) -> &RequestBlock {
        &self.raw.request
    }

    #[inline]
    pub fn request_mut(&mut self) -> &mut RequestBlock {
        &mut self.raw.request
    }

    #[inline]
    pub fn error_info(&self) -> &ErrorInfo {
        &self.raw.error_info
    }

    #[inline]
    pub fn error_info_mut(&mut self) -> &mut ErrorInfo {
        &mut self.raw.error_info
    }

    /// The borrowed data buffer.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        // SAFETY: `buf`/`buf_size` come from a `&'a mut [u8]` that this
        // envelope still holds exclusively.
        unsafe {
            core::slice::from_raw_parts_mut(self.raw.buf, usize::from(self.raw.buf_size))
        }
    }

    /// Pointer handed to the ioctl.
    #[inline]
    pub fn as_raw_mut(&mut self) -> *mut IoctlCommand {
        &mut self.raw
    }
}
