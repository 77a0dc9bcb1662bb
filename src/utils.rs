// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fmt, io};

use nix::errno::Errno;
use serde::{Serialize, Serializer};

/// Widest fixed-width string field in any BMIC record (software name).
pub const MAX_STR_BUF_LEN: usize = 64;

/// Whitespace as understood by C `isspace()` in the "C" locale.
#[inline]
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Strip leading and trailing whitespace; inner runs are kept as is.
pub fn trim(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|&b| !is_c_space(b)).unwrap_or(s.len());
    let end = s.iter().rposition(|&b| !is_c_space(b)).map_or(start, |i| i + 1);
    &s[start..end]
}

/// Content of a fixed-width, space-padded field.
///
/// Reads at most `MAX_STR_BUF_LEN` bytes and stops at the first NUL.
pub fn fixed_bytes(field: &[u8]) -> &[u8] {
    let field = &field[..field.len().min(MAX_STR_BUF_LEN)];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}

/// [`fixed_bytes`] followed by [`trim`].
pub fn trimmed_field(field: &[u8]) -> FieldText {
    FieldText(trim(fixed_bytes(field)).to_vec())
}

/// Text reported by the controller, kept byte for byte.
///
/// Not necessarily UTF-8; `Display` and `Serialize` are lossy, the report
/// writes [`FieldText::as_bytes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldText(Vec<u8>);

impl FieldText {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl PartialEq<str> for FieldText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for FieldText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for FieldText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl Serialize for FieldText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Platform error rendered as `<code> <description>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsError(pub Errno);

impl From<io::Error> for OsError {
    fn from(e: io::Error) -> Self {
        Self(Errno::from_raw(e.raw_os_error().unwrap_or(0)))
    }
}

impl From<Errno> for OsError {
    fn from(e: Errno) -> Self {
        Self(e)
    }
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0 as i32, self.0.desc())
    }
}
