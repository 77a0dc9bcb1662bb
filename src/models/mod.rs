//! This module defines the CCISS passthrough envelope and BMIC opcodes.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Defines the BMIC command enumeration.
pub mod opcode;
/// Defines the `CCISS_PASSTHRU` envelope and driver error info.
pub mod passthru;
