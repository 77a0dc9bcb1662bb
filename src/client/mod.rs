//! This module talks to the controller through the CCISS driver.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Device node handling and the real ioctl.
pub mod device;
/// The passthrough abstraction and command execution.
pub mod transport;
