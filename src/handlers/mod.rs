//! This module contains the actions built on top of BMIC commands.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Controller identity and parameters report.
pub mod info;
