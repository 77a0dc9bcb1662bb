//! This module handles command-line parsing and logging.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Command-line interface parsing.
pub mod cli;
/// Logger initialization.
pub mod logger;
/// Fatal error reporting at the process boundary.
pub mod fatal;
