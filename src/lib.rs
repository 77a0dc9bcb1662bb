//! This crate queries HP Smart Array controllers for HBA mode support using
//! BMIC commands sent through the Linux CCISS passthrough ioctl.
// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Handles command-line parsing and logging.
pub mod cfg;
/// Opens controller nodes and executes passthrough commands.
pub mod client;
/// Builds BMIC CDBs and decodes their response records.
pub mod control_block;
/// Contains the actions exposed by the command-line tool.
pub mod handlers;
/// Defines the passthrough envelope and BMIC opcodes.
pub mod models;
/// Provides utility functions used throughout the crate.
pub mod utils;
