// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

pub mod bmic;
pub mod controller_parameters;
pub mod identify_controller;
