// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;
use zerocopy::{FromZeros, IntoBytes};

use crate::{
    client::transport::{ExecError, Passthrough, execute},
    control_block::{
        controller_parameters::ControllerParameters, identify_controller::IdentifyController,
    },
    models::opcode::BmicCommand,
    utils::FieldText,
};

/// Issue BMIC IDENTIFY CONTROLLER.
pub fn identify_controller<D: Passthrough + ?Sized>(
    dev: &mut D,
) -> Result<IdentifyController, ExecError> {
    let mut id = IdentifyController::new_zeroed();
    execute(dev, BmicCommand::IdentifyController, id.as_mut_bytes())?;
    Ok(id)
}

/// Issue BMIC SENSE CONTROLLER PARAMETERS.
pub fn sense_controller_parameters<D: Passthrough + ?Sized>(
    dev: &mut D,
) -> Result<ControllerParameters, ExecError> {
    let mut params = ControllerParameters::new_zeroed();
    execute(dev, BmicCommand::SenseControllerParameters, params.as_mut_bytes())?;
    Ok(params)
}

/// Whether the controller advertises HBA mode support.
#[inline]
pub fn hba_mode_supported(id: &IdentifyController) -> bool {
    id.hba_mode_supported()
}

/// Everything the `-i` action prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerInfo {
    pub vendor_id: FieldText,
    pub product_id: FieldText,
    pub board_id: u32,
    pub software_name: FieldText,
    pub hardware_name: FieldText,
    pub running_firm_rev: FieldText,
    pub rom_firm_rev: FieldText,
    pub rec_rom_inactive_rev: FieldText,
    pub yet_more_controller_flags: u32,
    pub hba_mode_supported: bool,
}

impl ControllerInfo {
    pub fn new(id: &IdentifyController, params: &ControllerParameters) -> Self {
        Self {
            vendor_id: id.vendor_id(),
            product_id: id.product_id(),
            board_id: id.board_id(),
            software_name: params.software_name(),
            hardware_name: params.hardware_name(),
            running_firm_rev: id.running_firm_rev(),
            rom_firm_rev: id.rom_firm_rev(),
            rec_rom_inactive_rev: id.rec_rom_inactive_rev(),
            yet_more_controller_flags: id.yet_more_controller_flags(),
            hba_mode_supported: hba_mode_supported(id),
        }
    }
}

fn quoted<W: Write>(out: &mut W, key: &str, value: &FieldText) -> io::Result<()> {
    write!(out, "{key}='")?;
    out.write_all(value.as_bytes())?;
    out.write_all(b"'\n")
}

impl ControllerInfo {
    /// Shell-friendly `KEY='value'` lines; strings are written as raw bytes.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        quoted(out, "VENDOR_ID", &self.vendor_id)?;
        quoted(out, "PRODUCT_ID", &self.product_id)?;
        writeln!(out, "BOARD_ID='0x{:08x}'", self.board_id)?;
        quoted(out, "SOFTWARE_NAME", &self.software_name)?;
        quoted(out, "HARDWARE_NAME", &self.hardware_name)?;
        quoted(out, "RUNNING_FIRM_REV", &self.running_firm_rev)?;
        quoted(out, "ROM_FIRM_REV", &self.rom_firm_rev)?;
        quoted(out, "REC_ROM_INACTIVE_REV", &self.rec_rom_inactive_rev)?;
        writeln!(
            out,
            "YET_MORE_CONTROLLER_FLAGS='0x{:08x}'",
            self.yet_more_controller_flags
        )?;
        writeln!(out, "HBA_MODE_SUPPORTED={}", u8::from(self.hba_mode_supported))
    }
}

/// Identify, then sense parameters, then combine.
pub fn collect_info<D: Passthrough + ?Sized>(dev: &mut D) -> Result<ControllerInfo, ExecError> {
    let id = identify_controller(dev)?;
    let params = sense_controller_parameters(dev)?;

    debug!(
        hba_mode_enabled = params.hba_mode_enabled(),
        controller_mode = id.controller_mode,
        firmware_build = id.firmware_build_number.get(),
        "controller state"
    );

    let info = ControllerInfo::new(&id, &params);
    debug!(
        report = %serde_json::to_string(&info).unwrap_or_default(),
        "controller info collected"
    );
    Ok(info)
}
