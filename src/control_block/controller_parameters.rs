// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! BMIC SENSE CONTROLLER PARAMETERS (0x64) — 512-byte response record.
//!
//! Layout (integers little-endian):
//!   [0..18]    LED, verification, parity, elevator and scan settings
//!   [18..82]   software name (ASCII, space padded)
//!   [82..114]  hardware name (ASCII, space padded)
//!   [114..123] bridge revision, snapshot priority, OS specific, POST timeout
//!   [123]      NVRAM flags
//!   [124..156] cache/drive config, temperature levels, coalescing, access id
//!   [156..512] reserved

use anyhow::{Result, anyhow};
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{LittleEndian, U16, U32},
};

use crate::utils::{FieldText, trimmed_field};

pub const CONTROLLER_PARAMETERS_LEN: usize = 512;

pub const SOFTWARE_NAME_LEN: usize = 64;
pub const HARDWARE_NAME_LEN: usize = 32;

bitflags::bitflags! {
    /// NVRAM flags byte of the controller parameters.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct NvramFlags: u8 {
        /// HBA mode is currently enabled.
        const HBA_MODE_ENABLED = 1 << 3;
    }
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone)]
pub struct ControllerParameters {
    pub led_flags: u8,
    pub enable_command_list_verification: u8,
    pub backed_out_write_drives: u8,
    pub stripes_for_parity: U16<LittleEndian>,
    pub parity_distribution_mode_flags: u8,
    pub max_driver_requests: U16<LittleEndian>,
    pub elevator_trend_count: U16<LittleEndian>,
    pub disable_elevator: u8,
    pub force_scan_complete: u8,
    pub scsi_transfer_mode: u8,
    pub force_narrow: u8,
    pub rebuild_priority: u8,
    pub expand_priority: u8,
    pub host_sdb_asic_fix: u8,
    pub pdpi_burst_from_host_disabled: u8,
    pub software_name: [u8; SOFTWARE_NAME_LEN],
    pub hardware_name: [u8; HARDWARE_NAME_LEN],
    pub bridge_revision: u8,
    pub snapshot_priority: u8,
    pub os_specific: U32<LittleEndian>,
    pub post_prompt_timeout: u8,
    pub automatic_drive_slamming: u8,
    reserved1: u8,
    pub nvram_flags: u8,
    pub cache_nvram_flags: u8,
    pub drive_config_flags: u8,
    reserved2: U16<LittleEndian>,
    pub temp_warning_level: u8,
    pub temp_shutdown_level: u8,
    pub temp_condition_reset: u8,
    pub max_coalesce_commands: u8,
    pub max_coalesce_delay: U32<LittleEndian>,
    pub orca_password: [u8; 4],
    pub access_id: [u8; 16],
    reserved: [u8; 356],
}

const _: () = assert!(size_of::<ControllerParameters>() == CONTROLLER_PARAMETERS_LEN);

impl ControllerParameters {
    pub fn software_name(&self) -> FieldText {
        trimmed_field(&self.software_name)
    }

    pub fn hardware_name(&self) -> FieldText {
        trimmed_field(&self.hardware_name)
    }

    #[inline]
    pub fn nvram_flags(&self) -> NvramFlags {
        NvramFlags::from_bits_retain(self.nvram_flags)
    }

    #[inline]
    pub fn hba_mode_enabled(&self) -> bool {
        self.nvram_flags().contains(NvramFlags::HBA_MODE_ENABLED)
    }
}

/// Parse SENSE CONTROLLER PARAMETERS data (needs ≥ 512 bytes).
#[inline]
pub fn parse_controller_parameters(buf: &[u8]) -> Result<&ControllerParameters> {
    let (raw, _rest) = ControllerParameters::ref_from_prefix(buf).map_err(|_| {
        anyhow!(
            "SENSE CONTROLLER PARAMETERS: need ≥ {CONTROLLER_PARAMETERS_LEN} bytes, got {}",
            buf.len()
        )
    })?;
    Ok(raw)
}
