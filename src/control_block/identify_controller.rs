// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! BMIC IDENTIFY CONTROLLER (0x11) — 512-byte response record.
//!
//! Layout (all integers little-endian):
//!   [0]        configured logical drive count
//!   [1..5]     configuration signature
//!   [5..9]     running firmware revision   (ASCII)
//!   [9..13]    ROM firmware revision       (ASCII)
//!   [13]       hardware revision
//!   [14..18]   boot block revision
//!   [18..22]   drive present bit map
//!   [22..26]   external drive bit map
//!   [26..30]   board id
//!   [112..116] recovery ROM inactive revision (ASCII)
//!   [154..156] extended logical unit count
//!   [190..192] firmware build number
//!   [200..208] vendor id                   (ASCII, space padded)
//!   [208..224] product id                  (ASCII, space padded)
//!   [286..290] yet more controller flags
//!   [292]      controller mode
//!   [293..325] spare part number           (ASCII)
//!   [325..357] long firmware version       (ASCII)

use anyhow::{Result, anyhow};
use zerocopy::{
    FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
    byteorder::{LittleEndian, U16, U32},
};

use crate::utils::{FieldText, trimmed_field};

pub const IDENTIFY_CONTROLLER_LEN: usize = 512;

pub const VENDOR_ID_LEN: usize = 8;
pub const PRODUCT_ID_LEN: usize = 16;
pub const FIRMWARE_REV_LEN: usize = 4;
pub const SPARE_PART_NUMBER_LEN: usize = 32;
pub const FIRMWARE_VERSION_LONG_LEN: usize = 32;

bitflags::bitflags! {
    /// "Yet more controller flags" word of IDENTIFY CONTROLLER.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct YetMoreControllerFlags: u32 {
        /// Controller can run in HBA (pass-through) mode.
        const HBA_MODE_SUPPORTED = 1 << 25;
    }
}

#[repr(C)]
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned, Debug, Clone)]
pub struct IdentifyController {
    pub configured_logical_drive_count: u8,
    pub configuration_signature: U32<LittleEndian>,
    pub running_firm_rev: [u8; FIRMWARE_REV_LEN],
    pub rom_firm_rev: [u8; FIRMWARE_REV_LEN],
    pub hardware_rev: u8,
    pub boot_block_rev: [u8; 4],
    pub drive_present_bit_map: U32<LittleEndian>,
    pub external_drive_bit_map: U32<LittleEndian>,
    pub board_id: U32<LittleEndian>,
    reserved1: [u8; 82],
    pub rec_rom_inactive_rev: [u8; FIRMWARE_REV_LEN],
    reserved2: [u8; 38],
    pub extended_logical_unit_count: U16<LittleEndian>,
    reserved3: [u8; 34],
    pub firmware_build_number: U16<LittleEndian>,
    reserved4: [u8; 8],
    pub vendor_id: [u8; VENDOR_ID_LEN],
    pub product_id: [u8; PRODUCT_ID_LEN],
    reserved5: [u8; 62],
    pub yet_more_controller_flags: U32<LittleEndian>,
    reserved6: [u8; 2],
    pub controller_mode: u8,
    pub spare_part_number: [u8; SPARE_PART_NUMBER_LEN],
    pub firmware_version_long: [u8; FIRMWARE_VERSION_LONG_LEN],
    reserved7: [u8; 155],
}

const _: () = assert!(size_of::<IdentifyController>() == IDENTIFY_CONTROLLER_LEN);

impl IdentifyController {
    pub fn vendor_id(&self) -> FieldText {
        trimmed_field(&self.vendor_id)
    }

    pub fn product_id(&self) -> FieldText {
        trimmed_field(&self.product_id)
    }

    pub fn running_firm_rev(&self) -> FieldText {
        trimmed_field(&self.running_firm_rev)
    }

    pub fn rom_firm_rev(&self) -> FieldText {
        trimmed_field(&self.rom_firm_rev)
    }

    pub fn rec_rom_inactive_rev(&self) -> FieldText {
        trimmed_field(&self.rec_rom_inactive_rev)
    }

    #[inline]
    pub fn board_id(&self) -> u32 {
        self.board_id.get()
    }

    /// Raw flag word in host order.
    #[inline]
    pub fn yet_more_controller_flags(&self) -> u32 {
        self.yet_more_controller_flags.get()
    }

    #[inline]
    pub fn flags(&self) -> YetMoreControllerFlags {
        YetMoreControllerFlags::from_bits_retain(self.yet_more_controller_flags())
    }

    #[inline]
    pub fn hba_mode_supported(&self) -> bool {
        self.flags().contains(YetMoreControllerFlags::HBA_MODE_SUPPORTED)
    }
}

/// Parse IDENTIFY CONTROLLER data (needs ≥ 512 bytes).
#[inline]
pub fn parse_identify_controller(buf: &[u8]) -> Result<&IdentifyController> {
    let (raw, _rest) = IdentifyController::ref_from_prefix(buf).map_err(|_| {
        anyhow!(
            "IDENTIFY CONTROLLER: need ≥ {IDENTIFY_CONTROLLER_LEN} bytes, got {}",
            buf.len()
        )
    })?;
    Ok(raw)
}
