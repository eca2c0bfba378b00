// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! PA settings per output power.
//!
//! Each chip variant has its own characterised table, selected by a Cargo
//! feature. Building for a variant without one is an error.

use static_assertions::const_assert;

use crate::errorcode::RfcError;

#[cfg(not(feature = "cc1312r1f3"))]
compile_error!("no PA table for this chip variant, enable the `cc1312r1f3` feature");

/// PA setting reported when the output power is not in the table.
pub const OUTPUT_POWER_UNKNOWN: u16 = 0xFFFF;

/// One PA table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub dbm: i8,
    /// Value for CMD_SET_TX_POWER.
    pub value: u16,
}

/// Packs the PA fields into the CMD_SET_TX_POWER value.
pub const fn pa_setting(bias: u16, gain: u16, boost: u16, coefficient: u16) -> u16 {
    bias | (gain << 6) | (boost << 8) | (coefficient << 9)
}

const fn row(dbm: i8, bias: u16, gain: u16, boost: u16, coefficient: u16) -> OutputConfig {
    OutputConfig {
        dbm,
        value: pa_setting(bias, gain, boost, coefficient),
    }
}

/// CC1312R1F3, 868/915 MHz band. Highest power first.
#[cfg(feature = "cc1312r1f3")]
pub const PA_TABLE: &[OutputConfig] = &[
    row(13, 36, 0, 0, 89),
    row(12, 16, 0, 0, 82),
    row(11, 26, 2, 0, 51),
    row(10, 18, 2, 0, 31),
    row(9, 28, 3, 0, 31),
    row(8, 24, 3, 0, 22),
    row(7, 20, 3, 0, 19),
    row(6, 17, 3, 0, 16),
    row(5, 14, 3, 0, 14),
    row(4, 13, 3, 0, 11),
    row(3, 11, 3, 0, 10),
    row(2, 10, 3, 0, 9),
    row(1, 9, 3, 0, 9),
    row(0, 8, 3, 0, 8),
    row(-5, 4, 3, 0, 5),
    row(-10, 2, 3, 0, 5),
    row(-15, 1, 3, 0, 3),
    row(-20, 0, 3, 0, 2),
];

const fn strictly_descending(table: &[OutputConfig]) -> bool {
    let mut i = 1;
    while i < table.len() {
        if table[i].dbm >= table[i - 1].dbm {
            return false;
        }
        i += 1;
    }
    true
}

const_assert!(!PA_TABLE.is_empty());
const_assert!(strictly_descending(PA_TABLE));

/// Highest table entry at or below `dbm`.
pub fn lookup(dbm: i16) -> Result<OutputConfig, RfcError> {
    PA_TABLE
        .iter()
        .find(|row| i16::from(row.dbm) <= dbm)
        .copied()
        .ok_or(RfcError::Invalid)
}
