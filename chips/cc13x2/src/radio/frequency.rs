// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Sub-GHz channel plan (902-928 MHz band, 200 kHz spacing).

use crate::errorcode::RfcError;
use crate::radio::commands::CmdFs;

pub const CHANNEL_MIN: u16 = 0;
pub const CHANNEL_MAX: u16 = 198;
pub const CHANNEL_SPACING_KHZ: u32 = 200;
/// Centre frequency of channel 0.
pub const BASE_FREQUENCY_KHZ: u32 = 902_200;

/// Centre frequency of `channel` in kHz.
pub fn channel_frequency(channel: u16) -> Result<u32, RfcError> {
    if !(CHANNEL_MIN..=CHANNEL_MAX).contains(&channel) {
        return Err(RfcError::Invalid);
    }
    Ok(BASE_FREQUENCY_KHZ + CHANNEL_SPACING_KHZ * u32::from(channel - CHANNEL_MIN))
}

/// Frequency as programmed into CMD_FS: whole MHz, plus the remainder in
/// 1/65536 MHz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyWord {
    pub frequency: u16,
    pub fract_freq: u16,
}

impl FrequencyWord {
    pub fn from_khz(khz: u32) -> FrequencyWord {
        let decimal = khz / 1000;
        let fract = ((khz - decimal * 1000) * 65536) / 1000;
        FrequencyWord {
            frequency: decimal as u16,
            fract_freq: fract as u16,
        }
    }
}

impl CmdFs {
    /// CMD_FS tuned to the centre of `channel`.
    pub fn for_channel(channel: u16) -> Result<CmdFs, RfcError> {
        let word = FrequencyWord::from_khz(channel_frequency(channel)?);
        Ok(CmdFs::new(word.frequency, word.fract_freq))
    }

    /// Retargets this command at `channel`, leaving everything else alone.
    pub fn tune(&mut self, channel: u16) -> Result<(), RfcError> {
        let word = FrequencyWord::from_khz(channel_frequency(channel)?);
        self.frequency = word.frequency;
        self.fract_freq = word.fract_freq;
        Ok(())
    }
}
