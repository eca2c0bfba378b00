// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Hardware access used by the RF core drivers.
//!
//! Each trait method is a single register access with no waiting, except
//! that oscillator writes first claim the AUX semaphore. All other polling
//! happens in the drivers under [`crate::radio`], so a simulated register
//! file can stand in for the real peripherals.

use crate::errorcode::RfcError;

/// RFC_DBELL: the mailbox between the system CPU and the RF core.
pub trait DoorbellRegisters {
    /// Reads CMDR. The RF core clears it once it has taken the command.
    fn command(&self) -> u32;

    /// Writes CMDR.
    fn set_command(&self, word: u32);

    /// Reads CMDSTA.
    fn command_status(&self) -> u32;

    /// RFACKIFG.ACKFLAG.
    fn is_acknowledged(&self) -> bool;

    /// Clears RFACKIFG.ACKFLAG.
    fn clear_acknowledge(&self);

    /// Writes RFCPEISL. Set bits route that CPE source to CPE1.
    fn set_cpe_vector_select(&self, mask: u32);

    /// Writes RFCPEIEN.
    fn set_cpe_interrupt_enable(&self, mask: u32);

    /// Reads RFCPEIFG.
    fn cpe_interrupt_flags(&self) -> u32;

    /// Clears the RFCPEIFG flags set in `mask`.
    fn clear_cpe_interrupt_flags(&self, mask: u32);
}

/// Status of the RF core power domain, as reported by PDSTAT0 and PDSTAT1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainStatus {
    On,
    Off,
    /// The two status registers disagree.
    Transitioning,
}

/// PRCM and RFC_PWC controls for the RF core.
pub trait RfcPowerControl {
    /// Requests the RF core power domain on or off.
    fn set_domain_power(&self, on: bool);

    fn domain_status(&self) -> DomainStatus;

    /// Enables or disables the RF core clock gate. Takes effect on the next
    /// clock load.
    fn set_domain_clock(&self, enabled: bool);

    /// Starts loading the clock gate settings into the clock controller.
    fn request_clock_load(&self);

    fn clock_load_done(&self) -> bool;

    /// Whether the RF core is powered and clocked.
    fn rf_ready(&self) -> bool;

    /// Starts the RF core internal clocks so its firmware can boot.
    fn enable_core_clocks(&self);

    /// Writes the boot parameters read by the RF core firmware.
    fn set_boot_parameters(&self, bits: u32);

    /// Lets the RTC drive the radio timer update signal.
    fn enable_rtc_update(&self);
}

/// Source of the high-frequency system clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HfSource {
    RcOsc,
    XOsc,
}

/// Oscillator control.
pub trait HfClockControl {
    fn hf_source(&self) -> HfSource;

    /// Selects the next HF source. The switch itself is [`switch_hf_source`].
    ///
    /// Fails if the oscillator registers could not be claimed, in which
    /// case nothing was written.
    ///
    /// [`switch_hf_source`]: HfClockControl::switch_hf_source
    fn request_hf_source(&self, source: HfSource) -> Result<(), RfcError>;

    /// Whether the requested HF source is ready to be switched to.
    fn hf_source_ready(&self) -> bool;

    /// Switches to the requested HF source. Success only means the switch
    /// was started; [`hf_source`](HfClockControl::hf_source) reports when
    /// it took effect.
    fn switch_hf_source(&self) -> Result<(), RfcError>;
}

/// One interrupt line at the interrupt controller.
pub trait InterruptLine {
    fn enable(&self);
    fn disable(&self);
    fn clear_pending(&self);
}

/// Where the IEEE 802.15.4 MAC address is stored.
pub trait AddressSource {
    /// Factory MAC address, as the two words written by TI.
    fn primary_mac(&self) -> [u32; 2];

    /// Customer MAC address override. All ones when not programmed.
    fn secondary_mac(&self) -> [u32; 2];
}
