// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Power, Clock, and Reset Management (PRCM) of the RF core.
//!
//! The RF core sits in its own power domain, which is controlled from both
//! PDCTL0 and PDCTL1 and is only on when both status registers agree. Its
//! clock gate, like every PRCM clock gate, only takes effect once the
//! settings are loaded through CLKLOADCTL.
//!
//! The RF core firmware reads its boot parameters from RFCBITS, and the
//! radio timer follows the RTC once AON_RTC allows it to.

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::hil::{DomainStatus, RfcPowerControl};
use crate::rfc::RfcPwc;
use crate::static_ref::StaticRef;

register_structs! {
    pub PrcmRegisters {
        (0x000 => _reserved0),
        /// Write 1 in order to load prcm settings to CLKCTL power domain
        (0x028 => clk_load_ctl: ReadWrite<u32, ClockLoad::Register>),
        /// RFC Clock Gate
        (0x02C => rfc_clk_gate: ReadWrite<u32, ClockGate::Register>),
        (0x030 => _reserved1),
        /// Power Domain Control 0
        (0x12C => pd_ctl0: ReadWrite<u32, PowerDomain0::Register>),
        (0x130 => _reserved2),
        /// Power Domain Status 0
        (0x140 => pd_stat0: ReadOnly<u32, PowerDomainStatus0::Register>),
        (0x144 => _reserved3),
        /// Power Domain Control 1
        (0x17C => pd_ctl1: ReadWrite<u32, PowerDomain1::Register>),
        (0x180 => _reserved4),
        /// Power Domain Status 1
        (0x194 => pd_stat1: ReadOnly<u32, PowerDomainStatus1::Register>),
        (0x198 => _reserved5),
        /// RFC Power Domain Status
        (0x19C => pd_stat1_rfc: ReadOnly<u32, PowerDomainSingle::Register>),
        (0x1A0 => _reserved6),
        /// Control to RFC
        (0x1CC => rfc_bits: ReadWrite<u32>),
        (0x1D0 => @END),
    }
}

register_structs! {
    pub AonRtcRegisters {
        (0x00 => ctl: ReadWrite<u32, RtcControl::Register>),
        (0x04 => @END),
    }
}

register_bitfields! [
    u32,
    ClockLoad [
        LOAD_DONE OFFSET(1) NUMBITS(1) [],
        LOAD      OFFSET(0) NUMBITS(1) []
    ],
    ClockGate [
        CLK_EN OFFSET(0) NUMBITS(1) []
    ],
    PowerDomain0 [
        PERIPH_ON OFFSET(2) NUMBITS(1) [],
        SERIAL_ON OFFSET(1) NUMBITS(1) [],
        RFC_ON    OFFSET(0) NUMBITS(1) []
    ],
    PowerDomainStatus0 [
        PERIPH_ON OFFSET(2) NUMBITS(1) [],
        SERIAL_ON OFFSET(1) NUMBITS(1) [],
        RFC_ON    OFFSET(0) NUMBITS(1) []
    ],
    PowerDomain1 [
        VIMS_ON OFFSET(3) NUMBITS(1) [],
        RFC_ON  OFFSET(2) NUMBITS(1) [],
        CPU_ON  OFFSET(1) NUMBITS(1) []
    ],
    PowerDomainStatus1 [
        BUS_ON  OFFSET(4) NUMBITS(1) [],
        VIMS_ON OFFSET(3) NUMBITS(1) [],
        RFC_ON  OFFSET(2) NUMBITS(1) [],
        CPU_ON  OFFSET(1) NUMBITS(1) []
    ],
    PowerDomainSingle [
        ON OFFSET(0) NUMBITS(1) []
    ],
    RtcControl [
        RTC_UPD_EN OFFSET(1) NUMBITS(1) []
    ]
];

pub const PRCM_BASE: StaticRef<PrcmRegisters> =
    unsafe { StaticRef::new(0x4008_2000 as *const PrcmRegisters) };
pub const AON_RTC_BASE: StaticRef<AonRtcRegisters> =
    unsafe { StaticRef::new(0x4009_2000 as *const AonRtcRegisters) };

/// RF core power domain, clock gate and boot control.
pub struct RfcPower {
    prcm: StaticRef<PrcmRegisters>,
    rtc: StaticRef<AonRtcRegisters>,
    pwc: RfcPwc,
}

impl RfcPower {
    pub const fn new(
        prcm: StaticRef<PrcmRegisters>,
        rtc: StaticRef<AonRtcRegisters>,
        pwc: RfcPwc,
    ) -> RfcPower {
        RfcPower { prcm, rtc, pwc }
    }
}

impl RfcPowerControl for RfcPower {
    fn set_domain_power(&self, on: bool) {
        if on {
            self.prcm.pd_ctl0.modify(PowerDomain0::RFC_ON::SET);
            self.prcm.pd_ctl1.modify(PowerDomain1::RFC_ON::SET);
        } else {
            self.prcm.pd_ctl0.modify(PowerDomain0::RFC_ON::CLEAR);
            self.prcm.pd_ctl1.modify(PowerDomain1::RFC_ON::CLEAR);
        }
    }

    fn domain_status(&self) -> DomainStatus {
        let stat0 = self.prcm.pd_stat0.is_set(PowerDomainStatus0::RFC_ON);
        let stat1 = self.prcm.pd_stat1.is_set(PowerDomainStatus1::RFC_ON);
        match (stat0, stat1) {
            (true, true) => DomainStatus::On,
            (false, false) => DomainStatus::Off,
            _ => DomainStatus::Transitioning,
        }
    }

    fn set_domain_clock(&self, enabled: bool) {
        if enabled {
            self.prcm.rfc_clk_gate.modify(ClockGate::CLK_EN::SET);
        } else {
            self.prcm.rfc_clk_gate.modify(ClockGate::CLK_EN::CLEAR);
        }
    }

    fn request_clock_load(&self) {
        self.prcm.clk_load_ctl.write(ClockLoad::LOAD::SET);
    }

    fn clock_load_done(&self) -> bool {
        self.prcm.clk_load_ctl.is_set(ClockLoad::LOAD_DONE)
    }

    fn rf_ready(&self) -> bool {
        self.prcm.pd_stat1_rfc.is_set(PowerDomainSingle::ON)
    }

    fn enable_core_clocks(&self) {
        self.pwc.enable_clocks();
    }

    fn set_boot_parameters(&self, bits: u32) {
        self.prcm.rfc_bits.set(bits);
    }

    fn enable_rtc_update(&self) {
        self.rtc.ctl.modify(RtcControl::RTC_UPD_EN::SET);
    }
}
