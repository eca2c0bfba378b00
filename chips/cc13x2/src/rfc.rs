// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! RF Core doorbell and power/clock registers.
//!
//! The radio doorbell is the communication mechanism between the system CPU
//! and the radio CPU. It is a set of dedicated registers plus a set of
//! interrupts to both CPUs. A command is written to CMDR, the radio CPU
//! answers in CMDSTA and raises the acknowledge flag in RFACKIFG. Radio
//! operations report their progress through the CPE interrupt flags.
//!
//! RFC_PWC gates the clocks of the modules inside the RF core. The CPE
//! boots once its processor and RAM clocks are enabled here.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::hil::DoorbellRegisters;
use crate::static_ref::StaticRef;

register_structs! {
    pub RfcDbellRegisters {
        /// Doorbell Command Register
        (0x00 => cmdr: ReadWrite<u32>),
        /// RFC Command Status register
        (0x04 => cmdsta: ReadOnly<u32, Status::Register>),
        /// Interrupt Flags From RF HW Modules
        (0x08 => _rfhwifg: ReadWrite<u32>),
        /// Interrupt Enable For RF HW Modules
        (0x0C => _rfhwien: ReadWrite<u32>),
        /// Interrupt Flags For CPE Generated Interrupts
        (0x10 => rfcpeifg: ReadWrite<u32, CPEIntFlags::Register>),
        /// Interrupt Enable For CPE Generated Interrupts
        (0x14 => rfcpeien: ReadWrite<u32, CPEIntFlags::Register>),
        /// Interrupt Vector Selection For CPE Generated Interrupts
        (0x18 => rfcpeisl: ReadWrite<u32, CPEIntFlags::Register>),
        /// Doorbell Command Acknowledgement Interrupt Flag
        (0x1C => rfackifg: ReadWrite<u32, DBellCmdAck::Register>),
        /// RF Core General Purpose Output Control
        (0x20 => _sysgpoctl: ReadWrite<u32>),
        (0x24 => @END),
    }
}

register_structs! {
    pub RfcPwcRegisters {
        /// RF Core Power Management and Clock Enable
        (0x00 => pwmclken: ReadWrite<u32, RFCorePWMEnable::Register>),
        (0x04 => @END),
    }
}

register_bitfields! {
    u32,
    Status [
        RESULT   OFFSET(0) NUMBITS(8) [
            Pending = 0x00,
            Done = 0x01
        ],
        RETBYTE1 OFFSET(8) NUMBITS(8) [],
        RETBYTE2 OFFSET(16) NUMBITS(8) [],
        RETBYTE3 OFFSET(24) NUMBITS(8) []
    ],
    CPEIntFlags [
        COMMAND_DONE         OFFSET(0) NUMBITS(1) [],
        LAST_COMMAND_DONE    OFFSET(1) NUMBITS(1) [],
        FG_COMMAND_DONE      OFFSET(2) NUMBITS(1) [],
        LAST_FG_COMMAND_DONE OFFSET(3) NUMBITS(1) [],
        TX_DONE              OFFSET(4) NUMBITS(1) [],
        RX_OK                OFFSET(16) NUMBITS(1) [],
        RX_NOK               OFFSET(17) NUMBITS(1) [],
        SYNTH_NO_LOCK        OFFSET(28) NUMBITS(1) [],
        MODULES_UNLOCKED     OFFSET(29) NUMBITS(1) [],
        BOOT_DONE            OFFSET(30) NUMBITS(1) [],
        // CPE has observed an unexpected error. CPE reset is needed.
        INTERNAL_ERROR       OFFSET(31) NUMBITS(1) []
    ],
    DBellCmdAck [
        CMDACK OFFSET(0) NUMBITS(1) []
    ],
    RFCorePWMEnable [
        RFC    OFFSET(0) NUMBITS(1) [],
        CPE    OFFSET(1) NUMBITS(1) [],
        CPERAM OFFSET(2) NUMBITS(1) [],
        MDM    OFFSET(3) NUMBITS(1) [],
        MDMRAM OFFSET(4) NUMBITS(1) [],
        RFE    OFFSET(5) NUMBITS(1) [],
        RFERAM OFFSET(6) NUMBITS(1) [],
        RAT    OFFSET(7) NUMBITS(1) [],
        PHA    OFFSET(8) NUMBITS(1) [],
        FSCA   OFFSET(9) NUMBITS(1) []
    ]
}

pub const RFC_PWC_BASE: StaticRef<RfcPwcRegisters> =
    unsafe { StaticRef::new(0x4004_0000 as *const RfcPwcRegisters) };
pub const RFC_DBELL_BASE: StaticRef<RfcDbellRegisters> =
    unsafe { StaticRef::new(0x4004_1000 as *const RfcDbellRegisters) };

/// The RFC_DBELL register block.
pub struct RfcDoorbell {
    registers: StaticRef<RfcDbellRegisters>,
}

impl RfcDoorbell {
    pub const fn new(registers: StaticRef<RfcDbellRegisters>) -> RfcDoorbell {
        RfcDoorbell { registers }
    }
}

impl DoorbellRegisters for RfcDoorbell {
    fn command(&self) -> u32 {
        self.registers.cmdr.get()
    }

    fn set_command(&self, word: u32) {
        self.registers.cmdr.set(word);
    }

    fn command_status(&self) -> u32 {
        self.registers.cmdsta.get()
    }

    fn is_acknowledged(&self) -> bool {
        self.registers.rfackifg.is_set(DBellCmdAck::CMDACK)
    }

    fn clear_acknowledge(&self) {
        self.registers.rfackifg.set(0);
    }

    fn set_cpe_vector_select(&self, mask: u32) {
        self.registers.rfcpeisl.set(mask);
    }

    fn set_cpe_interrupt_enable(&self, mask: u32) {
        self.registers.rfcpeien.set(mask);
    }

    fn cpe_interrupt_flags(&self) -> u32 {
        self.registers.rfcpeifg.get()
    }

    fn clear_cpe_interrupt_flags(&self, mask: u32) {
        // Flags are cleared by writing 0, writing 1 leaves them alone.
        self.registers.rfcpeifg.set(!mask);
    }
}

/// The RFC_PWC register block.
pub struct RfcPwc {
    registers: StaticRef<RfcPwcRegisters>,
}

impl RfcPwc {
    pub const fn new(registers: StaticRef<RfcPwcRegisters>) -> RfcPwc {
        RfcPwc { registers }
    }

    /// Enables the clocks of every RF core module, which starts the CPE
    /// boot.
    pub fn enable_clocks(&self) {
        self.registers.pwmclken.write(
            RFCorePWMEnable::RFC::SET
                + RFCorePWMEnable::CPE::SET
                + RFCorePWMEnable::CPERAM::SET
                + RFCorePWMEnable::MDM::SET
                + RFCorePWMEnable::MDMRAM::SET
                + RFCorePWMEnable::RFE::SET
                + RFCorePWMEnable::RFERAM::SET
                + RFCorePWMEnable::RAT::SET
                + RFCorePWMEnable::PHA::SET
                + RFCorePWMEnable::FSCA::SET,
        );
    }

    pub fn clocks(&self) -> u32 {
        self.registers.pwmclken.get()
    }
}
