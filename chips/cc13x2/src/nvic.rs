// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Cortex-M NVIC lines of the RF core.

use tock_registers::interfaces::Writeable;
use tock_registers::registers::ReadWrite;
use tock_registers::register_structs;

use crate::hil::InterruptLine;
use crate::static_ref::StaticRef;

pub const RF_CORE_CPE1: u32 = 2;
pub const RF_CORE_CPE0: u32 = 9;

register_structs! {
    pub NvicRegisters {
        (0x000 => _reserved0),
        /// Interrupt Set-Enable Registers
        (0x100 => iser: [ReadWrite<u32>; 32]),
        /// Interrupt Clear-Enable Registers
        (0x180 => icer: [ReadWrite<u32>; 32]),
        (0x200 => _reserved1),
        /// Interrupt Clear-Pending Registers
        (0x280 => icpr: [ReadWrite<u32>; 32]),
        (0x300 => @END),
    }
}

pub const NVIC_BASE: StaticRef<NvicRegisters> =
    unsafe { StaticRef::new(0xE000_E000 as *const NvicRegisters) };

/// A single NVIC interrupt.
///
/// Hand these out to the RF core drivers to let them control their own
/// interrupts but not others.
pub struct Nvic {
    registers: StaticRef<NvicRegisters>,
    idx: u32,
}

impl Nvic {
    /// Marked unsafe because only chip configuration code should be able to
    /// create these.
    pub const unsafe fn new(registers: StaticRef<NvicRegisters>, idx: u32) -> Nvic {
        Nvic { registers, idx }
    }

    pub fn index(&self) -> u32 {
        self.idx
    }

    fn bank_and_bit(&self) -> (usize, u32) {
        ((self.idx / 32) as usize, 1 << (self.idx & 31))
    }
}

impl InterruptLine for Nvic {
    fn enable(&self) {
        let (bank, bit) = self.bank_and_bit();
        self.registers.iser[bank].set(bit);
    }

    fn disable(&self) {
        let (bank, bit) = self.bank_and_bit();
        self.registers.icer[bank].set(bit);
    }

    fn clear_pending(&self) {
        let (bank, bit) = self.bank_and_bit();
        self.registers.icpr[bank].set(bit);
    }
}
