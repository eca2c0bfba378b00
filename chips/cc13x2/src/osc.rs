// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! High-frequency oscillator control.
//!
//! The HF clock source is selected in DDI0 OSC CTL0 and reported in STAT0.
//! DDI writes go through the 16-bit masked write window and must hold the
//! AUX semaphore. The switch itself has undocumented timing restrictions,
//! so it is done by the `HFSourceSafeSwitch` routine in ROM.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::config::Config;
use crate::errorcode::{RfcError, WaitPoint};
use crate::hil::{HfClockControl, HfSource};
use crate::poll::poll_until;
use crate::static_ref::StaticRef;

/// Offset of the 16-bit masked write window from the DDI base.
const MASK16B_OFFSET: usize = 0x200;
/// DDI0 OSC CTL0 register offset.
const CTL0: usize = 0x00;

register_structs! {
    pub DdiRegisters {
        (0x000 => _ctl0: ReadWrite<u32, Ctl0::Register>),
        (0x004 => _reserved0),
        (0x034 => stat0: ReadOnly<u32, Stat0::Register>),
        (0x038 => _reserved1),
        /// 16-bit masked writes: the upper half of each word selects which
        /// bits of the lower half are written.
        (0x200 => mask16b: [ReadWrite<u32>; 32]),
        (0x280 => @END),
    }
}

register_structs! {
    pub AuxSmphRegisters {
        /// Reading 1 takes the semaphore, writing 1 releases it.
        (0x00 => smph0: ReadWrite<u32>),
        (0x04 => @END),
    }
}

register_bitfields! [
    u32,
    Ctl0 [
        SCLK_MF_SRC_SEL OFFSET(1) NUMBITS(1) [],
        SCLK_HF_SRC_SEL OFFSET(0) NUMBITS(1) [
            RCOSC_HF = 0b0,
            XOSC_HF  = 0b1
        ]
    ],
    Stat0 [
        SCLK_HF_SRC OFFSET(28) NUMBITS(1) [
            RCOSC_HF = 0b0,
            XOSC_HF  = 0b1
        ],
        XOSC_HF_EN  OFFSET(15) NUMBITS(1) [],
        PENDING_SCLK_HF_SWITCHING OFFSET(0) NUMBITS(1) []
    ]
];

/// The ROM "hard API" table. Only the entry used here is typed.
#[repr(C)]
pub struct HardApi {
    _reserved: [usize; 14],
    hf_source_safe_switch: unsafe extern "C" fn(),
}

pub const DDI0_BASE: StaticRef<DdiRegisters> =
    unsafe { StaticRef::new(0x400C_A000 as *const DdiRegisters) };
pub const AUX_SMPH_BASE: StaticRef<AuxSmphRegisters> =
    unsafe { StaticRef::new(0x400C_8000 as *const AuxSmphRegisters) };
pub const ROM_HAPI: StaticRef<HardApi> =
    unsafe { StaticRef::new(0x1000_0048 as *const HardApi) };

/// Word index into the masked write window and the value to write for a
/// `mask`/`shift` field of DDI register `reg`.
fn mask16_write(reg: usize, mut mask: u32, mut shift: u32, data: u16) -> (usize, u32) {
    let mut offset = MASK16B_OFFSET + (reg << 1);
    if shift >= 16 {
        shift -= 16;
        offset += 4;
        mask >>= 16;
    }
    let index = (offset - MASK16B_OFFSET) / 4;
    (index, (mask << 16) | (u32::from(data) << shift))
}

pub struct Oscillator {
    ddi: StaticRef<DdiRegisters>,
    smph: StaticRef<AuxSmphRegisters>,
    hapi: StaticRef<HardApi>,
    config: Config,
}

impl Oscillator {
    pub const fn new(
        ddi: StaticRef<DdiRegisters>,
        smph: StaticRef<AuxSmphRegisters>,
        hapi: StaticRef<HardApi>,
        config: Config,
    ) -> Oscillator {
        Oscillator {
            ddi,
            smph,
            hapi,
            config,
        }
    }

    /// Runs `f` holding the AUX semaphore.
    fn with_semaphore<R>(&self, f: impl FnOnce() -> R) -> Result<R, RfcError> {
        poll_until(&self.config, WaitPoint::AuxSemaphore, || {
            self.smph.smph0.get() != 0
        })?;
        let result = f();
        self.smph.smph0.set(1);
        Ok(result)
    }

    fn ddi_field_write(
        &self,
        reg: usize,
        mask: u32,
        shift: u32,
        data: u16,
    ) -> Result<(), RfcError> {
        let (index, value) = mask16_write(reg, mask, shift, data);
        self.with_semaphore(|| self.ddi.mask16b[index].set(value))
    }
}

impl HfClockControl for Oscillator {
    fn hf_source(&self) -> HfSource {
        if self.ddi.stat0.is_set(Stat0::SCLK_HF_SRC) {
            HfSource::XOsc
        } else {
            HfSource::RcOsc
        }
    }

    fn request_hf_source(&self, source: HfSource) -> Result<(), RfcError> {
        let select = match source {
            HfSource::RcOsc => 0,
            HfSource::XOsc => 1,
        };
        self.ddi_field_write(CTL0, 0x1, 0, select)
    }

    fn hf_source_ready(&self) -> bool {
        self.ddi.stat0.is_set(Stat0::PENDING_SCLK_HF_SWITCHING)
    }

    fn switch_hf_source(&self) -> Result<(), RfcError> {
        let switch = self.hapi.hf_source_safe_switch;
        self.with_semaphore(|| unsafe { switch() })
    }
}
