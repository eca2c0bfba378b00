// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Memory-mapped peripherals behind the RF core drivers of one CC13x2.
//!
//! Boards create one [`Cc13x2RfPeripherals`] and build the driver stack in
//! [`crate::radio`] on top of it, using the aliases below. The CPE0 and
//! CPE1 vectors are forwarded with [`service_interrupt`].

use crate::config::Config;
use crate::fcfg::{FactoryConfig, CCFG_BASE, FCFG1_BASE};
use crate::hil::{DoorbellRegisters, InterruptLine, RfcPowerControl};
use crate::nvic::{Nvic, NVIC_BASE, RF_CORE_CPE0, RF_CORE_CPE1};
use crate::osc::{Oscillator, AUX_SMPH_BASE, DDI0_BASE, ROM_HAPI};
use crate::prcm::{RfcPower, AON_RTC_BASE, PRCM_BASE};
use crate::radio::device::RfDevice;
use crate::radio::doorbell::DoorbellTransport;
use crate::radio::executor::CommandExecutor;
use crate::radio::interrupts::{InterruptGateway, RfcInterrupt};
use crate::radio::power::PowerSequencer;
use crate::rfc::{RfcDoorbell, RfcPwc, RFC_DBELL_BASE, RFC_PWC_BASE};

pub type RfcTransport<'a> = DoorbellTransport<'a, RfcDoorbell>;
pub type RfcExecutor<'a> = CommandExecutor<'a, RfcDoorbell>;
pub type RfcGateway<'a> = InterruptGateway<'a, RfcDoorbell, RfcPower, Nvic>;
pub type RfcSequencer<'a> = PowerSequencer<'a, RfcDoorbell, RfcPower, Oscillator, Nvic>;
pub type RfcNetDevice<'a> =
    RfDevice<'a, RfcDoorbell, RfcPower, Oscillator, Nvic, FactoryConfig>;

pub struct Cc13x2RfPeripherals {
    pub doorbell: RfcDoorbell,
    pub power: RfcPower,
    pub osc: Oscillator,
    pub cpe0: Nvic,
    pub cpe1: Nvic,
    pub factory_config: FactoryConfig,
}

impl Cc13x2RfPeripherals {
    /// Only one instance may exist, since every field owns its registers.
    pub const unsafe fn new(config: Config) -> Cc13x2RfPeripherals {
        Cc13x2RfPeripherals {
            doorbell: RfcDoorbell::new(RFC_DBELL_BASE),
            power: RfcPower::new(PRCM_BASE, AON_RTC_BASE, RfcPwc::new(RFC_PWC_BASE)),
            osc: Oscillator::new(DDI0_BASE, AUX_SMPH_BASE, ROM_HAPI, config),
            cpe0: Nvic::new(NVIC_BASE, RF_CORE_CPE0),
            cpe1: Nvic::new(NVIC_BASE, RF_CORE_CPE1),
            factory_config: FactoryConfig::new(FCFG1_BASE, CCFG_BASE),
        }
    }
}

/// Hands NVIC interrupt `irq` to `gateway` if it is one of the CPE lines.
/// Returns whether it was.
pub fn service_interrupt<D, P, L>(gateway: &InterruptGateway<'_, D, P, L>, irq: u32) -> bool
where
    D: DoorbellRegisters,
    P: RfcPowerControl,
    L: InterruptLine,
{
    match irq {
        RF_CORE_CPE0 => gateway.handle_interrupt(RfcInterrupt::Cpe0),
        RF_CORE_CPE1 => gateway.handle_interrupt(RfcInterrupt::Cpe1),
        _ => return false,
    }
    true
}
