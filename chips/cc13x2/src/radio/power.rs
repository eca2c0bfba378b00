// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Power and clock sequencing of the RF core.
//!
//! Bringing the RF core up takes the HF clock onto the crystal, powers and
//! clocks the RF domain, arms the CPE interrupts, lets the CPE firmware
//! boot and finally pings it. Only a successful ping makes the core
//! [`RadioState::Active`]. Power-down runs the same steps backwards.

use log::{debug, warn};

use crate::config::Config;
use crate::errorcode::{RfcError, WaitPoint};
use crate::hil::{
    DomainStatus, DoorbellRegisters, HfClockControl, HfSource, InterruptLine, RfcPowerControl,
};
use crate::poll::poll_until;
use crate::radio::executor::CommandExecutor;
use crate::radio::interrupts::InterruptGateway;

mod state;

pub use self::state::{CoreState, RadioState};

/// RFCBITS value read by the CPE firmware at boot.
pub const RFC_BOOT_PARAMETERS: u32 = 0xE000_0011;

pub struct PowerSequencer<'a, D, P, H, L>
where
    D: DoorbellRegisters,
    P: RfcPowerControl,
    H: HfClockControl,
    L: InterruptLine,
{
    power: &'a P,
    clock: &'a H,
    gateway: &'a InterruptGateway<'a, D, P, L>,
    executor: &'a CommandExecutor<'a, D>,
    state: &'a CoreState,
    config: Config,
}

impl<'a, D, P, H, L> PowerSequencer<'a, D, P, H, L>
where
    D: DoorbellRegisters,
    P: RfcPowerControl,
    H: HfClockControl,
    L: InterruptLine,
{
    pub fn new(
        power: &'a P,
        clock: &'a H,
        gateway: &'a InterruptGateway<'a, D, P, L>,
        executor: &'a CommandExecutor<'a, D>,
        state: &'a CoreState,
        config: Config,
    ) -> PowerSequencer<'a, D, P, H, L> {
        PowerSequencer {
            power,
            clock,
            gateway,
            executor,
            state,
            config,
        }
    }

    /// One-time setup after reset: RF core boot parameters and the radio
    /// timer update from the RTC.
    pub fn init(&self) {
        self.power.set_boot_parameters(RFC_BOOT_PARAMETERS);
        self.power.enable_rtc_update();
    }

    pub fn state(&self) -> RadioState {
        self.state.get()
    }

    /// Brings the RF core up and pings it.
    ///
    /// Returns the CMDSTA result byte of the ping. The core only becomes
    /// active if the ping reports `Done`. If any step fails, whatever was
    /// already brought up is shut down again before the error is returned.
    pub fn power_on(&self) -> Result<u8, RfcError> {
        if self.state.is_active() {
            return Err(RfcError::Already);
        }
        debug!("rfc: powering on");

        if self.config.switch_hf_clock && self.clock.hf_source() != HfSource::XOsc {
            if let Err(error) = self.switch_hf_clock(HfSource::XOsc) {
                if let Err(cleanup) = self.release_hf_clock() {
                    warn!("rfc: HF clock left on request: {:?}", cleanup);
                }
                return Err(error);
            }
        }

        match self.bring_up() {
            Ok(status) => {
                self.state.set(RadioState::Active);
                debug!("rfc: active");
                Ok(status)
            }
            Err(error) => {
                warn!("rfc: bring-up failed: {:?}", error);
                if let Err(cleanup) = self.tear_down() {
                    warn!("rfc: shutdown after failed bring-up: {:?}", cleanup);
                }
                Err(error)
            }
        }
    }

    /// Shuts the RF core down and moves the HF clock back to the RC
    /// oscillator.
    ///
    /// The core is idle as soon as this is called. Every step is attempted
    /// even if an earlier wait times out, and the first failure is
    /// returned.
    pub fn power_off(&self) -> Result<(), RfcError> {
        debug!("rfc: powering off");
        self.state.set(RadioState::Idle);
        self.tear_down()?;
        debug!("rfc: off");
        Ok(())
    }

    fn bring_up(&self) -> Result<u8, RfcError> {
        critical_section::with(|_| {
            self.power.set_domain_power(true);
            poll_until(&self.config, WaitPoint::PowerDomainOn, || {
                self.power.domain_status() == DomainStatus::On
            })?;

            self.power.set_domain_clock(true);
            self.power.request_clock_load();
            poll_until(&self.config, WaitPoint::ClockLoad, || {
                self.power.clock_load_done()
            })?;

            self.gateway.arm()
        })?;

        // Let the CPE boot.
        self.power.enable_core_clocks();
        self.executor.ping_unchecked()
    }

    fn tear_down(&self) -> Result<(), RfcError> {
        self.gateway.disarm();

        self.power.set_domain_clock(false);
        self.power.request_clock_load();
        let clock = poll_until(&self.config, WaitPoint::ClockLoad, || {
            self.power.clock_load_done()
        });

        self.power.set_domain_power(false);
        let domain = poll_until(&self.config, WaitPoint::PowerDomainOff, || {
            self.power.domain_status() == DomainStatus::Off
        });

        let hf = self.release_hf_clock();
        clock.and(domain).and(hf)
    }

    /// Requests `source`, switches to it and waits until STAT0 reports it.
    fn switch_hf_clock(&self, source: HfSource) -> Result<(), RfcError> {
        self.clock.request_hf_source(source)?;
        // RCOSC_HF is always running.
        if source == HfSource::XOsc {
            poll_until(&self.config, WaitPoint::HfSourceReady, || {
                self.clock.hf_source_ready()
            })?;
        }
        self.clock.switch_hf_source()?;
        poll_until(&self.config, WaitPoint::HfSourceSwitch, || {
            self.clock.hf_source() == source
        })
    }

    /// Moves the HF clock back to RCOSC, or withdraws a crystal request
    /// that was never switched to.
    fn release_hf_clock(&self) -> Result<(), RfcError> {
        if !self.config.switch_hf_clock {
            return Ok(());
        }
        if self.clock.hf_source() == HfSource::RcOsc {
            return self.clock.request_hf_source(HfSource::RcOsc);
        }
        self.switch_hf_clock(HfSource::RcOsc)
    }
}
