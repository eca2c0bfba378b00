// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interrupt gateway for the two CPE interrupt lines.
//!
//! The RF core raises its command and packet engine (CPE) events on two
//! NVIC lines. RFCPEISL picks the line for each event: internal errors go
//! to CPE1, everything else to CPE0. Routing and enable masks are only
//! changed inside a critical section so an interrupt handler never sees
//! them half configured.

use core::cell::Cell;

use log::{debug, warn};

use crate::config::{Config, PreconditionPolicy};
use crate::errorcode::RfcError;
use crate::hil::{DoorbellRegisters, InterruptLine, RfcPowerControl};

/// RFCPEIFG.LAST_COMMAND_DONE
pub const CPE_LAST_COMMAND_DONE: u32 = 1 << 1;
/// RFCPEIFG.LAST_FG_COMMAND_DONE
pub const CPE_LAST_FG_COMMAND_DONE: u32 = 1 << 3;
/// RFCPEIFG.INTERNAL_ERROR
pub const CPE_INTERNAL_ERROR: u32 = 1 << 31;

const CPE1_SOURCES: u32 = CPE_INTERNAL_ERROR;
const CPE0_SOURCES: u32 = CPE_LAST_COMMAND_DONE | CPE_LAST_FG_COMMAND_DONE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RfcInterrupt {
    /// Command completion.
    Cpe0,
    /// Internal errors.
    Cpe1,
}

impl RfcInterrupt {
    fn index(self) -> usize {
        match self {
            RfcInterrupt::Cpe0 => 0,
            RfcInterrupt::Cpe1 => 1,
        }
    }

    fn sources(self) -> u32 {
        match self {
            RfcInterrupt::Cpe0 => CPE0_SOURCES,
            RfcInterrupt::Cpe1 => CPE1_SOURCES,
        }
    }
}

pub trait RfcInterruptClient {
    /// Called from [`InterruptGateway::handle_interrupt`] with the RFCPEIFG
    /// flags that were pending on `source`. The flags are already cleared.
    fn interrupt(&self, source: RfcInterrupt, flags: u32);
}

pub struct InterruptGateway<'a, D: DoorbellRegisters, P: RfcPowerControl, L: InterruptLine> {
    regs: &'a D,
    power: &'a P,
    cpe0: &'a L,
    cpe1: &'a L,
    clients: [Cell<Option<&'a dyn RfcInterruptClient>>; 2],
    config: Config,
}

impl<'a, D: DoorbellRegisters, P: RfcPowerControl, L: InterruptLine> InterruptGateway<'a, D, P, L> {
    pub fn new(
        regs: &'a D,
        power: &'a P,
        cpe0: &'a L,
        cpe1: &'a L,
        config: Config,
    ) -> InterruptGateway<'a, D, P, L> {
        InterruptGateway {
            regs,
            power,
            cpe0,
            cpe1,
            clients: [Cell::new(None), Cell::new(None)],
            config,
        }
    }

    pub fn set_client(&self, source: RfcInterrupt, client: &'a dyn RfcInterruptClient) {
        self.clients[source.index()].set(Some(client));
    }

    /// Routes the CPE events to the two lines and enables them.
    ///
    /// The RF power domain must be ready. What happens otherwise is
    /// decided by [`Config::unpowered_arm`].
    pub fn arm(&self) -> Result<(), RfcError> {
        if !self.power.rf_ready() {
            match self.config.unpowered_arm {
                PreconditionPolicy::Panic => {
                    panic!("rfc: CPE interrupts armed with the RF core unpowered")
                }
                PreconditionPolicy::Error => {
                    warn!("rfc: CPE interrupts armed with the RF core unpowered");
                    return Err(RfcError::NotPowered);
                }
            }
        }

        critical_section::with(|_| {
            self.regs.set_cpe_vector_select(CPE1_SOURCES);
            self.regs
                .set_cpe_interrupt_enable(CPE0_SOURCES | CPE1_SOURCES);

            self.cpe0.clear_pending();
            self.cpe1.clear_pending();
            self.cpe0.enable();
            self.cpe1.enable();
        });
        debug!("rfc: CPE interrupts armed");
        Ok(())
    }

    /// Clears and masks every CPE event, drops both clients and disables
    /// both lines.
    pub fn disarm(&self) {
        critical_section::with(|_| {
            self.regs.clear_cpe_interrupt_flags(u32::MAX);
            self.regs.set_cpe_interrupt_enable(0);
            self.regs.set_cpe_vector_select(0);

            for client in self.clients.iter() {
                client.set(None);
            }

            self.cpe0.clear_pending();
            self.cpe1.clear_pending();
            self.cpe0.disable();
            self.cpe1.disable();
        });
        debug!("rfc: CPE interrupts disarmed");
    }

    /// Entry point for the CPE0 and CPE1 interrupt handlers.
    pub fn handle_interrupt(&self, source: RfcInterrupt) {
        let flags = self.regs.cpe_interrupt_flags() & source.sources();
        if flags == 0 {
            return;
        }
        self.regs.clear_cpe_interrupt_flags(flags);

        match self.clients[source.index()].get() {
            Some(client) => client.interrupt(source, flags),
            None => debug!("rfc: {:?} flags {:#010x} with no client", source, flags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollBudget;
    use crate::radio::sim::{test_config, Event, SimLine, SimRfc};

    struct Recorder {
        calls: Cell<Option<(RfcInterrupt, u32)>>,
    }

    impl RfcInterruptClient for Recorder {
        fn interrupt(&self, source: RfcInterrupt, flags: u32) {
            self.calls.set(Some((source, flags)));
        }
    }

    fn policy(unpowered_arm: PreconditionPolicy) -> Config {
        Config {
            unpowered_arm,
            poll_budget: PollBudget::Attempts(4),
            ..test_config()
        }
    }

    #[test]
    fn arm_routes_errors_to_cpe1() {
        let sim = SimRfc::powered();
        let (cpe0, cpe1) = (SimLine::new(&sim, 9), SimLine::new(&sim, 2));
        let gateway = InterruptGateway::new(&sim, &sim, &cpe0, &cpe1, test_config());

        assert_eq!(gateway.arm(), Ok(()));
        assert_eq!(
            sim.cpe_routing(),
            (
                CPE_INTERNAL_ERROR,
                CPE_LAST_COMMAND_DONE | CPE_LAST_FG_COMMAND_DONE | CPE_INTERNAL_ERROR
            )
        );
        assert!(cpe0.enabled.get() && cpe1.enabled.get());
        // Pending state is cleared before the lines are enabled.
        assert!(
            sim.position(Event::LineClearPending(9)).unwrap()
                < sim.position(Event::LineEnable(9)).unwrap()
        );
        assert!(
            sim.position(Event::LineClearPending(2)).unwrap()
                < sim.position(Event::LineEnable(2)).unwrap()
        );
    }

    #[test]
    fn unpowered_arm_is_an_error() {
        let sim = SimRfc::new();
        let (cpe0, cpe1) = (SimLine::new(&sim, 9), SimLine::new(&sim, 2));
        let gateway = InterruptGateway::new(
            &sim,
            &sim,
            &cpe0,
            &cpe1,
            policy(PreconditionPolicy::Error),
        );

        assert_eq!(gateway.arm(), Err(RfcError::NotPowered));
        assert!(sim.events().is_empty());
    }

    #[test]
    #[should_panic(expected = "unpowered")]
    fn unpowered_arm_can_panic() {
        let sim = SimRfc::new();
        let (cpe0, cpe1) = (SimLine::new(&sim, 9), SimLine::new(&sim, 2));
        let gateway = InterruptGateway::new(
            &sim,
            &sim,
            &cpe0,
            &cpe1,
            policy(PreconditionPolicy::Panic),
        );

        let _ = gateway.arm();
    }

    #[test]
    fn disarm_clears_everything() {
        let sim = SimRfc::powered();
        let (cpe0, cpe1) = (SimLine::new(&sim, 9), SimLine::new(&sim, 2));
        let gateway = InterruptGateway::new(&sim, &sim, &cpe0, &cpe1, test_config());
        let recorder = Recorder {
            calls: Cell::new(None),
        };
        gateway.set_client(RfcInterrupt::Cpe0, &recorder);
        gateway.arm().unwrap();
        sim.cpe_ifg.set(CPE_LAST_COMMAND_DONE);

        gateway.disarm();
        assert_eq!(sim.cpe_routing(), (0, 0));
        assert_eq!(sim.cpe_ifg.get(), 0);
        assert!(!cpe0.enabled.get() && !cpe1.enabled.get());

        // The client is gone after disarming.
        sim.cpe_ifg.set(CPE_LAST_COMMAND_DONE);
        gateway.handle_interrupt(RfcInterrupt::Cpe0);
        assert_eq!(recorder.calls.get(), None);
    }

    #[test]
    fn dispatch_by_source() {
        let sim = SimRfc::powered();
        let (cpe0, cpe1) = (SimLine::new(&sim, 9), SimLine::new(&sim, 2));
        let gateway = InterruptGateway::new(&sim, &sim, &cpe0, &cpe1, test_config());
        let done = Recorder {
            calls: Cell::new(None),
        };
        let errors = Recorder {
            calls: Cell::new(None),
        };
        gateway.set_client(RfcInterrupt::Cpe0, &done);
        gateway.set_client(RfcInterrupt::Cpe1, &errors);
        gateway.arm().unwrap();

        sim.cpe_ifg
            .set(CPE_LAST_COMMAND_DONE | CPE_INTERNAL_ERROR);
        gateway.handle_interrupt(RfcInterrupt::Cpe1);
        assert_eq!(
            errors.calls.get(),
            Some((RfcInterrupt::Cpe1, CPE_INTERNAL_ERROR))
        );
        assert_eq!(done.calls.get(), None);
        assert_eq!(sim.cpe_ifg.get(), CPE_LAST_COMMAND_DONE);

        gateway.handle_interrupt(RfcInterrupt::Cpe0);
        assert_eq!(
            done.calls.get(),
            Some((RfcInterrupt::Cpe0, CPE_LAST_COMMAND_DONE))
        );
        assert_eq!(sim.cpe_ifg.get(), 0);
    }
}
