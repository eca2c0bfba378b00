// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Simulated RF core registers for unit tests.
//!
//! [`SimRfc`] implements every [`crate::hil`] trait on plain cells and
//! records each write in one event log, so tests can check both call counts
//! and the order of accesses across peripherals. By default it behaves like
//! a healthy chip: the power domain follows its request, clock loads finish
//! at once, CMDR drains immediately and every command is acknowledged with
//! CMDSTA `Done`.

use core::cell::{Cell, RefCell};

use crate::config::{Backoff, Config, PollBudget};
use crate::errorcode::{RfcError, WaitPoint};
use crate::hil::{
    AddressSource, DomainStatus, DoorbellRegisters, HfClockControl, HfSource, InterruptLine,
    RfcPowerControl,
};
use crate::radio::commands::{Continuation, RadioOp, RadioOpStatus};
use crate::radio::doorbell::DoorbellTransport;
use crate::radio::executor::CommandExecutor;
use crate::radio::interrupts::InterruptGateway;
use crate::radio::power::{CoreState, PowerSequencer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Command(u32),
    ClearAck,
    VectorSelect(u32),
    CpeEnable(u32),
    ClearFlags(u32),
    DomainPower(bool),
    DomainClock(bool),
    ClockLoad,
    CoreClocks,
    BootParameters(u32),
    RtcUpdate,
    RequestHf(HfSource),
    SwitchHf,
    LineEnable(u32),
    LineDisable(u32),
    LineClearPending(u32),
}

/// Small poll budget so stuck hardware fails fast.
pub(crate) fn test_config() -> Config {
    Config {
        poll_budget: PollBudget::Attempts(16),
        backoff: Backoff::None,
        ..crate::config::CONFIG
    }
}

pub(crate) struct SimRfc {
    events: RefCell<Vec<Event>>,

    // Doorbell
    cmdr: Cell<u32>,
    /// Reads of CMDR that still return the previous command.
    pub busy_reads: Cell<u32>,
    /// Set if CMDR was written while it still read non-zero.
    pub wrote_while_busy: Cell<bool>,
    ack: Cell<bool>,
    /// Whether the RF core acknowledges commands at all.
    pub responsive: Cell<bool>,
    /// CMDSTA written back for the next commands.
    pub reply: Cell<u32>,
    cmdsta: Cell<u32>,
    cpe_isl: Cell<u32>,
    cpe_ien: Cell<u32>,
    pub cpe_ifg: Cell<u32>,

    // Power
    domain_on: Cell<bool>,
    /// The domain ignores power requests.
    pub domain_stuck: Cell<bool>,
    clock_enabled: Cell<bool>,
    clock_loaded: Cell<bool>,
    load_done: Cell<bool>,
    /// Clock loads never complete.
    pub load_stuck: Cell<bool>,
    core_clocks: Cell<bool>,

    // Oscillator
    hf_source: Cell<HfSource>,
    hf_requested: Cell<HfSource>,
    /// Whether the requested HF source ever becomes ready.
    pub hf_ready: Cell<bool>,
    /// The AUX semaphore is held elsewhere, so oscillator writes fail.
    pub aux_semaphore_taken: Cell<bool>,
    /// The switch is started but the source never changes.
    pub hf_switch_stuck: Cell<bool>,

    /// Radio operations the RF core "runs" when their address is written
    /// to CMDR.
    completions: RefCell<Vec<(u32, *const RadioOp)>>,
    completion: Cell<RadioOpStatus>,

    // Addresses
    pub primary: Cell<[u32; 2]>,
    pub secondary: Cell<[u32; 2]>,
}

impl SimRfc {
    pub fn new() -> SimRfc {
        SimRfc {
            events: RefCell::new(Vec::new()),
            cmdr: Cell::new(0),
            busy_reads: Cell::new(0),
            wrote_while_busy: Cell::new(false),
            ack: Cell::new(false),
            responsive: Cell::new(true),
            reply: Cell::new(0x01),
            cmdsta: Cell::new(0),
            cpe_isl: Cell::new(0),
            cpe_ien: Cell::new(0),
            cpe_ifg: Cell::new(0),
            domain_on: Cell::new(false),
            domain_stuck: Cell::new(false),
            clock_enabled: Cell::new(false),
            clock_loaded: Cell::new(false),
            load_done: Cell::new(false),
            load_stuck: Cell::new(false),
            core_clocks: Cell::new(false),
            hf_source: Cell::new(HfSource::RcOsc),
            hf_requested: Cell::new(HfSource::RcOsc),
            hf_ready: Cell::new(true),
            aux_semaphore_taken: Cell::new(false),
            hf_switch_stuck: Cell::new(false),
            completions: RefCell::new(Vec::new()),
            completion: Cell::new(RadioOpStatus::DONE_OK),
            primary: Cell::new([0xFFFF_FFFF; 2]),
            secondary: Cell::new([0xFFFF_FFFF; 2]),
        }
    }

    /// A chip whose RF domain already reports on and clocked.
    pub fn powered() -> SimRfc {
        let sim = SimRfc::new();
        sim.domain_on.set(true);
        sim.clock_enabled.set(true);
        sim.clock_loaded.set(true);
        sim
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn count(&self, event: Event) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    /// Commands written to CMDR, in order.
    pub fn commands(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Command(word) => Some(*word),
                _ => None,
            })
            .collect()
    }

    /// Index of the first occurrence of `event` in the log.
    pub fn position(&self, event: Event) -> Option<usize> {
        self.events.borrow().iter().position(|e| *e == event)
    }

    pub fn cpe_routing(&self) -> (u32, u32) {
        (self.cpe_isl.get(), self.cpe_ien.get())
    }

    pub fn core_clocks_on(&self) -> bool {
        self.core_clocks.get()
    }

    pub fn set_hf_source(&self, source: HfSource) {
        self.hf_source.set(source);
        self.hf_requested.set(source);
    }

    /// Makes a pointer submission of `op` finish at once with `status`.
    /// `op` must outlive the simulator.
    pub fn complete_on_submit(&self, op: &RadioOp, status: RadioOpStatus) {
        let ptr: *const RadioOp = op;
        self.completions.borrow_mut().push((ptr as usize as u32, ptr));
        self.completion.set(status);
    }

    /// Status written by later completions.
    pub fn set_completion(&self, status: RadioOpStatus) {
        self.completion.set(status);
    }

    fn log(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl DoorbellRegisters for SimRfc {
    fn command(&self) -> u32 {
        let busy = self.busy_reads.get();
        if busy > 0 {
            self.busy_reads.set(busy - 1);
            return self.cmdr.get().max(1);
        }
        self.cmdr.set(0);
        0
    }

    fn set_command(&self, word: u32) {
        if self.busy_reads.get() > 0 {
            self.wrote_while_busy.set(true);
        }
        self.log(Event::Command(word));
        self.cmdr.set(word);
        if self.responsive.get() {
            self.cmdsta.set(self.reply.get());
            self.ack.set(true);
            self.run_submitted(word);
        }
    }

    fn command_status(&self) -> u32 {
        self.cmdsta.get()
    }

    fn is_acknowledged(&self) -> bool {
        self.ack.get()
    }

    fn clear_acknowledge(&self) {
        self.log(Event::ClearAck);
        self.ack.set(false);
    }

    fn set_cpe_vector_select(&self, mask: u32) {
        self.log(Event::VectorSelect(mask));
        self.cpe_isl.set(mask);
    }

    fn set_cpe_interrupt_enable(&self, mask: u32) {
        self.log(Event::CpeEnable(mask));
        self.cpe_ien.set(mask);
    }

    fn cpe_interrupt_flags(&self) -> u32 {
        self.cpe_ifg.get()
    }

    fn clear_cpe_interrupt_flags(&self, mask: u32) {
        self.log(Event::ClearFlags(mask));
        self.cpe_ifg.set(self.cpe_ifg.get() & !mask);
    }
}

impl SimRfc {
    fn run_submitted(&self, word: u32) {
        for (address, op) in self.completions.borrow().iter() {
            if *address == word {
                unsafe { &**op }.set_status(self.completion.get());
            }
        }
    }
}

impl RfcPowerControl for SimRfc {
    fn set_domain_power(&self, on: bool) {
        self.log(Event::DomainPower(on));
        if !self.domain_stuck.get() {
            self.domain_on.set(on);
            // PWMCLKEN lives in the RF domain.
            if !on {
                self.core_clocks.set(false);
            }
        }
    }

    fn domain_status(&self) -> DomainStatus {
        if self.domain_on.get() {
            DomainStatus::On
        } else {
            DomainStatus::Off
        }
    }

    fn set_domain_clock(&self, enabled: bool) {
        self.log(Event::DomainClock(enabled));
        self.clock_enabled.set(enabled);
        self.load_done.set(false);
    }

    fn request_clock_load(&self) {
        self.log(Event::ClockLoad);
        if !self.load_stuck.get() {
            self.clock_loaded.set(self.clock_enabled.get());
            self.load_done.set(true);
        }
    }

    fn clock_load_done(&self) -> bool {
        self.load_done.get()
    }

    fn rf_ready(&self) -> bool {
        self.domain_on.get() && self.clock_loaded.get()
    }

    fn enable_core_clocks(&self) {
        self.log(Event::CoreClocks);
        self.core_clocks.set(true);
    }

    fn set_boot_parameters(&self, bits: u32) {
        self.log(Event::BootParameters(bits));
    }

    fn enable_rtc_update(&self) {
        self.log(Event::RtcUpdate);
    }
}

impl SimRfc {
    fn claim_aux_semaphore(&self) -> Result<(), RfcError> {
        if self.aux_semaphore_taken.get() {
            return Err(RfcError::HardwareTimeout(WaitPoint::AuxSemaphore));
        }
        Ok(())
    }
}

impl HfClockControl for SimRfc {
    fn hf_source(&self) -> HfSource {
        self.hf_source.get()
    }

    fn request_hf_source(&self, source: HfSource) -> Result<(), RfcError> {
        self.claim_aux_semaphore()?;
        self.log(Event::RequestHf(source));
        self.hf_requested.set(source);
        Ok(())
    }

    fn hf_source_ready(&self) -> bool {
        self.hf_ready.get()
    }

    fn switch_hf_source(&self) -> Result<(), RfcError> {
        self.claim_aux_semaphore()?;
        self.log(Event::SwitchHf);
        if !self.hf_switch_stuck.get() {
            self.hf_source.set(self.hf_requested.get());
        }
        Ok(())
    }
}

impl AddressSource for SimRfc {
    fn primary_mac(&self) -> [u32; 2] {
        self.primary.get()
    }

    fn secondary_mac(&self) -> [u32; 2] {
        self.secondary.get()
    }
}

/// One NVIC line, logging into the event log of its [`SimRfc`].
pub(crate) struct SimLine<'a> {
    irq: u32,
    sim: &'a SimRfc,
    pub enabled: Cell<bool>,
}

impl<'a> SimLine<'a> {
    pub fn new(sim: &'a SimRfc, irq: u32) -> SimLine<'a> {
        SimLine {
            irq,
            sim,
            enabled: Cell::new(false),
        }
    }
}

impl InterruptLine for SimLine<'_> {
    fn enable(&self) {
        self.sim.log(Event::LineEnable(self.irq));
        self.enabled.set(true);
    }

    fn disable(&self) {
        self.sim.log(Event::LineDisable(self.irq));
        self.enabled.set(false);
    }

    fn clear_pending(&self) {
        self.sim.log(Event::LineClearPending(self.irq));
    }
}

pub(crate) type SimGateway<'a> = InterruptGateway<'a, SimRfc, SimRfc, SimLine<'a>>;
pub(crate) type SimSequencer<'a> = PowerSequencer<'a, SimRfc, SimRfc, SimRfc, SimLine<'a>>;

/// The driver stack wired to one [`SimRfc`]. The parts are leaked so they
/// can borrow each other.
pub(crate) struct Rig<'a> {
    pub state: &'a CoreState,
    pub cpe0: &'a SimLine<'a>,
    pub cpe1: &'a SimLine<'a>,
    pub executor: &'a CommandExecutor<'a, SimRfc>,
    pub gateway: &'a SimGateway<'a>,
    pub sequencer: &'a SimSequencer<'a>,
}

impl<'a> Rig<'a> {
    pub fn new(sim: &'a SimRfc) -> Rig<'a> {
        Rig::with_config(sim, test_config())
    }

    pub fn with_config(sim: &'a SimRfc, config: Config) -> Rig<'a> {
        let state: &'a CoreState = Box::leak(Box::new(CoreState::new()));
        let cpe0: &'a SimLine<'a> = Box::leak(Box::new(SimLine::new(sim, 9)));
        let cpe1: &'a SimLine<'a> = Box::leak(Box::new(SimLine::new(sim, 2)));
        let executor: &'a CommandExecutor<'a, SimRfc> = Box::leak(Box::new(
            CommandExecutor::new(DoorbellTransport::new(sim, state, config)),
        ));
        let gateway: &'a SimGateway<'a> = Box::leak(Box::new(InterruptGateway::new(
            sim, sim, cpe0, cpe1, config,
        )));
        let sequencer: &'a SimSequencer<'a> = Box::leak(Box::new(PowerSequencer::new(
            sim, sim, gateway, executor, state, config,
        )));
        Rig {
            state,
            cpe0,
            cpe1,
            executor,
            gateway,
            sequencer,
        }
    }

    /// Brings the simulated core up and checks it answered the ping.
    pub fn power_on(&self) {
        assert_eq!(self.sequencer.power_on(), Ok(0x01));
    }
}

/// Runs a chain the way the RF core does, taking the status of each
/// operation from `outcome`. Returns the start time of every operation
/// visited, which tests use as a tag.
pub(crate) fn run_chain<F>(head: &RadioOp, mut outcome: F) -> Vec<u32>
where
    F: FnMut(&RadioOp) -> RadioOpStatus,
{
    let mut visited = Vec::new();
    let mut current = Some(head);
    // Skip(0) loops forever on hardware.
    while let Some(op) = current.filter(|_| visited.len() < 64) {
        visited.push(op.start_time());
        let status = outcome(op);
        op.set_status(status);
        let Some(result) = status.result() else {
            break;
        };
        let Ok(condition) = op.condition() else {
            op.set_status(RadioOpStatus::ERROR_CONDITION);
            break;
        };
        current = match condition.continuation(result) {
            Continuation::Stop => None,
            Continuation::Next => hop(op, 1),
            Continuation::Skip(n) => hop(op, n),
        };
    }
    visited
}

fn hop(op: &RadioOp, count: u8) -> Option<&RadioOp> {
    let mut cursor = op;
    for _ in 0..count {
        cursor = unsafe { cursor.next_op()?.as_ref() };
    }
    Some(cursor)
}
