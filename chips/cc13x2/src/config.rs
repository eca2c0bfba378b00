// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Typed configuration of the RF core drivers.
//!
//! Compile-time defaults live in [`CONFIG`]. The Cargo features of this
//! crate are only read here. Boards that need other values pass their own
//! [`Config`] to the driver constructors.

/// Upper bound on how often a status bit is polled before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollBudget {
    /// Poll until the bit flips, however long that takes.
    Unbounded,
    /// Poll at most this many times.
    Attempts(u32),
}

/// What to do between two polls of a status bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    /// Poll again immediately.
    None,
    /// Spin for 1, 2, 4, ... iterations between polls, capped at
    /// `max_spins`.
    Exponential { max_spins: u32 },
}

/// Reaction to a violated precondition that indicates a driver bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreconditionPolicy {
    /// Panic.
    Panic,
    /// Return an error to the caller.
    Error,
}

/// Configuration options of the RF core drivers.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Budget of every busy-wait on an RF core, PRCM or oscillator status bit.
    pub poll_budget: PollBudget,

    /// Delay between two polls of the same status bit.
    pub backoff: Backoff,

    /// What arming the CPE interrupts does when the RF power domain is not
    /// ready.
    pub unpowered_arm: PreconditionPolicy,

    /// Whether the HF clock has to be moved to XOSC_HF before the RF core
    /// is powered, and back to RCOSC_HF after. True on every CC13x2 part.
    pub switch_hf_clock: bool,
}

/// Defaults used unless a board passes its own [`Config`].
pub const CONFIG: Config = Config {
    poll_budget: PollBudget::Attempts(50_000),
    backoff: Backoff::Exponential { max_spins: 64 },
    unpowered_arm: if cfg!(feature = "strict_preconditions") {
        PreconditionPolicy::Panic
    } else {
        PreconditionPolicy::Error
    },
    switch_hf_clock: true,
};

impl Default for Config {
    fn default() -> Self {
        CONFIG
    }
}
