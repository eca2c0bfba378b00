// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

use core::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioState {
    Idle,
    /// Powered up and answered the liveness ping.
    Active,
}

/// Whether commands may be submitted to the RF core.
///
/// Anyone holding a reference can read it. Only the power sequencer in the
/// parent module can change it.
pub struct CoreState {
    state: Cell<RadioState>,
}

impl CoreState {
    pub const fn new() -> CoreState {
        CoreState {
            state: Cell::new(RadioState::Idle),
        }
    }

    pub fn get(&self) -> RadioState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == RadioState::Active
    }

    pub(super) fn set(&self, state: RadioState) {
        self.state.set(state);
    }
}

impl Default for CoreState {
    fn default() -> Self {
        CoreState::new()
    }
}
