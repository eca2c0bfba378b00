// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! IEEE 802.15.4 MAC address words in the factory (FCFG1) and customer
//! (CCFG) configuration areas.

use tock_registers::interfaces::Readable;
use tock_registers::register_structs;
use tock_registers::registers::ReadOnly;

use crate::hil::AddressSource;
use crate::static_ref::StaticRef;

register_structs! {
    pub Fcfg1Registers {
        (0x000 => _reserved0),
        (0x2F0 => mac_15_4_0: ReadOnly<u32>),
        (0x2F4 => mac_15_4_1: ReadOnly<u32>),
        (0x2F8 => @END),
    }
}

register_structs! {
    pub CcfgRegisters {
        (0x000 => _reserved0),
        (0xFC8 => ieee_mac_0: ReadOnly<u32>),
        (0xFCC => ieee_mac_1: ReadOnly<u32>),
        (0xFD0 => @END),
    }
}

pub const FCFG1_BASE: StaticRef<Fcfg1Registers> =
    unsafe { StaticRef::new(0x5000_1000 as *const Fcfg1Registers) };
pub const CCFG_BASE: StaticRef<CcfgRegisters> =
    unsafe { StaticRef::new(0x5000_3000 as *const CcfgRegisters) };

pub struct FactoryConfig {
    fcfg1: StaticRef<Fcfg1Registers>,
    ccfg: StaticRef<CcfgRegisters>,
}

impl FactoryConfig {
    pub const fn new(
        fcfg1: StaticRef<Fcfg1Registers>,
        ccfg: StaticRef<CcfgRegisters>,
    ) -> FactoryConfig {
        FactoryConfig { fcfg1, ccfg }
    }
}

impl AddressSource for FactoryConfig {
    fn primary_mac(&self) -> [u32; 2] {
        [self.fcfg1.mac_15_4_0.get(), self.fcfg1.mac_15_4_1.get()]
    }

    fn secondary_mac(&self) -> [u32; 2] {
        [self.ccfg.ieee_mac_0.get(), self.ccfg.ieee_mac_1.get()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::device::{long_address, short_address};
    use crate::static_ref::TestRegisters;
    use core::ptr::addr_of_mut;

    #[test]
    fn layout() {
        assert_eq!(core::mem::size_of::<Fcfg1Registers>(), 0x2F8);
        assert_eq!(core::mem::size_of::<CcfgRegisters>(), 0xFD0);
    }

    #[test]
    fn customer_address_overrides_factory() {
        let fcfg1 = TestRegisters::<Fcfg1Registers>::zeroed();
        let ccfg = TestRegisters::<CcfgRegisters>::zeroed();
        let config = FactoryConfig::new(fcfg1.base(), ccfg.base());
        let set_ccfg = |mac: [u32; 2]| {
            ccfg.poke(|regs| unsafe { addr_of_mut!((*regs).ieee_mac_0) }, mac[0]);
            ccfg.poke(|regs| unsafe { addr_of_mut!((*regs).ieee_mac_1) }, mac[1]);
        };

        fcfg1.poke(|regs| unsafe { addr_of_mut!((*regs).mac_15_4_0) }, 0x1122_3344);
        fcfg1.poke(|regs| unsafe { addr_of_mut!((*regs).mac_15_4_1) }, 0x5566_7788);
        set_ccfg([u32::MAX; 2]);
        assert_eq!(config.primary_mac(), [0x1122_3344, 0x5566_7788]);
        assert_eq!(long_address(&config), 0x1122_3344_5566_7788);
        assert_eq!(short_address(&config), 0x4433);

        set_ccfg([0x0000_BEEF, 0x0000_0001]);
        assert_eq!(config.secondary_mac(), [0x0000_BEEF, 0x0000_0001]);
        assert_eq!(long_address(&config), 0x0000_BEEF_0000_0001);
        assert_eq!(short_address(&config), 0xEFBE);
    }
}
