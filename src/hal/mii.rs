//! MII management interface
//!
//! The core drives the PHY management bus through five registers: an
//! address register selecting PHY and register, a data register per
//! direction, a command register and a busy flag. Every transaction is
//! wait-for-idle, pulse a command bit, wait-for-idle, drop the command bit.

use crate::internal::register::{Field, Mmio};
use crate::internal::register::ethoc::{
    miiaddress, miicommand, miimoder, miirx_data, miistatus, miitx_data,
};

// =============================================================================
// MII Bus Trait
// =============================================================================

/// Register access to the PHY attached to the MAC.
///
/// Implemented by [`MiiController`] for the real core and by test doubles
/// for the bring-up state machine.
pub trait MiiBus {
    /// Read a PHY register
    fn read(&mut self, reg: u8) -> u16;

    /// Write a PHY register
    fn write(&mut self, reg: u8, value: u16);

    /// Enable or disable the management frame preamble
    fn set_preamble(&mut self, _enabled: bool) {}
}

impl<T: MiiBus + ?Sized> MiiBus for &mut T {
    fn read(&mut self, reg: u8) -> u16 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: u8, value: u16) {
        (**self).write(reg, value);
    }

    fn set_preamble(&mut self, enabled: bool) {
        (**self).set_preamble(enabled);
    }
}

// =============================================================================
// MII Controller
// =============================================================================

/// Management interface of one ethoc core.
///
/// The busy-waits have no timeout; bring-up bounds total time through its
/// own retry counters.
#[derive(Debug, Clone, Copy)]
pub struct MiiController {
    regs: Mmio,
}

impl MiiController {
    /// Controller over the given register block
    pub const fn new(regs: Mmio) -> Self {
        Self { regs }
    }

    /// Program the MDC clock divider, leaving preamble suppression untouched
    pub fn set_clock_divider(&mut self, divider: u8) {
        self.regs.write_field(miimoder::OFFSET, miimoder::CLKDIV, u32::from(divider));
    }

    /// Select the PHY all following transactions address
    pub fn set_phy_address(&mut self, addr: u8) {
        self.regs.write_field(miiaddress::OFFSET, miiaddress::FIAD, u32::from(addr));
    }

    /// Select the PHY register for the next transaction
    pub fn select(&mut self, reg: u8) {
        self.regs.write_field(miiaddress::OFFSET, miiaddress::RGAD, u32::from(reg));
    }

    /// Data latched by the last read transaction
    pub fn read_data(&self) -> u16 {
        self.regs.read_field(miirx_data::OFFSET, miirx_data::PRSD) as u16
    }

    /// Load data for the next write transaction
    pub fn write_data(&mut self, value: u16) {
        self.regs.write_field(miitx_data::OFFSET, miitx_data::CTRLDATA, u32::from(value));
    }

    /// A transaction is in flight
    pub fn is_busy(&self) -> bool {
        self.regs.read_field(miistatus::OFFSET, miistatus::BUSY) != 0
    }

    fn wait_idle(&self) {
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }

    fn transaction(&mut self, command: Field) {
        self.wait_idle();
        self.regs.write_field(miicommand::OFFSET, command, 1);
        self.wait_idle();
        self.regs.write_field(miicommand::OFFSET, command, 0);
    }

    /// Run a read transaction on the selected register
    pub fn read_transaction(&mut self) {
        self.transaction(miicommand::RSTAT);
    }

    /// Run a write transaction on the selected register
    pub fn write_transaction(&mut self) {
        self.transaction(miicommand::WCTRLDATA);
    }
}

impl MiiBus for MiiController {
    fn read(&mut self, reg: u8) -> u16 {
        self.select(reg);
        self.read_transaction();
        self.read_data()
    }

    fn write(&mut self, reg: u8, value: u16) {
        self.select(reg);
        self.write_data(value);
        self.write_transaction();
    }

    fn set_preamble(&mut self, enabled: bool) {
        self.regs.write_field(miimoder::OFFSET, miimoder::MIINOPRE, u32::from(!enabled));
    }
}

// =============================================================================
// Tests
// =============================================================================
