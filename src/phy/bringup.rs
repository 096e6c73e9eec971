//! PHY bring-up state machine
//!
//! ```text
//! Idle -> ResetIssued -> ResetPolling -> ConfigWritten -> LinkPolling -> LinkUp
//!                              \                                \
//!                               +-> Failed(ResetTimeout)          +-> Failed(LinkTimeout)
//! ```
//!
//! The PHY is reset, forced to 100 Mb/s full duplex with auto-negotiation
//! off, its interrupt output enabled, and then polled until the link comes
//! up. Both waits are bounded by retry counts from [`PhyConfig`].

use embedded_hal::delay::DelayNs;

use crate::driver::config::PhyConfig;
use crate::driver::error::{PhyError, PhyResult};
use crate::hal::mii::MiiBus;
use crate::internal::phy_regs::{bmcr, bmsr, micr, phy_reg};

/// Bring-up progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyState {
    /// Nothing sent yet
    #[default]
    Idle,
    /// Reset command written
    ResetIssued,
    /// Waiting for the reset bit to clear
    ResetPolling,
    /// Interrupt enable and duplex/speed written
    ConfigWritten,
    /// Waiting for link
    LinkPolling,
    /// Link is up
    LinkUp,
    /// Bring-up gave up
    Failed(PhyError),
}

impl PhyState {
    /// No further transitions happen from this state
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::LinkUp | Self::Failed(_))
    }
}

/// Drives one PHY from reset to link-up.
#[derive(Debug)]
pub struct PhyBringup<M, D> {
    mii: M,
    delay: D,
    config: PhyConfig,
    state: PhyState,
    reset_polls: u32,
    link_polls: u32,
    link_status: u16,
}

impl<M: MiiBus, D: DelayNs> PhyBringup<M, D> {
    /// Start in [`PhyState::Idle`]
    pub fn new(mii: M, delay: D, config: PhyConfig) -> Self {
        Self {
            mii,
            delay,
            config,
            state: PhyState::Idle,
            reset_polls: 0,
            link_polls: 0,
            link_status: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> PhyState {
        self.state
    }

    /// Status reads spent waiting for reset
    pub fn reset_polls(&self) -> u32 {
        self.reset_polls
    }

    /// Link-status polls spent so far
    pub fn link_polls(&self) -> u32 {
        self.link_polls
    }

    /// Last BMSR value read while polling for link
    pub fn link_status(&self) -> u16 {
        self.link_status
    }

    /// Give back the bus and delay
    pub fn into_inner(self) -> (M, D) {
        (self.mii, self.delay)
    }

    /// Perform one transition and return the new state.
    ///
    /// Terminal states are returned unchanged.
    pub fn step(&mut self) -> PhyState {
        self.state = match self.state {
            PhyState::Idle => {
                self.mii.write(phy_reg::BMCR, bmcr::RESET);
                PhyState::ResetIssued
            }
            PhyState::ResetIssued => {
                // First read after reset goes out with a preamble
                self.mii.set_preamble(true);
                let state = self.poll_reset();
                self.mii.set_preamble(false);
                state
            }
            PhyState::ResetPolling => self.poll_reset(),
            PhyState::ConfigWritten => PhyState::LinkPolling,
            PhyState::LinkPolling => self.poll_link(),
            state @ (PhyState::LinkUp | PhyState::Failed(_)) => state,
        };
        self.state
    }

    /// Step until a terminal state; returns the BMSR value at link-up
    pub fn run(&mut self) -> PhyResult<u16> {
        while !self.state.is_terminal() {
            self.step();
        }
        match self.state {
            PhyState::Failed(err) => Err(err),
            _ => Ok(self.link_status),
        }
    }

    fn poll_reset(&mut self) -> PhyState {
        let value = self.mii.read(phy_reg::BMCR);
        self.reset_polls += 1;

        if value & bmcr::RESET == 0 {
            debug!("PHY reset done after {} reads", self.reset_polls);
            self.write_config();
            return PhyState::ConfigWritten;
        }
        if self.reset_polls >= self.config.reset_retries {
            error!("PHY reset failed");
            return PhyState::Failed(PhyError::ResetTimeout);
        }
        PhyState::ResetPolling
    }

    fn write_config(&mut self) {
        let micr_value = self.mii.read(phy_reg::MICR) | micr::INTEN;
        self.mii.write(phy_reg::MICR, micr_value);
        self.mii.write(phy_reg::BMCR, bmcr::DUPLEX_FULL | bmcr::SPEED_100);
    }

    fn poll_link(&mut self) -> PhyState {
        if self.config.link_poll_delay_us > 0 {
            self.delay.delay_us(self.config.link_poll_delay_us);
        }
        self.link_status = self.mii.read(phy_reg::BMSR);
        self.link_polls += 1;

        if self.link_status & bmsr::LINK_STATUS != 0 {
            info!("PHY link up, status {:#x}", self.link_status);
            return PhyState::LinkUp;
        }
        if self.link_polls >= self.config.link_retries {
            error!("PHY duplex/speed setup failed, status {:#x}", self.link_status);
            return PhyState::Failed(PhyError::LinkTimeout);
        }
        PhyState::LinkPolling
    }
}

// =============================================================================
// Tests
// =============================================================================
