//! MiG-V board configuration.
//!
//! The core sits next to 256 KiB of SRAM that the platform declares as an
//! `opencores,ethoc` I/O memory window. With the default 64 + 64 rings the
//! pool fills that window exactly, so the driver maps it instead of asking
//! for RAM. Frames get their CRC per descriptor, and the PHY needs time
//! between link polls.

use crate::driver::config::{BoardPolicy, CrcPolicy, EthocConfig, PhyConfig, TxCompletion};
use crate::internal::constants::{LINK_POLL_DELAY_US, SLOT_SIZE, SLOW_LINK_RETRIES};

/// MiG-V board configuration constants and helpers.
pub struct Migv;

impl Migv {
    /// PHY address on the management bus.
    pub const PHY_ADDR: u8 = 0;

    /// Size of the SRAM window next to the core.
    pub const DMA_WINDOW_SIZE: usize = 0x40000;

    /// Ring depths that fill the SRAM window.
    pub const RING_DEPTH: usize = Self::DMA_WINDOW_SIZE / SLOT_SIZE / 2;

    /// Board name.
    pub const BOARD_NAME: &'static str = "MiG-V";

    /// Per-frame CRC, TX and RX interrupts.
    pub const POLICY: BoardPolicy = BoardPolicy::new(CrcPolicy::PerFrame, TxCompletion::Interrupt);

    /// PHY bring-up bounds: 100 link polls, 100 ms apart.
    pub const PHY: PhyConfig = PhyConfig::new()
        .with_link_retries(SLOW_LINK_RETRIES)
        .with_link_poll_delay_us(LINK_POLL_DELAY_US);

    /// Driver configuration for this board.
    #[must_use]
    pub const fn config() -> EthocConfig {
        EthocConfig::new()
            .with_phy_address(Self::PHY_ADDR)
            .with_phy(Self::PHY)
            .with_policy(Self::POLICY)
    }

    /// [`config`](Self::config) with a custom MAC address.
    #[must_use]
    pub const fn config_with_mac(mac: [u8; 6]) -> EthocConfig {
        Self::config().with_mac_address(mac)
    }
}
