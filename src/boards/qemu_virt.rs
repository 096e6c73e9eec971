//! QEMU board configuration.
//!
//! QEMU's ethoc model has no SRAM window, so the pool always comes from the
//! platform allocator. The model also appends the frame CRC itself, and TX
//! completion is picked up by polling the ring instead of an interrupt.

use crate::driver::config::{BoardPolicy, CrcPolicy, EthocConfig, PhyConfig, TxCompletion};
use crate::internal::constants::DEFAULT_LINK_RETRIES;

/// QEMU board configuration constants and helpers.
pub struct QemuVirt;

impl QemuVirt {
    /// Register block base address.
    pub const MMIO_BASE: usize = 0x0060_0000;

    /// Interrupt line of the MAC.
    pub const IRQ: u32 = 22;

    /// PHY address on the management bus.
    pub const PHY_ADDR: u8 = 1;

    /// Board name.
    pub const BOARD_NAME: &'static str = "QEMU";

    /// CRC added by the MAC model, TX completion polled.
    pub const POLICY: BoardPolicy = BoardPolicy::new(CrcPolicy::None, TxCompletion::Polled);

    /// PHY bring-up bounds: link polled back to back.
    pub const PHY: PhyConfig = PhyConfig::new()
        .with_link_retries(DEFAULT_LINK_RETRIES)
        .with_link_poll_delay_us(0);

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
