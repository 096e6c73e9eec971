//! Configuration types for the ethoc driver

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    DEFAULT_IPGT, DEFAULT_LINK_RETRIES, DEFAULT_MAC_ADDR, DEFAULT_MII_CLOCK_DIVIDER,
    MAX_PHY_ADDR, PHY_RESET_RETRIES,
};

/// Where the frame check sequence is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcPolicy {
    /// No CRC appended by the core
    None,
    /// CRC requested per frame in the TX descriptor
    #[default]
    PerFrame,
    /// CRC appended to every frame by the MAC (`MODER.CRCEN`)
    Mac,
}

impl CrcPolicy {
    /// Descriptor `CRC` bit to set on every submitted frame
    pub const fn per_frame(self) -> bool {
        matches!(self, Self::PerFrame)
    }

    /// `MODER.CRCEN` value
    pub const fn mac(self) -> bool {
        matches!(self, Self::Mac)
    }
}

/// How the uplink learns that a TX slot became free
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxCompletion {
    /// TX interrupts enabled; every TXB/TXE is forwarded
    #[default]
    Interrupt,
    /// TX interrupts masked; a stalled submission is reported once its slot
    /// is free, checked on every interrupt
    Polled,
}

/// Board-specific behaviour that differs between deployments of the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPolicy {
    /// CRC generation
    pub crc: CrcPolicy,
    /// TX completion reporting
    pub tx_completion: TxCompletion,
}

impl BoardPolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(crc: CrcPolicy, tx_completion: TxCompletion) -> Self {
        Self { crc, tx_completion }
    }
}

/// PHY bring-up bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    /// Status reads waiting for the reset bit to clear
    pub reset_retries: u32,
    /// Link-status polls before giving up
    pub link_retries: u32,
    /// Delay before each link poll in microseconds (0 = no delay)
    pub link_poll_delay_us: u32,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhyConfig {
    /// Defaults: 20 reset reads, 200 link polls, no delay
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reset_retries: PHY_RESET_RETRIES,
            link_retries: DEFAULT_LINK_RETRIES,
            link_poll_delay_us: 0,
        }
    }

    /// Set the reset retry bound
    #[must_use]
    pub const fn with_reset_retries(mut self, retries: u32) -> Self {
        self.reset_retries = retries;
        self
    }

    /// Set the link poll bound
    #[must_use]
    pub const fn with_link_retries(mut self, retries: u32) -> Self {
        self.link_retries = retries;
        self
    }

    /// Set the delay before each link poll
    #[must_use]
    pub const fn with_link_poll_delay_us(mut self, delay_us: u32) -> Self {
        self.link_poll_delay_us = delay_us;
        self
    }
}

/// Complete driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EthocConfig {
    /// MAC address (6 bytes)
    pub mac_address: [u8; 6],
    /// PHY address on the management bus (0-31)
    pub phy_address: u8,
    /// MDC clock divider
    pub mii_clock_divider: u8,
    /// Back-to-back inter-packet gap
    pub ipgt: u8,
    /// Receive all frames regardless of destination
    pub promiscuous: bool,
    /// Receive broadcast frames
    pub broadcast: bool,
    /// PHY bring-up bounds
    pub phy: PhyConfig,
    /// Board policy
    pub policy: BoardPolicy,
}

impl Default for EthocConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EthocConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            phy_address: 0,
            mii_clock_divider: DEFAULT_MII_CLOCK_DIVIDER,
            ipgt: DEFAULT_IPGT,
            promiscuous: true,
            broadcast: true,
            phy: PhyConfig::new(),
            policy: BoardPolicy::new(CrcPolicy::PerFrame, TxCompletion::Interrupt),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the MAC address
    ///
    /// If not set, the locally administered address 02:00:00:00:00:03 is used.
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; 6]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the PHY address
    #[must_use]
    pub const fn with_phy_address(mut self, addr: u8) -> Self {
        self.phy_address = addr;
        self
    }

    /// Set the MDC clock divider
    #[must_use]
    pub const fn with_mii_clock_divider(mut self, divider: u8) -> Self {
        self.mii_clock_divider = divider;
        self
    }

    /// Set the inter-packet gap
    #[must_use]
    pub const fn with_ipgt(mut self, ipgt: u8) -> Self {
        self.ipgt = ipgt;
        self
    }

    /// Enable or disable promiscuous mode
    #[must_use]
    pub const fn with_promiscuous(mut self, enabled: bool) -> Self {
        self.promiscuous = enabled;
        self
    }

    /// Enable or disable broadcast reception
    #[must_use]
    pub const fn with_broadcast(mut self, enabled: bool) -> Self {
        self.broadcast = enabled;
        self
    }

    /// Set the PHY bring-up bounds
    #[must_use]
    pub const fn with_phy(mut self, phy: PhyConfig) -> Self {
        self.phy = phy;
        self
    }

    /// Set the board policy
    #[must_use]
    pub const fn with_policy(mut self, policy: BoardPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the CRC policy
    #[must_use]
    pub const fn with_crc(mut self, crc: CrcPolicy) -> Self {
        self.policy.crc = crc;
        self
    }

    /// Set the TX completion policy
    #[must_use]
    pub const fn with_tx_completion(mut self, tx_completion: TxCompletion) -> Self {
        self.policy.tx_completion = tx_completion;
        self
    }

    /// Check parameters that would otherwise misprogram the core
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.phy_address > MAX_PHY_ADDR {
            return Err(ConfigError::InvalidPhyAddress);
        }
        if self.mac_address[0] & 0x01 != 0 {
            return Err(ConfigError::InvalidMacAddress);
        }
        if self.mii_clock_divider == 0 {
            return Err(ConfigError::InvalidClockDivider);
        }
        if self.phy.reset_retries == 0 || self.phy.link_retries == 0 {
            return Err(ConfigError::InvalidConfig);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
