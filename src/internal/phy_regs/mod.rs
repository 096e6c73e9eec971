//! PHY Register Definitions
//!
//! Clause 22 registers reached through the MII management interface, plus
//! the interrupt control register of the DP83848-family PHYs found next to
//! the core.

// =============================================================================
// Register Addresses
// =============================================================================

/// PHY register addresses
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// MII Interrupt Control Register (vendor specific)
    pub const MICR: u8 = 0x11;
}

// =============================================================================
// BMCR - Basic Mode Control Register (Register 0)
// =============================================================================

/// BMCR (Basic Mode Control Register) bits
pub mod bmcr {
    /// Soft reset - self-clearing
    pub const RESET: u16 = 1 << 15;
    /// Speed select (100 Mbps if set, 10 Mbps if clear)
    pub const SPEED_100: u16 = 1 << 13;
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Duplex mode (full duplex if set)
    pub const DUPLEX_FULL: u16 = 1 << 8;
}

// =============================================================================
// BMSR - Basic Mode Status Register (Register 1)
// =============================================================================

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// Link status (1 = link up, 0 = link down)
    pub const LINK_STATUS: u16 = 1 << 2;
}

// =============================================================================
// MICR - MII Interrupt Control Register (Register 0x11)
// =============================================================================

/// MICR bits
pub mod micr {
    /// Enable PHY interrupt output
    pub const INTEN: u16 = 1 << 0;
}
