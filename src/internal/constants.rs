//! Centralized Constants
//!
//! Single source of truth for sizes, retry bounds and default configuration
//! values used throughout the driver.
//!
//! # Note
//!
//! Register offsets and bit fields remain in `register/ethoc.rs` and the
//! descriptor module as they are specific to those hardware blocks.

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Size of one descriptor buffer slot in bytes
pub const SLOT_SIZE: usize = 0x800;

/// Number of buffer descriptors provided by the core (TX + RX)
pub const MAX_DESCRIPTORS: usize = 128;

/// Size of one buffer descriptor in bytes
pub const DESCRIPTOR_SIZE: usize = 8;

/// Size of the MMIO register block, descriptors included
pub const REGISTER_BLOCK_SIZE: usize = 0x400 + MAX_DESCRIPTORS * DESCRIPTOR_SIZE;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// Maximum frame handed to the MAC (MTU + header, CRC appended by hardware)
pub const MAX_FRAME_SIZE: usize = MTU + ETH_HEADER_SIZE;

/// Minimum Ethernet frame size (excluding CRC); shorter frames are padded
pub const MIN_FRAME_SIZE: usize = 60;

// =============================================================================
// MAC Defaults
// =============================================================================

/// MAC address length
pub const MAC_ADDR_LEN: usize = 6;

/// Default locally administered MAC address
pub const DEFAULT_MAC_ADDR: [u8; MAC_ADDR_LEN] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x03];

/// Back-to-back inter-packet gap for full duplex
pub const DEFAULT_IPGT: u8 = 0x15;

/// MDC clock divider
pub const DEFAULT_MII_CLOCK_DIVIDER: u8 = 10;

/// Largest PHY address on the management bus
pub const MAX_PHY_ADDR: u8 = 31;

// =============================================================================
// PHY Bring-up
// =============================================================================

/// Status reads waiting for the PHY reset bit to clear
pub const PHY_RESET_RETRIES: u32 = 20;

/// Default number of link-status polls
pub const DEFAULT_LINK_RETRIES: u32 = 200;

/// Link-status polls on boards that wait between polls
pub const SLOW_LINK_RETRIES: u32 = 100;

/// Delay between link polls on boards that wait, in microseconds
pub const LINK_POLL_DELAY_US: u32 = 100_000;

// =============================================================================
// Platform
// =============================================================================

/// Device-tree compatible string of the core
pub const ETHOC_COMPATIBLE: &str = "opencores,ethoc";
