//! Core driver components for the ethoc MAC.
//!
//! - [`config`] - Configuration types, board policy and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`ethoc`] - The driver: bring-up, transmit and receive
//! - [`interrupt`] - Interrupt status and dispatch to the uplink
//!
//! # Example
//!
//! ```ignore
//! use oc_ethmac::driver::{CrcPolicy, EthocConfig};
//!
//! let config = EthocConfig::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01])
//!     .with_phy_address(1)
//!     .with_crc(CrcPolicy::Mac);
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod ethoc;
pub mod interrupt;

// Re-exports for convenience
pub use config::{BoardPolicy, CrcPolicy, EthocConfig, PhyConfig, TxCompletion};
pub use error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, PhyError, PhyResult,
    Result,
};
pub use ethoc::{Ethoc, EthocDefault, EthocSmall};
pub use interrupt::{InterruptStatus, IrqAck, Uplink};

pub use crate::internal::dma::{RxFrame, Transmit, TxStatus};
