//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): implements `smoltcp::phy::Device` for
//!   [`Ethoc`](crate::Ethoc) with RX/TX tokens borrowing the two rings.
//!   Requires the `smoltcp` feature.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface};
//! use oc_ethmac::integration::ethernet_address;
//!
//! let config = Config::new(ethernet_address(&eth).into());
//! let mut iface = Interface::new(config, &mut eth, smoltcp::time::Instant::ZERO);
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{EthocRxToken, EthocTxToken, ethernet_address};
