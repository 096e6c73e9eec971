//! Synchronization Support
//!
//! Critical-section based sharing of the driver between the main loop and
//! the interrupt handler.
//!
//! - [`CriticalSectionCell`] - ISR-safe interior mutability
//! - [`SharedEthoc`] - the driver behind a critical section, installed once
//!   bring-up succeeded
//!
//! # Feature Flags
//!
//! - `critical-section`: enables this module. The platform crate provides
//!   the critical-section implementation.
//!
//! # Example
//!
//! ```ignore
//! use oc_ethmac::sync::SharedEthocDefault;
//!
//! static ETH: SharedEthocDefault = SharedEthocDefault::new();
//!
//! fn main() {
//!     let eth = Ethoc::new(regs, &windows, &mut alloc, config, &mut delay).unwrap();
//!     ETH.install(eth);
//! }
//!
//! #[interrupt]
//! fn ETH_IRQ() {
//!     ETH.handle_interrupt(&mut UPLINK, &mut || plic_complete(22));
//! }
//! ```

mod primitives;
mod shared;

pub use primitives::CriticalSectionCell;
pub use shared::{SharedEthoc, SharedEthocDefault, SharedEthocSmall};
