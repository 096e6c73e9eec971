//! Ethernet PHY bring-up
//!
//! The PHY is reached only through the [`MiiBus`](crate::hal::MiiBus)
//! trait, so the state machine runs unchanged against the real management
//! interface or a mock.
//!
//! # Example
//!
//! ```ignore
//! use oc_ethmac::hal::MiiController;
//! use oc_ethmac::phy::PhyBringup;
//! use oc_ethmac::PhyConfig;
//!
//! let mut mii = MiiController::new(regs);
//! mii.set_phy_address(1);
//!
//! let mut phy = PhyBringup::new(&mut mii, &mut delay, PhyConfig::new());
//! let bmsr = phy.run()?;
//! ```

pub mod bringup;

pub use bringup::{PhyBringup, PhyState};

// Re-export the register definitions the state machine uses
pub use crate::internal::phy_regs::{bmcr, bmsr, micr, phy_reg};
