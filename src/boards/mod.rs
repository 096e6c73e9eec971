//! Board presets.
//!
//! Each preset bundles the platform facts and the [`BoardPolicy`] a known
//! ethoc integration needs: register block, interrupt line, PHY port and
//! the defaults for PHY bring-up.
//!
//! # Supported Boards
//!
//! - [`QemuVirt`]: the ethoc model of the QEMU `virt`-style machines
//! - [`Migv`]: MiG-V boards with the core's SRAM exposed as an I/O window
//!
//! [`BoardPolicy`]: crate::BoardPolicy

pub mod migv;
pub mod qemu_virt;

pub use migv::Migv;
pub use qemu_virt::QemuVirt;
