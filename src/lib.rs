//! OpenCores Ethernet MAC Driver
//!
//! A `no_std`, `no_alloc` driver core for the OpenCores 10/100 Ethernet MAC
//! (`ethoc`), the core found in QEMU's ethoc model and on MiG-V boards.
//!
//! The MAC moves frames by DMA between its own buffer descriptors and a pool
//! of fixed 2048-byte slots. The driver owns that pool, brings the attached
//! PHY up over the MII management bus, and exposes a non-blocking
//! transmit/receive surface plus an interrupt dispatcher that pumps frames
//! into a network stack.
//!
//! # Architecture
//!
//! 1. **Driver Layer** ([`driver`]): [`Ethoc`] bring-up, data path and
//!    interrupt dispatch to an [`Uplink`]
//! 2. **PHY Layer** ([`phy`]): the bring-up state machine
//! 3. **HAL Layer** ([`hal`]): MII management bus and DMA buffer pool
//!
//! ## Descriptor Layout
//!
//! The core holds 128 eight-byte descriptors in its register block at
//! `0x400`. The first `TX` belong to the transmit ring, the next `RX` to the
//! receive ring; slot `i` of the pool backs descriptor `i`.
//!
//! # Features
//!
//! - `defmt`: Log through defmt and derive `defmt::Format` on public types
//! - `log`: Log through the `log` facade (ignored when `defmt` is enabled)
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable ISR-safe `SharedEthoc` wrapper
//!
//! # Example
//!
//! ```ignore
//! use oc_ethmac::boards::QemuVirt;
//! use oc_ethmac::unsafe_registers::Mmio;
//! use oc_ethmac::{Ethoc, IoMemWindow};
//!
//! let regs = unsafe { Mmio::new(QemuVirt::MMIO_BASE) };
//! let windows: [IoMemWindow<'_>; 0] = [];
//!
//! // Resets the PHY, waits for link, then enables TX and RX
//! let mut eth: Ethoc<64, 64> =
//!     Ethoc::new(regs, &windows, &mut platform_allocator, QemuVirt::config(), &mut delay)?;
//! eth.announce_link(&mut uplink);
//!
//! eth.transmit(&frame)?;
//!
//! // From the interrupt handler
//! eth.handle_interrupt(&mut uplink, &mut || plic.complete(QemuVirt::IRQ));
//! ```
//!
//! # Memory Requirements
//!
//! `(TX + RX) * 2048` bytes of DMA memory below 4 GiB: 256 KiB for the
//! default 64 + 64 rings.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels mirror the [lints] tables in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

// Logging macros; must come first so every module sees them
#[macro_use]
mod fmt;

pub mod boards;
pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{BoardPolicy, CrcPolicy, EthocConfig, PhyConfig, TxCompletion};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, PhyError, PhyResult,
    Result,
};
pub use driver::ethoc::{Ethoc, EthocDefault, EthocSmall};
pub use driver::interrupt::{InterruptStatus, IrqAck, Uplink};
pub use driver::{RxFrame, Transmit, TxStatus};

pub use hal::pool::{BufferPool, DmaAllocator, DmaRegion, IoMemWindow, NoAllocator, PoolSource};

// Re-export PHY types
pub use phy::{PhyBringup, PhyState};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::{SharedEthoc, SharedEthocDefault, SharedEthocSmall};

/// Low-level register accessors for advanced use.
///
/// These are intentionally separated from the primary facade. Most users
/// only need [`Mmio::new`] to hand the mapped register block to the driver.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Use only if you fully
/// understand the ethoc hardware and accept responsibility for correct
/// sequencing and synchronization.
pub mod unsafe_registers {
    pub use crate::internal::register::ethoc::{
        DESCRIPTOR_BASE, MAC_ADDR, int_mask, int_source, ipgt, miiaddress, miicommand, miimoder,
        miirx_data, miistatus, miitx_data, moder, tx_bd_num,
    };
    pub use crate::internal::register::{Field, Mmio, RegisterArray};
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // PHY bring-up
        DEFAULT_LINK_RETRIES,
        // MAC / MII defaults
        DEFAULT_IPGT,
        DEFAULT_MAC_ADDR,
        DEFAULT_MII_CLOCK_DIVIDER,
        // Descriptor table
        DESCRIPTOR_SIZE,
        ETH_HEADER_SIZE,
        // Platform matching
        ETHOC_COMPATIBLE,
        LINK_POLL_DELAY_US,
        MAC_ADDR_LEN,
        MAX_DESCRIPTORS,
        // Frame sizes
        MAX_FRAME_SIZE,
        MAX_PHY_ADDR,
        MIN_FRAME_SIZE,
        MTU,
        PHY_RESET_RETRIES,
        REGISTER_BLOCK_SIZE,
        SLOT_SIZE,
        SLOW_LINK_RETRIES,
    };
}
