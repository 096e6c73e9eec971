//! Descriptor rings
//!
//! The core keeps its buffer descriptors inside the register block: TX
//! descriptors first, RX descriptors right after them. Every descriptor
//! points at one fixed-size slot in the buffer pool.
//!
//! - [`ring::DescriptorRing`]: cursor arithmetic and descriptor word access
//! - [`TxRing`] / [`RxRing`]: ownership handoff for each direction
//! - [`RxFrame`]: a received frame that re-arms its slot on drop

mod descriptor;
mod ring;
mod rx;
mod tx;

use core::ptr::NonNull;

use crate::internal::constants::SLOT_SIZE;

#[cfg(test)]
pub use descriptor::{RxControl, TxControl, rxbd, txbd};
pub use rx::{RxFrame, RxRing};
pub use tx::{Transmit, TxRing, TxStatus};

/// Consecutive pool slots backing one ring.
#[derive(Debug, Clone, Copy)]
pub struct SlotBuffers {
    local: NonNull<u8>,
    device: u32,
    count: usize,
}

// SAFETY: the slots are owned by exactly one ring (see `new`)
unsafe impl Send for SlotBuffers {}

impl SlotBuffers {
    /// `count` slots of [`SLOT_SIZE`] bytes starting at `local` (CPU view)
    /// and `device` (DMA view).
    ///
    /// # Safety
    ///
    /// `local` must be valid for reads and writes of `count * SLOT_SIZE`
    /// bytes for the lifetime of the rings using it, the memory must not be
    /// accessed by anything but the MAC and this driver, and `device` must be
    /// the MAC's view of the same bytes with the whole range below 4 GiB.
    pub const unsafe fn new(local: NonNull<u8>, device: u32, count: usize) -> Self {
        Self {
            local,
            device,
            count,
        }
    }

    /// Number of slots
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Device-visible address of slot `index`
    pub const fn device_address(&self, index: usize) -> u32 {
        self.device + (index * SLOT_SIZE) as u32
    }

    /// Bytes of slot `index`.
    ///
    /// # Safety
    ///
    /// The descriptor for the slot must be owned by software.
    pub unsafe fn slot(&self, index: usize) -> &[u8] {
        debug_assert!(index < self.count);
        // SAFETY: construction guarantees the range is valid and exclusive
        unsafe {
            core::slice::from_raw_parts(self.local.as_ptr().add(index * SLOT_SIZE), SLOT_SIZE)
        }
    }

    /// Mutable bytes of slot `index`.
    ///
    /// # Safety
    ///
    /// The descriptor for the slot must be owned by software.
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        debug_assert!(index < self.count);
        // SAFETY: construction guarantees the range is valid and exclusive
        unsafe {
            core::slice::from_raw_parts_mut(self.local.as_ptr().add(index * SLOT_SIZE), SLOT_SIZE)
        }
    }
}
