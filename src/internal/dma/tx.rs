//! Transmit ring

use core::sync::atomic::{Ordering, fence};

use super::descriptor::TxControl;
use super::ring::DescriptorRing;
use super::SlotBuffers;
use crate::driver::error::{IoError, IoResult};
use crate::internal::constants::SLOT_SIZE;
use crate::internal::register::Mmio;

/// Outcome of a transmit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxStatus {
    /// Frame copied into the ring and handed to the MAC
    Accepted,
    /// The next slot is still owned by the MAC; nothing was changed
    Retry,
}

impl TxStatus {
    /// True if the frame was taken
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Sink for outgoing frames.
///
/// Implemented by the driver and handed to the uplink when a slot frees up,
/// so a stalled frame can be resubmitted from the notification.
pub trait Transmit {
    /// Queue one Ethernet frame (without CRC). Never blocks.
    fn transmit(&mut self, frame: &[u8]) -> IoResult<TxStatus>;
}

/// TX half of the descriptor table.
#[derive(Debug)]
pub struct TxRing {
    ring: DescriptorRing,
    buffers: SlotBuffers,
    crc: bool,
    /// A submission found the ring full and nobody was told about a free slot yet
    stalled: bool,
}

impl TxRing {
    /// Ring over the first `buffers.count()` descriptors
    pub const fn new(regs: Mmio, buffers: SlotBuffers, crc: bool) -> Self {
        Self {
            ring: DescriptorRing::new(regs, 0, buffers.count()),
            buffers,
            crc,
            stalled: false,
        }
    }

    /// Clear slot `index` and point it at `addr`
    pub fn setup_slot(&self, index: usize, addr: u32) {
        self.ring.set_control(index, 0);
        self.ring.set_pointer(index, addr);
    }

    /// Set up every slot, then mark the last one as the wrap point
    pub fn init(&mut self) {
        for index in 0..self.ring.len() {
            self.setup_slot(index, self.buffers.device_address(index));
        }
        let last = self.ring.last_index();
        let wrapped = TxControl::from_raw(self.ring.control(last)).with_wrap();
        self.ring.set_control(last, wrapped.raw());
        self.ring.reset();
        self.stalled = false;
    }

    /// Index of the next slot to fill
    pub const fn current_index(&self) -> usize {
        self.ring.current_index()
    }

    /// The next slot is still owned by the MAC
    pub fn is_busy(&self) -> bool {
        TxControl::from_raw(self.ring.current_control()).is_ready()
    }

    /// Borrow the next slot if software owns it.
    ///
    /// Records the stall when it doesn't, so the freed slot can be reported later.
    pub fn try_reserve(&mut self) -> Option<TxSlot<'_>> {
        if self.is_busy() {
            self.stalled = true;
            return None;
        }
        Some(TxSlot { tx: self })
    }

    /// True once after a stall if the next slot has been released since
    pub fn take_freed(&mut self) -> bool {
        if self.stalled && !self.is_busy() {
            self.stalled = false;
            return true;
        }
        false
    }

    /// Forget a pending stall
    pub fn clear_stalled(&mut self) {
        self.stalled = false;
    }

    /// A submission is waiting for a free slot
    #[cfg(test)]
    pub const fn is_stalled(&self) -> bool {
        self.stalled
    }
}

impl Transmit for TxRing {
    fn transmit(&mut self, frame: &[u8]) -> IoResult<TxStatus> {
        if frame.is_empty() {
            return Err(IoError::InvalidLength);
        }
        if frame.len() > SLOT_SIZE {
            return Err(IoError::FrameTooLarge);
        }

        let Some(mut slot) = self.try_reserve() else {
            return Ok(TxStatus::Retry);
        };
        slot.buffer_mut()[..frame.len()].copy_from_slice(frame);
        slot.commit(frame.len());
        Ok(TxStatus::Accepted)
    }
}

/// Software-owned TX slot at the cursor.
#[derive(Debug)]
pub struct TxSlot<'a> {
    tx: &'a mut TxRing,
}

impl TxSlot<'_> {
    /// Whole slot buffer
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        let index = self.tx.ring.current_index();
        // SAFETY: try_reserve checked that RD is clear, so the MAC is done with the slot
        unsafe { self.tx.buffers.slot_mut(index) }
    }

    /// Hand the first `len` bytes to the MAC and advance the cursor
    pub fn commit(self, len: usize) {
        let index = self.tx.ring.current_index();
        let control = TxControl::from_raw(self.tx.ring.control(index)).submit(len, self.tx.crc);

        // Frame bytes must be visible before the MAC sees RD
        fence(Ordering::Release);
        self.tx.ring.set_control(index, control.raw());
        trace!("tx slot {} len {}", index, len);

        self.tx.ring.advance();
        self.tx.stalled = false;
    }
}
