//! Receive ring

use core::sync::atomic::{Ordering, fence};

use super::descriptor::RxControl;
use super::ring::DescriptorRing;
use super::SlotBuffers;
use crate::internal::constants::SLOT_SIZE;
use crate::internal::register::Mmio;

/// RX half of the descriptor table.
#[derive(Debug)]
pub struct RxRing {
    ring: DescriptorRing,
    buffers: SlotBuffers,
}

impl RxRing {
    /// Ring over `buffers.count()` descriptors starting at table index `first`
    pub const fn new(regs: Mmio, first: usize, buffers: SlotBuffers) -> Self {
        Self {
            ring: DescriptorRing::new(regs, first, buffers.count()),
            buffers,
        }
    }

    /// Clear slot `index`, point it at `addr` and hand it to the MAC.
    ///
    /// `E` is only set once the pointer is in place.
    pub fn setup_slot(&self, index: usize, addr: u32) {
        self.ring.set_control(index, 0);
        self.ring.set_pointer(index, 0);

        self.ring.set_pointer(index, addr);
        let armed = RxControl::default().with_irq();
        self.ring.set_control(index, armed.raw());
        self.ring.set_control(index, armed.with_empty().raw());
    }

    /// Set up every slot, then mark the last one as the wrap point
    pub fn init(&mut self) {
        for index in 0..self.ring.len() {
            self.setup_slot(index, self.buffers.device_address(index));
        }
        let last = self.ring.last_index();
        let wrapped = RxControl::from_raw(self.ring.control(last)).with_wrap();
        self.ring.set_control(last, wrapped.raw());
        self.ring.reset();
    }

    /// Index of the next slot to read
    pub const fn current_index(&self) -> usize {
        self.ring.current_index()
    }

    /// A frame is waiting at the cursor
    pub fn is_ready(&self) -> bool {
        !RxControl::from_raw(self.ring.current_control()).is_empty()
    }

    /// Length reported by the MAC for the slot at the cursor
    pub fn current_length(&self) -> usize {
        RxControl::from_raw(self.ring.current_control()).len()
    }

    /// Copy the frame at the cursor into `dst`, re-arm the slot and advance.
    ///
    /// Copies `min(reported length, dst.len())` bytes. Returns 0 and leaves
    /// the ring untouched when no frame is waiting.
    pub fn receive(&mut self, dst: &mut [u8]) -> usize {
        if !self.is_ready() {
            return 0;
        }
        let copied = self.copy_current(dst);
        self.release();
        copied
    }

    /// Hand out the frame at the cursor, if any
    pub fn next_frame(&mut self) -> Option<RxFrame<'_>> {
        if !self.is_ready() {
            return None;
        }
        Some(RxFrame { rx: self })
    }

    fn current_data(&self) -> &[u8] {
        // Length is read before the data; pairs with the MAC clearing E
        fence(Ordering::Acquire);
        let len = self.current_length().min(SLOT_SIZE);
        // SAFETY: E is clear, so software owns the slot until release()
        let slot = unsafe { self.buffers.slot(self.ring.current_index()) };
        &slot[..len]
    }

    fn copy_current(&self, dst: &mut [u8]) -> usize {
        let data = self.current_data();
        let n = data.len().min(dst.len());
        dst[..n].copy_from_slice(&data[..n]);
        n
    }

    /// Return the slot at the cursor to the MAC and advance
    fn release(&mut self) {
        let index = self.ring.current_index();
        let control = RxControl::from_raw(self.ring.control(index)).rearm();
        self.ring.set_control(index, control.raw());
        self.ring.advance();
    }
}

/// A received frame still sitting in its ring slot.
///
/// The slot goes back to the MAC when the frame is dropped, whether or not
/// its bytes were read.
#[derive(Debug)]
pub struct RxFrame<'a> {
    rx: &'a mut RxRing,
}

impl RxFrame<'_> {
    /// Frame length reported by the MAC, capped at the slot size
    pub fn len(&self) -> usize {
        self.rx.current_length().min(SLOT_SIZE)
    }

    /// True for a zero-length frame
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame bytes, borrowed from the ring
    pub fn data(&self) -> &[u8] {
        self.rx.current_data()
    }

    /// Receive status bits from the descriptor
    pub fn status(&self) -> u32 {
        RxControl::from_raw(self.rx.ring.current_control()).status()
    }

    /// Copy the frame into `dst` and release the slot.
    ///
    /// Returns the number of bytes copied, `min(len, dst.len())`.
    pub fn copy_into(self, dst: &mut [u8]) -> usize {
        self.rx.copy_current(dst)
    }

    /// Run `f` over the frame bytes and release the slot
    pub fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(self.data())
    }
}

impl Drop for RxFrame<'_> {
    fn drop(&mut self) {
        self.rx.release();
    }
}
