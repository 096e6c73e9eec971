//! Circular descriptor ring inside the register block.

use super::descriptor::{CONTROL_OFFSET, POINTER_OFFSET};
use crate::internal::constants::DESCRIPTOR_SIZE;
use crate::internal::register::Mmio;
use crate::internal::register::ethoc::DESCRIPTOR_BASE;

/// Window of `depth` consecutive descriptors with a wrapping cursor.
#[derive(Debug)]
pub struct DescriptorRing {
    regs: Mmio,
    /// Index of the first descriptor of this ring in the descriptor table
    first: usize,
    depth: usize,
    /// Current index for processing
    current: usize,
}

impl DescriptorRing {
    /// Ring over descriptors `first..first + depth`
    pub const fn new(regs: Mmio, first: usize, depth: usize) -> Self {
        Self {
            regs,
            first,
            depth,
            current: 0,
        }
    }

    /// Get the number of descriptors in the ring
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.depth
    }

    /// Get the current index
    #[inline(always)]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the descriptor carrying the wrap bit
    #[inline(always)]
    pub const fn last_index(&self) -> usize {
        self.depth - 1
    }

    /// Advance the current index by one, wrapping around
    #[inline(always)]
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.depth;
    }

    /// Reset the current index to 0
    #[inline(always)]
    pub fn reset(&mut self) {
        self.current = 0;
    }

    #[inline(always)]
    fn offset(&self, index: usize) -> usize {
        DESCRIPTOR_BASE + (self.first + index % self.depth) * DESCRIPTOR_SIZE
    }

    /// Control word of descriptor `index`
    #[inline(always)]
    pub fn control(&self, index: usize) -> u32 {
        self.regs.read(self.offset(index) + CONTROL_OFFSET)
    }

    /// Write the control word of descriptor `index`
    #[inline(always)]
    pub fn set_control(&self, index: usize, value: u32) {
        self.regs.write(self.offset(index) + CONTROL_OFFSET, value);
    }

    /// Write the buffer pointer of descriptor `index`
    #[inline(always)]
    pub fn set_pointer(&self, index: usize, value: u32) {
        self.regs.write(self.offset(index) + POINTER_OFFSET, value);
    }

    /// Control word at the cursor
    #[inline(always)]
    pub fn current_control(&self) -> u32 {
        self.control(self.current)
    }
}

// =============================================================================
// Tests
// =============================================================================
