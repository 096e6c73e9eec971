//! Testing utilities and mock implementations
//!
//! This module provides a simulated ethoc register block plus mock PHY,
//! delay, allocator and uplink implementations for testing the driver on
//! the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use core::ptr::NonNull;
use std::boxed::Box;
use std::vec;
use std::vec::Vec;

use crate::driver::interrupt::{IrqAck, Uplink};
use crate::hal::mii::MiiBus;
use crate::hal::pool::{DmaAllocator, DmaRegion, IoMemWindow};
use crate::internal::constants::{MAX_DESCRIPTORS, REGISTER_BLOCK_SIZE, SLOT_SIZE};
use crate::internal::dma::{RxFrame, SlotBuffers, Transmit, TxStatus, rxbd, txbd};
use crate::internal::phy_regs::{bmcr, bmsr, phy_reg};
use crate::internal::register::Mmio;
use crate::internal::register::ethoc::{DESCRIPTOR_BASE, int_source, miirx_data};

/// Device address the simulated DMA memory appears at
pub const DMA_DEVICE_BASE: u32 = 0x4000_0000;

const DMA_MEMORY_SIZE: usize = MAX_DESCRIPTORS * SLOT_SIZE;

// =============================================================================
// Simulated Device
// =============================================================================

/// Register block and DMA memory of a simulated ethoc core
///
/// The register block is plain memory: writes stick, reads return the last
/// value written. Hardware behaviour (frame arrival, TX completion, latched
/// MII data) is injected explicitly by the test.
///
/// # Example
///
/// ```ignore
/// let dev = SimulatedDevice::with_link_up();
/// let mut rx = RxRing::new(dev.mmio(), 4, dev.slots(4, 4));
/// rx.init();
///
/// dev.deliver_rx(4, &[0xAA; 64]);
/// assert!(rx.is_ready());
/// ```
#[derive(Debug)]
pub struct SimulatedDevice {
    regs: NonNull<[u32]>,
    dma: NonNull<[u8]>,
}

impl SimulatedDevice {
    /// Zeroed registers and DMA memory; every MII read returns 0
    pub fn new() -> Self {
        let regs = Box::into_raw(vec![0u32; REGISTER_BLOCK_SIZE / 4].into_boxed_slice());
        let dma = Box::into_raw(vec![0u8; DMA_MEMORY_SIZE].into_boxed_slice());
        Self {
            regs: NonNull::new(regs).unwrap(),
            dma: NonNull::new(dma).unwrap(),
        }
    }

    /// MII reads return a link-up status with the reset bit clear
    pub fn with_link_up() -> Self {
        let dev = Self::new();
        dev.set_reg(miirx_data::OFFSET, u32::from(bmsr::LINK_STATUS));
        dev
    }

    fn reg_ptr(&self, offset: usize) -> *mut u32 {
        assert!(offset % 4 == 0 && offset < REGISTER_BLOCK_SIZE);
        unsafe { self.regs.cast::<u32>().as_ptr().add(offset / 4) }
    }

    fn dma_ptr(&self) -> *mut u8 {
        self.dma.cast::<u8>().as_ptr()
    }

    /// Register handle pointing at the simulated block
    pub fn mmio(&self) -> Mmio {
        unsafe { Mmio::new(self.regs.cast::<u32>().as_ptr() as usize) }
    }

    /// Read a register
    pub fn reg(&self, offset: usize) -> u32 {
        unsafe { self.reg_ptr(offset).read_volatile() }
    }

    /// Write a register behind the driver's back
    pub fn set_reg(&self, offset: usize, value: u32) {
        unsafe { self.reg_ptr(offset).write_volatile(value) }
    }

    /// Raise interrupt source bits
    pub fn raise(&self, bits: u32) {
        let raw = self.reg(int_source::OFFSET);
        self.set_reg(int_source::OFFSET, raw | bits);
    }

    // -------------------------------------------------------------------------
    // Descriptor Table
    // -------------------------------------------------------------------------

    /// Control word of descriptor `index` (absolute table index)
    pub fn descriptor_control(&self, index: usize) -> u32 {
        self.reg(DESCRIPTOR_BASE + index * 8)
    }

    /// Pointer word of descriptor `index` (absolute table index)
    pub fn descriptor_pointer(&self, index: usize) -> u32 {
        self.reg(DESCRIPTOR_BASE + index * 8 + 4)
    }

    /// Overwrite the control word of descriptor `index`
    pub fn set_descriptor_control(&self, index: usize, value: u32) {
        self.set_reg(DESCRIPTOR_BASE + index * 8, value);
    }

    /// The MAC finished sending TX descriptor `index`
    pub fn complete_tx(&self, index: usize) {
        let ctl = self.descriptor_control(index);
        self.set_descriptor_control(index, txbd::RD.set(ctl, 0));
    }

    /// The MAC stored `data` in RX descriptor `index` (absolute table index)
    /// and handed the slot back to software.
    ///
    /// The descriptor must point into memory handed out by
    /// [`region`](Self::region) or [`slots`](Self::slots).
    pub fn deliver_rx(&self, index: usize, data: &[u8]) {
        let offset = self.descriptor_pointer(index).wrapping_sub(DMA_DEVICE_BASE) as usize;
        assert!(data.len() <= SLOT_SIZE && offset + SLOT_SIZE <= DMA_MEMORY_SIZE);
        unsafe {
            core::ptr::copy_nonoverlapping(data.as_ptr(), self.dma_ptr().add(offset), data.len());
        }

        let mut ctl = self.descriptor_control(index);
        ctl = rxbd::LEN.set(ctl, data.len() as u32);
        ctl = rxbd::E.set(ctl, 0);
        self.set_descriptor_control(index, ctl);
    }

    // -------------------------------------------------------------------------
    // DMA Memory
    // -------------------------------------------------------------------------

    /// Slots `first..first + count` of the DMA memory
    pub fn slots(&self, first: usize, count: usize) -> SlotBuffers {
        assert!((first + count) * SLOT_SIZE <= DMA_MEMORY_SIZE);
        let offset = first * SLOT_SIZE;
        unsafe {
            let local = NonNull::new_unchecked(self.dma_ptr().add(offset));
            SlotBuffers::new(local, DMA_DEVICE_BASE + offset as u32, count)
        }
    }

    /// The whole DMA memory as an allocator region
    pub fn region(&self) -> DmaRegion {
        DmaRegion {
            local: self.dma.cast::<u8>(),
            device: u64::from(DMA_DEVICE_BASE),
            len: DMA_MEMORY_SIZE,
        }
    }

    /// The DMA memory declared as an I/O window at `phys_addr`
    pub fn window(
        &self,
        compatible: &'static str,
        phys_addr: u64,
        size: usize,
    ) -> IoMemWindow<'static> {
        assert!(size <= DMA_MEMORY_SIZE);
        unsafe { IoMemWindow::new(compatible, phys_addr, size, self.dma.cast::<u8>()) }
    }

    /// Copy bytes out of the DMA memory
    pub fn dma_read(&self, offset: usize, len: usize) -> Vec<u8> {
        assert!(offset + len <= DMA_MEMORY_SIZE);
        let mut out = vec![0u8; len];
        unsafe {
            core::ptr::copy_nonoverlapping(self.dma_ptr().add(offset), out.as_mut_ptr(), len);
        }
        out
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        unsafe {
            drop(Box::from_raw(self.regs.as_ptr()));
            drop(Box::from_raw(self.dma.as_ptr()));
        }
    }
}

// =============================================================================
// Mock Allocator
// =============================================================================

/// Allocator handing out one fixed region
#[derive(Debug, Default)]
pub struct MockAllocator {
    region: Option<DmaRegion>,
    calls: usize,
}

impl MockAllocator {
    /// Serve `region` for every request it is large enough for
    pub fn with_region(region: DmaRegion) -> Self {
        Self {
            region: Some(region),
            calls: 0,
        }
    }

    /// Number of allocation requests
    pub fn calls(&self) -> usize {
        self.calls
    }
}

// SAFETY: regions come from a SimulatedDevice that outlives the test
unsafe impl DmaAllocator for MockAllocator {
    fn alloc_uncached(&mut self, size: usize) -> Option<DmaRegion> {
        self.calls += 1;
        self.region.filter(|r| r.len >= size)
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += u64::from(ns);
    }
}

// =============================================================================
// Mock MII Bus
// =============================================================================

/// Mock PHY behind the management bus
///
/// Registers hold the last value written. BMCR reads report the reset bit
/// cleared from the configured read onwards, BMSR reads report link from
/// the configured read onwards.
///
/// # Example
///
/// ```ignore
/// let mut mii = MockMii::new().with_reset_clears_after(2).with_link_up_after(3);
/// PhyBringup::new(&mut mii, MockDelay::new(), PhyConfig::new()).run()?;
/// assert_eq!(mii.bmsr_reads(), 3);
/// ```
#[derive(Debug, Default)]
pub struct MockMii {
    registers: [u16; 32],
    reset_clears_after: Option<u32>,
    link_up_after: Option<u32>,
    bmcr_reads: u32,
    bmsr_reads: u32,
    writes: Vec<(u8, u16)>,
    preamble_log: Vec<bool>,
}

impl MockMii {
    /// PHY that never leaves reset and never gets link
    pub fn new() -> Self {
        Self::default()
    }

    /// The `n`-th BMCR read and all later ones see reset done
    pub fn with_reset_clears_after(mut self, n: u32) -> Self {
        self.reset_clears_after = Some(n);
        self
    }

    /// The `k`-th BMSR read and all later ones see link up
    pub fn with_link_up_after(mut self, k: u32) -> Self {
        self.link_up_after = Some(k);
        self
    }

    /// Preload a register
    pub fn with_register(mut self, reg: u8, value: u16) -> Self {
        self.registers[usize::from(reg)] = value;
        self
    }

    /// Every write, in order
    pub fn writes(&self) -> &[(u8, u16)] {
        &self.writes
    }

    /// Every preamble switch, in order
    pub fn preamble_log(&self) -> &[bool] {
        &self.preamble_log
    }

    /// Number of BMCR reads
    pub fn bmcr_reads(&self) -> u32 {
        self.bmcr_reads
    }

    /// Number of BMSR reads
    pub fn bmsr_reads(&self) -> u32 {
        self.bmsr_reads
    }
}

impl MiiBus for MockMii {
    fn read(&mut self, reg: u8) -> u16 {
        let stored = self.registers[usize::from(reg & 0x1F)];
        match reg {
            phy_reg::BMCR => {
                self.bmcr_reads += 1;
                match self.reset_clears_after {
                    Some(n) if self.bmcr_reads >= n => stored & !bmcr::RESET,
                    _ => stored,
                }
            }
            phy_reg::BMSR => {
                self.bmsr_reads += 1;
                match self.link_up_after {
                    Some(k) if self.bmsr_reads >= k => bmsr::LINK_STATUS,
                    _ => 0,
                }
            }
            _ => stored,
        }
    }

    fn write(&mut self, reg: u8, value: u16) {
        self.writes.push((reg, value));
        self.registers[usize::from(reg & 0x1F)] = value;
    }

    fn set_preamble(&mut self, enabled: bool) {
        self.preamble_log.push(enabled);
    }
}

// =============================================================================
// Mock Uplink
// =============================================================================

/// Records what the driver reports to the network stack
#[derive(Debug, Default)]
pub struct MockUplink {
    frames: Vec<Vec<u8>>,
    dropping: bool,
    dropped: usize,
    tx_freed: usize,
    pending: Option<Vec<u8>>,
    resubmitted: Vec<TxStatus>,
    link: Option<bool>,
}

impl MockUplink {
    /// Uplink keeping every frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop frames without reading them
    pub fn dropping(mut self) -> Self {
        self.dropping = true;
        self
    }

    /// Frame to resubmit on the next freed-slot notification
    pub fn with_pending(mut self, frame: &[u8]) -> Self {
        self.pending = Some(frame.to_vec());
        self
    }

    /// Frames received so far
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// Frames dropped unread
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Freed-slot notifications
    pub fn tx_freed(&self) -> usize {
        self.tx_freed
    }

    /// Results of resubmitted frames
    pub fn resubmitted(&self) -> &[TxStatus] {
        &self.resubmitted
    }

    /// Last reported link state
    pub fn link(&self) -> Option<bool> {
        self.link
    }
}

impl Uplink for MockUplink {
    fn frame_received(&mut self, frame: RxFrame<'_>) {
        if self.dropping {
            self.dropped += 1;
            return;
        }
        self.frames.push(frame.data().to_vec());
    }

    fn tx_slot_freed(&mut self, tx: &mut dyn Transmit) {
        self.tx_freed += 1;
        if let Some(frame) = self.pending.take() {
            self.resubmitted.push(tx.transmit(&frame).unwrap());
        }
    }

    fn link_changed(&mut self, up: bool) {
        self.link = Some(up);
    }
}

// =============================================================================
// Mock IRQ Line
// =============================================================================

/// Counts acknowledgements
#[derive(Debug, Default)]
pub struct MockIrq {
    acks: usize,
}

impl MockIrq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of acknowledgements
    pub fn acks(&self) -> usize {
        self.acks
    }
}

impl IrqAck for MockIrq {
    fn ack(&mut self) {
        self.acks += 1;
    }
}
