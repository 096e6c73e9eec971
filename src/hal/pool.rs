//! DMA buffer pool
//!
//! The rings need `(TX + RX) * 2048` bytes the MAC can reach with 32-bit
//! addresses. Some boards expose dedicated SRAM next to the core as an I/O
//! memory window; everything else gets uncached RAM from the platform.
//! The choice is made once, at construction, and never revisited.

use core::ptr::NonNull;

use crate::driver::error::{DmaError, DmaResult};
use crate::internal::constants::{ETHOC_COMPATIBLE, SLOT_SIZE};
use crate::internal::dma::SlotBuffers;

// =============================================================================
// Platform Resources
// =============================================================================

/// An I/O memory resource declared by the platform.
#[derive(Debug, Clone, Copy)]
pub struct IoMemWindow<'a> {
    compatible: &'a str,
    phys_addr: u64,
    size: usize,
    local: NonNull<u8>,
}

impl<'a> IoMemWindow<'a> {
    /// Describe a mapped window.
    ///
    /// # Safety
    ///
    /// `local` must be a CPU mapping of `size` bytes at physical address
    /// `phys_addr`, valid for reads and writes for the rest of the program and
    /// not used by anyone else once handed to the driver.
    pub const unsafe fn new(
        compatible: &'a str,
        phys_addr: u64,
        size: usize,
        local: NonNull<u8>,
    ) -> Self {
        Self {
            compatible,
            phys_addr,
            size,
            local,
        }
    }

    /// Compatible string of the device owning the window
    pub const fn compatible(&self) -> &'a str {
        self.compatible
    }

    /// Physical (device-visible) address
    pub const fn phys_addr(&self) -> u64 {
        self.phys_addr
    }

    /// Size in bytes
    pub const fn size(&self) -> usize {
        self.size
    }

    fn matches(&self, size: usize) -> bool {
        self.compatible == ETHOC_COMPATIBLE && self.size == size && self.phys_addr != 0
    }
}

/// A block of DMA-capable memory.
#[derive(Debug, Clone, Copy)]
pub struct DmaRegion {
    /// CPU address
    pub local: NonNull<u8>,
    /// Address as seen by the MAC
    pub device: u64,
    /// Size in bytes
    pub len: usize,
}

/// Source of uncached DMA memory.
///
/// # Safety
///
/// A returned region must be valid for reads and writes of `len` bytes for
/// the rest of the program, uncached (or coherent with the MAC), and not
/// handed out to anyone else.
pub unsafe trait DmaAllocator {
    /// Allocate `size` bytes, or `None` if the platform cannot
    fn alloc_uncached(&mut self, size: usize) -> Option<DmaRegion>;
}

/// Allocator for platforms without spare DMA memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAllocator;

// SAFETY: never returns a region
unsafe impl DmaAllocator for NoAllocator {
    fn alloc_uncached(&mut self, _size: usize) -> Option<DmaRegion> {
        None
    }
}

// =============================================================================
// Buffer Pool
// =============================================================================

/// Where the pool memory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoolSource {
    /// Zero-copy mapping of the core's I/O memory window
    IoMemWindow,
    /// Uncached RAM from the platform allocator
    Allocated,
}

/// Backing memory for every ring slot.
#[derive(Debug)]
pub struct BufferPool {
    local: NonNull<u8>,
    device: u32,
    len: usize,
    source: PoolSource,
}

// SAFETY: the pool exclusively owns its region (IoMemWindow / DmaAllocator contracts)
unsafe impl Send for BufferPool {}

impl BufferPool {
    /// Pick the pool for a device needing `size` bytes.
    ///
    /// Prefers the first window tagged `opencores,ethoc` with exactly `size`
    /// bytes and a non-zero physical address, and falls back to the allocator
    /// otherwise.
    pub fn select<A: DmaAllocator + ?Sized>(
        windows: &[IoMemWindow<'_>],
        size: usize,
        allocator: &mut A,
    ) -> DmaResult<Self> {
        if let Some(window) = windows.iter().find(|w| w.matches(size)) {
            info!("using I/O memory for DMA");
            let region = DmaRegion {
                local: window.local,
                device: window.phys_addr,
                len: window.size,
            };
            return Self::from_region(region, size, PoolSource::IoMemWindow);
        }

        info!("using RAM for DMA");
        let region = allocator
            .alloc_uncached(size)
            .ok_or(DmaError::PoolUnavailable)?;
        Self::from_region(region, size, PoolSource::Allocated)
    }

    /// Validate a region for `size` bytes of slots
    pub fn from_region(region: DmaRegion, size: usize, source: PoolSource) -> DmaResult<Self> {
        if region.len < size {
            return Err(DmaError::PoolTooSmall);
        }
        let end = region
            .device
            .checked_add(size as u64)
            .ok_or(DmaError::AddressOutOfRange)?;
        if end > 1u64 << 32 {
            return Err(DmaError::AddressOutOfRange);
        }

        debug!("DMA pool {:#x} ({} bytes)", region.device, region.len);
        Ok(Self {
            local: region.local,
            device: region.device as u32,
            len: region.len,
            source,
        })
    }

    /// CPU address of the pool
    pub const fn local_address(&self) -> NonNull<u8> {
        self.local
    }

    /// Address of the pool as seen by the MAC
    pub const fn device_address(&self) -> u32 {
        self.device
    }

    /// Size in bytes
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-sized pool
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Which strategy produced the pool
    pub const fn source(&self) -> PoolSource {
        self.source
    }

    /// Slots `first..first + count`
    pub(crate) fn slots(&self, first: usize, count: usize) -> SlotBuffers {
        debug_assert!((first + count) * SLOT_SIZE <= self.len);
        let offset = first * SLOT_SIZE;
        // SAFETY: offset lies inside the region, which is non-null
        let local = unsafe { NonNull::new_unchecked(self.local.as_ptr().add(offset)) };
        // SAFETY: the range was checked against the region length and the 32-bit limit
        unsafe { SlotBuffers::new(local, self.device + offset as u32, count) }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DMA_DEVICE_BASE, MockAllocator, SimulatedDevice};

    const SIZE: usize = 8 * SLOT_SIZE;

    #[test]
    fn prefers_matching_window() {
        let dev = SimulatedDevice::new();
        let window = dev.window(ETHOC_COMPATIBLE, 0x8000_0000, SIZE);
        let mut alloc = MockAllocator::with_region(dev.region());

        let pool = BufferPool::select(&[window], SIZE, &mut alloc).unwrap();
        assert_eq!(pool.source(), PoolSource::IoMemWindow);
        assert_eq!(pool.device_address(), 0x8000_0000);
        assert_eq!(alloc.calls(), 0);
    }

    #[test]
    fn skips_window_with_wrong_compatible() {
        let dev = SimulatedDevice::new();
        let window = dev.window("vendor,sram", 0x8000_0000, SIZE);
        let mut alloc = MockAllocator::with_region(dev.region());

        let pool = BufferPool::select(&[window], SIZE, &mut alloc).unwrap();
        assert_eq!(pool.source(), PoolSource::Allocated);
        assert_eq!(pool.device_address(), DMA_DEVICE_BASE);
        assert_eq!(alloc.calls(), 1);
    }

    #[test]
    fn skips_window_with_wrong_size_or_null_address() {
        let dev = SimulatedDevice::new();
        let windows = [
            dev.window(ETHOC_COMPATIBLE, 0x8000_0000, SIZE / 2),
            dev.window(ETHOC_COMPATIBLE, 0, SIZE),
        ];
        let mut alloc = MockAllocator::with_region(dev.region());

        let pool = BufferPool::select(&windows, SIZE, &mut alloc).unwrap();
        assert_eq!(pool.source(), PoolSource::Allocated);
    }

    #[test]
    fn first_matching_window_wins() {
        let dev = SimulatedDevice::new();
        let windows = [
            dev.window(ETHOC_COMPATIBLE, 0x8000_0000, SIZE),
            dev.window(ETHOC_COMPATIBLE, 0x9000_0000, SIZE),
        ];
        let pool = BufferPool::select(&windows, SIZE, &mut NoAllocator).unwrap();
        assert_eq!(pool.device_address(), 0x8000_0000);
    }

    #[test]
    fn fails_without_window_or_memory() {
        let err = BufferPool::select(&[], SIZE, &mut NoAllocator).unwrap_err();
        assert_eq!(err, DmaError::PoolUnavailable);
    }

    #[test]
    fn rejects_window_above_4gib() {
        let dev = SimulatedDevice::new();
        let window = dev.window(ETHOC_COMPATIBLE, 0x1_0000_0000, SIZE);
        let err = BufferPool::select(&[window], SIZE, &mut NoAllocator).unwrap_err();
        assert_eq!(err, DmaError::AddressOutOfRange);
    }

    #[test]
    fn rejects_region_crossing_4gib() {
        let dev = SimulatedDevice::new();
        let mut region = dev.region();
        region.device = 0xFFFF_F000;
        let err = BufferPool::from_region(region, SIZE, PoolSource::Allocated).unwrap_err();
        assert_eq!(err, DmaError::AddressOutOfRange);
    }

    #[test]
    fn accepts_region_ending_at_4gib() {
        let dev = SimulatedDevice::new();
        let mut region = dev.region();
        region.device = (1u64 << 32) - SIZE as u64;
        let pool = BufferPool::from_region(region, SIZE, PoolSource::Allocated).unwrap();
        assert_eq!(pool.device_address(), 0xFFFF_C000);
    }

    #[test]
    fn rejects_short_region() {
        let dev = SimulatedDevice::new();
        let mut region = dev.region();
        region.len = SIZE - 1;
        let err = BufferPool::from_region(region, SIZE, PoolSource::Allocated).unwrap_err();
        assert_eq!(err, DmaError::PoolTooSmall);
    }

    #[test]
    fn slots_are_offset_by_slot_size() {
        let dev = SimulatedDevice::new();
        let pool = BufferPool::from_region(dev.region(), SIZE, PoolSource::Allocated).unwrap();
        let slots = pool.slots(4, 4);
        assert_eq!(slots.count(), 4);
        assert_eq!(slots.device_address(0), DMA_DEVICE_BASE + 4 * SLOT_SIZE as u32);
        assert_eq!(slots.device_address(3), DMA_DEVICE_BASE + 7 * SLOT_SIZE as u32);
    }
}
