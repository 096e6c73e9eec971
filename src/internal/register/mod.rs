//! Register model for the ethoc MMIO block
//!
//! Bit fields are plain values describing a shift and a width; reading and
//! writing them are pure functions over raw `u32` register contents. The
//! [`Mmio`] handle performs the actual volatile accesses.

pub mod ethoc;

use crate::internal::constants::REGISTER_BLOCK_SIZE;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Modify a register using a read-modify-write operation
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn modify_reg<F>(addr: usize, f: F)
where
    F: FnOnce(u32) -> u32,
{
    // SAFETY: caller guarantees address validity
    let value = unsafe { read_reg(addr) };
    unsafe { write_reg(addr, f(value)) }
}

// =============================================================================
// Bit Fields
// =============================================================================

/// A bit field inside a 32-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    shift: u32,
    width: u32,
}

impl Field {
    /// Field of `width` bits starting at bit `shift`.
    pub const fn new(shift: u32, width: u32) -> Self {
        assert!(width > 0 && shift + width <= 32, "field exceeds register width");
        Self { shift, width }
    }

    /// Single-bit field.
    pub const fn bit(shift: u32) -> Self {
        Self::new(shift, 1)
    }

    /// Bit position of the least significant bit.
    pub const fn shift(self) -> u32 {
        self.shift
    }

    /// Number of bits.
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Mask of the field in register position.
    pub const fn mask(self) -> u32 {
        if self.width == 32 {
            u32::MAX
        } else {
            ((1u32 << self.width) - 1) << self.shift
        }
    }

    /// Extract the field from a raw register value.
    pub const fn get(self, raw: u32) -> u32 {
        (raw & self.mask()) >> self.shift
    }

    /// Replace the field inside `raw`; excess bits of `value` are dropped.
    pub const fn set(self, raw: u32, value: u32) -> u32 {
        (raw & !self.mask()) | ((value << self.shift) & self.mask())
    }

    /// Field value in register position with all other bits clear.
    pub const fn bits(self, value: u32) -> u32 {
        self.set(0, value)
    }

    /// True if any bit of the field is set in `raw`.
    pub const fn is_set(self, raw: u32) -> bool {
        raw & self.mask() != 0
    }
}

/// Array of equally sized items packed into consecutive 32-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterArray {
    base: usize,
    item_width: u32,
    count: usize,
}

impl RegisterArray {
    /// `count` items of `item_width` bits starting at register offset `base`.
    pub const fn new(base: usize, item_width: u32, count: usize) -> Self {
        assert!(item_width > 0 && item_width <= 32 && 32 % item_width == 0);
        Self {
            base,
            item_width,
            count,
        }
    }

    /// Number of items.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Always false; arrays are declared with at least one item.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Register offset and field holding item `index`.
    pub const fn locate(&self, index: usize) -> Option<(usize, Field)> {
        if index >= self.count {
            return None;
        }
        let per_register = (32 / self.item_width) as usize;
        let offset = self.base + (index / per_register) * 4;
        let shift = (index % per_register) as u32 * self.item_width;
        Some((offset, Field::new(shift, self.item_width)))
    }
}

// =============================================================================
// MMIO Handle
// =============================================================================

/// Handle to one mapped ethoc register block.
///
/// Accesses are 32-bit, volatile and have no side effects beyond the
/// register touched. Ordering between accesses is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Wrap the register block mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be 4-byte aligned and point to a mapped register block of
    /// at least [`REGISTER_BLOCK_SIZE`] bytes that stays valid, and is not
    /// driven by anyone else, for as long as any copy of the handle lives.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the block.
    #[inline(always)]
    pub const fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    fn addr(&self, offset: usize) -> usize {
        debug_assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        debug_assert!(offset < REGISTER_BLOCK_SIZE, "register offset {offset:#x} out of block");
        self.base + offset
    }

    /// Read the register at `offset`.
    #[inline(always)]
    pub fn read(&self, offset: usize) -> u32 {
        // SAFETY: construction guarantees the block is mapped and aligned
        unsafe { read_reg(self.addr(offset)) }
    }

    /// Write the register at `offset`.
    #[inline(always)]
    pub fn write(&self, offset: usize, value: u32) {
        // SAFETY: construction guarantees the block is mapped and aligned
        unsafe { write_reg(self.addr(offset), value) }
    }

    /// Read-modify-write the register at `offset`.
    #[inline(always)]
    pub fn modify<F>(&self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        // SAFETY: construction guarantees the block is mapped and aligned
        unsafe { modify_reg(self.addr(offset), f) }
    }

    /// Read one field of the register at `offset`.
    #[inline(always)]
    pub fn read_field(&self, offset: usize, field: Field) -> u32 {
        field.get(self.read(offset))
    }

    /// Replace one field of the register at `offset`, keeping the others.
    #[inline(always)]
    pub fn write_field(&self, offset: usize, field: Field, value: u32) {
        self.modify(offset, |raw| field.set(raw, value));
    }

    /// Write one item of a register array, keeping neighbouring items.
    #[inline]
    pub fn write_array(&self, array: RegisterArray, index: usize, value: u32) {
        if let Some((offset, field)) = array.locate(index) {
            self.write_field(offset, field, value);
        }
    }

    /// Read one item of a register array (0 for an out-of-range index).
    #[inline]
    pub fn read_array(&self, array: RegisterArray, index: usize) -> u32 {
        match array.locate(index) {
            Some((offset, field)) => self.read_field(offset, field),
            None => 0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
