//! Buffer descriptor layout
//!
//! Each descriptor is two 32-bit words inside the register block: a control
//! word at offset 0 and the buffer pointer at offset 4. Ownership is decided
//! by a single bit: `RD` for TX (set = owned by the MAC), `E` for RX (set =
//! empty, owned by the MAC).

use crate::internal::register::Field;

/// Offset of the control word within a descriptor
pub const CONTROL_OFFSET: usize = 0;

/// Offset of the buffer pointer within a descriptor
pub const POINTER_OFFSET: usize = 4;

/// TX descriptor control word
pub mod txbd {
    use super::Field;

    /// Frame length
    pub const LEN: Field = Field::new(16, 16);
    /// Ready, owned by the MAC
    pub const RD: Field = Field::bit(15);
    /// Raise TXB/TXE when the frame is done
    pub const IRQ: Field = Field::bit(14);
    /// Last descriptor of the ring
    pub const WR: Field = Field::bit(13);
    /// Pad short frames
    pub const PAD: Field = Field::bit(12);
    /// Append CRC
    pub const CRC: Field = Field::bit(11);
    /// Completion status reported by the MAC
    #[cfg(test)]
    pub const STATUS: Field = Field::new(0, 9);
}

/// RX descriptor control word
pub mod rxbd {
    use super::Field;

    /// Received frame length
    pub const LEN: Field = Field::new(16, 16);
    /// Empty, owned by the MAC
    pub const E: Field = Field::bit(15);
    /// Raise RXB/RXE when a frame lands here
    pub const IRQ: Field = Field::bit(14);
    /// Last descriptor of the ring
    pub const WR: Field = Field::bit(13);
    /// Receive status reported by the MAC
    pub const STATUS: Field = Field::new(0, 9);
}

// =============================================================================
// TX Control Word
// =============================================================================

/// TX control word value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxControl(u32);

impl TxControl {
    /// Wrap a raw control word
    #[inline(always)]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw control word
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The MAC still owns the slot
    #[inline(always)]
    pub const fn is_ready(self) -> bool {
        txbd::RD.is_set(self.0)
    }

    /// Slot is the last of the ring
    #[cfg(test)]
    pub const fn is_wrap(self) -> bool {
        txbd::WR.is_set(self.0)
    }

    /// Frame length field
    #[cfg(test)]
    pub const fn len(self) -> usize {
        txbd::LEN.get(self.0) as usize
    }

    /// Same word with the wrap bit set
    #[inline(always)]
    pub const fn with_wrap(self) -> Self {
        Self(self.0 | txbd::WR.mask())
    }

    /// Control word handing a frame of `len` bytes to the MAC.
    ///
    /// Only the wrap bit survives from the previous contents; stale status
    /// and length are dropped.
    pub const fn submit(self, len: usize, crc: bool) -> Self {
        let mut raw = self.0 & txbd::WR.mask();
        raw |= txbd::PAD.mask() | txbd::RD.mask() | txbd::IRQ.mask();
        if crc {
            raw |= txbd::CRC.mask();
        }
        Self(txbd::LEN.set(raw, len as u32))
    }
}

// =============================================================================
// RX Control Word
// =============================================================================

/// RX control word value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxControl(u32);

impl RxControl {
    /// Wrap a raw control word
    #[inline(always)]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw control word
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The MAC owns the slot
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        rxbd::E.is_set(self.0)
    }

    /// Slot is the last of the ring
    #[cfg(test)]
    pub const fn is_wrap(self) -> bool {
        rxbd::WR.is_set(self.0)
    }

    /// Received length as reported by the MAC
    #[inline(always)]
    pub const fn len(self) -> usize {
        rxbd::LEN.get(self.0) as usize
    }

    /// Receive status bits
    #[inline(always)]
    pub const fn status(self) -> u32 {
        rxbd::STATUS.get(self.0)
    }

    /// Same word with the wrap bit set
    #[inline(always)]
    pub const fn with_wrap(self) -> Self {
        Self(self.0 | rxbd::WR.mask())
    }

    /// Same word with the interrupt enabled
    #[inline(always)]
    pub const fn with_irq(self) -> Self {
        Self(self.0 | rxbd::IRQ.mask())
    }

    /// Same word marked empty, handing the slot to the MAC
    #[inline(always)]
    pub const fn with_empty(self) -> Self {
        Self(self.0 | rxbd::E.mask())
    }

    /// Control word returning a consumed slot to the MAC.
    ///
    /// Keeps wrap and irq, clears length and status.
    pub const fn rearm(self) -> Self {
        Self(self.0 & (rxbd::WR.mask() | rxbd::IRQ.mask())).with_empty()
    }
}
