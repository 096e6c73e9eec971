//! OpenCores ethoc register map
//!
//! Offsets are relative to the MMIO base. Every register is 32 bits wide.

use super::{Field, RegisterArray};

/// Mode register
pub mod moder {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x00;
    /// Receive enable
    pub const RXEN: Field = Field::bit(0);
    /// Transmit enable
    pub const TXEN: Field = Field::bit(1);
    /// No preamble
    pub const NOPRE: Field = Field::bit(2);
    /// Accept broadcast frames
    pub const BRO: Field = Field::bit(3);
    /// Promiscuous mode
    pub const PRO: Field = Field::bit(5);
    /// Minimum inter-frame gap for incoming frames disabled
    pub const IFG: Field = Field::bit(6);
    /// Excess defer enabled
    pub const EXDFREN: Field = Field::bit(9);
    /// Full duplex
    pub const FULLD: Field = Field::bit(10);
    /// MAC-level CRC generation
    pub const CRCEN: Field = Field::bit(13);
}

/// Interrupt source register (write 1 to clear)
pub mod int_source {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x04;
    /// Frame transmitted
    pub const TXB: Field = Field::bit(0);
    /// Transmit error
    pub const TXE: Field = Field::bit(1);
    /// Frame received
    pub const RXB: Field = Field::bit(2);
    /// Receive error
    pub const RXE: Field = Field::bit(3);
    /// Frame dropped, no empty RX descriptor
    pub const BUSY: Field = Field::bit(4);
}

/// Interrupt mask register, same layout as [`int_source`]
pub mod int_mask {
    /// Register offset
    pub const OFFSET: usize = 0x08;
}

/// Back-to-back inter-packet gap register
pub mod ipgt {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x0C;
    /// Gap value
    pub const IPGT: Field = Field::new(0, 7);
}

/// Number of TX descriptors; the remaining descriptors belong to RX
pub mod tx_bd_num {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x20;
    /// Descriptor count
    pub const NUM: Field = Field::new(0, 8);
}

/// MII mode register
pub mod miimoder {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x28;
    /// MDC clock divider
    pub const CLKDIV: Field = Field::new(0, 8);
    /// Suppress the MII preamble
    pub const MIINOPRE: Field = Field::bit(8);
}

/// MII command register
pub mod miicommand {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x2C;
    /// Read status
    pub const RSTAT: Field = Field::bit(1);
    /// Write control data
    pub const WCTRLDATA: Field = Field::bit(2);
}

/// MII address register
pub mod miiaddress {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x30;
    /// PHY address
    pub const FIAD: Field = Field::new(0, 5);
    /// PHY register address
    pub const RGAD: Field = Field::new(8, 5);
}

/// MII transmit data register
pub mod miitx_data {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x34;
    /// Data written to the PHY
    pub const CTRLDATA: Field = Field::new(0, 16);
}

/// MII receive data register
pub mod miirx_data {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x38;
    /// Data read from the PHY
    pub const PRSD: Field = Field::new(0, 16);
}

/// MII status register
pub mod miistatus {
    use super::Field;

    /// Register offset
    pub const OFFSET: usize = 0x3C;
    /// Transaction in progress
    pub const BUSY: Field = Field::bit(1);
}

/// Station MAC address, one byte per item, last byte first.
pub const MAC_ADDR: RegisterArray = RegisterArray::new(0x40, 8, 6);

/// Offset of the first buffer descriptor.
pub const DESCRIPTOR_BASE: usize = 0x400;
