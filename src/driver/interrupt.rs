//! Interrupt dispatch for the ethoc core.
//!
//! One call to [`Ethoc::handle_interrupt`] services everything the core
//! reported: it drains every received frame into the uplink, tells the
//! uplink when a TX slot freed up, clears the serviced source bits and
//! acknowledges the interrupt line.

use crate::driver::config::TxCompletion;
use crate::driver::ethoc::Ethoc;
use crate::internal::dma::{RxFrame, Transmit};
use crate::internal::register::ethoc::int_source;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt flags parsed from the interrupt source register.
///
/// # Example
///
/// ```ignore
/// let status = ethoc.handle_interrupt(&mut uplink, &mut || plic.complete(IRQ));
/// if status.busy {
///     // RX ring overran
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// TXB - a frame was transmitted
    pub tx_frame: bool,
    /// TXE - a frame was transmitted with an error
    pub tx_error: bool,
    /// RXB - a frame was received
    pub rx_frame: bool,
    /// RXE - a frame was received with an error
    pub rx_error: bool,
    /// BUSY - a frame was dropped for lack of an empty RX slot
    pub busy: bool,
}

impl InterruptStatus {
    /// Create from raw interrupt source register value
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self {
            tx_frame: int_source::TXB.is_set(raw),
            tx_error: int_source::TXE.is_set(raw),
            rx_frame: int_source::RXB.is_set(raw),
            rx_error: int_source::RXE.is_set(raw),
            busy: int_source::BUSY.is_set(raw),
        }
    }

    /// Convert to raw value for clearing (write-1-to-clear)
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.tx_frame {
            val |= int_source::TXB.mask();
        }
        if self.tx_error {
            val |= int_source::TXE.mask();
        }
        if self.rx_frame {
            val |= int_source::RXB.mask();
        }
        if self.rx_error {
            val |= int_source::RXE.mask();
        }
        if self.busy {
            val |= int_source::BUSY.mask();
        }
        val
    }

    /// Check if any interrupt occurred
    #[inline]
    pub fn any(&self) -> bool {
        self.tx_frame || self.tx_error || self.rx_frame || self.rx_error || self.busy
    }

    /// Check if any error occurred
    #[inline]
    pub fn has_error(&self) -> bool {
        self.tx_error || self.rx_error || self.busy
    }

    /// Received frames may be waiting
    #[inline]
    pub fn rx_pending(&self) -> bool {
        self.rx_frame || self.rx_error
    }

    /// A transmitted frame completed, successfully or not
    #[inline]
    pub fn tx_pending(&self) -> bool {
        self.tx_frame || self.tx_error
    }
}

// =============================================================================
// Uplink Interface
// =============================================================================

/// Consumer of the driver's events, typically the glue to a network stack.
pub trait Uplink {
    /// A frame arrived. The slot is re-armed when `frame` is dropped.
    fn frame_received(&mut self, frame: RxFrame<'_>);

    /// A TX slot may have been freed; frames can be resubmitted through `tx`.
    fn tx_slot_freed(&mut self, tx: &mut dyn Transmit);

    /// Link state changed
    fn link_changed(&mut self, _up: bool) {}
}

/// Acknowledgement of the interrupt line at the interrupt controller.
pub trait IrqAck {
    /// Signal that the interrupt was serviced
    fn ack(&mut self);
}

impl<F: FnMut()> IrqAck for F {
    fn ack(&mut self) {
        self();
    }
}

// =============================================================================
// Dispatch
// =============================================================================

impl<const TX: usize, const RX: usize> Ethoc<TX, RX> {
    /// Interrupt flags currently raised, without clearing them
    pub fn interrupt_status(&self) -> InterruptStatus {
        InterruptStatus::from_raw(self.read_interrupt_source())
    }

    /// Service one interrupt.
    ///
    /// Reads the source register once, drains all ready RX frames into
    /// `uplink`, reports a freed TX slot, writes the observed bits back to
    /// clear them and finally acknowledges the line through `irq`.
    pub fn handle_interrupt<U, I>(&mut self, uplink: &mut U, irq: &mut I) -> InterruptStatus
    where
        U: Uplink + ?Sized,
        I: IrqAck + ?Sized,
    {
        let raw = self.read_interrupt_source();
        let status = InterruptStatus::from_raw(raw);
        trace!("IRQ source {:#x}", raw);

        if status.rx_pending() {
            while let Some(frame) = self.rx.next_frame() {
                uplink.frame_received(frame);
            }
        }
        if status.busy {
            warn!("RX ring overrun, frame dropped");
        }

        let tx_freed = match self.policy.tx_completion {
            TxCompletion::Interrupt => {
                if status.tx_pending() {
                    self.tx.clear_stalled();
                }
                status.tx_pending()
            }
            TxCompletion::Polled => self.tx.take_freed(),
        };
        if tx_freed {
            uplink.tx_slot_freed(&mut self.tx);
        }

        self.clear_interrupt_source(raw);
        irq.ack();
        status
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
