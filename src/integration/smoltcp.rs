//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! Implements `smoltcp::phy::Device` for [`Ethoc`], so the driver can be
//! handed straight to a smoltcp `Interface`.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use oc_ethmac::integration::ethernet_address;
//!
//! let mut eth = Ethoc::<64, 64>::new(regs, &windows, &mut alloc, config, &mut delay)?;
//!
//! let config = Config::new(ethernet_address(&eth).into());
//! let mut iface = Interface::new(config, &mut eth, smoltcp::time::Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(10, 0, 2, 15), 24)).unwrap();
//! });
//! ```
//!
//! # Borrowing
//!
//! smoltcp wants an RX and a TX token at the same time. The tokens borrow
//! the RX and TX rings separately, so no aliasing is involved: the RX token
//! holds the received frame in place and re-arms its slot when consumed,
//! the TX token lets smoltcp build its frame directly in the next free slot.

use smoltcp::phy::{Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

use crate::driver::ethoc::Ethoc;
use crate::internal::constants::{MAX_FRAME_SIZE, SLOT_SIZE};
use crate::internal::dma::{RxFrame, TxRing};

// =============================================================================
// RX Token
// =============================================================================

/// Receive token for smoltcp
///
/// Wraps the frame waiting in the RX ring; the slot goes back to the MAC
/// once the token is consumed or dropped.
pub struct EthocRxToken<'a> {
    frame: RxFrame<'a>,
}

impl smoltcp::phy::RxToken for EthocRxToken<'_> {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        self.frame.consume(f)
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token for smoltcp
///
/// The frame is built in place in the next TX slot.
pub struct EthocTxToken<'a> {
    tx: &'a mut TxRing,
}

impl smoltcp::phy::TxToken for EthocTxToken<'_> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(SLOT_SIZE);

        match self.tx.try_reserve() {
            Some(mut slot) => {
                let result = f(&mut slot.buffer_mut()[..len]);
                slot.commit(len);
                result
            }
            None => {
                // Only reachable through the token handed out with an RX token
                warn!("TX ring full, frame dropped");
                let mut scratch = [0u8; SLOT_SIZE];
                f(&mut scratch[..len])
            }
        }
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<const TX: usize, const RX: usize> Device for Ethoc<TX, RX> {
    type RxToken<'a>
        = EthocRxToken<'a>
    where
        Self: 'a;
    type TxToken<'a>
        = EthocTxToken<'a>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        let (tx, rx) = self.rings_mut();
        let frame = rx.next_frame()?;
        Some((EthocRxToken { frame }, EthocTxToken { tx }))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        let (tx, _) = self.rings_mut();
        // A failed reservation marks the ring stalled, so the uplink hears
        // about the freed slot under polled TX completion
        tx.try_reserve()?;
        Some(EthocTxToken { tx })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        // Ethernet header included
        caps.max_transmission_unit = MAX_FRAME_SIZE;
        // One frame per poll; the rings are drained by the interrupt path
        caps.max_burst_size = Some(1);
        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp EthernetAddress
pub fn ethernet_address<const TX: usize, const RX: usize>(
    ethoc: &Ethoc<TX, RX>,
) -> smoltcp::wire::EthernetAddress {
    smoltcp::wire::EthernetAddress(*ethoc.mac_address())
}
