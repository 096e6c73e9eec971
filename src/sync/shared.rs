//! ISR-safe driver wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::ethoc::Ethoc;
use crate::driver::interrupt::{InterruptStatus, IrqAck, Uplink};

/// ISR-safe driver slot.
///
/// Starts empty so it can live in a `static`; the driver is installed once
/// construction (and with it PHY bring-up) succeeded. All access goes
/// through `critical_section::with()`, disabling interrupts for the duration
/// of the closure.
///
/// # Example
///
/// ```ignore
/// static ETH: SharedEthoc<64, 64> = SharedEthoc::new();
///
/// ETH.install(eth);
/// ETH.with(|eth| eth.transmit(&frame));
/// ```
pub struct SharedEthoc<const TX: usize, const RX: usize> {
    inner: CriticalSectionCell<Option<Ethoc<TX, RX>>>,
}

impl<const TX: usize, const RX: usize> SharedEthoc<TX, RX> {
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Install a running driver, returning the one it replaces.
    pub fn install(&self, ethoc: Ethoc<TX, RX>) -> Option<Ethoc<TX, RX>> {
        self.inner.replace(Some(ethoc))
    }

    /// Remove the driver.
    pub fn take(&self) -> Option<Ethoc<TX, RX>> {
        self.inner.replace(None)
    }

    /// A driver is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Returns `None` if no driver is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Ethoc<TX, RX>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Like [`with`](Self::with), but also returns `None` if the driver is
    /// already borrowed further up the stack.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Ethoc<TX, RX>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }

    /// Service an interrupt from the handler.
    ///
    /// An interrupt arriving before installation is still acknowledged.
    pub fn handle_interrupt<U, I>(&self, uplink: &mut U, irq: &mut I) -> Option<InterruptStatus>
    where
        U: Uplink + ?Sized,
        I: IrqAck + ?Sized,
    {
        let status = self.with(|eth| eth.handle_interrupt(uplink, &mut *irq));
        if status.is_none() {
            irq.ack();
        }
        status
    }
}

impl<const TX: usize, const RX: usize> Default for SharedEthoc<TX, RX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const TX: usize, const RX: usize> core::fmt::Debug for SharedEthoc<TX, RX> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedEthoc")
            .field("installed", &self.is_installed())
            .finish()
    }
}

/// Shared driver with 64 TX + 64 RX slots.
pub type SharedEthocDefault = SharedEthoc<64, 64>;

/// Shared driver with 16 TX + 16 RX slots.
pub type SharedEthocSmall = SharedEthoc<16, 16>;
