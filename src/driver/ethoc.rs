//! The ethoc driver
//!
//! [`Ethoc`] owns one register block and one buffer pool. Construction runs
//! the whole bring-up (MAC, management bus, PHY, rings) and only hands out a
//! driver whose MAC is enabled; any failure leaves TX and RX disabled.

use embedded_hal::delay::DelayNs;

use crate::driver::config::{BoardPolicy, EthocConfig, TxCompletion};
use crate::driver::error::{DmaError, IoResult, Result};
use crate::driver::interrupt::Uplink;
use crate::hal::mii::MiiController;
use crate::hal::pool::{BufferPool, DmaAllocator, IoMemWindow};
use crate::internal::constants::{MAC_ADDR_LEN, MAX_DESCRIPTORS, SLOT_SIZE};
use crate::internal::dma::{RxFrame, RxRing, Transmit, TxRing, TxStatus};
use crate::internal::register::Mmio;
use crate::internal::register::ethoc::{MAC_ADDR, int_mask, int_source, ipgt, moder, tx_bd_num};
use crate::phy::PhyBringup;

/// Driver for one OpenCores ethoc MAC.
///
/// `TX` and `RX` are the ring depths; together they may use at most 128
/// descriptors.
#[derive(Debug)]
pub struct Ethoc<const TX: usize, const RX: usize> {
    regs: Mmio,
    pool: BufferPool,
    pub(super) tx: TxRing,
    pub(super) rx: RxRing,
    mac: [u8; MAC_ADDR_LEN],
    pub(super) policy: BoardPolicy,
    link_status: u16,
}

/// 64 TX + 64 RX slots, the whole descriptor table
pub type EthocDefault = Ethoc<64, 64>;

/// 16 TX + 16 RX slots
pub type EthocSmall = Ethoc<16, 16>;

impl<const TX: usize, const RX: usize> Ethoc<TX, RX> {
    const LAYOUT_OK: () = assert!(
        TX >= 1 && RX >= 1 && TX + RX <= MAX_DESCRIPTORS,
        "ring depths must be non-zero and share at most 128 descriptors"
    );

    /// Bytes of DMA memory the rings need
    pub const POOL_SIZE: usize = (TX + RX) * SLOT_SIZE;

    /// Select the buffer pool and bring the device up.
    ///
    /// `windows` are the I/O memory resources the platform declared for the
    /// device; the allocator is only asked if none of them fits.
    pub fn new<A, D>(
        regs: Mmio,
        windows: &[IoMemWindow<'_>],
        allocator: &mut A,
        config: EthocConfig,
        delay: &mut D,
    ) -> Result<Self>
    where
        A: DmaAllocator + ?Sized,
        D: DelayNs,
    {
        config.validate()?;
        let pool = BufferPool::select(windows, Self::POOL_SIZE, allocator)?;
        Self::with_pool(regs, pool, config, delay)
    }

    /// Bring the device up on an already selected pool.
    pub fn with_pool<D: DelayNs>(
        regs: Mmio,
        pool: BufferPool,
        config: EthocConfig,
        delay: &mut D,
    ) -> Result<Self> {
        let () = Self::LAYOUT_OK;

        config.validate()?;
        if pool.len() < Self::POOL_SIZE {
            return Err(DmaError::PoolTooSmall.into());
        }

        write_mac_address(&regs, &config.mac_address);
        info!("using MAC {:?}", config.mac_address);

        regs.write(moder::OFFSET, moder_value(&config));
        regs.write(int_mask::OFFSET, interrupt_mask(&config.policy));
        regs.write_field(ipgt::OFFSET, ipgt::IPGT, u32::from(config.ipgt));

        let mut mii = MiiController::new(regs);
        mii.set_phy_address(config.phy_address);
        mii.set_clock_divider(config.mii_clock_divider);
        debug!("MII clock divider {}", config.mii_clock_divider);

        let link_status = PhyBringup::new(&mut mii, &mut *delay, config.phy).run()?;

        let mut tx = TxRing::new(regs, pool.slots(0, TX), config.policy.crc.per_frame());
        let mut rx = RxRing::new(regs, TX, pool.slots(TX, RX));
        regs.write_field(tx_bd_num::OFFSET, tx_bd_num::NUM, TX as u32);
        tx.init();
        rx.init();
        debug!("TX/RX rings ready: {} + {} slots", TX, RX);

        regs.modify(moder::OFFSET, |raw| raw | moder::TXEN.mask() | moder::RXEN.mask());

        Ok(Self {
            regs,
            pool,
            tx,
            rx,
            mac: config.mac_address,
            policy: config.policy,
            link_status,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Station MAC address
    pub fn mac_address(&self) -> &[u8; MAC_ADDR_LEN] {
        &self.mac
    }

    /// PHY status register value observed at link-up
    pub fn link_status(&self) -> u16 {
        self.link_status
    }

    /// The buffer pool backing the rings
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Board policy in effect
    pub fn policy(&self) -> BoardPolicy {
        self.policy
    }

    /// Register block handle
    pub fn registers(&self) -> Mmio {
        self.regs
    }

    /// Index of the next TX slot
    pub fn tx_index(&self) -> usize {
        self.tx.current_index()
    }

    /// Index of the next RX slot
    pub fn rx_index(&self) -> usize {
        self.rx.current_index()
    }

    // =========================================================================
    // Data Path
    // =========================================================================

    /// Queue a frame; returns [`TxStatus::Retry`] without side effects if the
    /// ring is full. Never blocks.
    pub fn transmit(&mut self, frame: &[u8]) -> IoResult<TxStatus> {
        self.tx.transmit(frame)
    }

    /// The next TX slot is still owned by the MAC
    pub fn tx_busy(&self) -> bool {
        self.tx.is_busy()
    }

    /// A received frame is waiting
    pub fn receive_ready(&self) -> bool {
        self.rx.is_ready()
    }

    /// Length of the waiting frame as reported by the MAC
    pub fn receive_length(&self) -> usize {
        self.rx.current_length()
    }

    /// Copy the waiting frame into `dst` (truncating) and release its slot.
    ///
    /// Returns 0 without touching the ring when nothing is waiting.
    pub fn receive(&mut self, dst: &mut [u8]) -> usize {
        self.rx.receive(dst)
    }

    /// Borrow the waiting frame; its slot is released when the frame drops
    pub fn next_frame(&mut self) -> Option<RxFrame<'_>> {
        self.rx.next_frame()
    }

    /// Tell the uplink the link is up.
    ///
    /// Construction only succeeds with the link up, so call this once after
    /// the uplink is wired.
    pub fn announce_link<U: Uplink + ?Sized>(&self, uplink: &mut U) {
        uplink.link_changed(true);
    }

    /// Split borrow of both rings
    #[cfg(feature = "smoltcp")]
    pub(crate) fn rings_mut(&mut self) -> (&mut TxRing, &mut RxRing) {
        (&mut self.tx, &mut self.rx)
    }

    /// Raw interrupt source register
    pub(super) fn read_interrupt_source(&self) -> u32 {
        self.regs.read(int_source::OFFSET)
    }

    /// Write-1-to-clear the given interrupt source bits
    pub(super) fn clear_interrupt_source(&self, raw: u32) {
        self.regs.write(int_source::OFFSET, raw);
    }
}

impl<const TX: usize, const RX: usize> Transmit for Ethoc<TX, RX> {
    fn transmit(&mut self, frame: &[u8]) -> IoResult<TxStatus> {
        self.tx.transmit(frame)
    }
}

fn write_mac_address(regs: &Mmio, mac: &[u8; MAC_ADDR_LEN]) {
    // Item 0 holds the last byte
    for (index, byte) in mac.iter().rev().enumerate() {
        regs.write_array(MAC_ADDR, index, u32::from(*byte));
    }
}

fn moder_value(config: &EthocConfig) -> u32 {
    let mut raw = moder::IFG.mask()
        | moder::EXDFREN.mask()
        | moder::FULLD.mask()
        | moder::NOPRE.mask();
    raw = moder::BRO.set(raw, u32::from(config.broadcast));
    raw = moder::PRO.set(raw, u32::from(config.promiscuous));
    moder::CRCEN.set(raw, u32::from(config.policy.crc.mac()))
}

fn interrupt_mask(policy: &BoardPolicy) -> u32 {
    let mut raw = int_source::RXB.mask();
    if policy.tx_completion == TxCompletion::Interrupt {
        raw |= int_source::TXB.mask();
    }
    raw
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::driver::config::{CrcPolicy, PhyConfig};
    use crate::driver::error::{ConfigError, Error, IoError, PhyError};
    use crate::hal::pool::{NoAllocator, PoolSource};
    use crate::internal::dma::{RxControl, TxControl, txbd};
    use crate::internal::register::ethoc::{miimoder, miiaddress, miirx_data};
    use crate::test_utils::{DMA_DEVICE_BASE, MockAllocator, MockDelay, SimulatedDevice};

    const MAC: [u8; 6] = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];

    fn config() -> EthocConfig {
        EthocConfig::new().with_mac_address(MAC).with_phy_address(1)
    }

    fn bring_up<const TX: usize, const RX: usize>(
        dev: &SimulatedDevice,
        config: EthocConfig,
    ) -> Result<Ethoc<TX, RX>> {
        let mut alloc = MockAllocator::with_region(dev.region());
        Ethoc::new(dev.mmio(), &[], &mut alloc, config, &mut MockDelay::new())
    }

    #[test]
    fn pool_size_covers_both_rings() {
        assert_eq!(EthocDefault::POOL_SIZE, 128 * 2048);
        assert_eq!(Ethoc::<4, 8>::POOL_SIZE, 12 * 2048);
    }

    #[test]
    fn construction_programs_mac_in_reverse_byte_order() {
        let dev = SimulatedDevice::with_link_up();
        let eth = bring_up::<4, 4>(&dev, config()).unwrap();

        assert_eq!(eth.mac_address(), &MAC);
        assert_eq!(dev.reg(0x40), 0x2233_4455);
        assert_eq!(dev.reg(0x44), 0x0000_0211);
    }

    #[test]
    fn construction_programs_mode_and_enables_mac() {
        let dev = SimulatedDevice::with_link_up();
        bring_up::<4, 4>(&dev, config()).unwrap();

        let raw = dev.reg(moder::OFFSET);
        for field in [
            moder::RXEN,
            moder::TXEN,
            moder::NOPRE,
            moder::BRO,
            moder::PRO,
            moder::IFG,
            moder::EXDFREN,
            moder::FULLD,
        ] {
            assert!(field.is_set(raw), "bit {} not set", field.shift());
        }
        assert!(!moder::CRCEN.is_set(raw));
        assert_eq!(dev.reg(ipgt::OFFSET), 0x15);
        assert_eq!(dev.reg(tx_bd_num::OFFSET), 4);
    }

    #[test]
    fn construction_programs_mii_bus() {
        let dev = SimulatedDevice::with_link_up();
        bring_up::<4, 4>(&dev, config()).unwrap();

        assert_eq!(miiaddress::FIAD.get(dev.reg(miiaddress::OFFSET)), 1);
        assert_eq!(miimoder::CLKDIV.get(dev.reg(miimoder::OFFSET)), 10);
        // Suppression restored after the first reset read
        assert!(miimoder::MIINOPRE.is_set(dev.reg(miimoder::OFFSET)));
    }

    #[test]
    fn mac_crc_policy_sets_crcen() {
        let dev = SimulatedDevice::with_link_up();
        bring_up::<4, 4>(&dev, config().with_crc(CrcPolicy::Mac)).unwrap();
        assert!(moder::CRCEN.is_set(dev.reg(moder::OFFSET)));
    }

    #[test]
    fn interrupt_mask_follows_tx_completion_policy() {
        let dev = SimulatedDevice::with_link_up();
        bring_up::<4, 4>(&dev, config()).unwrap();
        assert_eq!(dev.reg(int_mask::OFFSET), 0b101);

        let dev = SimulatedDevice::with_link_up();
        bring_up::<4, 4>(&dev, config().with_tx_completion(TxCompletion::Polled)).unwrap();
        assert_eq!(dev.reg(int_mask::OFFSET), 0b100);
    }

    #[test]
    fn rings_are_laid_out_tx_first() {
        let dev = SimulatedDevice::with_link_up();
        bring_up::<4, 8>(&dev, config()).unwrap();

        for i in 0..4 {
            let ctl = TxControl::from_raw(dev.descriptor_control(i));
            assert!(!ctl.is_ready());
            assert_eq!(ctl.is_wrap(), i == 3);
        }
        for i in 0..8 {
            let ctl = RxControl::from_raw(dev.descriptor_control(4 + i));
            assert!(ctl.is_empty());
            assert_eq!(ctl.is_wrap(), i == 7);
            assert_eq!(
                dev.descriptor_pointer(4 + i),
                DMA_DEVICE_BASE + ((4 + i) * SLOT_SIZE) as u32
            );
        }
    }

    #[test]
    fn invalid_config_touches_nothing() {
        let dev = SimulatedDevice::with_link_up();
        let err = bring_up::<4, 4>(&dev, config().with_phy_address(40)).unwrap_err();
        assert_eq!(err, Error::Config(ConfigError::InvalidPhyAddress));
        assert_eq!(dev.reg(moder::OFFSET), 0);
    }

    #[test]
    fn pool_failure_is_fatal() {
        let dev = SimulatedDevice::with_link_up();
        let err = Ethoc::<4, 4>::new(
            dev.mmio(),
            &[],
            &mut NoAllocator,
            config(),
            &mut MockDelay::new(),
        )
        .unwrap_err();
        assert_eq!(err, Error::Dma(DmaError::PoolUnavailable));
    }

    #[test]
    fn undersized_pool_is_rejected() {
        let dev = SimulatedDevice::with_link_up();
        let mut region = dev.region();
        region.len = 2 * SLOT_SIZE;
        let pool = BufferPool::from_region(region, 2 * SLOT_SIZE, PoolSource::Allocated).unwrap();
        let err = Ethoc::<4, 4>::with_pool(dev.mmio(), pool, config(), &mut MockDelay::new())
            .unwrap_err();
        assert_eq!(err, Error::Dma(DmaError::PoolTooSmall));
    }

    #[test]
    fn phy_reset_failure_never_enables_mac() {
        let dev = SimulatedDevice::new();
        dev.set_reg(miirx_data::OFFSET, 0x8000); // reset bit stuck
        let err = bring_up::<4, 4>(&dev, config()).unwrap_err();

        assert_eq!(err, Error::Phy(PhyError::ResetTimeout));
        assert!(!moder::TXEN.is_set(dev.reg(moder::OFFSET)));
        assert!(!moder::RXEN.is_set(dev.reg(moder::OFFSET)));
        assert_eq!(dev.reg(tx_bd_num::OFFSET), 0);
    }

    #[test]
    fn phy_link_failure_never_enables_mac() {
        let dev = SimulatedDevice::new(); // reads 0: reset clears, link stays down
        let cfg = config().with_phy(PhyConfig::new().with_link_retries(5));
        let err = bring_up::<4, 4>(&dev, cfg).unwrap_err();

        assert_eq!(err, Error::Phy(PhyError::LinkTimeout));
        assert!(!moder::RXEN.is_set(dev.reg(moder::OFFSET)));
    }

    #[test]
    fn transmit_and_receive_through_driver() {
        let dev = SimulatedDevice::with_link_up();
        let mut eth = bring_up::<4, 4>(&dev, config()).unwrap();

        assert_eq!(eth.transmit(&[0xEE; 60]), Ok(TxStatus::Accepted));
        assert!(txbd::CRC.is_set(dev.descriptor_control(0)));
        assert_eq!(eth.tx_index(), 1);

        assert!(!eth.receive_ready());
        dev.deliver_rx(4, &[0x42; 90]);
        assert!(eth.receive_ready());
        assert_eq!(eth.receive_length(), 90);
        let mut buf = [0u8; 2048];
        assert_eq!(eth.receive(&mut buf), 90);
        assert_eq!(&buf[..90], &[0x42; 90][..]);
        assert_eq!(eth.rx_index(), 1);
    }

    #[test]
    fn receive_without_frame_keeps_ring_in_step() {
        let dev = SimulatedDevice::with_link_up();
        let mut eth = bring_up::<4, 4>(&dev, config()).unwrap();
        let armed = dev.descriptor_control(4);

        let mut buf = [0u8; 2048];
        assert!(!eth.receive_ready());
        assert_eq!(eth.receive(&mut buf), 0);
        assert_eq!(eth.rx_index(), 0);
        assert_eq!(dev.descriptor_control(4), armed);

        dev.deliver_rx(4, &[0x17; 64]);
        assert!(eth.receive_ready());
        assert_eq!(eth.receive(&mut buf), 64);
        assert_eq!(eth.rx_index(), 1);
    }

    #[test]
    fn transmit_rejects_bad_lengths() {
        let dev = SimulatedDevice::with_link_up();
        let mut eth = bring_up::<4, 4>(&dev, config()).unwrap();
        assert_eq!(eth.transmit(&[]), Err(IoError::InvalidLength));
        let big: Vec<u8> = (0..3000).map(|i| i as u8).collect();
        assert_eq!(eth.transmit(&big), Err(IoError::FrameTooLarge));
        assert_eq!(eth.tx_index(), 0);
    }

    #[test]
    fn end_to_end_full_rings_wrap() {
        let dev = SimulatedDevice::with_link_up();
        let mut eth = bring_up::<64, 64>(&dev, config()).unwrap();

        for len in [60usize, 1500, 64] {
            let frame: Vec<u8> = (0..len).map(|i| i as u8).collect();
            assert_eq!(eth.transmit(&frame), Ok(TxStatus::Accepted));
        }
        assert_eq!(eth.tx_index(), 3);
        assert_eq!(dev.dma_read(SLOT_SIZE, 1500)[1499], (1499 % 256) as u8);

        for i in 0..3 {
            dev.complete_tx(i);
        }
        for n in 0..64 {
            assert_eq!(eth.transmit(&[0u8; 64]), Ok(TxStatus::Accepted));
            dev.complete_tx((3 + n) % 64);
        }
        assert_eq!(eth.tx_index(), 3);
    }

    #[test]
    fn full_ring_returns_retry() {
        let dev = SimulatedDevice::with_link_up();
        let mut eth = bring_up::<2, 2>(&dev, config()).unwrap();
        eth.transmit(&[1; 60]).unwrap();
        eth.transmit(&[2; 60]).unwrap();
        assert!(eth.tx_busy());
        assert_eq!(eth.transmit(&[3; 60]), Ok(TxStatus::Retry));
        assert_eq!(eth.tx_index(), 0);
    }

    #[test]
    fn io_window_is_used_when_declared() {
        let dev = SimulatedDevice::with_link_up();
        let window = dev.window("opencores,ethoc", 0x1000_0000, Ethoc::<4, 4>::POOL_SIZE);
        let eth = Ethoc::<4, 4>::new(
            dev.mmio(),
            &[window],
            &mut NoAllocator,
            config(),
            &mut MockDelay::new(),
        )
        .unwrap();

        assert_eq!(eth.pool().source(), PoolSource::IoMemWindow);
        assert_eq!(dev.descriptor_pointer(0), 0x1000_0000);
    }

    #[test]
    fn link_status_recorded() {
        let dev = SimulatedDevice::with_link_up();
        let eth = bring_up::<4, 4>(&dev, config()).unwrap();
        assert_eq!(eth.link_status() & 0x4, 0x4);
    }
}
