//! Hardware Abstraction Layer
//!
//! Higher-level access to the parts of the core the driver talks to outside
//! the descriptor rings.
//!
//! # Modules
//!
//! - [`mii`]: PHY management bus
//! - [`pool`]: DMA buffer pool selection
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod mii;
pub mod pool;

// Re-export commonly used types
pub use mii::{MiiBus, MiiController};
pub use pool::{BufferPool, DmaAllocator, DmaRegion, IoMemWindow, NoAllocator, PoolSource};
